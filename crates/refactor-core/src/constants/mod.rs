// ABOUTME: Application constants organized by domain for the resolution engine
// ABOUTME: Energy factors, unit conversion factors, and service identifiers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Energy density of macronutrients and the daily intake reference
pub mod energy {
    /// Kilocalories per gram of protein
    pub const KCAL_PER_GRAM_PROTEIN: i64 = 4;

    /// Kilocalories per gram of carbohydrate
    pub const KCAL_PER_GRAM_CARBOHYDRATE: i64 = 4;

    /// Kilocalories per gram of fat (total and saturated)
    pub const KCAL_PER_GRAM_FAT: i64 = 9;

    /// Kilocalories per gram of sugar
    pub const KCAL_PER_GRAM_SUGAR: i64 = 4;

    /// Reference daily energy intake in kilocalories
    pub const DAILY_CALORIES_KCAL: i64 = 2_000;
}

/// Unit conversion factors, pre-scaled by 1000
///
/// Volume factors are millilitres per unit; they become grams once multiplied
/// by an ingredient density expressed in grams per millilitre (also ×1000).
/// Weight factors are grams per unit.
pub mod units {
    /// Raw divisor that removes the quantity scale and the factor scale
    pub const WEIGHT_DIVISOR: i64 = 1_000;

    /// Raw divisor that removes the quantity, factor, and density scales
    pub const VOLUME_DIVISOR: i64 = 1_000_000;

    /// Divisor that removes the per-piece weight scale
    pub const COUNT_DIVISOR: i64 = 1_000;

    /// Grams per gram
    pub const GRAM: i64 = 1_000;
    /// Grams per kilogram
    pub const KILOGRAM: i64 = 1_000_000;
    /// Grams per avoirdupois ounce
    pub const OUNCE: i64 = 28_350;
    /// Grams per avoirdupois pound
    pub const POUND: i64 = 453_592;

    /// Millilitres per US cup
    pub const CUP: i64 = 236_588;
    /// Millilitres per US tablespoon
    pub const TABLESPOON: i64 = 14_787;
    /// Millilitres per US teaspoon
    pub const TEASPOON: i64 = 4_929;
    /// Millilitres per US fluid ounce
    pub const FLUID_OUNCE: i64 = 29_574;
    /// Millilitres per US pint
    pub const PINT: i64 = 473_176;
    /// Millilitres per US quart
    pub const QUART: i64 = 946_353;
    /// Millilitres per US gallon
    pub const GALLON: i64 = 3_785_410;
    /// Millilitres per millilitre
    pub const MILLILITER: i64 = 1_000;
    /// Millilitres per litre
    pub const LITER: i64 = 1_000_000;

    /// Reference mass for nutrient tables, in raw grams (100 g ×1000)
    pub const REFERENCE_MASS_RAW: i64 = 100_000;
}

/// Percentage scale used for derived ratios
pub mod percent {
    /// Multiplier that turns a ratio into a percentage
    pub const PERCENT: i64 = 100;
}

/// Service identifiers used in structured logging
pub mod service_names {
    /// Default service name for log records
    pub const RECIPE_REFACTOR: &str = "recipe-refactor";
}
