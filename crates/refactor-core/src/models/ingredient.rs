// ABOUTME: Ingredient facts and measurement units supplied by the parsing collaborator
// ABOUTME: UnitKind parsing from common spellings, IngredientFact as an immutable triple
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ResolutionError;
use crate::fixed::Milli;

/// Physical dimension of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitDimension {
    /// Mass; converts without density
    Weight,
    /// Volume; needs a density factor
    Volume,
    /// Whole items; needs a per-piece weight
    Count,
}

/// Ingredient measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// Grams (base unit)
    Gram,
    /// Kilograms
    Kilogram,
    /// Avoirdupois ounces
    Ounce,
    /// Avoirdupois pounds
    Pound,
    /// US cups
    Cup,
    /// US tablespoons
    Tablespoon,
    /// US teaspoons
    Teaspoon,
    /// US fluid ounces
    FluidOunce,
    /// US pints
    Pint,
    /// US quarts
    Quart,
    /// US gallons
    Gallon,
    /// Millilitres
    Milliliter,
    /// Litres
    Liter,
    /// Whole items (eggs, bananas, cloves)
    Piece,
}

impl UnitKind {
    /// Every supported unit
    pub const ALL: [Self; 14] = [
        Self::Gram,
        Self::Kilogram,
        Self::Ounce,
        Self::Pound,
        Self::Cup,
        Self::Tablespoon,
        Self::Teaspoon,
        Self::FluidOunce,
        Self::Pint,
        Self::Quart,
        Self::Gallon,
        Self::Milliliter,
        Self::Liter,
        Self::Piece,
    ];

    /// Physical dimension of this unit
    #[must_use]
    pub const fn dimension(&self) -> UnitDimension {
        match self {
            Self::Gram | Self::Kilogram | Self::Ounce | Self::Pound => UnitDimension::Weight,
            Self::Cup
            | Self::Tablespoon
            | Self::Teaspoon
            | Self::FluidOunce
            | Self::Pint
            | Self::Quart
            | Self::Gallon
            | Self::Milliliter
            | Self::Liter => UnitDimension::Volume,
            Self::Piece => UnitDimension::Count,
        }
    }

    /// Check if this unit is a volume measurement
    #[must_use]
    pub const fn is_volume(&self) -> bool {
        matches!(self.dimension(), UnitDimension::Volume)
    }

    /// Canonical snake-case name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gram => "gram",
            Self::Kilogram => "kilogram",
            Self::Ounce => "ounce",
            Self::Pound => "pound",
            Self::Cup => "cup",
            Self::Tablespoon => "tablespoon",
            Self::Teaspoon => "teaspoon",
            Self::FluidOunce => "fluid_ounce",
            Self::Pint => "pint",
            Self::Quart => "quart",
            Self::Gallon => "gallon",
            Self::Milliliter => "milliliter",
            Self::Liter => "liter",
            Self::Piece => "piece",
        }
    }

    /// Get the abbreviation for display
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Ounce => "oz",
            Self::Pound => "lb",
            Self::Cup => "cup",
            Self::Tablespoon => "tbsp",
            Self::Teaspoon => "tsp",
            Self::FluidOunce => "fl oz",
            Self::Pint => "pt",
            Self::Quart => "qt",
            Self::Gallon => "gal",
            Self::Milliliter => "ml",
            Self::Liter => "l",
            Self::Piece => "pc",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitKind {
    type Err = ResolutionError;

    /// Parse a unit from its name, plural, or common abbreviation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['.', '-', '_'], " ");
        let unit = match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "g" | "gr" | "gram" | "grams" | "gramme" | "grammes" => Self::Gram,
            "kg" | "kgs" | "kilo" | "kilos" | "kilogram" | "kilograms" => Self::Kilogram,
            "oz" | "ounce" | "ounces" => Self::Ounce,
            "lb" | "lbs" | "pound" | "pounds" => Self::Pound,
            "c" | "cup" | "cups" => Self::Cup,
            "tbsp" | "tbs" | "tbl" | "tablespoon" | "tablespoons" => Self::Tablespoon,
            "tsp" | "teaspoon" | "teaspoons" => Self::Teaspoon,
            "fl oz" | "floz" | "fluid ounce" | "fluid ounces" => Self::FluidOunce,
            "pt" | "pint" | "pints" => Self::Pint,
            "qt" | "quart" | "quarts" => Self::Quart,
            "gal" | "gallon" | "gallons" => Self::Gallon,
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Self::Milliliter
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Self::Liter,
            "pc" | "pcs" | "piece" | "pieces" | "whole" | "each" | "ea" => Self::Piece,
            _ => return Err(ResolutionError::unsupported_unit(s.trim())),
        };
        Ok(unit)
    }
}

/// One parsed ingredient line: name, quantity, optional unit
///
/// Produced by the external parser. `unit = None` means the quantity is
/// already in grams. Fields are private so a fact cannot change after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientFact {
    name: String,
    quantity: Milli,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<UnitKind>,
}

impl IngredientFact {
    /// Create a fact from a parsed triple
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: Milli, unit: Option<UnitKind>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
        }
    }

    /// Create a fact already measured in grams
    #[must_use]
    pub fn in_grams(name: impl Into<String>, grams: Milli) -> Self {
        Self::new(name, grams, None)
    }

    /// Ingredient name as parsed
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quantity in the fact's unit
    #[must_use]
    pub const fn quantity(&self) -> Milli {
        self.quantity
    }

    /// Unit, or `None` for plain grams
    #[must_use]
    pub const fn unit(&self) -> Option<UnitKind> {
        self.unit
    }

    /// True when `name` names this ingredient, ignoring case and surrounding whitespace
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Case-insensitive substring test against the ingredient name
    #[must_use]
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

impl fmt::Display for IngredientFact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit.map_or("g", |unit| unit.abbreviation());
        write!(f, "{} {} {unit}", self.name, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_parsing_accepts_abbreviations() {
        assert_eq!("cups".parse::<UnitKind>().unwrap(), UnitKind::Cup);
        assert_eq!("Tbsp.".parse::<UnitKind>().unwrap(), UnitKind::Tablespoon);
        assert_eq!("fl. oz".parse::<UnitKind>().unwrap(), UnitKind::FluidOunce);
        assert_eq!("fluid_ounce".parse::<UnitKind>().unwrap(), UnitKind::FluidOunce);
        assert_eq!("LBS".parse::<UnitKind>().unwrap(), UnitKind::Pound);
    }

    #[test]
    fn test_unknown_unit_is_unsupported() {
        let err = "pinch".parse::<UnitKind>().unwrap_err();
        assert_eq!(err, ResolutionError::unsupported_unit("pinch"));
    }

    #[test]
    fn test_name_contains_ignores_case() {
        let fact = IngredientFact::in_grams("Whole Milk", Milli::from_int(250));
        assert!(fact.name_contains("milk"));
        assert!(fact.name_contains("MILK"));
        assert!(!fact.name_contains("peanut"));
    }

    #[test]
    fn test_is_named_folds_unicode_case() {
        let fact = IngredientFact::new("CRÈME fraîche", Milli::from_int(2), Some(UnitKind::Tablespoon));
        assert!(fact.is_named(" crème FRAÎCHE "));
        assert!(!fact.is_named("crème"));
        assert_eq!(fact.quantity(), Milli::from_int(2));
        assert_eq!(fact.unit(), Some(UnitKind::Tablespoon));
        assert_eq!(fact.to_string(), "CRÈME fraîche 2.000 tbsp");
    }
}
