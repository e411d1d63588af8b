// ABOUTME: Unit conversion for recipe ingredients into grams
// ABOUTME: Weight factors, volume factors times ingredient density, and per-piece weights
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unit Conversion
//!
//! Turns `(ingredient, quantity, unit)` into grams. Weight units use a fixed
//! factor. Volume units multiply the quantity by millilitres-per-unit and the
//! ingredient's grams-per-millilitre, then divide once. Count units use a
//! grams-per-piece entry. There is no default density: an unknown ingredient
//! on a volume or count unit is an error.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use refactor_core::constants::units;
use refactor_core::errors::ResolutionError;
use refactor_core::fixed::Milli;
use refactor_core::models::{UnitDimension, UnitKind};
use tracing::debug;

/// Density information for an ingredient
///
/// `grams_per_ml` backs volume conversions and `grams_per_piece` backs count
/// conversions. Both are fixed-point thousandths (water is `1.000` g/ml).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityEntry {
    /// Grams per millilitre
    pub grams_per_ml: Option<Milli>,
    /// Grams per whole piece
    pub grams_per_piece: Option<Milli>,
}

impl DensityEntry {
    /// Density for a liquid or powder, in raw thousandths of g/ml
    #[must_use]
    pub const fn liquid(grams_per_ml_raw: i64) -> Self {
        Self {
            grams_per_ml: Some(Milli::from_raw(grams_per_ml_raw)),
            grams_per_piece: None,
        }
    }

    /// Weight of one piece, in raw thousandths of a gram
    #[must_use]
    pub const fn countable(grams_per_piece_raw: i64) -> Self {
        Self {
            grams_per_ml: None,
            grams_per_piece: Some(Milli::from_raw(grams_per_piece_raw)),
        }
    }

    /// Ingredient measurable both by volume and by piece
    #[must_use]
    pub const fn both(grams_per_ml_raw: i64, grams_per_piece_raw: i64) -> Self {
        Self {
            grams_per_ml: Some(Milli::from_raw(grams_per_ml_raw)),
            grams_per_piece: Some(Milli::from_raw(grams_per_piece_raw)),
        }
    }
}

/// Density table keyed by lowercase ingredient name
pub type DensityTable = HashMap<String, DensityEntry>;

/// Built-in densities, with aliases expanded into their own keys
static INGREDIENT_DENSITIES: LazyLock<DensityTable> = LazyLock::new(|| {
    let entries: &[(&str, &[&str], DensityEntry)] = &[
        // === Baking staples ===
        (
            "flour",
            &["all-purpose flour", "all purpose flour", "wheat flour"],
            DensityEntry::liquid(530),
        ),
        (
            "sugar",
            &["white sugar", "granulated sugar"],
            DensityEntry::liquid(850),
        ),
        ("brown sugar", &[], DensityEntry::liquid(830)),
        ("powdered sugar", &["icing sugar"], DensityEntry::liquid(560)),
        ("salt", &["table salt"], DensityEntry::liquid(1200)),
        ("baking powder", &[], DensityEntry::liquid(900)),
        ("baking soda", &[], DensityEntry::liquid(920)),
        ("cornstarch", &["corn starch"], DensityEntry::liquid(540)),
        ("cocoa powder", &["cocoa"], DensityEntry::liquid(520)),
        ("rolled oats", &["oats"], DensityEntry::liquid(410)),
        ("honey", &[], DensityEntry::liquid(1420)),
        ("maple syrup", &[], DensityEntry::liquid(1320)),
        // === Dairy ===
        (
            "milk",
            &["whole milk", "skim milk", "low fat milk"],
            DensityEntry::liquid(1030),
        ),
        (
            "butter",
            &["unsalted butter", "salted butter"],
            DensityEntry::liquid(960),
        ),
        (
            "cheese",
            &["cheddar cheese", "shredded cheese"],
            DensityEntry::liquid(1130),
        ),
        ("cream", &["heavy cream", "whipping cream"], DensityEntry::liquid(1000)),
        ("sour cream", &[], DensityEntry::liquid(1030)),
        (
            "yogurt",
            &["plain yogurt", "greek yogurt"],
            DensityEntry::liquid(1030),
        ),
        // === Liquids and fats ===
        ("water", &[], DensityEntry::liquid(1000)),
        ("oil", &["vegetable oil", "canola oil"], DensityEntry::liquid(920)),
        ("olive oil", &[], DensityEntry::liquid(910)),
        ("vinegar", &[], DensityEntry::liquid(1010)),
        ("lemon juice", &[], DensityEntry::liquid(1030)),
        ("soy sauce", &[], DensityEntry::liquid(1150)),
        ("chicken broth", &["chicken stock"], DensityEntry::liquid(1010)),
        ("coconut milk", &[], DensityEntry::liquid(970)),
        ("almond milk", &[], DensityEntry::liquid(1030)),
        ("peanut butter", &[], DensityEntry::liquid(1090)),
        // === Grains ===
        ("rice", &["white rice", "brown rice"], DensityEntry::liquid(780)),
        // === Countable produce and proteins ===
        ("egg", &["eggs", "large egg"], DensityEntry::both(1030, 50_000)),
        ("banana", &["bananas"], DensityEntry::countable(118_000)),
        ("apple", &["apples"], DensityEntry::countable(182_000)),
        ("onion", &["onions"], DensityEntry::countable(110_000)),
        ("garlic", &["garlic clove", "garlic cloves"], DensityEntry::countable(5_000)),
        ("tomato", &["tomatoes"], DensityEntry::countable(123_000)),
        ("potato", &["potatoes"], DensityEntry::countable(213_000)),
        ("carrot", &["carrots"], DensityEntry::countable(61_000)),
        ("lemon", &["lemons"], DensityEntry::countable(84_000)),
    ];

    let mut m = HashMap::new();
    for (name, aliases, density) in entries {
        m.insert((*name).to_owned(), *density);
        for alias in *aliases {
            m.insert((*alias).to_owned(), *density);
        }
    }
    m
});

/// Normalize an ingredient name for table lookup
fn table_key(ingredient_name: &str) -> String {
    ingredient_name.trim().to_lowercase()
}

/// Conversion factor for a unit, pre-scaled by 1000
///
/// Grams per unit for weight units, millilitres per unit for volume units.
/// Count units have no fixed factor.
#[must_use]
pub const fn unit_factor(unit: UnitKind) -> Option<i64> {
    match unit {
        UnitKind::Gram => Some(units::GRAM),
        UnitKind::Kilogram => Some(units::KILOGRAM),
        UnitKind::Ounce => Some(units::OUNCE),
        UnitKind::Pound => Some(units::POUND),
        UnitKind::Cup => Some(units::CUP),
        UnitKind::Tablespoon => Some(units::TABLESPOON),
        UnitKind::Teaspoon => Some(units::TEASPOON),
        UnitKind::FluidOunce => Some(units::FLUID_OUNCE),
        UnitKind::Pint => Some(units::PINT),
        UnitKind::Quart => Some(units::QUART),
        UnitKind::Gallon => Some(units::GALLON),
        UnitKind::Milliliter => Some(units::MILLILITER),
        UnitKind::Liter => Some(units::LITER),
        UnitKind::Piece => None,
    }
}

/// Converts ingredient quantities to grams against a density table
///
/// The default converter borrows the built-in table; a custom table can be
/// supplied with [`UnitConverter::with_densities`]. Converters are immutable
/// and can be shared across threads.
#[derive(Debug, Clone)]
pub struct UnitConverter {
    densities: Cow<'static, DensityTable>,
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self {
            densities: Cow::Borrowed(&*INGREDIENT_DENSITIES),
        }
    }
}

impl UnitConverter {
    /// Converter backed by the built-in density table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter backed by a caller-supplied table
    ///
    /// Keys are matched case-insensitively after trimming.
    #[must_use]
    pub fn with_densities<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, DensityEntry)>,
        S: AsRef<str>,
    {
        let table = entries
            .into_iter()
            .map(|(name, density)| (table_key(name.as_ref()), density))
            .collect();
        Self {
            densities: Cow::Owned(table),
        }
    }

    /// Look up the density entry for an ingredient (case-insensitive exact match)
    #[must_use]
    pub fn density(&self, ingredient_name: &str) -> Option<&DensityEntry> {
        self.densities.get(&table_key(ingredient_name))
    }

    /// Check if an ingredient has a known density entry
    #[must_use]
    pub fn has_density(&self, ingredient_name: &str) -> bool {
        self.density(ingredient_name).is_some()
    }

    /// All ingredient names in the table, sorted
    #[must_use]
    pub fn known_ingredients(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.densities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Convert an ingredient quantity to grams
    ///
    /// `unit = None` means the quantity is already grams and is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `MissingDensity` for a volume or count unit on an ingredient
    /// with no matching entry, and `InvalidQuantity` for a negative quantity or
    /// one too large for fixed-point arithmetic.
    pub fn to_grams(
        &self,
        ingredient_name: &str,
        quantity: Milli,
        unit: Option<UnitKind>,
    ) -> Result<Milli, ResolutionError> {
        if quantity.is_negative() {
            return Err(ResolutionError::invalid_quantity(ingredient_name, quantity));
        }
        let Some(unit) = unit else {
            return Ok(quantity);
        };

        let grams = match unit.dimension() {
            UnitDimension::Weight => {
                let factor = unit_factor(unit).unwrap_or(units::GRAM);
                Milli::product_div(&[quantity.raw(), factor], units::WEIGHT_DIVISOR)
            }
            UnitDimension::Volume => {
                let density = self
                    .density(ingredient_name)
                    .and_then(|entry| entry.grams_per_ml)
                    .ok_or_else(|| ResolutionError::missing_density(ingredient_name, unit))?;
                let factor = unit_factor(unit).unwrap_or(units::MILLILITER);
                Milli::product_div(
                    &[quantity.raw(), factor, density.raw()],
                    units::VOLUME_DIVISOR,
                )
            }
            UnitDimension::Count => {
                let per_piece = self
                    .density(ingredient_name)
                    .and_then(|entry| entry.grams_per_piece)
                    .ok_or_else(|| ResolutionError::missing_density(ingredient_name, unit))?;
                Milli::product_div(&[quantity.raw(), per_piece.raw()], units::COUNT_DIVISOR)
            }
        }
        .ok_or_else(|| ResolutionError::invalid_quantity(ingredient_name, quantity))?;

        debug!(
            ingredient = ingredient_name,
            quantity = %quantity,
            unit = unit.name(),
            grams = %grams,
            "Converted ingredient quantity to grams"
        );
        Ok(grams)
    }
}

/// Convert an ingredient quantity to grams with the built-in density table
///
/// # Errors
///
/// See [`UnitConverter::to_grams`].
pub fn to_grams(
    ingredient_name: &str,
    quantity: Milli,
    unit: Option<UnitKind>,
) -> Result<Milli, ResolutionError> {
    UnitConverter::default().to_grams(ingredient_name, quantity, unit)
}
