// ABOUTME: Nutrient models for reference rows and recipe aggregates
// ABOUTME: NutrientField, Macronutrient, and the fixed-order NutrientVector
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::energy;
use crate::fixed::Milli;

/// Number of tracked nutrient fields
pub const NUTRIENT_FIELD_COUNT: usize = 14;

/// A tracked nutrient, in fixed order
///
/// Each field has one unit that never changes: calories in kcal, macronutrients
/// in grams, minerals and most vitamins in milligrams, vitamin D in IU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientField {
    /// Energy (kcal)
    #[serde(alias = "Calories")]
    Calories,
    /// Protein (g)
    #[serde(alias = "Protein")]
    Protein,
    /// Total fat (g)
    #[serde(alias = "TotalFat")]
    TotalFat,
    /// Carbohydrate (g)
    #[serde(alias = "Carbohydrate")]
    Carbohydrate,
    /// Sodium (mg)
    #[serde(alias = "Sodium")]
    Sodium,
    /// Saturated fat (g)
    #[serde(alias = "SaturatedFat")]
    SaturatedFat,
    /// Cholesterol (mg)
    #[serde(alias = "Cholesterol")]
    Cholesterol,
    /// Sugar (g)
    #[serde(alias = "Sugar")]
    Sugar,
    /// Calcium (mg)
    #[serde(alias = "Calcium")]
    Calcium,
    /// Iron (mg)
    #[serde(alias = "Iron")]
    Iron,
    /// Potassium (mg)
    #[serde(alias = "Potassium")]
    Potassium,
    /// Vitamin C (mg)
    #[serde(alias = "VitaminC")]
    VitaminC,
    /// Vitamin E (mg)
    #[serde(alias = "VitaminE")]
    VitaminE,
    /// Vitamin D (IU)
    #[serde(alias = "VitaminD")]
    VitaminD,
}

impl NutrientField {
    /// Every field in declaration order
    pub const ALL: [Self; NUTRIENT_FIELD_COUNT] = [
        Self::Calories,
        Self::Protein,
        Self::TotalFat,
        Self::Carbohydrate,
        Self::Sodium,
        Self::SaturatedFat,
        Self::Cholesterol,
        Self::Sugar,
        Self::Calcium,
        Self::Iron,
        Self::Potassium,
        Self::VitaminC,
        Self::VitaminE,
        Self::VitaminD,
    ];

    /// Position of this field inside a [`NutrientVector`]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name used in logs and serialized output
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::TotalFat => "total_fat",
            Self::Carbohydrate => "carbohydrate",
            Self::Sodium => "sodium",
            Self::SaturatedFat => "saturated_fat",
            Self::Cholesterol => "cholesterol",
            Self::Sugar => "sugar",
            Self::Calcium => "calcium",
            Self::Iron => "iron",
            Self::Potassium => "potassium",
            Self::VitaminC => "vitamin_c",
            Self::VitaminE => "vitamin_e",
            Self::VitaminD => "vitamin_d",
        }
    }

    /// Unit abbreviation for display
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Calories => "kcal",
            Self::Protein
            | Self::TotalFat
            | Self::Carbohydrate
            | Self::SaturatedFat
            | Self::Sugar => "g",
            Self::Sodium
            | Self::Cholesterol
            | Self::Calcium
            | Self::Iron
            | Self::Potassium
            | Self::VitaminC
            | Self::VitaminE => "mg",
            Self::VitaminD => "IU",
        }
    }

    /// Parse a field from its snake-case name or its column label
    ///
    /// Matching ignores case, spaces, and underscores, so `"TotalFat"`,
    /// `"total_fat"`, and `"Total Fat"` all resolve to [`Self::TotalFat`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | ' ' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL.into_iter().find(|field| {
            field
                .name()
                .chars()
                .filter(|c| *c != '_')
                .eq(wanted.chars())
        })
    }
}

/// Macronutrients that contribute energy and have a calorie percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Macronutrient {
    /// Protein, 4 kcal/g
    Protein,
    /// Carbohydrate, 4 kcal/g
    Carbohydrate,
    /// Total fat, 9 kcal/g
    TotalFat,
    /// Saturated fat, 9 kcal/g
    SaturatedFat,
    /// Sugar, 4 kcal/g
    Sugar,
}

impl Macronutrient {
    /// Every macronutrient in evaluation order
    pub const ALL: [Self; 5] = [
        Self::Carbohydrate,
        Self::Protein,
        Self::TotalFat,
        Self::SaturatedFat,
        Self::Sugar,
    ];

    /// Underlying nutrient field
    #[must_use]
    pub const fn field(self) -> NutrientField {
        match self {
            Self::Protein => NutrientField::Protein,
            Self::Carbohydrate => NutrientField::Carbohydrate,
            Self::TotalFat => NutrientField::TotalFat,
            Self::SaturatedFat => NutrientField::SaturatedFat,
            Self::Sugar => NutrientField::Sugar,
        }
    }

    /// Energy density in kilocalories per gram
    #[must_use]
    pub const fn kcal_per_gram(self) -> i64 {
        match self {
            Self::Protein => energy::KCAL_PER_GRAM_PROTEIN,
            Self::Carbohydrate => energy::KCAL_PER_GRAM_CARBOHYDRATE,
            Self::TotalFat | Self::SaturatedFat => energy::KCAL_PER_GRAM_FAT,
            Self::Sugar => energy::KCAL_PER_GRAM_SUGAR,
        }
    }

    /// Short prefix used by derived metric names (`carb_pct`, `fat_daily_pct`)
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Carbohydrate => "carb",
            Self::TotalFat => "fat",
            Self::SaturatedFat => "satfat",
            Self::Sugar => "sugar",
        }
    }

    /// Parse from the short prefix
    #[must_use]
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.short_name().eq_ignore_ascii_case(name))
    }
}

/// Fixed-order vector of the fourteen tracked nutrients
///
/// Interpreted "per 100 g" when it is a reference row and as an absolute total
/// when it is a recipe aggregate. Serializes as a map keyed by field name;
/// missing keys deserialize as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<NutrientField, Milli>",
    into = "BTreeMap<NutrientField, Milli>"
)]
pub struct NutrientVector {
    values: [Milli; NUTRIENT_FIELD_COUNT],
}

impl NutrientVector {
    /// All-zero vector
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            values: [Milli::ZERO; NUTRIENT_FIELD_COUNT],
        }
    }

    /// Value of one field
    #[must_use]
    pub const fn get(&self, field: NutrientField) -> Milli {
        self.values[field.index()]
    }

    /// Overwrite one field
    pub fn set(&mut self, field: NutrientField, value: Milli) {
        self.values[field.index()] = value;
    }

    /// Builder-style setter
    #[must_use]
    pub fn with(mut self, field: NutrientField, value: Milli) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate `(field, value)` pairs in field order
    pub fn iter(&self) -> impl Iterator<Item = (NutrientField, Milli)> + '_ {
        NutrientField::ALL
            .iter()
            .map(move |field| (*field, self.get(*field)))
    }

    /// First field holding a negative value, if any
    #[must_use]
    pub fn first_negative(&self) -> Option<NutrientField> {
        self.iter()
            .find(|(_, value)| value.is_negative())
            .map(|(field, _)| field)
    }

    /// True when every field is zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|value| value.is_zero())
    }
}

impl From<BTreeMap<NutrientField, Milli>> for NutrientVector {
    fn from(map: BTreeMap<NutrientField, Milli>) -> Self {
        map.into_iter()
            .fold(Self::zero(), |vector, (field, value)| vector.with(field, value))
    }
}

impl From<NutrientVector> for BTreeMap<NutrientField, Milli> {
    fn from(vector: NutrientVector) -> Self {
        vector.iter().collect()
    }
}
