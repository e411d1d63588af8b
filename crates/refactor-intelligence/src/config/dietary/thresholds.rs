// ABOUTME: Threshold sections for each built-in dietary profile
// ABOUTME: Whole-percent bounds for hypertension, obesity, diabetes, and balanced rule sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dietary Profile Thresholds
//!
//! Every percentage here is a whole percent of recipe calories unless the
//! field name says `daily`, in which case it is a share of the reference daily
//! intake. Defaults are the clinical figures the profiles are defined with.

use serde::{Deserialize, Serialize};

/// Hypertension limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HypertensionThresholds {
    /// Maximum saturated fat share of calories
    pub max_satfat_pct: i64,
    /// Maximum total fat share of calories
    pub max_fat_pct: i64,
    /// Maximum protein share of calories
    pub max_protein_pct: i64,
    /// Maximum carbohydrate share of calories
    pub max_carb_pct: i64,
}

impl Default for HypertensionThresholds {
    fn default() -> Self {
        Self {
            max_satfat_pct: 6,
            max_fat_pct: 27,
            max_protein_pct: 10,
            max_carb_pct: 55,
        }
    }
}

/// Obesity limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObesityThresholds {
    /// Maximum total fat share of calories
    pub max_fat_pct: i64,
    /// Maximum carbohydrate share of calories
    pub max_carb_pct: i64,
}

impl Default for ObesityThresholds {
    fn default() -> Self {
        Self {
            max_fat_pct: 35,
            max_carb_pct: 65,
        }
    }
}

/// Diabetes limits shared by both types, plus the per-type protein bound
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiabetesThresholds {
    /// Maximum sugar share of calories
    pub max_sugar_pct: i64,
    /// Maximum carbohydrate share of calories
    pub max_carb_pct: i64,
    /// Maximum saturated fat share of calories
    pub max_satfat_pct: i64,
    /// Maximum protein share of calories for type 1 (stricter)
    pub type1_max_protein_pct: i64,
    /// Maximum protein share of calories for type 2
    pub type2_max_protein_pct: i64,
    /// Maximum sugar as a share of the daily intake
    pub max_sugar_daily_pct: i64,
}

impl Default for DiabetesThresholds {
    fn default() -> Self {
        Self {
            max_sugar_pct: 10,
            max_carb_pct: 45,
            max_satfat_pct: 10,
            type1_max_protein_pct: 15,
            type2_max_protein_pct: 20,
            max_sugar_daily_pct: 6,
        }
    }
}

/// General balanced-diet rule set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancedThresholds {
    /// Maximum recipe calories (kcal)
    pub max_calories: i64,
    /// Minimum carbohydrate share of calories
    pub min_carb_pct: i64,
    /// Maximum carbohydrate share of calories
    pub max_carb_pct: i64,
    /// Maximum total fat share of calories
    pub max_fat_pct: i64,
    /// Maximum saturated fat share of calories
    pub max_satfat_pct: i64,
    /// Minimum protein share of calories
    pub min_protein_pct: i64,
    /// Maximum protein share of calories
    pub max_protein_pct: i64,
    /// Maximum sugar share of calories
    pub max_sugar_pct: i64,
}

impl Default for BalancedThresholds {
    fn default() -> Self {
        Self {
            max_calories: 2_200,
            min_carb_pct: 45,
            max_carb_pct: 55,
            max_fat_pct: 30,
            max_satfat_pct: 10,
            min_protein_pct: 15,
            max_protein_pct: 25,
            max_sugar_pct: 10,
        }
    }
}
