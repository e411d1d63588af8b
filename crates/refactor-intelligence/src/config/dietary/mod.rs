// ABOUTME: Dietary threshold configuration loaded once per process
// ABOUTME: Defaults, DIETARY_* environment overrides, and validation behind a global singleton
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dietary Configuration
//!
//! Holds the numeric bounds used by the built-in dietary profiles. The
//! configuration is read once ([`DietaryConfig::global`]) and is read-only
//! afterwards, so it can be shared freely across threads.

/// Configuration error types
pub mod error;
/// Per-profile threshold sections
pub mod thresholds;

pub use error::ConfigError;
pub use thresholds::{
    BalancedThresholds, DiabetesThresholds, HypertensionThresholds, ObesityThresholds,
};

use refactor_core::constants::energy::DAILY_CALORIES_KCAL;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static DIETARY_CONFIG: OnceLock<DietaryConfig> = OnceLock::new();

/// Upper limit for any percentage bound
const MAX_PERCENT: i64 = 100;

/// Thresholds for every built-in dietary profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryConfig {
    /// Hypertension profile bounds
    pub hypertension: HypertensionThresholds,
    /// Obesity profile bounds
    pub obesity: ObesityThresholds,
    /// Diabetes profile bounds
    pub diabetes: DiabetesThresholds,
    /// Balanced-diet profile bounds
    pub balanced: BalancedThresholds,
    /// Reference daily energy intake (kcal) for daily-percentage metrics
    pub daily_calories: i64,
}

impl Default for DietaryConfig {
    fn default() -> Self {
        Self {
            hypertension: HypertensionThresholds::default(),
            obesity: ObesityThresholds::default(),
            diabetes: DiabetesThresholds::default(),
            balanced: BalancedThresholds::default(),
            daily_calories: DAILY_CALORIES_KCAL,
        }
    }
}

impl DietaryConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        DIETARY_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load dietary config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when a percentage leaves `0..=100`, a minimum is not
    /// below its maximum, the daily intake is not positive, or the type 1
    /// protein bound is looser than type 2
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.daily_calories <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "daily_calories must be positive",
            ));
        }
        if self.balanced.max_calories <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "balanced.max_calories must be positive",
            ));
        }

        let percentages = [
            self.hypertension.max_satfat_pct,
            self.hypertension.max_fat_pct,
            self.hypertension.max_protein_pct,
            self.hypertension.max_carb_pct,
            self.obesity.max_fat_pct,
            self.obesity.max_carb_pct,
            self.diabetes.max_sugar_pct,
            self.diabetes.max_carb_pct,
            self.diabetes.max_satfat_pct,
            self.diabetes.type1_max_protein_pct,
            self.diabetes.type2_max_protein_pct,
            self.diabetes.max_sugar_daily_pct,
            self.balanced.min_carb_pct,
            self.balanced.max_carb_pct,
            self.balanced.max_fat_pct,
            self.balanced.max_satfat_pct,
            self.balanced.min_protein_pct,
            self.balanced.max_protein_pct,
            self.balanced.max_sugar_pct,
        ];
        if percentages
            .iter()
            .any(|pct| !(0..=MAX_PERCENT).contains(pct))
        {
            return Err(ConfigError::ValueOutOfRange(
                "percentage bounds must be between 0 and 100",
            ));
        }

        if self.balanced.min_carb_pct >= self.balanced.max_carb_pct {
            return Err(ConfigError::InvalidRange(
                "balanced.min_carb_pct must be < balanced.max_carb_pct",
            ));
        }
        if self.balanced.min_protein_pct >= self.balanced.max_protein_pct {
            return Err(ConfigError::InvalidRange(
                "balanced.min_protein_pct must be < balanced.max_protein_pct",
            ));
        }
        if self.diabetes.type1_max_protein_pct > self.diabetes.type2_max_protein_pct {
            return Err(ConfigError::InvalidRange(
                "diabetes.type1_max_protein_pct must be <= diabetes.type2_max_protein_pct",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var("DIETARY_DAILY_CALORIES", &mut self.daily_calories)?;

        // Hypertension
        Self::apply_env_var(
            "DIETARY_HYPERTENSION_MAX_SATFAT_PCT",
            &mut self.hypertension.max_satfat_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_HYPERTENSION_MAX_FAT_PCT",
            &mut self.hypertension.max_fat_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_HYPERTENSION_MAX_PROTEIN_PCT",
            &mut self.hypertension.max_protein_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_HYPERTENSION_MAX_CARB_PCT",
            &mut self.hypertension.max_carb_pct,
        )?;

        // Obesity
        Self::apply_env_var("DIETARY_OBESITY_MAX_FAT_PCT", &mut self.obesity.max_fat_pct)?;
        Self::apply_env_var(
            "DIETARY_OBESITY_MAX_CARB_PCT",
            &mut self.obesity.max_carb_pct,
        )?;

        // Diabetes
        Self::apply_env_var(
            "DIETARY_DIABETES_MAX_SUGAR_PCT",
            &mut self.diabetes.max_sugar_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_DIABETES_MAX_CARB_PCT",
            &mut self.diabetes.max_carb_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_DIABETES_MAX_SATFAT_PCT",
            &mut self.diabetes.max_satfat_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_DIABETES_TYPE1_MAX_PROTEIN_PCT",
            &mut self.diabetes.type1_max_protein_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_DIABETES_TYPE2_MAX_PROTEIN_PCT",
            &mut self.diabetes.type2_max_protein_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_DIABETES_MAX_SUGAR_DAILY_PCT",
            &mut self.diabetes.max_sugar_daily_pct,
        )?;

        // Balanced
        Self::apply_env_var(
            "DIETARY_BALANCED_MAX_CALORIES",
            &mut self.balanced.max_calories,
        )?;
        Self::apply_env_var(
            "DIETARY_BALANCED_MIN_CARB_PCT",
            &mut self.balanced.min_carb_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_BALANCED_MAX_CARB_PCT",
            &mut self.balanced.max_carb_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_BALANCED_MAX_FAT_PCT",
            &mut self.balanced.max_fat_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_BALANCED_MAX_SATFAT_PCT",
            &mut self.balanced.max_satfat_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_BALANCED_MIN_PROTEIN_PCT",
            &mut self.balanced.min_protein_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_BALANCED_MAX_PROTEIN_PCT",
            &mut self.balanced.max_protein_pct,
        )?;
        Self::apply_env_var(
            "DIETARY_BALANCED_MAX_SUGAR_PCT",
            &mut self.balanced.max_sugar_pct,
        )?;

        Ok(self)
    }
}
