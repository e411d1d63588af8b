// ABOUTME: Integration tests for environment-driven configuration
// ABOUTME: Covers dietary threshold overrides, validation failures, and command-line settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use recipe_refactor::config::dietary::{ConfigError, DietaryConfig};
use recipe_refactor::config::{Environment, LogLevel, ServerConfig};
use recipe_refactor::errors::{AppError, ErrorCode};
use recipe_refactor::models::Macronutrient;
use recipe_refactor::recipes::{Constraint, ConstraintStore, Metric, ProfileRequest};
use serial_test::serial;

const DIETARY_VARS: &[&str] = &[
    "DIETARY_DAILY_CALORIES",
    "DIETARY_OBESITY_MAX_FAT_PCT",
    "DIETARY_BALANCED_MIN_CARB_PCT",
    "DIETARY_DIABETES_TYPE1_MAX_PROTEIN_PCT",
];

const SERVER_VARS: &[&str] = &[
    "LOG_LEVEL",
    "ENVIRONMENT",
    "RECIPE_DEFAULT_PROFILES",
    "RECIPE_PRETTY_OUTPUT",
];

fn clear(vars: &[&str]) {
    for var in vars {
        env::remove_var(var);
    }
}

// ============================================================================
// Dietary thresholds
// ============================================================================

#[test]
#[serial]
fn test_defaults_without_overrides() {
    clear(DIETARY_VARS);
    let config = DietaryConfig::load().unwrap();
    assert_eq!(config, DietaryConfig::default());
    assert_eq!(config.daily_calories, 2000);
    assert_eq!(config.obesity.max_fat_pct, 35);
}

#[test]
#[serial]
fn test_override_flows_into_profile_rules() {
    clear(DIETARY_VARS);
    env::set_var("DIETARY_OBESITY_MAX_FAT_PCT", " 30 ");

    let config = DietaryConfig::load().unwrap();
    let rules = ConstraintStore::new(config)
        .rules_for(&ProfileRequest::new("obesity"))
        .unwrap();
    assert_eq!(
        rules[0],
        Constraint::at_most(Metric::CaloriePercent(Macronutrient::TotalFat), 30)
    );

    clear(DIETARY_VARS);
}

#[test]
#[serial]
fn test_unparseable_override_is_rejected() {
    clear(DIETARY_VARS);
    env::set_var("DIETARY_DAILY_CALORIES", "lots");

    let err = DietaryConfig::load().unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert_eq!(AppError::from(err).code, ErrorCode::ConfigInvalid);

    clear(DIETARY_VARS);
}

#[test]
#[serial]
fn test_inverted_range_fails_validation() {
    clear(DIETARY_VARS);
    env::set_var("DIETARY_BALANCED_MIN_CARB_PCT", "60");

    let err = DietaryConfig::load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRange(_)));

    clear(DIETARY_VARS);
}

#[test]
#[serial]
fn test_type1_protein_may_not_exceed_type2() {
    clear(DIETARY_VARS);
    env::set_var("DIETARY_DIABETES_TYPE1_MAX_PROTEIN_PCT", "25");

    assert!(DietaryConfig::load().is_err());

    clear(DIETARY_VARS);
}

#[test]
fn test_percentage_outside_range_fails_validation() {
    let mut config = DietaryConfig::default();
    config.hypertension.max_fat_pct = 120;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange(_))
    ));
}

// ============================================================================
// Command-line settings
// ============================================================================

#[test]
#[serial]
fn test_server_config_defaults() {
    clear(SERVER_VARS);
    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config, ServerConfig::default());
    assert_eq!(config.log_level, None);
    assert_eq!(config.log_level_override(false), None);
    assert_eq!(config.log_level_override(true), Some(LogLevel::Debug));
}

#[test]
#[serial]
fn test_server_config_reads_environment() {
    clear(SERVER_VARS);
    env::set_var("LOG_LEVEL", "debug");
    env::set_var("ENVIRONMENT", "prod");
    env::set_var("RECIPE_DEFAULT_PROFILES", "obesity, lactose-intolerance,");
    env::set_var("RECIPE_PRETTY_OUTPUT", "yes");

    let config = ServerConfig::from_env().unwrap();
    assert_eq!(config.log_level, Some(LogLevel::Debug));
    assert_eq!(config.log_level_override(false), Some(LogLevel::Debug));
    assert!(config.environment.is_production());
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(
        config.default_profiles,
        vec!["obesity".to_owned(), "lactose-intolerance".to_owned()]
    );
    assert!(config.pretty_output);

    clear(SERVER_VARS);
}

#[test]
#[serial]
fn test_unknown_default_profile_is_a_config_error() {
    clear(SERVER_VARS);
    env::set_var("RECIPE_DEFAULT_PROFILES", "paleo");

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert_eq!(err.code.exit_status(), 78);

    clear(SERVER_VARS);
}

#[test]
#[serial]
fn test_non_boolean_pretty_flag_is_a_config_error() {
    clear(SERVER_VARS);
    env::set_var("RECIPE_PRETTY_OUTPUT", "sometimes");

    assert!(ServerConfig::from_env().is_err());

    clear(SERVER_VARS);
}
