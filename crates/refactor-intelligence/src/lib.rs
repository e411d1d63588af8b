// ABOUTME: Nutrition resolution engine checking recipes against dietary constraints
// ABOUTME: Unit conversion, nutrient aggregation, constraint registry, and verdict resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Refactor Intelligence
//!
//! The recipe nutrition resolution engine. Converts ingredient quantities to
//! grams, folds per-100 g reference rows into recipe totals, derives
//! calorie-relative percentages, and checks them against dietary profiles.
//!
//! Every computation is pure and synchronous. Shared tables (densities,
//! configuration, profiles) are read-only after first use, so independent
//! recipes can be resolved in parallel.

/// Dietary threshold configuration
pub mod config;

/// Recipe conversion, aggregation, constraints, and resolution
pub mod recipes;

pub use config::{ConfigError, DietaryConfig};
pub use recipes::{
    ConstraintStore, ProfileRequest, Recipe, Resolution, ResolutionEngine, UnitConverter,
};
