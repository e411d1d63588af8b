// ABOUTME: Recipe nutrition resolution pipeline from parsed ingredients to verdicts
// ABOUTME: Unit conversion, nutrient aggregation, dietary constraints, and resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipes Module
//!
//! Checks a recipe's nutrition against dietary profiles.
//!
//! ## Pipeline
//!
//! 1. [`conversion`]: `(ingredient, quantity, unit)` to grams
//! 2. [`aggregation`]: per-100 g reference rows scaled and summed, then percentages derived
//! 3. [`constraints`]: profile id to ordered rules
//! 4. [`resolution`]: every rule checked, `Accepted` or `Rejected` with the conflict set
//!
//! ## Example Usage
//!
//! ```rust
//! use refactor_core::models::{NutrientField, NutrientVector, UnitKind};
//! use refactor_core::Milli;
//! use refactor_intelligence::recipes::{
//!     accumulate, resolve, to_grams, ConstraintStore, ProfileRequest, Recipe,
//! };
//!
//! let grams = to_grams("whole milk", Milli::from_int(1), Some(UnitKind::Cup)).unwrap();
//! let milk = NutrientVector::zero().with(NutrientField::Calories, Milli::from_int(61));
//! let recipe = accumulate(Recipe::new("latte"), "whole milk", &milk, grams).unwrap();
//!
//! let rules = ConstraintStore::default()
//!     .rules_for(&ProfileRequest::allergen(["milk"]))
//!     .unwrap();
//! assert!(resolve(&recipe, &rules).is_rejected());
//! ```

/// Ingredient aggregation and derived metrics
pub mod aggregation;
/// Dietary profiles and constraint rules
pub mod constraints;
/// Unit conversion into grams
pub mod conversion;
/// Constraint checking and verdicts
pub mod resolution;

pub use aggregation::{accumulate, DerivedFacts, Metric, NutrientAggregator, Recipe};
pub use constraints::{
    rules_for, Comparator, Constraint, ConstraintStore, DiabetesType, ProfileDescription,
    ProfileId, ProfileRequest,
};
pub use conversion::{to_grams, unit_factor, DensityEntry, DensityTable, UnitConverter};
pub use resolution::{resolve, PendingResolution, Resolution, ResolutionEngine, Violation, Witness};
