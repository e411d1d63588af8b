// ABOUTME: Main library entry point for the recipe nutrition resolution tools
// ABOUTME: Re-exports the engine crates and provides logging, configuration, and check orchestration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Recipe Refactor
//!
//! Checks whether a recipe's aggregate nutrition satisfies a set of dietary
//! profiles (allergens, diabetes, hypertension, obesity, balanced diet) and,
//! when it does not, reports exactly which constraints conflict.
//!
//! ## Architecture
//!
//! - **`refactor-core`**: fixed-point values, nutrient and unit models, errors
//! - **`refactor-intelligence`**: unit conversion, aggregation, constraints, resolution
//! - **this crate**: logging setup, environment configuration, request orchestration,
//!   and the `recipe-check` binary
//!
//! ## Example Usage
//!
//! ```rust
//! use recipe_refactor::check::{CheckRequest, IngredientInput, RecipeChecker};
//! use recipe_refactor::models::{NutrientField, NutrientVector};
//! use recipe_refactor::recipes::ProfileRequest;
//! use recipe_refactor::Milli;
//!
//! let request = CheckRequest {
//!     dish: "cafe au lait".into(),
//!     ingredients: vec![IngredientInput {
//!         name: "whole milk".into(),
//!         quantity: Milli::from_int(1),
//!         unit: Some("cup".into()),
//!         nutrients_per_100g: NutrientVector::zero()
//!             .with(NutrientField::Calories, Milli::from_int(61)),
//!     }],
//!     profiles: vec![ProfileRequest::allergen(["milk"])],
//! };
//!
//! let report = RecipeChecker::default().run(&request, &[]).unwrap();
//! assert!(!report.is_accepted());
//! ```

/// Recipe check orchestration
pub mod check;

/// Environment and dietary configuration
pub mod config;

/// Structured logging setup
pub mod logging;

pub use refactor_core::{constants, errors, fixed, models, Milli};
pub use refactor_intelligence::recipes;
