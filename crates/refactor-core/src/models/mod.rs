// ABOUTME: Core data models for the nutrition resolution engine
// ABOUTME: Re-exports nutrient vectors, macronutrients, units, and ingredient facts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Ingredient facts and measurement units
pub mod ingredient;
/// Nutrient fields, macronutrients, and nutrient vectors
pub mod nutrition;

pub use ingredient::{IngredientFact, UnitDimension, UnitKind};
pub use nutrition::{Macronutrient, NutrientField, NutrientVector};
