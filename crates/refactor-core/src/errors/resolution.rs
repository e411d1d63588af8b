// ABOUTME: Engine error types for unit conversion, aggregation, and profile lookup
// ABOUTME: Carries the unit, ingredient, or profile id that caused the failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Resolution Error Types
//!
//! Failures the engine reports instead of guessing. A rejected recipe is not an
//! error; it is a normal outcome of resolution and never appears here.

use thiserror::Error;

use crate::fixed::Milli;
use crate::models::{NutrientField, UnitKind};

/// Errors raised while converting, accumulating, or selecting constraints
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Unit is not present in the conversion table
    #[error("unsupported unit '{unit}'")]
    UnsupportedUnit {
        /// Unit as supplied by the caller
        unit: String,
    },

    /// Volumetric or count unit requested for an ingredient with no density entry
    #[error("no density known for '{ingredient}' (needed to convert {unit})")]
    MissingDensity {
        /// Ingredient name as supplied
        ingredient: String,
        /// Unit that required the density lookup
        unit: UnitKind,
    },

    /// Dietary profile id is not registered
    #[error("unknown dietary profile '{id}'")]
    UnknownProfile {
        /// Profile id as supplied
        id: String,
    },

    /// Profile requires a parameter the caller did not supply
    #[error("profile '{profile}' requires parameter '{parameter}'")]
    MissingParameter {
        /// Profile id
        profile: String,
        /// Name of the missing parameter
        parameter: &'static str,
    },

    /// Quantity is negative or too large for fixed-point arithmetic
    #[error("invalid quantity {quantity} for '{ingredient}'")]
    InvalidQuantity {
        /// Ingredient name
        ingredient: String,
        /// Offending quantity
        quantity: Milli,
    },

    /// Reference nutrient row carries a negative value
    #[error("negative {field:?} value in reference row for '{ingredient}'")]
    NegativeNutrient {
        /// Ingredient name
        ingredient: String,
        /// Field holding the negative value
        field: NutrientField,
    },
}

impl ResolutionError {
    /// Create an "unsupported unit" error
    #[must_use]
    pub fn unsupported_unit(unit: impl Into<String>) -> Self {
        Self::UnsupportedUnit { unit: unit.into() }
    }

    /// Create a "missing density" error
    #[must_use]
    pub fn missing_density(ingredient: impl Into<String>, unit: UnitKind) -> Self {
        Self::MissingDensity {
            ingredient: ingredient.into(),
            unit,
        }
    }

    /// Create an "unknown profile" error
    #[must_use]
    pub fn unknown_profile(id: impl Into<String>) -> Self {
        Self::UnknownProfile { id: id.into() }
    }

    /// Create a "missing parameter" error
    #[must_use]
    pub fn missing_parameter(profile: impl Into<String>, parameter: &'static str) -> Self {
        Self::MissingParameter {
            profile: profile.into(),
            parameter,
        }
    }

    /// Create an "invalid quantity" error
    #[must_use]
    pub fn invalid_quantity(ingredient: impl Into<String>, quantity: Milli) -> Self {
        Self::InvalidQuantity {
            ingredient: ingredient.into(),
            quantity,
        }
    }

    /// Create a "negative nutrient" error
    #[must_use]
    pub fn negative_nutrient(ingredient: impl Into<String>, field: NutrientField) -> Self {
        Self::NegativeNutrient {
            ingredient: ingredient.into(),
            field,
        }
    }

    /// Ingredient associated with this error, if any
    #[must_use]
    pub fn ingredient(&self) -> Option<&str> {
        match self {
            Self::MissingDensity { ingredient, .. }
            | Self::InvalidQuantity { ingredient, .. }
            | Self::NegativeNutrient { ingredient, .. } => Some(ingredient),
            Self::UnsupportedUnit { .. }
            | Self::UnknownProfile { .. }
            | Self::MissingParameter { .. } => None,
        }
    }
}
