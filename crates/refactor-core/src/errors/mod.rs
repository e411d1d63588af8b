// ABOUTME: Unified error handling with standard error codes and structured responses
// ABOUTME: Maps engine and configuration failures onto stable codes for outer surfaces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Engine operations return [`ResolutionError`]. Outer surfaces (the CLI, any
//! embedding service) work with [`AppError`], which pairs a stable
//! [`ErrorCode`] with a message and optional structured details.

/// Engine error types
pub mod resolution;

pub use resolution::ResolutionError;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unit not present in the conversion table
    UnsupportedUnit,
    /// Ingredient has no density entry for a volumetric or count unit
    MissingDensity,
    /// Dietary profile id not registered
    UnknownProfile,
    /// Caller input is malformed or out of range
    InvalidInput,
    /// A required parameter is absent
    MissingRequiredField,
    /// Configuration failed validation
    ConfigInvalid,
    /// Data could not be serialized or deserialized
    SerializationError,
    /// Reading or writing a file failed
    IoError,
}

impl ErrorCode {
    /// Process exit status for this error when surfaced by a binary
    #[must_use]
    pub const fn exit_status(&self) -> u8 {
        match self {
            Self::IoError => 1,
            Self::UnsupportedUnit
            | Self::MissingDensity
            | Self::UnknownProfile
            | Self::InvalidInput
            | Self::MissingRequiredField
            | Self::SerializationError => 64,
            Self::ConfigInvalid => 78,
        }
    }

    /// User-facing description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::UnsupportedUnit => "The unit is not supported for conversion",
            Self::MissingDensity => "No density is known for this ingredient",
            Self::UnknownProfile => "The dietary profile is not registered",
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::SerializationError => "Data serialization/deserialization failed",
            Self::IoError => "File operation failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional structured context
    pub details: Value,
}

impl AppError {
    /// Create a new error with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Value::Null,
        }
    }

    /// Attach structured details
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// File I/O error
    #[must_use]
    pub fn io(path: impl fmt::Display, message: impl fmt::Display) -> Self {
        Self::new(ErrorCode::IoError, format!("{path}: {message}"))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<ResolutionError> for AppError {
    fn from(error: ResolutionError) -> Self {
        let message = error.to_string();
        match error {
            ResolutionError::UnsupportedUnit { unit } => {
                Self::new(ErrorCode::UnsupportedUnit, message).with_details(json!({ "unit": unit }))
            }
            ResolutionError::MissingDensity { ingredient, unit } => {
                Self::new(ErrorCode::MissingDensity, message).with_details(json!({
                    "ingredient": ingredient,
                    "unit": unit.name(),
                }))
            }
            ResolutionError::UnknownProfile { id } => {
                Self::new(ErrorCode::UnknownProfile, message).with_details(json!({ "profile": id }))
            }
            ResolutionError::MissingParameter { profile, parameter } => {
                Self::new(ErrorCode::MissingRequiredField, message).with_details(json!({
                    "profile": profile,
                    "parameter": parameter,
                }))
            }
            ResolutionError::InvalidQuantity { ingredient, .. }
            | ResolutionError::NegativeNutrient { ingredient, .. } => {
                Self::new(ErrorCode::InvalidInput, message)
                    .with_details(json!({ "ingredient": ingredient }))
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Serializable error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error payload
    pub error: ErrorResponseDetails,
}

/// Error payload inside [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Structured context
    #[serde(skip_serializing_if = "Value::is_null", default)]
    pub details: Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                details: error.details,
            },
        }
    }
}
