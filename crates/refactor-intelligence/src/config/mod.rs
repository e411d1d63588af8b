// ABOUTME: Configuration module for refactor-intelligence crate
// ABOUTME: Re-exports dietary threshold configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Dietary profile thresholds with environment overrides and validation
pub mod dietary;

pub use dietary::{ConfigError, DietaryConfig};
