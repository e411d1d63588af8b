// ABOUTME: Core types and constants for the recipe nutrition resolution engine
// ABOUTME: Foundation crate with fixed-point arithmetic, nutrient models, and error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Refactor Core
//!
//! Foundation crate providing shared types and constants for the recipe
//! nutrition resolution engine. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **fixed**: `Milli` fixed-point values (thousandths) used for every quantity
//! - **models**: Nutrient vectors, macronutrients, units, and ingredient facts
//! - **errors**: `ResolutionError` for engine failures, `AppError`/`ErrorCode` for outer surfaces
//! - **constants**: Energy factors, unit conversion factors, and service names

/// Unified error handling with engine errors and application error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Fixed-point arithmetic in thousandths
pub mod fixed;

/// Core data models (nutrients, units, ingredient facts)
pub mod models;

pub use fixed::Milli;
