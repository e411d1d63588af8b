// ABOUTME: Configuration management for the recipe-check tools
// ABOUTME: Environment settings plus the dietary threshold configuration from the engine crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-based settings for the command-line surface
pub mod environment;

/// Dietary threshold configuration (re-exported from `refactor-intelligence`)
pub use refactor_intelligence::config::dietary;

pub use environment::{Environment, LogLevel, ServerConfig};
