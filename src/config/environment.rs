// ABOUTME: Environment configuration for the recipe-check tools
// ABOUTME: Log level, deployment environment, default profiles, and output style from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration for the command-line surface

use refactor_core::errors::{AppError, AppResult};
use refactor_intelligence::recipes::ProfileId;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational events
    #[default]
    Info,
    /// Debug events
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// True in production
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Settings for the command-line surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Log level from `LOG_LEVEL`; `None` leaves `RUST_LOG` in charge
    pub log_level: Option<LogLevel>,
    /// Deployment environment
    pub environment: Environment,
    /// Profiles applied when a request names none
    pub default_profiles: Vec<String>,
    /// Pretty-print JSON output
    pub pretty_output: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            environment: Environment::Development,
            default_profiles: Vec::new(),
            pretty_output: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `LOG_LEVEL`, `ENVIRONMENT`, `RECIPE_DEFAULT_PROFILES`
    /// (comma-separated ids), and `RECIPE_PRETTY_OUTPUT`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a default profile id is not
    /// registered or `RECIPE_PRETTY_OUTPUT` is not a boolean
    pub fn from_env() -> AppResult<Self> {
        let log_level = env::var("LOG_LEVEL")
            .ok()
            .map(|value| LogLevel::from_str_or_default(&value));
        let environment = env::var("ENVIRONMENT")
            .map(|value| Environment::from_str_or_default(&value))
            .unwrap_or_default();

        let default_profiles: Vec<String> = env::var("RECIPE_DEFAULT_PROFILES")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        for id in &default_profiles {
            id.parse::<ProfileId>().map_err(|e| {
                AppError::config(format!("RECIPE_DEFAULT_PROFILES: {e}"))
            })?;
        }

        let pretty_output = match env::var("RECIPE_PRETTY_OUTPUT") {
            Ok(value) => parse_bool(&value).ok_or_else(|| {
                AppError::config(format!("RECIPE_PRETTY_OUTPUT must be a boolean, got '{value}'"))
            })?,
            Err(_) => false,
        };

        Ok(Self {
            log_level,
            environment,
            default_profiles,
            pretty_output,
        })
    }
}

impl ServerConfig {
    /// Level that should replace the logging configuration's own
    ///
    /// `--verbose` forces `debug`; otherwise `LOG_LEVEL` wins when set. `None`
    /// keeps the level read from `RUST_LOG`.
    #[must_use]
    pub fn log_level_override(&self, verbose: bool) -> Option<LogLevel> {
        if verbose {
            Some(LogLevel::Debug)
        } else {
            self.log_level
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
