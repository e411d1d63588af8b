// ABOUTME: recipe-check - command-line front end for the nutrition resolution engine
// ABOUTME: Resolves JSON recipe requests, converts single quantities, and lists dietary profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Check a recipe against the obesity profile
//! recipe-check resolve --input pancakes.json --profile obesity
//!
//! # Allergen and diabetes checks, pretty output
//! recipe-check resolve --input pancakes.json --allergen milk --allergen peanut \
//!     --profile diabetes --diabetes-type 1 --pretty
//!
//! # Convert a single quantity
//! recipe-check convert 1.5 cups flour
//!
//! # List built-in profiles
//! recipe-check profiles
//! ```
//!
//! Exit status: 0 accepted, 2 rejected, otherwise the error's exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use recipe_refactor::check::{CheckRequest, RecipeChecker};
use recipe_refactor::config::dietary::DietaryConfig;
use recipe_refactor::config::ServerConfig;
use recipe_refactor::errors::{AppError, AppResult, ErrorResponse};
use recipe_refactor::logging::LoggingConfig;
use recipe_refactor::recipes::{DiabetesType, ProfileId, ProfileRequest};
use recipe_refactor::Milli;
use serde::Serialize;
use tracing::{error, info};

/// Exit status for a rejected recipe
const EXIT_REJECTED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "recipe-check",
    about = "Recipe nutrition resolution CLI",
    long_about = "Checks a recipe's aggregate nutrition against dietary profiles and reports the conflicting constraints."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a recipe request against dietary profiles
    Resolve {
        /// Path to the JSON request
        #[arg(long, short = 'i')]
        input: PathBuf,

        /// Profile id to apply (repeatable)
        #[arg(long = "profile", short = 'p')]
        profiles: Vec<String>,

        /// Allergen substring to exclude (repeatable)
        #[arg(long = "allergen", short = 'a')]
        allergens: Vec<String>,

        /// Diabetes type for the `diabetes` profile
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
        diabetes_type: Option<u8>,

        /// Pretty-print the JSON verdict
        #[arg(long)]
        pretty: bool,
    },

    /// Convert one quantity to grams
    Convert {
        /// Quantity, decimal or fraction (e.g. 1.5 or 1/3)
        quantity: String,

        /// Unit spelling (e.g. cup, tbsp, g)
        unit: String,

        /// Ingredient name
        #[arg(required = true)]
        ingredient: Vec<String>,
    },

    /// List built-in dietary profiles and their rules
    Profiles,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => return report_error(e),
    };

    let mut logging = LoggingConfig::from_env();
    if let Some(level) = server_config.log_level_override(cli.verbose) {
        logging = logging.with_level(level.to_string());
    }
    if let Err(e) = logging.init() {
        eprintln!("failed to initialize logging: {e:#}");
    }

    match run(cli.command, &server_config) {
        Ok(code) => code,
        Err(e) => report_error(e),
    }
}

fn run(command: Command, server_config: &ServerConfig) -> AppResult<ExitCode> {
    let checker = RecipeChecker::from_config(DietaryConfig::global());

    match command {
        Command::Resolve {
            input,
            profiles,
            allergens,
            diabetes_type,
            pretty,
        } => {
            let request = CheckRequest::from_file(&input)?;
            let mut selected = cli_profiles(&profiles, allergens, diabetes_type)?;
            if request.profiles.is_empty() && selected.is_empty() {
                selected = server_config
                    .default_profiles
                    .iter()
                    .map(ProfileRequest::new)
                    .collect();
            }

            let report = checker.run(&request, &selected)?;
            print_json(&report, pretty || server_config.pretty_output)?;
            if report.is_accepted() {
                Ok(ExitCode::SUCCESS)
            } else {
                info!("{}", report.resolution.explain());
                Ok(ExitCode::from(EXIT_REJECTED))
            }
        }
        Command::Convert {
            quantity,
            unit,
            ingredient,
        } => {
            let quantity: Milli = quantity
                .parse()
                .map_err(|e| AppError::invalid_input(format!("{e}")))?;
            let ingredient = ingredient.join(" ");
            let grams = checker.convert(&ingredient, quantity, Some(&unit))?;
            println!("{quantity} {unit} {ingredient} = {grams} g");
            Ok(ExitCode::SUCCESS)
        }
        Command::Profiles => {
            for profile in checker.store().describe() {
                println!("{:<20} {}", profile.id, profile.summary);
                for rule in &profile.rules {
                    println!("{:<20}   {rule}", "");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Build profile requests from command-line flags
///
/// Allergens imply the `allergen` profile; a diabetes type attaches to every
/// `diabetes` selection.
fn cli_profiles(
    profiles: &[String],
    allergens: Vec<String>,
    diabetes_type: Option<u8>,
) -> AppResult<Vec<ProfileRequest>> {
    let diabetes_type = diabetes_type
        .map(DiabetesType::try_from)
        .transpose()
        .map_err(AppError::invalid_input)?;

    let mut requests = Vec::new();
    let mut allergen_requested = false;
    for id in profiles {
        let mut request = ProfileRequest::new(id.as_str());
        match id.parse::<ProfileId>()? {
            ProfileId::Allergen => {
                allergen_requested = true;
                request = request.with_allergens(allergens.clone());
            }
            ProfileId::Diabetes => {
                if let Some(diabetes_type) = diabetes_type {
                    request = request.with_diabetes_type(diabetes_type);
                }
            }
            _ => {}
        }
        requests.push(request);
    }
    if !allergen_requested && !allergens.is_empty() {
        requests.push(ProfileRequest::allergen(allergens));
    }
    Ok(requests)
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> AppResult<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{rendered}");
    Ok(())
}

fn report_error(e: AppError) -> ExitCode {
    error!(code = ?e.code, "{e}");
    let status = e.code.exit_status();
    let message = e.to_string();
    match serde_json::to_string(&ErrorResponse::from(e)) {
        Ok(json) => println!("{json}"),
        Err(_) => eprintln!("{message}"),
    }
    ExitCode::from(status)
}
