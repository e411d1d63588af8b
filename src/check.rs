// ABOUTME: Recipe check orchestration from a JSON request to a verdict
// ABOUTME: Converts each ingredient, accumulates reference rows, selects profiles, and resolves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Check
//!
//! Glue between the outer surface and the engine. A [`CheckRequest`] carries
//! already-parsed ingredient triples together with their per-100 g reference
//! rows; [`RecipeChecker::run`] turns it into a [`CheckReport`].

use std::fs;
use std::path::Path;

use refactor_core::errors::{AppError, AppResult, ErrorCode, ResolutionError};
use refactor_core::fixed::Milli;
use refactor_core::models::{IngredientFact, NutrientVector, UnitKind};
use refactor_intelligence::config::DietaryConfig;
use refactor_intelligence::recipes::{
    ConstraintStore, ProfileRequest, Recipe, Resolution, ResolutionEngine, UnitConverter,
};
use serde::{Deserialize, Serialize};

use crate::logging::ResolutionLogger;

/// One parsed ingredient with its reference nutrients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientInput {
    /// Ingredient name
    pub name: String,
    /// Quantity in `unit`
    pub quantity: Milli,
    /// Unit spelling; absent means grams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Reference nutrients per 100 g
    #[serde(default)]
    pub nutrients_per_100g: NutrientVector,
}

/// A recipe to check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Dish name
    pub dish: String,
    /// Ingredients in recipe order
    pub ingredients: Vec<IngredientInput>,
    /// Profiles to check against
    #[serde(default)]
    pub profiles: Vec<ProfileRequest>,
}

impl CheckRequest {
    /// Read a request from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be read and a serialization
    /// error when it is not a valid request
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let contents =
            fs::read_to_string(path).map_err(|e| AppError::io(path.display(), e))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Outcome of a recipe check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Dish name
    pub dish: String,
    /// Profile ids that were applied
    pub profiles: Vec<String>,
    /// Verdict
    #[serde(flatten)]
    pub resolution: Resolution,
}

impl CheckReport {
    /// True when the recipe satisfied every constraint
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.resolution.is_accepted()
    }
}

/// Converter, profile store, and engine bundled for repeated checks
#[derive(Debug, Clone, Default)]
pub struct RecipeChecker {
    converter: UnitConverter,
    store: ConstraintStore,
    engine: ResolutionEngine,
}

impl RecipeChecker {
    /// Checker from explicit parts
    #[must_use]
    pub const fn new(
        converter: UnitConverter,
        store: ConstraintStore,
        engine: ResolutionEngine,
    ) -> Self {
        Self {
            converter,
            store,
            engine,
        }
    }

    /// Checker using the built-in densities and the given thresholds
    #[must_use]
    pub fn from_config(config: &DietaryConfig) -> Self {
        Self::new(
            UnitConverter::default(),
            ConstraintStore::new(config.clone()),
            ResolutionEngine::from_config(config),
        )
    }

    /// Profile registry used by this checker
    #[must_use]
    pub const fn store(&self) -> &ConstraintStore {
        &self.store
    }

    /// Convert a single quantity to grams
    ///
    /// # Errors
    ///
    /// Returns the mapped engine error for an unsupported unit, a missing
    /// density, or an invalid quantity
    pub fn convert(&self, ingredient: &str, quantity: Milli, unit: Option<&str>) -> AppResult<Milli> {
        let unit = unit.map(str::parse::<UnitKind>).transpose()?;
        Ok(self.converter.to_grams(ingredient, quantity, unit)?)
    }

    /// Convert and accumulate every ingredient of a request
    ///
    /// # Errors
    ///
    /// Returns the first ingredient failure, mapped to an [`AppError`]
    pub fn build_recipe(&self, request: &CheckRequest) -> AppResult<Recipe> {
        let facts = request
            .ingredients
            .iter()
            .map(|input| {
                let unit = input.unit.as_deref().map(str::parse::<UnitKind>).transpose()?;
                Ok(IngredientFact::new(input.name.clone(), input.quantity, unit))
            })
            .collect::<Result<Vec<_>, ResolutionError>>()
            .map_err(|e| {
                ResolutionLogger::log_ingredient_failure(&request.dish, &e);
                AppError::from(e)
            })?;

        let mut recipe = Recipe::with_ingredients(request.dish.clone(), facts);
        for input in &request.ingredients {
            recipe = self
                .accumulate_input(recipe, input)
                .map_err(|e| {
                    ResolutionLogger::log_ingredient_failure(&request.dish, &e);
                    AppError::from(e)
                })?;
        }
        Ok(recipe)
    }

    fn accumulate_input(
        &self,
        recipe: Recipe,
        input: &IngredientInput,
    ) -> Result<Recipe, ResolutionError> {
        let unit = input.unit.as_deref().map(str::parse::<UnitKind>).transpose()?;
        let grams = self.converter.to_grams(&input.name, input.quantity, unit)?;
        self.engine
            .aggregator()
            .accumulate(recipe, &input.name, &input.nutrients_per_100g, grams)
    }

    /// Run a full check
    ///
    /// `extra_profiles` are appended after the request's own profiles.
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` when no profile is selected, and the
    /// mapped engine error for any conversion or profile failure
    pub fn run(
        &self,
        request: &CheckRequest,
        extra_profiles: &[ProfileRequest],
    ) -> AppResult<CheckReport> {
        let profiles: Vec<ProfileRequest> = request
            .profiles
            .iter()
            .chain(extra_profiles)
            .cloned()
            .collect();
        if profiles.is_empty() {
            return Err(AppError::new(
                ErrorCode::MissingRequiredField,
                "no dietary profile selected",
            ));
        }
        let profile_ids: Vec<String> = profiles.iter().map(|p| p.id.clone()).collect();
        ResolutionLogger::log_check_started(&request.dish, request.ingredients.len(), &profile_ids);

        let rules = self.store.rules_for_all(&profiles)?;
        let recipe = self.build_recipe(request)?;
        let resolution = self.engine.resolve(&recipe, &rules);
        ResolutionLogger::log_verdict(&request.dish, &resolution);

        Ok(CheckReport {
            dish: request.dish.clone(),
            profiles: profile_ids,
            resolution,
        })
    }
}

/// Run a full check with the global dietary configuration
///
/// # Errors
///
/// See [`RecipeChecker::run`].
pub fn run_check(request: &CheckRequest, extra_profiles: &[ProfileRequest]) -> AppResult<CheckReport> {
    RecipeChecker::from_config(DietaryConfig::global()).run(request, extra_profiles)
}
