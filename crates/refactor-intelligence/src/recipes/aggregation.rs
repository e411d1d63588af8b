// ABOUTME: Nutrient aggregation from per-100g reference rows into recipe totals
// ABOUTME: Derives calorie and daily-intake percentages, leaving them undefined at zero calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrient Aggregation
//!
//! A [`Recipe`] starts with an all-zero aggregate. Each
//! [`NutrientAggregator::accumulate`] call scales one per-100 g reference row
//! by the ingredient mass and adds it in. [`NutrientAggregator::derive`] then
//! computes every derived metric once into [`DerivedFacts`]. Percentages are
//! truncated to whole percents before any bound is compared.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use refactor_core::constants::{energy, percent, units};
use refactor_core::errors::ResolutionError;
use refactor_core::fixed::{Milli, SCALE};
use refactor_core::models::{IngredientFact, Macronutrient, NutrientField, NutrientVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A derived value a threshold constraint can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Metric {
    /// Absolute recipe total of a nutrient (`total_sodium`)
    Total(NutrientField),
    /// Macronutrient share of recipe calories (`fat_pct`)
    CaloriePercent(Macronutrient),
    /// Macronutrient energy as a share of the daily intake (`sugar_daily_pct`)
    DailyPercent(Macronutrient),
    /// Recipe calories as a share of the daily intake (`calories_daily_pct`)
    DailyCaloriePercent,
}

/// Name of [`Metric::DailyCaloriePercent`]
const DAILY_CALORIE_PERCENT_NAME: &str = "calories_daily_pct";

impl Metric {
    /// Every metric, in report order
    #[must_use]
    pub fn all() -> Vec<Self> {
        NutrientField::ALL
            .into_iter()
            .map(Self::Total)
            .chain(Macronutrient::ALL.into_iter().map(Self::CaloriePercent))
            .chain(Macronutrient::ALL.into_iter().map(Self::DailyPercent))
            .chain([Self::DailyCaloriePercent])
            .collect()
    }

    /// Stable snake-case name
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Total(field) => format!("total_{}", field.name()),
            Self::CaloriePercent(macro_) => format!("{}_pct", macro_.short_name()),
            Self::DailyPercent(macro_) => format!("{}_daily_pct", macro_.short_name()),
            Self::DailyCaloriePercent => DAILY_CALORIE_PERCENT_NAME.to_owned(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        if name == DAILY_CALORIE_PERCENT_NAME {
            return Ok(Self::DailyCaloriePercent);
        }
        if let Some(field) = name.strip_prefix("total_") {
            return NutrientField::from_name(field)
                .map(Self::Total)
                .ok_or_else(|| format!("unknown metric '{s}'"));
        }
        if let Some(prefix) = name.strip_suffix("_daily_pct") {
            return Macronutrient::from_short_name(prefix)
                .map(Self::DailyPercent)
                .ok_or_else(|| format!("unknown metric '{s}'"));
        }
        if let Some(prefix) = name.strip_suffix("_pct") {
            return Macronutrient::from_short_name(prefix)
                .map(Self::CaloriePercent)
                .ok_or_else(|| format!("unknown metric '{s}'"));
        }
        Err(format!("unknown metric '{s}'"))
    }
}

impl From<Metric> for String {
    fn from(metric: Metric) -> Self {
        metric.name()
    }
}

impl TryFrom<String> for Metric {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A recipe under construction: dish name, ingredient facts, running totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    dish: String,
    ingredients: Vec<IngredientFact>,
    nutrients: NutrientVector,
    total_mass: Milli,
}

impl Recipe {
    /// Empty recipe with an all-zero aggregate
    #[must_use]
    pub fn new(dish: impl Into<String>) -> Self {
        Self {
            dish: dish.into(),
            ingredients: Vec::new(),
            nutrients: NutrientVector::zero(),
            total_mass: Milli::ZERO,
        }
    }

    /// Recipe seeded with parsed ingredient facts and a zero aggregate
    #[must_use]
    pub fn with_ingredients(dish: impl Into<String>, ingredients: Vec<IngredientFact>) -> Self {
        Self {
            ingredients,
            ..Self::new(dish)
        }
    }

    /// Dish name
    #[must_use]
    pub fn dish(&self) -> &str {
        &self.dish
    }

    /// Ingredient facts in insertion order
    #[must_use]
    pub fn ingredients(&self) -> &[IngredientFact] {
        &self.ingredients
    }

    /// Running nutrient totals
    #[must_use]
    pub const fn nutrients(&self) -> &NutrientVector {
        &self.nutrients
    }

    /// Summed ingredient mass in grams
    #[must_use]
    pub const fn total_mass(&self) -> Milli {
        self.total_mass
    }

    fn has_ingredient(&self, name: &str) -> bool {
        self.ingredients.iter().any(|fact| fact.is_named(name))
    }
}

/// Folds reference rows into recipe totals and derives percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutrientAggregator {
    daily_calories: i64,
}

impl Default for NutrientAggregator {
    fn default() -> Self {
        Self {
            daily_calories: energy::DAILY_CALORIES_KCAL,
        }
    }
}

impl NutrientAggregator {
    /// Aggregator using the standard 2000 kcal daily intake
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator with a custom daily intake (kcal)
    #[must_use]
    pub const fn with_daily_calories(daily_calories: i64) -> Self {
        Self { daily_calories }
    }

    /// Reference daily intake in kcal
    #[must_use]
    pub const fn daily_calories(&self) -> i64 {
        self.daily_calories
    }

    /// Add one ingredient's contribution to the recipe
    ///
    /// Every field is scaled as `reference × grams / 100`, truncating once per
    /// field. An ingredient name not yet among the recipe's facts is recorded
    /// as a gram-measured fact so exclusion rules can see it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for negative grams or when a contribution or
    /// running total overflows, and `NegativeNutrient` for a reference row
    /// holding a negative value. The recipe is consumed either way; on error
    /// no partial total is kept.
    pub fn accumulate(
        &self,
        mut recipe: Recipe,
        ingredient_name: &str,
        reference: &NutrientVector,
        grams: Milli,
    ) -> Result<Recipe, ResolutionError> {
        if grams.is_negative() {
            return Err(ResolutionError::invalid_quantity(ingredient_name, grams));
        }
        if let Some(field) = reference.first_negative() {
            return Err(ResolutionError::negative_nutrient(ingredient_name, field));
        }

        let overflow = || ResolutionError::invalid_quantity(ingredient_name, grams);
        let mut updated = recipe.nutrients;
        for (field, per_100g) in reference.iter() {
            let total = Milli::product_div(&[per_100g.raw(), grams.raw()], units::REFERENCE_MASS_RAW)
                .and_then(|contribution| updated.get(field).checked_add(contribution))
                .ok_or_else(overflow)?;
            updated.set(field, total);
        }
        let total_mass = recipe.total_mass.checked_add(grams).ok_or_else(overflow)?;

        recipe.nutrients = updated;
        recipe.total_mass = total_mass;
        if !recipe.has_ingredient(ingredient_name) {
            recipe
                .ingredients
                .push(IngredientFact::in_grams(ingredient_name.trim(), grams));
        }

        debug!(
            dish = %recipe.dish,
            ingredient = ingredient_name,
            grams = %grams,
            calories = %recipe.nutrients.get(NutrientField::Calories),
            "Accumulated ingredient nutrients"
        );
        Ok(recipe)
    }

    /// Compute every derived metric once
    #[must_use]
    pub fn derive(&self, recipe: &Recipe) -> DerivedFacts {
        let totals = recipe.nutrients;
        let calories = totals.get(NutrientField::Calories);

        let calorie_percent = Macronutrient::ALL.map(|macro_| {
            if calories.raw() <= 0 {
                return None;
            }
            whole_percent(
                &[
                    totals.get(macro_.field()).raw(),
                    macro_.kcal_per_gram(),
                    percent::PERCENT,
                ],
                calories.raw(),
            )
        });

        let daily_raw = self.daily_calories.checked_mul(SCALE);
        let daily_percent = Macronutrient::ALL.map(|macro_| {
            daily_raw.and_then(|daily| {
                whole_percent(
                    &[
                        totals.get(macro_.field()).raw(),
                        macro_.kcal_per_gram(),
                        percent::PERCENT,
                    ],
                    daily,
                )
            })
        });

        let daily_calorie_percent = daily_raw
            .and_then(|daily| whole_percent(&[calories.raw(), percent::PERCENT], daily));

        DerivedFacts {
            dish: recipe.dish.clone(),
            ingredients: recipe.ingredients.clone(),
            totals,
            total_mass: recipe.total_mass,
            calorie_percent,
            daily_percent,
            daily_calorie_percent,
        }
    }
}

/// Add one ingredient's contribution with the standard aggregator
///
/// # Errors
///
/// See [`NutrientAggregator::accumulate`].
pub fn accumulate(
    recipe: Recipe,
    ingredient_name: &str,
    reference: &NutrientVector,
    grams: Milli,
) -> Result<Recipe, ResolutionError> {
    NutrientAggregator::default().accumulate(recipe, ingredient_name, reference, grams)
}

/// Integer percentage `product(factors) / divisor`, truncated to a whole percent
///
/// Both the numerator's mass or energy term and the divisor are in raw
/// thousandths, so the scales cancel and the quotient is already whole.
fn whole_percent(factors: &[i64], divisor: i64) -> Option<Milli> {
    Milli::product_div(factors, divisor)
        .and_then(|pct| pct.raw().checked_mul(SCALE))
        .map(Milli::from_raw)
}

/// Position of a macronutrient in [`Macronutrient::ALL`]
const fn slot(macro_: Macronutrient) -> usize {
    match macro_ {
        Macronutrient::Carbohydrate => 0,
        Macronutrient::Protein => 1,
        Macronutrient::TotalFat => 2,
        Macronutrient::SaturatedFat => 3,
        Macronutrient::Sugar => 4,
    }
}

/// Totals and derived metrics of a finished recipe
///
/// `None` marks a metric that could not be computed, such as any calorie
/// percentage when the recipe has zero calories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "FactsReport")]
pub struct DerivedFacts {
    dish: String,
    ingredients: Vec<IngredientFact>,
    totals: NutrientVector,
    total_mass: Milli,
    calorie_percent: [Option<Milli>; 5],
    daily_percent: [Option<Milli>; 5],
    daily_calorie_percent: Option<Milli>,
}

impl DerivedFacts {
    /// Dish name
    #[must_use]
    pub fn dish(&self) -> &str {
        &self.dish
    }

    /// Ingredient facts asserted for the recipe
    #[must_use]
    pub fn ingredients(&self) -> &[IngredientFact] {
        &self.ingredients
    }

    /// Absolute nutrient totals
    #[must_use]
    pub const fn totals(&self) -> &NutrientVector {
        &self.totals
    }

    /// Summed ingredient mass in grams
    #[must_use]
    pub const fn total_mass(&self) -> Milli {
        self.total_mass
    }

    /// Macronutrient share of recipe calories, truncated to a whole percent
    #[must_use]
    pub const fn calorie_percent(&self, macro_: Macronutrient) -> Option<Milli> {
        self.calorie_percent[slot(macro_)]
    }

    /// Macronutrient energy as a share of the daily intake, truncated to a whole percent
    #[must_use]
    pub const fn daily_percent(&self, macro_: Macronutrient) -> Option<Milli> {
        self.daily_percent[slot(macro_)]
    }

    /// Value of any metric, `None` when undefined
    #[must_use]
    pub const fn value(&self, metric: Metric) -> Option<Milli> {
        match metric {
            Metric::Total(field) => Some(self.totals.get(field)),
            Metric::CaloriePercent(macro_) => self.calorie_percent(macro_),
            Metric::DailyPercent(macro_) => self.daily_percent(macro_),
            Metric::DailyCaloriePercent => self.daily_calorie_percent,
        }
    }

    /// Ingredient names containing `needle`, ignoring case
    #[must_use]
    pub fn ingredients_containing(&self, needle: &str) -> Vec<String> {
        self.ingredients
            .iter()
            .filter(|fact| fact.name_contains(needle))
            .map(|fact| fact.name().to_owned())
            .collect()
    }
}

/// Serialized shape of [`DerivedFacts`]
#[derive(Debug, Serialize)]
struct FactsReport {
    dish: String,
    ingredients: Vec<IngredientFact>,
    total_mass_g: Milli,
    totals: NutrientVector,
    metrics: BTreeMap<String, Option<Milli>>,
}

impl From<DerivedFacts> for FactsReport {
    fn from(facts: DerivedFacts) -> Self {
        let metrics = Metric::all()
            .into_iter()
            .filter(|metric| !matches!(metric, Metric::Total(_)))
            .map(|metric| (metric.name(), facts.value(metric)))
            .collect();
        Self {
            dish: facts.dish,
            ingredients: facts.ingredients,
            total_mass_g: facts.total_mass,
            totals: facts.totals,
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_round_trip() {
        for metric in Metric::all() {
            assert_eq!(metric.name().parse::<Metric>().unwrap(), metric);
        }
        assert_eq!(
            "fat_pct".parse::<Metric>().unwrap(),
            Metric::CaloriePercent(Macronutrient::TotalFat)
        );
        assert_eq!(
            "sugar_daily_pct".parse::<Metric>().unwrap(),
            Metric::DailyPercent(Macronutrient::Sugar)
        );
        assert!("fiber_pct".parse::<Metric>().is_err());
    }

    #[test]
    fn test_contribution_truncates_once_per_field() {
        // 33.333 kcal/100g * 150 g = 49.9995 -> 49.999
        let reference = NutrientVector::zero()
            .with(NutrientField::Calories, Milli::from_raw(33_333));
        let recipe = accumulate(Recipe::new("test"), "x", &reference, Milli::from_int(150))
            .unwrap();
        assert_eq!(
            recipe.nutrients().get(NutrientField::Calories),
            Milli::from_raw(49_999)
        );
    }

    #[test]
    fn test_accumulate_records_unknown_ingredient_once() {
        let reference = NutrientVector::zero();
        let recipe = Recipe::new("soup");
        let recipe = accumulate(recipe, "Salt", &reference, Milli::from_int(2)).unwrap();
        let recipe = accumulate(recipe, "salt", &reference, Milli::from_int(3)).unwrap();
        assert_eq!(recipe.ingredients().len(), 1);
        assert_eq!(recipe.total_mass(), Milli::from_int(5));
    }

    #[test]
    fn test_percentages_truncate_to_whole_percent() {
        // 39.9 g fat * 9 over 1000 kcal = 35.91 %, 31 g sugar * 4 over 2000 kcal = 6.2 %
        let reference = NutrientVector::zero()
            .with(NutrientField::Calories, Milli::from_int(1000))
            .with(NutrientField::TotalFat, Milli::from_raw(39_900))
            .with(NutrientField::Sugar, Milli::from_int(31));
        let recipe = accumulate(Recipe::new("fritter"), "batter", &reference, Milli::from_int(100))
            .unwrap();
        let facts = NutrientAggregator::new().derive(&recipe);
        assert_eq!(
            facts.calorie_percent(Macronutrient::TotalFat),
            Some(Milli::from_int(35))
        );
        assert_eq!(
            facts.daily_percent(Macronutrient::Sugar),
            Some(Milli::from_int(6))
        );
        assert_eq!(
            facts.value(Metric::DailyCaloriePercent),
            Some(Milli::from_int(50))
        );
    }

    #[test]
    fn test_running_total_overflow_is_invalid_quantity() {
        let reference =
            NutrientVector::zero().with(NutrientField::Calories, Milli::from_raw(i64::MAX / 2 + 1));
        let recipe = accumulate(Recipe::new("x"), "lard", &reference, Milli::from_int(100))
            .unwrap();
        let err = accumulate(recipe, "lard", &reference, Milli::from_int(100)).unwrap_err();
        assert!(matches!(err, ResolutionError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_unicode_names_fold_to_one_fact() {
        let reference = NutrientVector::zero();
        let recipe = accumulate(Recipe::new("tart"), "CRÈME", &reference, Milli::from_int(10))
            .unwrap();
        let recipe = accumulate(recipe, "crème", &reference, Milli::from_int(10)).unwrap();
        assert_eq!(recipe.ingredients().len(), 1);
    }

    #[test]
    fn test_negative_reference_is_rejected() {
        let reference = NutrientVector::zero().with(NutrientField::Sodium, Milli::from_int(-1));
        let err = accumulate(Recipe::new("x"), "brine", &reference, Milli::from_int(10))
            .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::negative_nutrient("brine", NutrientField::Sodium)
        );
    }
}
