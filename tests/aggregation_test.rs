// ABOUTME: Integration tests for nutrient aggregation and derived percentages
// ABOUTME: Verifies scaling from per-100g rows, monotonicity, and undefined percentages at zero calories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use recipe_refactor::models::{Macronutrient, NutrientField, NutrientVector};
use recipe_refactor::recipes::{accumulate, Metric, NutrientAggregator, Recipe};
use recipe_refactor::Milli;

fn row(pairs: &[(NutrientField, i64)]) -> NutrientVector {
    pairs
        .iter()
        .fold(NutrientVector::zero(), |vector, (field, value)| {
            vector.with(*field, Milli::from_int(*value))
        })
}

// ============================================================================
// Accumulation
// ============================================================================

#[test]
fn test_reference_row_scales_by_mass() {
    let apple = row(&[
        (NutrientField::Calories, 52),
        (NutrientField::Carbohydrate, 14),
        (NutrientField::Sugar, 10),
    ]);
    let recipe = accumulate(Recipe::new("apple slices"), "apple", &apple, Milli::from_int(200))
        .unwrap();

    let totals = recipe.nutrients();
    assert_eq!(totals.get(NutrientField::Calories), Milli::from_int(104));
    assert_eq!(totals.get(NutrientField::Carbohydrate), Milli::from_int(28));
    assert_eq!(totals.get(NutrientField::Sugar), Milli::from_int(20));
    assert_eq!(totals.get(NutrientField::Protein), Milli::ZERO);
    assert_eq!(recipe.total_mass(), Milli::from_int(200));
}

#[test]
fn test_totals_never_decrease() {
    let rows = [
        row(&[(NutrientField::Calories, 364), (NutrientField::Carbohydrate, 76)]),
        row(&[(NutrientField::Calories, 61), (NutrientField::TotalFat, 3)]),
        row(&[(NutrientField::Sodium, 38_758)]),
    ];
    let mut recipe = Recipe::new("dough");
    for (index, reference) in rows.iter().enumerate() {
        let before = *recipe.nutrients();
        recipe = accumulate(recipe, &format!("item {index}"), reference, Milli::from_int(75))
            .unwrap();
        for field in NutrientField::ALL {
            assert!(recipe.nutrients().get(field) >= before.get(field));
        }
    }
    assert_eq!(recipe.ingredients().len(), 3);
}

#[test]
fn test_zero_grams_adds_nothing() {
    let reference = row(&[(NutrientField::Calories, 900)]);
    let recipe = accumulate(Recipe::new("empty"), "oil", &reference, Milli::ZERO).unwrap();
    assert!(recipe.nutrients().is_zero());
}

// ============================================================================
// Derived percentages
// ============================================================================

#[test]
fn test_carbohydrate_share_of_calories() {
    let reference = row(&[
        (NutrientField::Calories, 2000),
        (NutrientField::Carbohydrate, 250),
    ]);
    let recipe = accumulate(Recipe::new("pasta"), "pasta", &reference, Milli::from_int(100))
        .unwrap();
    let facts = NutrientAggregator::new().derive(&recipe);

    assert_eq!(
        facts.calorie_percent(Macronutrient::Carbohydrate),
        Some(Milli::from_int(50))
    );
    assert_eq!(
        facts.value(Metric::DailyCaloriePercent),
        Some(Milli::from_int(100))
    );
    assert_eq!(
        facts.daily_percent(Macronutrient::Carbohydrate),
        Some(Milli::from_int(50))
    );
}

#[test]
fn test_zero_calories_leave_percentages_undefined() {
    let reference = row(&[(NutrientField::Sodium, 500)]);
    let recipe = accumulate(Recipe::new("brine"), "salt water", &reference, Milli::from_int(10))
        .unwrap();
    let facts = NutrientAggregator::new().derive(&recipe);

    for macro_ in Macronutrient::ALL {
        assert_eq!(facts.calorie_percent(macro_), None);
        assert_eq!(facts.daily_percent(macro_), Some(Milli::ZERO));
    }
    assert_eq!(
        facts.value(Metric::Total(NutrientField::Sodium)),
        Some(Milli::from_int(50))
    );
}

#[test]
fn test_custom_daily_intake() {
    let reference = row(&[(NutrientField::Calories, 500)]);
    let recipe = accumulate(Recipe::new("snack"), "bar", &reference, Milli::from_int(100))
        .unwrap();
    let facts = NutrientAggregator::with_daily_calories(2500).derive(&recipe);
    assert_eq!(
        facts.value(Metric::DailyCaloriePercent),
        Some(Milli::from_int(20))
    );
}

#[test]
fn test_facts_serialize_with_metric_map() {
    let reference = row(&[(NutrientField::Calories, 100), (NutrientField::Protein, 5)]);
    let recipe = accumulate(Recipe::new("broth"), "chicken broth", &reference, Milli::from_int(100))
        .unwrap();
    let facts = NutrientAggregator::new().derive(&recipe);

    let json = serde_json::to_value(&facts).unwrap();
    assert_eq!(json["dish"], "broth");
    assert_eq!(json["metrics"]["protein_pct"], 20.0);
    assert!(json["metrics"].get("total_calories").is_none());
    assert_eq!(json["totals"]["calories"], 100.0);
}
