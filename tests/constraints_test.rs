// ABOUTME: Integration tests for dietary profile selection and rule generation
// ABOUTME: Covers built-in profiles, parameterized profiles, and profile lookup failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use recipe_refactor::config::dietary::DietaryConfig;
use recipe_refactor::errors::{AppError, ErrorCode, ResolutionError};
use recipe_refactor::models::{Macronutrient, NutrientField};
use recipe_refactor::recipes::{
    Comparator, Constraint, ConstraintStore, DiabetesType, Metric, ProfileId, ProfileRequest,
};
use recipe_refactor::Milli;

fn store() -> ConstraintStore {
    ConstraintStore::new(DietaryConfig::default())
}

fn protein_bound(rules: &[Constraint]) -> Milli {
    rules
        .iter()
        .find_map(|rule| match rule {
            Constraint::Threshold {
                metric: Metric::CaloriePercent(Macronutrient::Protein),
                bound,
                ..
            } => Some(*bound),
            _ => None,
        })
        .unwrap()
}

// ============================================================================
// Static profiles
// ============================================================================

#[test]
fn test_obesity_rules_in_declared_order() {
    let rules = store().rules_for(&ProfileRequest::new("obesity")).unwrap();
    assert_eq!(
        rules,
        vec![
            Constraint::at_most(Metric::CaloriePercent(Macronutrient::TotalFat), 35),
            Constraint::at_most(Metric::CaloriePercent(Macronutrient::Carbohydrate), 65),
        ]
    );
}

#[test]
fn test_lactose_intolerance_excludes_milk() {
    let rules = store()
        .rules_for(&ProfileRequest::new("lactose_intolerance"))
        .unwrap();
    assert_eq!(rules, vec![Constraint::exclusion("milk")]);
}

#[test]
fn test_balanced_profile_bounds_both_sides() {
    let rules = store().rules_for(&ProfileRequest::new("balanced")).unwrap();
    assert_eq!(rules.len(), 8);
    assert_eq!(
        rules[0],
        Constraint::at_most(Metric::Total(NutrientField::Calories), 2200)
    );
    assert!(rules.contains(&Constraint::threshold(
        Metric::CaloriePercent(Macronutrient::Protein),
        Comparator::GreaterOrEqual,
        Milli::from_int(15),
    )));
}

#[test]
fn test_hypertension_rule_rendering() {
    let rules = store().rules_for(&ProfileRequest::new("Hypertension")).unwrap();
    let rendered: Vec<String> = rules.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "satfat_pct <= 6.000",
            "fat_pct <= 27.000",
            "protein_pct <= 10.000",
            "carb_pct <= 55.000",
        ]
    );
}

// ============================================================================
// Parameterized profiles
// ============================================================================

#[test]
fn test_allergen_profile_builds_one_exclusion_per_allergen() {
    let rules = store()
        .rules_for(&ProfileRequest::allergen(["milk", " peanut ", ""]))
        .unwrap();
    assert_eq!(
        rules,
        vec![Constraint::exclusion("milk"), Constraint::exclusion("peanut")]
    );
}

#[test]
fn test_allergen_profile_without_allergens_is_empty() {
    let rules = store().rules_for(&ProfileRequest::new("allergen")).unwrap();
    assert!(rules.is_empty());
}

#[test]
fn test_diabetes_requires_type() {
    let err = store().rules_for(&ProfileRequest::new("diabetes")).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::missing_parameter("diabetes", "diabetes_type")
    );
    assert_eq!(AppError::from(err).code, ErrorCode::MissingRequiredField);
}

#[test]
fn test_diabetes_types_differ_only_in_protein() {
    let store = store();
    let type1 = store
        .rules_for(&ProfileRequest::diabetes(DiabetesType::Type1))
        .unwrap();
    let type2 = store
        .rules_for(&ProfileRequest::diabetes(DiabetesType::Type2))
        .unwrap();

    assert_eq!(protein_bound(&type1), Milli::from_int(15));
    assert_eq!(protein_bound(&type2), Milli::from_int(20));
    assert_eq!(type1.len(), type2.len());

    let named = store.rules_for(&ProfileRequest::new("diabetes_type_2")).unwrap();
    assert_eq!(named, type2);
}

#[test]
fn test_profile_request_deserializes_parameters() {
    let request: ProfileRequest =
        serde_json::from_str(r#"{"id": "diabetes", "diabetes_type": 1}"#).unwrap();
    assert_eq!(request.diabetes_type, Some(DiabetesType::Type1));
    assert!(serde_json::from_str::<ProfileRequest>(r#"{"id": "diabetes", "diabetes_type": 3}"#)
        .is_err());
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_unknown_profile_is_rejected() {
    let err = store().rules_for(&ProfileRequest::new("keto")).unwrap_err();
    assert_eq!(err, ResolutionError::unknown_profile("keto"));
    assert_eq!(AppError::from(err).code, ErrorCode::UnknownProfile);
}

#[test]
fn test_profile_ids_accept_dashes() {
    assert_eq!(
        "lactose-intolerance".parse::<ProfileId>().unwrap(),
        ProfileId::LactoseIntolerance
    );
}

#[test]
fn test_rules_for_all_concatenates_in_request_order() {
    let rules = store()
        .rules_for_all(&[
            ProfileRequest::new("lactose_intolerance"),
            ProfileRequest::new("obesity"),
        ])
        .unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(rules[0], Constraint::exclusion("milk"));
}

#[test]
fn test_describe_lists_every_profile() {
    let listing = store().describe();
    assert_eq!(listing.len(), ProfileId::ALL.len());
    let obesity = listing.iter().find(|p| p.id == "obesity").unwrap();
    assert_eq!(obesity.rules, vec!["fat_pct <= 35.000", "carb_pct <= 65.000"]);
}
