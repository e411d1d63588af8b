// ABOUTME: Integration tests for ingredient quantity conversion to grams
// ABOUTME: Covers weight, volume, and count units plus density and unit failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use recipe_refactor::errors::ResolutionError;
use recipe_refactor::models::UnitKind;
use recipe_refactor::recipes::{to_grams, unit_factor, DensityEntry, UnitConverter};
use recipe_refactor::Milli;

// ============================================================================
// Weight units
// ============================================================================

#[test]
fn test_grams_are_returned_unchanged() {
    let quantity = Milli::from_raw(123_456);
    assert_eq!(to_grams("anything at all", quantity, None).unwrap(), quantity);
    assert_eq!(
        to_grams("anything at all", quantity, Some(UnitKind::Gram)).unwrap(),
        quantity
    );
}

#[test]
fn test_weight_units_need_no_density() {
    let kilo = to_grams("mystery paste", Milli::from_int(2), Some(UnitKind::Kilogram)).unwrap();
    assert_eq!(kilo, Milli::from_int(2000));

    // 1 lb = 453.592 g
    let pound = to_grams("mystery paste", Milli::from_int(1), Some(UnitKind::Pound)).unwrap();
    assert_eq!(pound, Milli::from_raw(453_592));
}

// ============================================================================
// Volume units
// ============================================================================

#[test]
fn test_cup_of_whole_milk_uses_alias_density() {
    // 1000 * 236588 * 1030 / 1_000_000 = 243685.64
    let grams = to_grams("whole milk", Milli::from_int(1), Some(UnitKind::Cup)).unwrap();
    assert_eq!(grams, Milli::from_raw(243_685));
}

#[test]
fn test_volume_of_unknown_ingredient_is_missing_density() {
    let err = to_grams("dragonfruit puree", Milli::from_int(2), Some(UnitKind::Cup)).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::missing_density("dragonfruit puree", UnitKind::Cup)
    );
    assert_eq!(err.ingredient(), Some("dragonfruit puree"));
}

#[test]
fn test_conversion_is_pure() {
    let converter = UnitConverter::new();
    let first = converter
        .to_grams("flour", Milli::from_raw(2_500), Some(UnitKind::Tablespoon))
        .unwrap();
    let second = converter
        .to_grams("flour", Milli::from_raw(2_500), Some(UnitKind::Tablespoon))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_every_volume_unit_has_a_factor() {
    for unit in UnitKind::ALL {
        if unit.is_volume() {
            assert!(unit_factor(unit).is_some(), "{unit} has no factor");
        }
    }
}

// ============================================================================
// Count units
// ============================================================================

#[test]
fn test_piece_count_uses_grams_per_piece() {
    let grams = to_grams("eggs", Milli::from_int(3), Some(UnitKind::Piece)).unwrap();
    assert_eq!(grams, Milli::from_int(150));
}

#[test]
fn test_piece_of_liquid_only_ingredient_is_missing_density() {
    let err = to_grams("water", Milli::from_int(1), Some(UnitKind::Piece)).unwrap_err();
    assert!(matches!(err, ResolutionError::MissingDensity { .. }));
}

// ============================================================================
// Failures and custom tables
// ============================================================================

#[test]
fn test_unsupported_unit_spelling() {
    let err = "handful".parse::<UnitKind>().unwrap_err();
    assert_eq!(err, ResolutionError::unsupported_unit("handful"));
}

#[test]
fn test_negative_quantity_is_invalid() {
    let err = to_grams("flour", Milli::from_int(-1), Some(UnitKind::Cup)).unwrap_err();
    assert!(matches!(err, ResolutionError::InvalidQuantity { .. }));
}

#[test]
fn test_custom_density_table() {
    let converter =
        UnitConverter::with_densities([("Tahini", DensityEntry::liquid(960))]);
    assert!(converter.has_density("tahini"));
    assert!(!converter.has_density("flour"));
    assert_eq!(converter.known_ingredients(), vec!["tahini"]);

    // 1000 * 1000 * 960 / 1_000_000 = 960
    let grams = converter
        .to_grams("tahini", Milli::from_int(1), Some(UnitKind::Milliliter))
        .unwrap();
    assert_eq!(grams, Milli::from_raw(960));
}
