// ABOUTME: Criterion benchmarks for the nutrition resolution pipeline
// ABOUTME: Measures unit conversion, nutrient accumulation, and batch resolution throughput
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for recipe resolution.
//!
//! Measures single conversions, per-ingredient accumulation, and parallel
//! resolution of recipe batches of increasing size.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use recipe_refactor::config::dietary::DietaryConfig;
use recipe_refactor::models::{NutrientField, NutrientVector, UnitKind};
use recipe_refactor::recipes::{
    accumulate, Constraint, ConstraintStore, ProfileRequest, Recipe, ResolutionEngine,
    UnitConverter,
};
use recipe_refactor::Milli;

fn reference_row(seed: i64) -> NutrientVector {
    NutrientVector::zero()
        .with(NutrientField::Calories, Milli::from_int(100 + seed % 300))
        .with(NutrientField::Protein, Milli::from_int(seed % 20))
        .with(NutrientField::TotalFat, Milli::from_int(seed % 15))
        .with(NutrientField::Carbohydrate, Milli::from_int(seed % 60))
        .with(NutrientField::Sugar, Milli::from_int(seed % 10))
}

fn build_recipe(index: i64, ingredients: i64) -> Recipe {
    (0..ingredients).fold(Recipe::new(format!("dish {index}")), |recipe, n| {
        accumulate(
            recipe,
            &format!("ingredient {n}"),
            &reference_row(index + n),
            Milli::from_int(50 + n),
        )
        .unwrap()
    })
}

fn all_rules() -> Vec<Constraint> {
    ConstraintStore::new(DietaryConfig::default())
        .rules_for_all(&[
            ProfileRequest::allergen(["peanut", "shellfish"]),
            ProfileRequest::new("lactose_intolerance"),
            ProfileRequest::new("hypertension"),
            ProfileRequest::new("obesity"),
            ProfileRequest::new("balanced"),
            ProfileRequest::new("diabetes_type_2"),
        ])
        .unwrap()
}

fn bench_conversion(c: &mut Criterion) {
    let converter = UnitConverter::new();
    let mut group = c.benchmark_group("conversion");

    group.bench_function("cup_of_flour", |b| {
        b.iter(|| {
            converter
                .to_grams(black_box("flour"), black_box(Milli::from_raw(1_500)), Some(UnitKind::Cup))
                .unwrap()
        });
    });
    group.bench_function("pieces_of_egg", |b| {
        b.iter(|| {
            converter
                .to_grams(black_box("eggs"), black_box(Milli::from_int(3)), Some(UnitKind::Piece))
                .unwrap()
        });
    });

    group.finish();
}

fn bench_accumulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("accumulation");

    for ingredients in [5_i64, 20, 50] {
        group.throughput(Throughput::Elements(ingredients as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(ingredients),
            &ingredients,
            |b, &ingredients| b.iter(|| build_recipe(black_box(0), ingredients)),
        );
    }

    group.finish();
}

fn bench_batch_resolution(c: &mut Criterion) {
    let engine = ResolutionEngine::default();
    let rules = all_rules();
    let mut group = c.benchmark_group("batch");

    for size in [10_i64, 100, 1_000] {
        let recipes: Vec<Recipe> = (0..size).map(|index| build_recipe(index, 8)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &recipes, |b, recipes| {
            b.iter(|| engine.resolve_batch(black_box(recipes), &rules));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_conversion,
    bench_accumulation,
    bench_batch_resolution
);
criterion_main!(benches);
