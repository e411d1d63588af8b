// ABOUTME: Resolution engine that checks a recipe's derived facts against dietary rules
// ABOUTME: Produces Accepted with every derived fact or Rejected with the violated constraints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Resolution Engine
//!
//! Resolution runs in two steps. [`ResolutionEngine::assert_facts`] derives
//! every metric once and returns a [`PendingResolution`].
//! [`PendingResolution::evaluate`] consumes it, checks every constraint in
//! declared order and returns the terminal [`Resolution`].
//!
//! A threshold over an undefined metric (for example a calorie percentage of
//! a zero-calorie recipe) counts as violated.

use std::fmt::Write as _;

use rayon::prelude::*;
use refactor_core::fixed::Milli;
use serde::Serialize;
use tracing::info;

use super::aggregation::{DerivedFacts, Metric, NutrientAggregator, Recipe};
use super::constraints::Constraint;
use crate::config::DietaryConfig;

/// Evidence that a constraint does not hold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Witness {
    /// Ingredient names matching an exclusion
    Ingredients {
        /// Matching names, in recipe order
        names: Vec<String>,
    },
    /// A defined metric outside its bound
    Value {
        /// Metric under test
        metric: Metric,
        /// Derived value
        value: Milli,
    },
    /// The metric could not be derived
    Undefined {
        /// Metric under test
        metric: Metric,
    },
}

impl Witness {
    fn render(&self) -> String {
        match self {
            Self::Ingredients { names } => names.join(", "),
            Self::Value { metric, value } => format!("{metric} = {value}"),
            Self::Undefined { metric } => format!("{metric} is undefined"),
        }
    }
}

/// A violated constraint with its witness
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The constraint that failed
    pub constraint: Constraint,
    /// Why it failed
    pub witness: Witness,
}

/// Terminal outcome of resolving one recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Resolution {
    /// Every constraint holds
    Accepted {
        /// All derived facts of the recipe
        facts: DerivedFacts,
    },
    /// At least one constraint fails
    Rejected {
        /// Exactly the violated constraints, in declared order
        conflicts: Vec<Violation>,
    },
}

impl Resolution {
    /// True for [`Resolution::Accepted`]
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// True for [`Resolution::Rejected`]
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Derived facts of an accepted recipe
    #[must_use]
    pub const fn facts(&self) -> Option<&DerivedFacts> {
        match self {
            Self::Accepted { facts } => Some(facts),
            Self::Rejected { .. } => None,
        }
    }

    /// Violations of a rejected recipe, empty when accepted
    #[must_use]
    pub fn conflicts(&self) -> &[Violation] {
        match self {
            Self::Accepted { .. } => &[],
            Self::Rejected { conflicts } => conflicts,
        }
    }

    /// Verdict label
    #[must_use]
    pub const fn verdict(&self) -> &'static str {
        match self {
            Self::Accepted { .. } => "accepted",
            Self::Rejected { .. } => "rejected",
        }
    }

    /// Human-readable explanation, one line per violation
    ///
    /// ```text
    /// fat_pct = 40.000 violates fat_pct <= 35.000
    /// ```
    #[must_use]
    pub fn explain(&self) -> String {
        match self {
            Self::Accepted { facts } => {
                format!("'{}' satisfies every constraint", facts.dish())
            }
            Self::Rejected { conflicts } => {
                let mut out = String::new();
                for (index, violation) in conflicts.iter().enumerate() {
                    if index > 0 {
                        out.push('\n');
                    }
                    let _ = write!(
                        out,
                        "{} violates {}",
                        violation.witness.render(),
                        violation.constraint
                    );
                }
                out
            }
        }
    }
}

/// Check one constraint, returning the witness when it is violated
fn check(constraint: &Constraint, facts: &DerivedFacts) -> Option<Witness> {
    match constraint {
        Constraint::Exclusion { substring } => {
            let names = facts.ingredients_containing(substring);
            (!names.is_empty()).then_some(Witness::Ingredients { names })
        }
        Constraint::Threshold {
            metric,
            comparator,
            bound,
        } => match facts.value(*metric) {
            None => Some(Witness::Undefined { metric: *metric }),
            Some(value) if comparator.holds(value, *bound) => None,
            Some(value) => Some(Witness::Value {
                metric: *metric,
                value,
            }),
        },
    }
}

/// Facts asserted for one recipe, awaiting evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResolution {
    facts: DerivedFacts,
}

impl PendingResolution {
    /// Derived facts computed at assertion time
    #[must_use]
    pub const fn facts(&self) -> &DerivedFacts {
        &self.facts
    }

    /// Evaluate every constraint in order and settle the verdict
    #[must_use]
    pub fn evaluate(self, constraints: &[Constraint]) -> Resolution {
        let conflicts: Vec<Violation> = constraints
            .iter()
            .filter_map(|constraint| {
                check(constraint, &self.facts).map(|witness| Violation {
                    constraint: constraint.clone(),
                    witness,
                })
            })
            .collect();

        let dish = self.facts.dish().to_owned();
        let conflict_count = conflicts.len();
        let resolution = if conflicts.is_empty() {
            Resolution::Accepted { facts: self.facts }
        } else {
            Resolution::Rejected { conflicts }
        };

        info!(
            dish = %dish,
            verdict = resolution.verdict(),
            constraints = constraints.len(),
            conflicts = conflict_count,
            "Recipe resolved"
        );
        resolution
    }
}

/// Derives recipe facts and checks them against dietary constraints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionEngine {
    aggregator: NutrientAggregator,
}

impl ResolutionEngine {
    /// Engine deriving facts with the given aggregator
    #[must_use]
    pub const fn new(aggregator: NutrientAggregator) -> Self {
        Self { aggregator }
    }

    /// Engine using the configured daily intake
    #[must_use]
    pub const fn from_config(config: &DietaryConfig) -> Self {
        Self::new(NutrientAggregator::with_daily_calories(config.daily_calories))
    }

    /// Aggregator used for derivation
    #[must_use]
    pub const fn aggregator(&self) -> &NutrientAggregator {
        &self.aggregator
    }

    /// Derive every fact of the recipe once
    #[must_use]
    pub fn assert_facts(&self, recipe: &Recipe) -> PendingResolution {
        PendingResolution {
            facts: self.aggregator.derive(recipe),
        }
    }

    /// Resolve one recipe against an ordered rule set
    #[must_use]
    pub fn resolve(&self, recipe: &Recipe, constraints: &[Constraint]) -> Resolution {
        self.assert_facts(recipe).evaluate(constraints)
    }

    /// Resolve many recipes against the same rules in parallel
    ///
    /// Results come back in input order.
    #[must_use]
    pub fn resolve_batch(&self, recipes: &[Recipe], constraints: &[Constraint]) -> Vec<Resolution> {
        recipes
            .par_iter()
            .map(|recipe| self.resolve(recipe, constraints))
            .collect()
    }
}

/// Resolve one recipe with the standard engine
#[must_use]
pub fn resolve(recipe: &Recipe, constraints: &[Constraint]) -> Resolution {
    ResolutionEngine::default().resolve(recipe, constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use refactor_core::models::{Macronutrient, NutrientField, NutrientVector};

    use crate::recipes::aggregation::accumulate;

    fn recipe_with(calories: i64, fat_g: i64) -> Recipe {
        let reference = NutrientVector::zero()
            .with(NutrientField::Calories, Milli::from_int(calories))
            .with(NutrientField::TotalFat, Milli::from_int(fat_g));
        accumulate(Recipe::new("test"), "base", &reference, Milli::from_int(100)).unwrap()
    }

    #[test]
    fn test_undefined_metric_violates() {
        let recipe = recipe_with(0, 0);
        let rule = Constraint::at_most(Metric::CaloriePercent(Macronutrient::TotalFat), 35);
        let resolution = resolve(&recipe, &[rule]);
        assert_eq!(
            resolution.conflicts()[0].witness,
            Witness::Undefined {
                metric: Metric::CaloriePercent(Macronutrient::TotalFat)
            }
        );
    }

    #[test]
    fn test_explain_renders_value_and_rule() {
        // 1000 kcal with 44.444 g fat is 40% of calories from fat
        let reference = NutrientVector::zero()
            .with(NutrientField::Calories, Milli::from_int(1000))
            .with(NutrientField::TotalFat, Milli::from_raw(44_445));
        let recipe =
            accumulate(Recipe::new("stew"), "base", &reference, Milli::from_int(100)).unwrap();
        let rule = Constraint::at_most(Metric::CaloriePercent(Macronutrient::TotalFat), 35);
        let resolution = resolve(&recipe, &[rule]);
        assert_eq!(
            resolution.explain(),
            "fat_pct = 40.000 violates fat_pct <= 35.000"
        );
    }

    #[test]
    fn test_empty_rule_set_accepts() {
        let resolution = resolve(&recipe_with(500, 10), &[]);
        assert!(resolution.is_accepted());
        assert!(resolution.conflicts().is_empty());
    }
}
