// ABOUTME: Dietary constraint registry mapping profile ids to ordered rules
// ABOUTME: Threshold inequalities over derived metrics and case-insensitive ingredient exclusions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constraint Store
//!
//! A dietary profile is an ordered, conjunctive list of [`Constraint`]s. The
//! numeric bounds come from [`DietaryConfig`]; the allergen profile is built
//! per request from the caller's list.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use refactor_core::errors::ResolutionError;
use refactor_core::fixed::Milli;
use refactor_core::models::{Macronutrient, NutrientField};
use serde::{Deserialize, Serialize};

use super::aggregation::Metric;
use crate::config::DietaryConfig;

/// Process-wide store built from the global configuration
static CONSTRAINT_STORE: OnceLock<ConstraintStore> = OnceLock::new();

/// Relation a threshold requires between a metric and its bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparator {
    /// `value < bound`
    #[serde(rename = "<")]
    Less,
    /// `value <= bound`
    #[serde(rename = "<=")]
    LessOrEqual,
    /// `value > bound`
    #[serde(rename = ">")]
    Greater,
    /// `value >= bound`
    #[serde(rename = ">=")]
    GreaterOrEqual,
}

impl Comparator {
    /// True when `value` satisfies the requirement against `bound`
    #[must_use]
    pub fn holds(self, value: Milli, bound: Milli) -> bool {
        match self {
            Self::Less => value < bound,
            Self::LessOrEqual => value <= bound,
            Self::Greater => value > bound,
            Self::GreaterOrEqual => value >= bound,
        }
    }

    /// Operator symbol
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One dietary rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Constraint {
    /// The metric must satisfy `comparator bound`
    Threshold {
        /// Derived value under test
        metric: Metric,
        /// Required relation
        comparator: Comparator,
        /// Bound in the metric's unit
        bound: Milli,
    },
    /// No ingredient name may contain `substring` (case-insensitive)
    Exclusion {
        /// Forbidden substring
        substring: String,
    },
}

impl Constraint {
    /// Threshold rule
    #[must_use]
    pub const fn threshold(metric: Metric, comparator: Comparator, bound: Milli) -> Self {
        Self::Threshold {
            metric,
            comparator,
            bound,
        }
    }

    /// `metric <= bound`, with a whole-number bound
    #[must_use]
    pub const fn at_most(metric: Metric, bound: i64) -> Self {
        Self::threshold(metric, Comparator::LessOrEqual, Milli::from_int(bound))
    }

    /// `metric >= bound`, with a whole-number bound
    #[must_use]
    pub const fn at_least(metric: Metric, bound: i64) -> Self {
        Self::threshold(metric, Comparator::GreaterOrEqual, Milli::from_int(bound))
    }

    /// Exclusion rule
    #[must_use]
    pub fn exclusion(substring: impl Into<String>) -> Self {
        Self::Exclusion {
            substring: substring.into(),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Threshold {
                metric,
                comparator,
                bound,
            } => write!(f, "{metric} {comparator} {bound}"),
            Self::Exclusion { substring } => {
                write!(f, "no ingredient containing '{substring}'")
            }
        }
    }
}

/// Built-in dietary profile identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileId {
    /// User-supplied allergen exclusions
    Allergen,
    /// Excludes milk
    LactoseIntolerance,
    /// Diabetes with the type given as a parameter
    Diabetes,
    /// Type 1 diabetes
    DiabetesType1,
    /// Type 2 diabetes
    DiabetesType2,
    /// Hypertension
    Hypertension,
    /// Obesity
    Obesity,
    /// General balanced diet
    Balanced,
}

impl ProfileId {
    /// Every registered profile
    pub const ALL: [Self; 8] = [
        Self::Allergen,
        Self::LactoseIntolerance,
        Self::Diabetes,
        Self::DiabetesType1,
        Self::DiabetesType2,
        Self::Hypertension,
        Self::Obesity,
        Self::Balanced,
    ];

    /// Stable identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Allergen => "allergen",
            Self::LactoseIntolerance => "lactose_intolerance",
            Self::Diabetes => "diabetes",
            Self::DiabetesType1 => "diabetes_type_1",
            Self::DiabetesType2 => "diabetes_type_2",
            Self::Hypertension => "hypertension",
            Self::Obesity => "obesity",
            Self::Balanced => "balanced",
        }
    }

    /// One-line summary for listings
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Allergen => "Excludes every ingredient matching a supplied allergen",
            Self::LactoseIntolerance => "Excludes milk",
            Self::Diabetes => "Diabetes thresholds; requires diabetes_type 1 or 2",
            Self::DiabetesType1 => "Type 1 diabetes thresholds",
            Self::DiabetesType2 => "Type 2 diabetes thresholds",
            Self::Hypertension => "Hypertension thresholds",
            Self::Obesity => "Obesity thresholds",
            Self::Balanced => "General balanced-diet thresholds",
        }
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileId {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|profile| profile.as_str() == id)
            .ok_or_else(|| ResolutionError::unknown_profile(s.trim()))
    }
}

/// Diabetes type parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DiabetesType {
    /// Type 1
    Type1,
    /// Type 2
    Type2,
}

impl TryFrom<u8> for DiabetesType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Type1),
            2 => Ok(Self::Type2),
            other => Err(format!("diabetes_type must be 1 or 2, got {other}")),
        }
    }
}

impl From<DiabetesType> for u8 {
    fn from(value: DiabetesType) -> Self {
        match value {
            DiabetesType::Type1 => 1,
            DiabetesType::Type2 => 2,
        }
    }
}

/// A profile selection with its per-invocation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRequest {
    /// Profile identifier
    pub id: String,
    /// Allergen substrings for the `allergen` profile
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allergens: Vec<String>,
    /// Diabetes type for the `diabetes` profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diabetes_type: Option<DiabetesType>,
}

impl ProfileRequest {
    /// Request a profile by id with no parameters
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            allergens: Vec::new(),
            diabetes_type: None,
        }
    }

    /// Allergen profile over the given substrings
    #[must_use]
    pub fn allergen<I, S>(allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ProfileId::Allergen.as_str()).with_allergens(allergens)
    }

    /// Diabetes profile of the given type
    #[must_use]
    pub fn diabetes(diabetes_type: DiabetesType) -> Self {
        Self::new(ProfileId::Diabetes.as_str()).with_diabetes_type(diabetes_type)
    }

    /// Set allergen substrings
    #[must_use]
    pub fn with_allergens<I, S>(mut self, allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergens = allergens.into_iter().map(Into::into).collect();
        self
    }

    /// Set the diabetes type
    #[must_use]
    pub fn with_diabetes_type(mut self, diabetes_type: DiabetesType) -> Self {
        self.diabetes_type = Some(diabetes_type);
        self
    }
}

/// A profile's listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileDescription {
    /// Profile identifier
    pub id: &'static str,
    /// One-line summary
    pub summary: &'static str,
    /// Rendered rules, empty for parameterized profiles
    pub rules: Vec<String>,
}

/// Read-only registry of dietary profiles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintStore {
    config: DietaryConfig,
}

impl ConstraintStore {
    /// Store over the given thresholds
    #[must_use]
    pub const fn new(config: DietaryConfig) -> Self {
        Self { config }
    }

    /// Store built once from [`DietaryConfig::global`]
    pub fn global() -> &'static Self {
        CONSTRAINT_STORE.get_or_init(|| Self::new(DietaryConfig::global().clone()))
    }

    /// Thresholds backing this store
    #[must_use]
    pub const fn config(&self) -> &DietaryConfig {
        &self.config
    }

    /// Ordered rules for one profile selection
    ///
    /// # Errors
    ///
    /// Returns `UnknownProfile` for an unregistered id and `MissingParameter`
    /// when `diabetes` is requested without a type.
    pub fn rules_for(&self, request: &ProfileRequest) -> Result<Vec<Constraint>, ResolutionError> {
        let profile: ProfileId = request.id.parse()?;
        let rules = match profile {
            ProfileId::Allergen => request
                .allergens
                .iter()
                .map(|allergen| allergen.trim())
                .filter(|allergen| !allergen.is_empty())
                .map(Constraint::exclusion)
                .collect(),
            ProfileId::Diabetes => {
                let diabetes_type = request.diabetes_type.ok_or_else(|| {
                    ResolutionError::missing_parameter(profile.as_str(), "diabetes_type")
                })?;
                self.diabetes_rules(diabetes_type)
            }
            static_profile => self.static_rules(static_profile),
        };
        Ok(rules)
    }

    /// Concatenated rules for several selections, in request order
    ///
    /// # Errors
    ///
    /// Returns the first error raised by [`Self::rules_for`].
    pub fn rules_for_all(
        &self,
        requests: &[ProfileRequest],
    ) -> Result<Vec<Constraint>, ResolutionError> {
        let mut rules = Vec::new();
        for request in requests {
            rules.extend(self.rules_for(request)?);
        }
        Ok(rules)
    }

    /// Listing of every registered profile and its rules
    #[must_use]
    pub fn describe(&self) -> Vec<ProfileDescription> {
        ProfileId::ALL
            .into_iter()
            .map(|profile| ProfileDescription {
                id: profile.as_str(),
                summary: profile.summary(),
                rules: self
                    .static_rules(profile)
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            })
            .collect()
    }

    /// Rules that need no per-request parameter
    ///
    /// Parameterized profiles yield an empty list here.
    fn static_rules(&self, profile: ProfileId) -> Vec<Constraint> {
        let hypertension = &self.config.hypertension;
        let obesity = &self.config.obesity;
        let balanced = &self.config.balanced;
        match profile {
            ProfileId::Allergen | ProfileId::Diabetes => Vec::new(),
            ProfileId::LactoseIntolerance => vec![Constraint::exclusion("milk")],
            ProfileId::DiabetesType1 => self.diabetes_rules(DiabetesType::Type1),
            ProfileId::DiabetesType2 => self.diabetes_rules(DiabetesType::Type2),
            ProfileId::Hypertension => vec![
                Constraint::at_most(pct(Macronutrient::SaturatedFat), hypertension.max_satfat_pct),
                Constraint::at_most(pct(Macronutrient::TotalFat), hypertension.max_fat_pct),
                Constraint::at_most(pct(Macronutrient::Protein), hypertension.max_protein_pct),
                Constraint::at_most(pct(Macronutrient::Carbohydrate), hypertension.max_carb_pct),
            ],
            ProfileId::Obesity => vec![
                Constraint::at_most(pct(Macronutrient::TotalFat), obesity.max_fat_pct),
                Constraint::at_most(pct(Macronutrient::Carbohydrate), obesity.max_carb_pct),
            ],
            ProfileId::Balanced => vec![
                Constraint::at_most(
                    Metric::Total(NutrientField::Calories),
                    balanced.max_calories,
                ),
                Constraint::at_most(pct(Macronutrient::Carbohydrate), balanced.max_carb_pct),
                Constraint::at_least(pct(Macronutrient::Carbohydrate), balanced.min_carb_pct),
                Constraint::at_most(pct(Macronutrient::TotalFat), balanced.max_fat_pct),
                Constraint::at_most(pct(Macronutrient::SaturatedFat), balanced.max_satfat_pct),
                Constraint::at_least(pct(Macronutrient::Protein), balanced.min_protein_pct),
                Constraint::at_most(pct(Macronutrient::Protein), balanced.max_protein_pct),
                Constraint::at_most(pct(Macronutrient::Sugar), balanced.max_sugar_pct),
            ],
        }
    }

    fn diabetes_rules(&self, diabetes_type: DiabetesType) -> Vec<Constraint> {
        let diabetes = &self.config.diabetes;
        let max_protein = match diabetes_type {
            DiabetesType::Type1 => diabetes.type1_max_protein_pct,
            DiabetesType::Type2 => diabetes.type2_max_protein_pct,
        };
        vec![
            Constraint::at_most(pct(Macronutrient::Sugar), diabetes.max_sugar_pct),
            Constraint::at_most(pct(Macronutrient::Carbohydrate), diabetes.max_carb_pct),
            Constraint::at_most(pct(Macronutrient::SaturatedFat), diabetes.max_satfat_pct),
            Constraint::at_most(pct(Macronutrient::Protein), max_protein),
            Constraint::at_most(
                Metric::DailyPercent(Macronutrient::Sugar),
                diabetes.max_sugar_daily_pct,
            ),
        ]
    }
}

/// Calorie-percentage metric shorthand
const fn pct(macro_: Macronutrient) -> Metric {
    Metric::CaloriePercent(macro_)
}

/// Ordered rules for one profile selection from the global store
///
/// # Errors
///
/// See [`ConstraintStore::rules_for`].
pub fn rules_for(request: &ProfileRequest) -> Result<Vec<Constraint>, ResolutionError> {
    ConstraintStore::global().rules_for(request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparator_boundaries() {
        let five = Milli::from_int(5);
        assert!(Comparator::LessOrEqual.holds(five, five));
        assert!(!Comparator::Less.holds(five, five));
        assert!(Comparator::GreaterOrEqual.holds(five, five));
        assert!(!Comparator::Greater.holds(five, five));
    }

    #[test]
    fn test_profile_id_accepts_dashes_and_case() {
        assert_eq!(
            "Diabetes-Type-1".parse::<ProfileId>().unwrap(),
            ProfileId::DiabetesType1
        );
        assert_eq!(
            "keto".parse::<ProfileId>().unwrap_err(),
            ResolutionError::unknown_profile("keto")
        );
    }

    #[test]
    fn test_constraint_display() {
        let rule = Constraint::at_most(pct(Macronutrient::TotalFat), 35);
        assert_eq!(rule.to_string(), "fat_pct <= 35.000");
    }

    #[test]
    fn test_diabetes_type_deserializes_from_number() {
        let request: ProfileRequest =
            serde_json::from_str(r#"{"id": "diabetes", "diabetes_type": 2}"#).unwrap();
        assert_eq!(request.diabetes_type, Some(DiabetesType::Type2));
        assert!(serde_json::from_str::<ProfileRequest>(
            r#"{"id": "diabetes", "diabetes_type": 3}"#
        )
        .is_err());
    }
}
