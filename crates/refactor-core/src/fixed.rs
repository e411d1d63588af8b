// ABOUTME: Fixed-point decimal type holding values as integer thousandths
// ABOUTME: Multiplies all factors first and divides once so chained scalings never drift
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Fixed-point arithmetic for nutrition math.
//!
//! Every quantity, conversion factor, mass, nutrient value, and percentage in the
//! engine is a [`Milli`]: an `i64` holding the value multiplied by 1000.
//! Composite computations go through [`Milli::product_div`], which multiplies
//! in `i128` and performs exactly one truncating division at the end.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of raw units per whole unit
pub const SCALE: i64 = 1_000;

/// Decimal digits carried after the point
const FRACTION_DIGITS: usize = 3;

/// A decimal value stored as integer thousandths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Milli(i64);

/// Error returned when a decimal or fraction string cannot be read as [`Milli`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid decimal quantity: {0}")]
pub struct ParseMilliError(pub String);

impl Milli {
    /// Zero
    pub const ZERO: Self = Self(0);

    /// Wrap a raw thousandths value
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw thousandths value
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Whole-number value
    #[must_use]
    pub const fn from_int(value: i64) -> Self {
        Self(value.saturating_mul(SCALE))
    }

    /// Exact fraction `numerator / denominator`, truncated to thousandths
    ///
    /// Returns `None` for a zero denominator.
    #[must_use]
    pub fn from_ratio(numerator: i64, denominator: i64) -> Option<Self> {
        Self::product_div(&[numerator, SCALE], denominator)
    }

    /// Lossy conversion from a float, rounded to the nearest thousandth
    ///
    /// Only used at input boundaries (JSON, CLI); engine arithmetic never
    /// goes through floats.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Self((value * 1000.0).round() as i64)
    }

    /// Lossy conversion to a float for display and serialization
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// True when strictly below zero
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// True when exactly zero
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Multiply every factor together and divide once, truncating toward zero
    ///
    /// The product is computed in `i128`. Returns `None` when the divisor is
    /// zero or the result does not fit back into `i64`.
    #[must_use]
    pub fn product_div(factors: &[i64], divisor: i64) -> Option<Self> {
        if divisor == 0 {
            return None;
        }
        let mut product: i128 = 1;
        for factor in factors {
            product = product.checked_mul(i128::from(*factor))?;
        }
        let quotient = product / i128::from(divisor);
        i64::try_from(quotient).ok().map(Self)
    }

    /// Checked addition, `None` on overflow
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for Milli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let scale = SCALE.unsigned_abs();
        write!(
            f,
            "{sign}{}.{:03}",
            magnitude / scale,
            magnitude % scale
        )
    }
}

impl FromStr for Milli {
    type Err = ParseMilliError;

    /// Parse `"12"`, `"1.5"`, `"0.125"`, or a simple fraction `"1/3"`
    ///
    /// Digits beyond the third decimal place are truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ParseMilliError(s.to_owned());

        if let Some((numerator, denominator)) = trimmed.split_once('/') {
            let numerator: i64 = numerator.trim().parse().map_err(|_| invalid())?;
            let denominator: i64 = denominator.trim().parse().map_err(|_| invalid())?;
            return Self::from_ratio(numerator, denominator).ok_or_else(invalid);
        }

        let (negative, unsigned) = trimmed
            .strip_prefix('-')
            .map_or((false, trimmed), |rest| (true, rest));
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let mut digits: String = fraction.chars().take(FRACTION_DIGITS).collect();
        while digits.len() < FRACTION_DIGITS {
            digits.push('0');
        }
        let fraction_value: i64 = digits.parse().map_err(|_| invalid())?;

        let raw = whole_value
            .checked_mul(SCALE)
            .and_then(|w| w.checked_add(fraction_value))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -raw } else { raw }))
    }
}

impl Serialize for Milli {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Milli {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok(Self::from_f64(value))
    }
}
