//! Fixed-precision money amounts scraped from UI text

use std::fmt;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A money amount held as integer cents.
///
/// Totals accumulated across steps stay exact at two decimal places, so a
/// sum of scraped prices can be compared verbatim against a UI-rendered
/// total without floating-point drift.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Parse a price out of UI text such as `"$29.99"`.
    ///
    /// A leading currency marker (any non-numeric prefix) is stripped; the
    /// remainder must be a plain decimal number, rounded to whole cents.
    pub fn parse(text: &str) -> EngineResult<Self> {
        let numeric = text
            .trim()
            .trim_start_matches(|c: char| !(c.is_ascii_digit() || c == '-' || c == '.'));
        if numeric.is_empty() {
            return Err(EngineError::InvalidAmount(text.to_string()));
        }
        let value: f64 = numeric
            .parse()
            .map_err(|_| EngineError::InvalidAmount(text.to_string()))?;
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(text.to_string()));
        }
        Ok(Self {
            cents: (value * 100.0).round() as i64,
        })
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.cents += rhs.cents;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}
