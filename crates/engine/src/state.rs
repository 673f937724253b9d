//! Per-run accumulator for values observed on the way through a scenario

use std::collections::HashMap;

use crate::money::Money;

/// Values scraped by earlier steps and needed by later cross-checks.
///
/// Created at scenario start, mutated only by steps, discarded with the
/// run. Keys are scenario-chosen names; a total that was never written
/// reads as zero (a cart that accumulated nothing is a valid cart).
#[derive(Debug, Default)]
pub struct ScenarioState {
    totals: HashMap<String, Money>,
    remembered: HashMap<String, String>,
    counters: HashMap<String, u64>,
}

impl ScenarioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to the named running total.
    pub fn add_amount(&mut self, key: &str, amount: Money) {
        *self.totals.entry(key.to_string()).or_insert(Money::ZERO) += amount;
    }

    pub fn total(&self, key: &str) -> Money {
        self.totals.get(key).copied().unwrap_or(Money::ZERO)
    }

    /// Remember a piece of observed text verbatim.
    pub fn remember(&mut self, key: &str, value: impl Into<String>) {
        self.remembered.insert(key.to_string(), value.into());
    }

    pub fn recall(&self, key: &str) -> Option<&str> {
        self.remembered.get(key).map(String::as_str)
    }

    /// Bump the named counter, returning the new value.
    pub fn increment(&mut self, key: &str) -> u64 {
        let counter = self.counters.entry(key.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    pub fn counter(&self, key: &str) -> u64 {
        self.counters.get(key).copied().unwrap_or(0)
    }
}
