//! Currency rate abstractions and the static exchange-rate table

use anyhow::{Result, bail};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Rows of a rate table keyed by source code, then target code.
pub type RateRows = HashMap<String, HashMap<String, f64>>;

pub trait CurrencyRateProvider: Send + Sync {
    /// Returns the multiplier converting `from` into `to`, or `None` when the
    /// pair is not listed.
    fn get_rate(&self, from: &str, to: &str) -> Option<f64>;
}

/// A fixed, square table of exchange rates. Built once at startup and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateTable {
    rates: RateRows,
}

impl ExchangeRateTable {
    /// Builds a table from raw rows, rejecting anything that is not square over
    /// its codes, has a non-unit identity rate, or holds a non-positive rate.
    pub fn from_rows(rates: RateRows) -> Result<Self> {
        if rates.is_empty() {
            bail!("Exchange rate table is empty");
        }

        for (source, row) in &rates {
            if row.len() != rates.len() {
                bail!(
                    "Exchange rate row {} lists {} targets, expected {}",
                    source,
                    row.len(),
                    rates.len()
                );
            }
            for (target, rate) in row {
                if !rates.contains_key(target) {
                    bail!("Exchange rate row {source} targets unknown currency {target}");
                }
                if !rate.is_finite() || *rate <= 0.0 {
                    bail!("Exchange rate {source} -> {target} must be positive, got {rate}");
                }
                if source == target && *rate != 1.0 {
                    bail!("Identity rate for {source} must be 1, got {rate}");
                }
            }
        }

        debug!(currencies = rates.len(), "Built exchange rate table");
        Ok(Self { rates })
    }

    /// Currency codes known to the table, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// The table as sorted rows, for display and serialization.
    pub fn sorted_rows(&self) -> BTreeMap<&str, BTreeMap<&str, f64>> {
        self.rates
            .iter()
            .map(|(source, row)| {
                let row: BTreeMap<&str, f64> = row.iter().map(|(t, r)| (t.as_str(), *r)).collect();
                (source.as_str(), row)
            })
            .collect()
    }
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        let rows = [
            ("TWD", [("TWD", 1.0), ("JPY", 3.669), ("USD", 0.03281)]),
            ("JPY", [("TWD", 0.26956), ("JPY", 1.0), ("USD", 0.00885)]),
            ("USD", [("TWD", 30.444), ("JPY", 111.801), ("USD", 1.0)]),
        ];
        let rates: RateRows = rows
            .into_iter()
            .map(|(source, row)| {
                let row: HashMap<String, f64> = row
                    .into_iter()
                    .map(|(target, rate)| (target.to_string(), rate))
                    .collect();
                (source.to_string(), row)
            })
            .collect();
        Self { rates }
    }
}

impl CurrencyRateProvider for ExchangeRateTable {
    fn get_rate(&self, from: &str, to: &str) -> Option<f64> {
        self.rates.get(from).and_then(|row| row.get(to)).copied()
    }
}
