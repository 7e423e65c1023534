use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{Factor, UnknownFactor};

/// Weight assigned to each core factor in the default table.
pub const CORE_WEIGHT: f64 = 1.0 / 6.0;

/// Mapping from factor to aggregation weight.
///
/// Factors missing from the table weigh 0.0. Opt-in factors are only computed when their
/// weight is positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable {
    weights: BTreeMap<Factor, f64>,
}

impl WeightTable {
    /// Six core factors at 1/6 each, opt-in factors disabled.
    pub fn standard() -> Self {
        let mut weights: BTreeMap<Factor, f64> = Factor::CORE
            .iter()
            .map(|factor| (*factor, CORE_WEIGHT))
            .collect();
        for factor in Factor::OPT_IN {
            weights.insert(factor, 0.0);
        }
        Self { weights }
    }

    pub fn empty() -> Self {
        Self {
            weights: BTreeMap::new(),
        }
    }

    /// Sets a factor weight; negative and non-finite values are stored as 0.0.
    pub fn with(mut self, factor: Factor, weight: f64) -> Self {
        self.set(factor, weight);
        self
    }

    pub fn set(&mut self, factor: Factor, weight: f64) {
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        self.weights.insert(factor, weight);
    }

    pub fn weight(&self, factor: Factor) -> f64 {
        self.weights.get(&factor).copied().unwrap_or(0.0)
    }

    pub fn is_enabled(&self, factor: Factor) -> bool {
        self.weight(factor) > 0.0
    }

    pub fn sum(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.weights.iter().map(|(factor, weight)| (*factor, *weight))
    }

    /// Rescales the table so weights sum to 1.0. An all-zero table falls back to
    /// [`WeightTable::standard`].
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum <= f64::EPSILON {
            return Self::standard();
        }
        Self {
            weights: self
                .weights
                .iter()
                .map(|(factor, weight)| (*factor, weight / sum))
                .collect(),
        }
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Raised when a textual weight override cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightParseError {
    #[error(transparent)]
    UnknownFactor(#[from] UnknownFactor),
    #[error("entry '{0}' must look like factor=weight")]
    Malformed(String),
    #[error("weight for {factor} must be a non-negative number, got '{value}'")]
    InvalidWeight { factor: Factor, value: String },
}

impl FromStr for WeightTable {
    type Err = WeightParseError;

    /// Parses `factor=weight` pairs separated by commas on top of the standard table,
    /// e.g. `"sentiment=0.1,urgency=0.2"`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut table = Self::standard();
        for entry in raw.split(',').map(str::trim).filter(|entry| !entry.is_empty()) {
            let (name, value) = entry
                .split_once('=')
                .ok_or_else(|| WeightParseError::Malformed(entry.to_string()))?;
            let factor: Factor = name.parse()?;
            let weight = value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|weight| weight.is_finite() && *weight >= 0.0)
                .ok_or_else(|| WeightParseError::InvalidWeight {
                    factor,
                    value: value.trim().to_string(),
                })?;
            table.set(factor, weight);
        }
        Ok(table)
    }
}
