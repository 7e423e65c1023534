use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::weights::WeightTable;

pub const DEFAULT_MAX_CGPA: f64 = 10.0;
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// Scoring parameters injected into the ranking pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Upper bound of the CGPA scale (10.0, 4.0, ...).
    pub max_cgpa: f64,
    pub weights: WeightTable,
    /// "Today" for the deadline urgency factor. Urgency scores 0.0 without it.
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
    /// Catalogs at least this large are scored on the rayon pool.
    pub parallel_threshold: usize,
}

impl ScoringConfig {
    pub fn with_max_cgpa(mut self, max_cgpa: f64) -> Self {
        self.max_cgpa = max_cgpa;
        self
    }

    pub fn with_weights(mut self, weights: WeightTable) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_reference_date(mut self, today: NaiveDate) -> Self {
        self.reference_date = Some(today);
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_cgpa: DEFAULT_MAX_CGPA,
            weights: WeightTable::standard(),
            reference_date: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}
