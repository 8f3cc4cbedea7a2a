/*!
 * Weighted Snapshots
 *
 * Point-in-time view of a reservoir's samples, where each sample carries a
 * weight. Quantiles are computed over the cumulative normalized weight rather
 * than the sample rank, so recent (heavier) samples dominate.
 */

use crate::core::errors::{MetricsError, Result};
use serde::{Deserialize, Serialize};

/// A sampled value and its weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSample {
    pub value: i64,
    pub weight: f64,
}

impl WeightedSample {
    pub const fn new(value: i64, weight: f64) -> Self {
        Self { value, weight }
    }
}

#[derive(Debug, Clone, Copy)]
struct Element {
    value: i64,
    norm_weight: f64,
    /// Cumulative normalized weight of all preceding elements
    quantile: f64,
}

/// Sorted, weight-normalized samples
#[derive(Debug, Clone, Default)]
pub struct WeightedSnapshot {
    elements: Vec<Element>,
}

impl WeightedSnapshot {
    pub fn new(mut samples: Vec<WeightedSample>) -> Self {
        samples.sort_by_key(|s| s.value);

        let sum_weight: f64 = samples.iter().map(|s| s.weight).sum();
        let zero_weight = sum_weight == 0.0;

        let mut elements = Vec::with_capacity(samples.len());
        let mut cumulative = 0.0;
        for sample in &samples {
            let norm_weight = if zero_weight {
                0.0
            } else {
                sample.weight / sum_weight
            };
            elements.push(Element {
                value: sample.value,
                norm_weight,
                quantile: cumulative,
            });
            cumulative += norm_weight;
        }

        Self { elements }
    }

    /// Value at `quantile` (in `[0, 1]`)
    pub fn value(&self, quantile: f64) -> Result<f64> {
        if !(0.0..=1.0).contains(&quantile) {
            return Err(MetricsError::InvalidQuantile(quantile));
        }
        Ok(self.value_at(quantile))
    }

    /// Quantile lookup for a quantile already known to be valid
    fn value_at(&self, quantile: f64) -> f64 {
        if self.elements.is_empty() {
            return 0.0;
        }

        // First element whose cumulative quantile is not below the request
        let lower_bound = self.elements.partition_point(|e| e.quantile < quantile);

        if lower_bound == 0 {
            return self.min() as f64;
        }
        if lower_bound == self.elements.len() {
            return self.max() as f64;
        }

        let element = &self.elements[lower_bound];
        if element.quantile == quantile {
            element.value as f64
        } else {
            self.elements[lower_bound - 1].value as f64
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn min(&self) -> i64 {
        self.elements.first().map(|e| e.value).unwrap_or(0)
    }

    pub fn max(&self) -> i64 {
        self.elements.last().map(|e| e.value).unwrap_or(0)
    }

    /// Weighted mean
    pub fn mean(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.value as f64 * e.norm_weight)
            .sum()
    }

    /// Weighted standard deviation
    pub fn std_dev(&self) -> f64 {
        if self.elements.len() <= 1 {
            return 0.0;
        }

        let mean = self.mean();
        let variance: f64 = self
            .elements
            .iter()
            .map(|e| {
                let diff = e.value as f64 - mean;
                e.norm_weight * diff * diff
            })
            .sum();
        variance.sqrt()
    }

    /// Sampled values in ascending order
    pub fn values(&self) -> Vec<i64> {
        self.elements.iter().map(|e| e.value).collect()
    }

    pub fn median(&self) -> f64 {
        self.value_at(0.5)
    }

    pub fn p75(&self) -> f64 {
        self.value_at(0.75)
    }

    pub fn p95(&self) -> f64 {
        self.value_at(0.95)
    }

    pub fn p98(&self) -> f64 {
        self.value_at(0.98)
    }

    pub fn p99(&self) -> f64 {
        self.value_at(0.99)
    }

    pub fn p999(&self) -> f64 {
        self.value_at(0.999)
    }

    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            size: self.len(),
            min: self.min(),
            max: self.max(),
            mean: self.mean(),
            std_dev: self.std_dev(),
            median: self.median(),
            p75: self.p75(),
            p95: self.p95(),
            p98: self.p98(),
            p99: self.p99(),
            p999: self.p999(),
        }
    }
}

/// Serializable distribution statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SnapshotSummary {
    pub size: usize,
    pub min: i64,
    pub max: i64,
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub p75: f64,
    pub p95: f64,
    pub p98: f64,
    pub p99: f64,
    pub p999: f64,
}
