//! Common types for confidence intervals

use serde::{Deserialize, Serialize};
use std::fmt;

/// A two-sided confidence interval with the percentiles it was built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound of the interval
    pub lower: f64,
    /// Upper bound of the interval
    pub upper: f64,
    /// Percentile (0-100) of the lower bound
    pub lower_quantile: f64,
    /// Percentile (0-100) of the upper bound
    pub upper_quantile: f64,
}

impl ConfidenceInterval {
    /// Create a new confidence interval
    pub fn new(lower: f64, upper: f64, lower_quantile: f64, upper_quantile: f64) -> Self {
        debug_assert!(lower <= upper, "lower bound {lower} exceeds upper bound {upper}");
        Self {
            lower,
            upper,
            lower_quantile,
            upper_quantile,
        }
    }

    /// Width of the confidence interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Midpoint of the interval
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Nominal coverage, e.g. 0.95 for the 2.5/97.5 pair
    pub fn confidence_level(&self) -> f64 {
        (self.upper_quantile - self.lower_quantile) / 100.0
    }

    /// Check if a value is contained in the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Check if intervals overlap
    pub fn overlaps(&self, other: &ConfidenceInterval) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{:.4}, {:.4}]",
            self.confidence_level() * 100.0,
            self.lower,
            self.upper
        )
    }
}
