//! Percentile-method confidence intervals
//!
//! Replicate distributions are reduced to intervals by taking empirical
//! percentiles. Percentiles interpolate linearly between closest ranks,
//! so the `q`-th percentile of sorted values `s` is read at position
//! `(n - 1) * q / 100`.

use crate::replicates::ReplicateSet;
use crate::ConfidenceInterval;
use cgrowth_core::{Error, ParameterVector, Result};
use tracing::{debug, instrument};

/// Default lower percentile (95% central interval)
pub const DEFAULT_LOWER_QUANTILE: f64 = 2.5;
/// Default upper percentile (95% central interval)
pub const DEFAULT_UPPER_QUANTILE: f64 = 97.5;

/// Reduces a replicate distribution to a confidence interval
pub trait ConfidenceIntervalReducer: Clone + Send + Sync {
    /// Calculate a confidence interval from replicate values
    fn reduce(&self, replicates: &[f64]) -> Result<ConfidenceInterval>;

    /// Method name for documentation
    fn name(&self) -> &'static str;

    /// Reduce each parameter dimension independently
    fn reduce_components(
        &self,
        replicates: &ReplicateSet<ParameterVector>,
    ) -> Result<Vec<ConfidenceInterval>> {
        if replicates.is_empty() {
            return Err(Error::empty_input("confidence interval reduction"));
        }
        (0..replicates.n_params())
            .map(|i| self.reduce(&replicates.component(i)))
            .collect()
    }
}

/// Percentile bootstrap interval
///
/// The simplest bootstrap method. Uses the empirical percentiles of the
/// replicate distribution as interval bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileInterval {
    lower_quantile: f64,
    upper_quantile: f64,
}

impl PercentileInterval {
    /// Create a reducer for the given percentile pair (in `[0, 100]`)
    pub fn new(lower_quantile: f64, upper_quantile: f64) -> Result<Self> {
        validate_quantiles(lower_quantile, upper_quantile)?;
        Ok(Self {
            lower_quantile,
            upper_quantile,
        })
    }

    /// Central interval with the given coverage, e.g. `0.95`
    pub fn central(confidence_level: f64) -> Result<Self> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(Error::InvalidInput(format!(
                "Confidence level {confidence_level} must be in (0, 1)"
            )));
        }
        let tail = (1.0 - confidence_level) / 2.0 * 100.0;
        Self::new(tail, 100.0 - tail)
    }

    pub fn lower_quantile(&self) -> f64 {
        self.lower_quantile
    }

    pub fn upper_quantile(&self) -> f64 {
        self.upper_quantile
    }
}

impl Default for PercentileInterval {
    fn default() -> Self {
        Self {
            lower_quantile: DEFAULT_LOWER_QUANTILE,
            upper_quantile: DEFAULT_UPPER_QUANTILE,
        }
    }
}

impl ConfidenceIntervalReducer for PercentileInterval {
    fn reduce(&self, replicates: &[f64]) -> Result<ConfidenceInterval> {
        percentile_interval(replicates, self.lower_quantile, self.upper_quantile)
    }

    fn name(&self) -> &'static str {
        "Percentile"
    }
}

/// Check `0 <= lower < upper <= 100`
pub fn validate_quantiles(lower_quantile: f64, upper_quantile: f64) -> Result<()> {
    for q in [lower_quantile, upper_quantile] {
        if !(0.0..=100.0).contains(&q) {
            return Err(Error::invalid_quantile(q));
        }
    }
    if lower_quantile >= upper_quantile {
        return Err(Error::InvalidInput(format!(
            "Lower percentile {lower_quantile} must be below upper percentile {upper_quantile}"
        )));
    }
    Ok(())
}

/// Percentile `q` (in `[0, 100]`) of already sorted values
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    let h = (n - 1) as f64 * q / 100.0;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

fn sorted_copy(values: &[f64]) -> Result<Vec<f64>> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite("replicate set"));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Percentile `q` (in `[0, 100]`) of `values`
pub fn percentile(values: &[f64], q: f64) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::empty_input("percentile"));
    }
    if !(0.0..=100.0).contains(&q) {
        return Err(Error::invalid_quantile(q));
    }
    let sorted = sorted_copy(values)?;
    Ok(percentile_sorted(&sorted, q))
}

/// Two-sided percentile interval of a replicate distribution
///
/// Requires at least two replicates and `0 <= lower < upper <= 100`.
#[instrument(skip(replicates), fields(n_replicates = replicates.len()))]
pub fn percentile_interval(
    replicates: &[f64],
    lower_quantile: f64,
    upper_quantile: f64,
) -> Result<ConfidenceInterval> {
    validate_quantiles(lower_quantile, upper_quantile)?;
    if replicates.len() < 2 {
        return Err(Error::InvalidInput(format!(
            "Percentile interval needs at least 2 replicates, got {}",
            replicates.len()
        )));
    }

    let sorted = sorted_copy(replicates)?;
    let lower = percentile_sorted(&sorted, lower_quantile);
    let upper = percentile_sorted(&sorted, upper_quantile);
    debug!("Percentile interval: [{:.6}, {:.6}]", lower, upper);

    Ok(ConfidenceInterval::new(lower, upper, lower_quantile, upper_quantile))
}

/// Component-wise percentile intervals for parameter-vector replicates
pub fn percentile_intervals(
    replicates: &ReplicateSet<ParameterVector>,
    lower_quantile: f64,
    upper_quantile: f64,
) -> Result<Vec<ConfidenceInterval>> {
    PercentileInterval::new(lower_quantile, upper_quantile)?.reduce_components(replicates)
}
