//! High-level API for bootstrap replicates and intervals
//!
//! Thin wrappers over [`BootstrapEngine`] for the common one-shot calls.
//! Pass a seed for reproducible results.

use crate::bootstrap::{BootstrapConfig, BootstrapEngine, MleBootstrapResult};
use crate::replicates::ReplicateSet;
use crate::statistics::{permutation_p_value, variance_difference};
use crate::ConfidenceInterval;
use cgrowth_core::{ParameterVector, Result};
use cgrowth_likelihood::LikelihoodModel;

pub use crate::bootstrap::DEFAULT_REPLICATES;

// Built from a config so a zero count fails validation instead of panicking
fn engine(count: usize, seed: Option<u64>) -> BootstrapEngine {
    BootstrapEngine::new(BootstrapConfig {
        n_replicates: count,
        seed,
        ..Default::default()
    })
}

/// Bootstrap replicates of the MLE of `model` on `data`
///
/// # Example
/// ```rust
/// use cgrowth_confidence::api::bootstrap_mle_replicates;
/// use cgrowth_likelihood::LikelihoodModel;
///
/// let data = vec![1.1, 0.9, 1.3, 1.0, 0.8, 1.2, 1.4, 0.7, 1.05, 0.95];
/// let model = LikelihoodModel::Gamma;
/// let reps = bootstrap_mle_replicates(&data, model, &model.default_init(), 20, false, Some(1))
///     .unwrap();
/// assert_eq!(reps.len(), 20);
/// ```
pub fn bootstrap_mle_replicates(
    data: &[f64],
    model: LikelihoodModel,
    init: &ParameterVector,
    count: usize,
    report_progress: bool,
    seed: Option<u64>,
) -> Result<ReplicateSet<ParameterVector>> {
    engine(count, seed)
        .report_progress(report_progress)
        .replicate_mle(data, model, init)
}

/// Fit `model` and compute default 2.5/97.5 percentile intervals per parameter
pub fn mle_confidence_intervals(
    data: &[f64],
    model: LikelihoodModel,
    count: usize,
    seed: Option<u64>,
) -> Result<MleBootstrapResult> {
    engine(count, seed).mle_confidence_intervals(data, model, &model.default_init())
}

/// Bootstrap replicates of the sample mean
pub fn bootstrap_mean_replicates(
    data: &[f64],
    count: usize,
    seed: Option<u64>,
) -> Result<ReplicateSet<f64>> {
    engine(count, seed).replicate_mean(data)
}

/// 2.5/97.5 percentile bootstrap interval of the sample mean
pub fn mean_confidence_interval(
    data: &[f64],
    count: usize,
    seed: Option<u64>,
) -> Result<ConfidenceInterval> {
    engine(count, seed).mean_confidence_interval(data)
}

/// Outcome of a two-sample permutation test
#[derive(Debug, Clone, PartialEq)]
pub struct PermutationTest {
    /// Statistic on the original labelling
    pub observed: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Statistic under each relabelling
    pub replicates: ReplicateSet<f64>,
}

/// Permutation test for equal variances, using `var(x) - var(y)`
///
/// Both groups need at least two values for the sample variance to exist.
pub fn permutation_variance_test(
    x: &[f64],
    y: &[f64],
    count: usize,
    seed: Option<u64>,
) -> Result<PermutationTest> {
    let replicates =
        engine(count, seed).replicate_permutation_statistic(x, y, variance_difference)?;
    let observed = variance_difference(x, y);
    let p_value = permutation_p_value(observed, replicates.as_slice())?;
    Ok(PermutationTest {
        observed,
        p_value,
        replicates,
    })
}
