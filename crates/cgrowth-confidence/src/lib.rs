//! Bootstrap replicates and percentile confidence intervals
//!
//! This crate turns the resampling primitives of `cgrowth-core` and the
//! estimators of `cgrowth-likelihood` into replicate distributions:
//!
//! - **Bootstrap MLE**: refit a likelihood model on resampled data
//! - **Bootstrap mean**: replicate distribution of the sample mean
//! - **Permutation statistics**: a two-sample statistic under random relabelling
//! - **Percentile intervals**: reduce replicates to `[lower, upper]` bounds,
//!   component-wise for parameter vectors
//! - **Estimate tables**: collect estimates and bounds for CSV export
//!
//! # Example
//!
//! ```rust
//! use cgrowth_confidence::{BootstrapEngine, ConfidenceIntervalReducer, PercentileInterval};
//!
//! let data = vec![2.1, 1.9, 2.4, 2.0, 1.7, 2.2, 2.6, 1.8];
//! let engine = BootstrapEngine::default().with_replicates(200).with_seed(42);
//!
//! let replicates = engine.replicate_mean(&data).unwrap();
//! let ci = PercentileInterval::default().reduce(replicates.as_slice()).unwrap();
//! println!("{ci}");
//! assert!(ci.lower <= ci.upper);
//! ```

pub mod api;
mod bootstrap;
mod percentile;
mod replicates;
mod statistics;
mod table;
mod types;

// Re-exports
pub use api::{
    bootstrap_mean_replicates, bootstrap_mle_replicates, mean_confidence_interval,
    permutation_variance_test, PermutationTest,
};
pub use bootstrap::{
    BootstrapConfig, BootstrapEngine, MleBootstrapResult, ReplicateFailurePolicy,
    DEFAULT_REPLICATES,
};
pub use percentile::{
    percentile, percentile_interval, percentile_intervals, validate_quantiles,
    ConfidenceIntervalReducer, PercentileInterval, DEFAULT_LOWER_QUANTILE,
    DEFAULT_UPPER_QUANTILE,
};
pub use replicates::ReplicateSet;
pub use statistics::{mean, permutation_p_value, sample_variance, variance_difference};
pub use table::{EstimateRow, EstimateTable};
pub use types::ConfidenceInterval;
