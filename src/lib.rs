//! Maximum-likelihood estimation with bootstrap confidence intervals
//!
//! Fits arrival-time models to i.i.d. measurements and quantifies the
//! uncertainty of the fit by bootstrap resampling. Permutation replicates
//! of two-sample statistics are available for hypothesis tests.
//!
//! The workspace is split into:
//!
//! - [`core`]: errors, resampling, execution strategies and progress reporting
//! - [`likelihood`]: likelihood models, the Powell minimizer and MLE fitting
//! - [`confidence`]: the bootstrap engine, percentile intervals and CSV export
//!
//! # Example
//!
//! ```rust
//! use cgrowth_stats::prelude::*;
//!
//! let data = vec![1.1, 0.9, 1.3, 1.0, 0.8, 1.2, 1.4, 0.7, 1.05, 0.95];
//! let model = LikelihoodModel::Gamma;
//!
//! let engine = BootstrapEngine::default().with_replicates(50).with_seed(7);
//! let result = engine
//!     .mle_confidence_intervals(&data, model, &model.default_init())
//!     .unwrap();
//!
//! for (name, estimate, ci) in result.parameters() {
//!     println!("{name} = {estimate:.3}, {ci}");
//! }
//! ```

pub use cgrowth_confidence as confidence;
pub use cgrowth_core as core;
pub use cgrowth_likelihood as likelihood;

pub use cgrowth_core::{Error, Result};

/// Commonly used types and functions
pub mod prelude {
    pub use cgrowth_confidence::{
        mean_confidence_interval, percentile_interval, permutation_variance_test,
        BootstrapConfig, BootstrapEngine, ConfidenceInterval, ConfidenceIntervalReducer,
        EstimateTable, PercentileInterval, ReplicateFailurePolicy, ReplicateSet,
    };
    pub use cgrowth_core::{
        bootstrap_sample, permutation_sample, Error, ExecutionStrategy, ParameterVector,
        ProgressReporter, Resampler, Result,
    };
    pub use cgrowth_likelihood::{
        mle_gamma, mle_successive_poisson, LikelihoodModel, MleEstimator, Powell,
    };
}
