//! Bootstrap and permutation replicate engine
//!
//! Every replicate draws from its own `StdRng`, seeded from a base seed
//! plus the replicate index. Replicates are therefore independent of
//! scheduling: sequential and parallel runs with the same seed produce
//! identical replicate sets, in draw order.

use crate::percentile::{validate_quantiles, ConfidenceIntervalReducer, PercentileInterval};
use crate::replicates::ReplicateSet;
use crate::statistics::mean;
use crate::ConfidenceInterval;
use cgrowth_core::{
    bootstrap_sample, draw_gamma, draw_successive_poisson, permutation_sample, validate_sample,
    Error, ExecutionStrategy, LoggingProgress, NullProgress, ParameterVector, ProgressReporter,
    Result,
};
use cgrowth_likelihood::{LikelihoodModel, Minimizer, MleEstimator, Powell};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Default number of bootstrap replicates
pub const DEFAULT_REPLICATES: usize = 1000;

/// What to do when a replicate fit fails to converge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReplicateFailurePolicy {
    /// The first failure (in draw order) fails the whole batch
    ///
    /// Sequential runs stop drawing at that failure. Parallel runs finish
    /// every replicate before the failure is reported.
    #[default]
    Abort,
    /// Failed replicates are dropped and counted in [`ReplicateSet::failures`]
    Skip,
}

/// Configuration for a bootstrap run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of replicates to draw
    pub n_replicates: usize,
    /// Base seed; drawn from the thread-local generator when absent
    pub seed: Option<u64>,
    /// Sequential or parallel execution
    pub strategy: ExecutionStrategy,
    /// Handling of non-converged replicate fits
    pub failure_policy: ReplicateFailurePolicy,
    /// Lower percentile of reported intervals
    pub lower_quantile: f64,
    /// Upper percentile of reported intervals
    pub upper_quantile: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            n_replicates: DEFAULT_REPLICATES,
            seed: None,
            strategy: ExecutionStrategy::Sequential,
            failure_policy: ReplicateFailurePolicy::Abort,
            lower_quantile: crate::percentile::DEFAULT_LOWER_QUANTILE,
            upper_quantile: crate::percentile::DEFAULT_UPPER_QUANTILE,
        }
    }
}

impl BootstrapConfig {
    /// Check replicate count and percentile pair
    pub fn validate(&self) -> Result<()> {
        if self.n_replicates == 0 {
            return Err(Error::InvalidParameter(
                "Number of replicates must be positive".to_string(),
            ));
        }
        validate_quantiles(self.lower_quantile, self.upper_quantile)
    }
}

/// Point estimate, replicates and per-parameter intervals of a bootstrap MLE
#[derive(Debug, Clone)]
pub struct MleBootstrapResult {
    /// The fitted model
    pub model: LikelihoodModel,
    /// Fit on the original data
    pub estimate: ParameterVector,
    /// One interval per parameter, in parameter order
    pub intervals: Vec<ConfidenceInterval>,
    /// Replicate fits in draw order
    pub replicates: ReplicateSet<ParameterVector>,
}

impl MleBootstrapResult {
    /// `(name, estimate, interval)` for each parameter
    pub fn parameters(&self) -> impl Iterator<Item = (&'static str, f64, &ConfidenceInterval)> + '_ {
        self.model
            .param_names()
            .iter()
            .zip(self.estimate.as_slice())
            .zip(&self.intervals)
            .map(|((&name, &value), ci)| (name, value, ci))
    }
}

/// Bootstrap engine for MLE, mean and permutation replicates
#[derive(Clone)]
pub struct BootstrapEngine<M = Powell> {
    config: BootstrapConfig,
    estimator: MleEstimator<M>,
    progress: Arc<dyn ProgressReporter>,
}

impl BootstrapEngine<Powell> {
    /// Create an engine with the default Powell-based estimator
    pub fn new(config: BootstrapConfig) -> Self {
        Self {
            config,
            estimator: MleEstimator::default(),
            progress: Arc::new(NullProgress),
        }
    }
}

impl Default for BootstrapEngine<Powell> {
    fn default() -> Self {
        Self::new(BootstrapConfig::default())
    }
}

impl<M: Minimizer> BootstrapEngine<M> {
    /// Use a different estimator for replicate fits
    pub fn with_estimator<N: Minimizer>(self, estimator: MleEstimator<N>) -> BootstrapEngine<N> {
        BootstrapEngine {
            config: self.config,
            estimator,
            progress: self.progress,
        }
    }

    /// Set the number of replicates
    pub fn with_replicates(mut self, n_replicates: usize) -> Self {
        assert!(n_replicates > 0, "Number of replicates must be positive");
        self.config.n_replicates = n_replicates;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the execution strategy
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Set the failure policy for replicate fits
    pub fn with_failure_policy(mut self, policy: ReplicateFailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Set the percentile pair of reported intervals
    pub fn with_quantiles(mut self, lower_quantile: f64, upper_quantile: f64) -> Self {
        assert!(
            validate_quantiles(lower_quantile, upper_quantile).is_ok(),
            "Percentiles must satisfy 0 <= lower < upper <= 100"
        );
        self.config.lower_quantile = lower_quantile;
        self.config.upper_quantile = upper_quantile;
        self
    }

    /// Attach a progress reporter
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Toggle logging progress output
    pub fn report_progress(self, enabled: bool) -> Self {
        if enabled {
            self.with_progress(Arc::new(LoggingProgress::default()))
        } else {
            self.with_progress(Arc::new(NullProgress))
        }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn estimator(&self) -> &MleEstimator<M> {
        &self.estimator
    }

    /// Interval reducer for the configured percentile pair
    pub fn reducer(&self) -> Result<PercentileInterval> {
        PercentileInterval::new(self.config.lower_quantile, self.config.upper_quantile)
    }

    fn base_seed(&self) -> u64 {
        self.config.seed.unwrap_or_else(|| thread_rng().gen())
    }

    /// Run one closure per replicate, each with its own seeded generator
    fn run_batch<T, F>(&self, draw: F) -> Result<ReplicateSet<T>>
    where
        T: Send,
        F: Fn(&mut StdRng) -> Result<T> + Sync + Send,
    {
        self.config.validate()?;
        let n = self.config.n_replicates;
        let base_seed = self.base_seed();
        let progress = Arc::clone(&self.progress);

        debug!(
            "Running {} replicates ({:?}), base seed {}",
            n, self.config.strategy, base_seed
        );

        let replicate = |i: usize| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let result = draw(&mut rng);
            progress.on_replicate(i, n);
            result
        };

        progress.on_start(n);
        let stop_at_first_error = self.config.strategy == ExecutionStrategy::Sequential
            && self.config.failure_policy == ReplicateFailurePolicy::Abort;
        let results = if stop_at_first_error {
            let mut results = Vec::with_capacity(n);
            for i in 0..n {
                let result = replicate(i);
                let failed = result.is_err();
                results.push(result);
                if failed {
                    break;
                }
            }
            results
        } else {
            self.config.strategy.execute_batch(n, &replicate)
        };
        progress.on_finish(n);

        let mut replicates = Vec::with_capacity(n);
        let mut failures = 0;
        for (i, result) in results.into_iter().enumerate() {
            match result {
                Ok(value) => replicates.push(value),
                Err(err)
                    if err.is_convergence()
                        && self.config.failure_policy == ReplicateFailurePolicy::Skip =>
                {
                    debug!("Skipping replicate {}: {}", i, err);
                    failures += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if failures > 0 {
            warn!("{} of {} replicates failed to converge and were skipped", failures, n);
        }

        Ok(ReplicateSet::new(replicates, failures))
    }

    /// Bootstrap replicates of the maximum-likelihood estimate
    ///
    /// Each replicate fits `model` to a bootstrap sample of `data`,
    /// starting from `init`.
    #[instrument(skip(self, data, model, init), fields(n = data.len(), model = %model, n_replicates = self.config.n_replicates))]
    pub fn replicate_mle(
        &self,
        data: &[f64],
        model: LikelihoodModel,
        init: &ParameterVector,
    ) -> Result<ReplicateSet<ParameterVector>> {
        validate_sample(data, "bootstrap MLE")?;
        model.check_params(init.as_slice())?;

        self.run_batch(|rng| {
            let sample = bootstrap_sample(data, rng)?;
            self.estimator.fit(&sample, model, init)
        })
    }

    /// Parametric bootstrap replicates of the maximum-likelihood estimate
    ///
    /// Fits `model` to `data` once, then refits synthetic data sets of the
    /// same size drawn from the fitted model. Returns the original fit
    /// together with the replicates.
    #[instrument(skip(self, data, model, init), fields(n = data.len(), model = %model, n_replicates = self.config.n_replicates))]
    pub fn replicate_parametric_mle(
        &self,
        data: &[f64],
        model: LikelihoodModel,
        init: &ParameterVector,
    ) -> Result<(ParameterVector, ReplicateSet<ParameterVector>)> {
        self.config.validate()?;
        let estimate = self.estimator.fit(data, model, init)?;
        let n = data.len();

        let replicates = self.run_batch(|rng| {
            let synthetic = match model {
                LikelihoodModel::Gamma => draw_gamma(estimate[0], estimate[1], n, rng)?,
                LikelihoodModel::SuccessivePoisson => {
                    draw_successive_poisson(estimate[0], estimate[1], n, rng)?
                }
            };
            self.estimator.fit(&synthetic, model, init)
        })?;

        Ok((estimate, replicates))
    }

    /// Bootstrap replicates of the sample mean
    #[instrument(skip(self, data), fields(n = data.len(), n_replicates = self.config.n_replicates))]
    pub fn replicate_mean(&self, data: &[f64]) -> Result<ReplicateSet<f64>> {
        validate_sample(data, "bootstrap mean")?;
        self.run_batch(|rng| bootstrap_sample(data, rng).map(|sample| mean(&sample)))
    }

    /// Permutation replicates of a two-sample statistic
    ///
    /// Each replicate pools and reshuffles `x` and `y`, then evaluates
    /// `statistic` on the two relabelled groups.
    #[instrument(skip(self, x, y, statistic), fields(n_x = x.len(), n_y = y.len(), n_replicates = self.config.n_replicates))]
    pub fn replicate_permutation_statistic<S>(
        &self,
        x: &[f64],
        y: &[f64],
        statistic: S,
    ) -> Result<ReplicateSet<f64>>
    where
        S: Fn(&[f64], &[f64]) -> f64 + Sync + Send,
    {
        validate_sample(x, "permutation group x")?;
        validate_sample(y, "permutation group y")?;

        self.run_batch(|rng| {
            let (x_perm, y_perm) = permutation_sample(x, y, rng)?;
            Ok(statistic(&x_perm, &y_perm))
        })
    }

    /// Fit `model`, bootstrap the fit, and reduce to per-parameter intervals
    pub fn mle_confidence_intervals(
        &self,
        data: &[f64],
        model: LikelihoodModel,
        init: &ParameterVector,
    ) -> Result<MleBootstrapResult> {
        self.config.validate()?;
        let reducer = self.reducer()?;
        let estimate = self.estimator.fit(data, model, init)?;
        let replicates = self.replicate_mle(data, model, init)?;
        let intervals = reducer.reduce_components(&replicates)?;

        Ok(MleBootstrapResult {
            model,
            estimate,
            intervals,
            replicates,
        })
    }

    /// Bootstrap confidence interval of the sample mean
    pub fn mean_confidence_interval(&self, data: &[f64]) -> Result<ConfidenceInterval> {
        let reducer = self.reducer()?;
        let replicates = self.replicate_mean(data)?;
        reducer.reduce(replicates.as_slice())
    }
}
