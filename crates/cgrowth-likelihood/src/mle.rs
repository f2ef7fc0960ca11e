//! Maximum-likelihood estimation
//!
//! Fits a [`LikelihoodModel`] by minimizing its negated log-likelihood with
//! a derivative-free [`Minimizer`]. The search is expected to evaluate points
//! outside the model domain; those score as an infinite penalty and steer
//! the search back. They are logged, not reported as failures.

use crate::model::LikelihoodModel;
use crate::optimize::{Minimizer, Powell};
use cgrowth_core::{validate_sample, ParameterVector, Result};
use tracing::{debug, instrument, trace, warn};

/// A converged maximum-likelihood fit
#[derive(Debug, Clone, PartialEq)]
pub struct MleFit {
    /// The fitted parameters
    pub params: ParameterVector,
    /// Log-likelihood at `params`
    pub log_likelihood: f64,
    /// Outer iterations used by the minimizer
    pub iterations: usize,
    /// Objective evaluations that fell outside the model domain
    pub domain_violations: usize,
}

/// Maximum-likelihood estimator
#[derive(Debug, Clone)]
pub struct MleEstimator<M = Powell> {
    minimizer: M,
    ignore_transient_domain_warnings: bool,
}

impl Default for MleEstimator<Powell> {
    fn default() -> Self {
        Self::new(Powell::default())
    }
}

impl MleEstimator<Powell> {
    /// Set the relative objective tolerance of the Powell search
    pub fn with_tolerance(mut self, ftol: f64) -> Self {
        self.minimizer = self.minimizer.with_ftol(ftol);
        self
    }

    /// Set the iteration limit of the Powell search
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.minimizer = self.minimizer.with_max_iterations(max_iterations);
        self
    }
}

impl<M: Minimizer> MleEstimator<M> {
    /// Create an estimator around the given minimizer
    pub fn new(minimizer: M) -> Self {
        Self {
            minimizer,
            ignore_transient_domain_warnings: true,
        }
    }

    /// Whether infeasible evaluations during the search are logged quietly
    ///
    /// When `false`, each one is logged at `warn` level. The search itself
    /// behaves the same either way.
    pub fn with_ignore_transient_domain_warnings(mut self, ignore: bool) -> Self {
        self.ignore_transient_domain_warnings = ignore;
        self
    }

    pub fn ignores_transient_domain_warnings(&self) -> bool {
        self.ignore_transient_domain_warnings
    }

    pub fn minimizer(&self) -> &M {
        &self.minimizer
    }

    /// Fit `model` to `data` starting from `init`, returning the parameters
    pub fn fit(
        &self,
        data: &[f64],
        model: LikelihoodModel,
        init: &ParameterVector,
    ) -> Result<ParameterVector> {
        self.try_fit(data, model, init).map(|fit| fit.params)
    }

    /// Fit `model` to `data` starting from `init`, with diagnostics
    ///
    /// Fails with `InvalidInput` for an empty or non-finite sample,
    /// `InvalidParameter` for a wrongly sized `init`, and `Convergence`
    /// with the minimizer's message when the search does not converge.
    /// Failures are not retried.
    #[instrument(skip(self, data, model, init), fields(n = data.len(), model = %model, minimizer = self.minimizer.name()))]
    pub fn try_fit(
        &self,
        data: &[f64],
        model: LikelihoodModel,
        init: &ParameterVector,
    ) -> Result<MleFit> {
        validate_sample(data, "maximum-likelihood fit")?;
        model.check_params(init.as_slice())?;

        let mut domain_violations = 0usize;
        let objective = |params: &[f64]| {
            let log_like = model.evaluate(params, data);
            if !log_like.is_finite() {
                domain_violations += 1;
                if self.ignore_transient_domain_warnings {
                    trace!("infeasible point {:?}: log-likelihood {}", params, log_like);
                } else {
                    warn!("infeasible point {:?}: log-likelihood {}", params, log_like);
                }
            }
            -log_like
        };

        let minimum = self.minimizer.minimize(objective, init.as_slice())?;

        debug!(
            "Fitted {} model: params={:?}, log-likelihood={:.6}, iterations={}, domain violations={}",
            model, minimum.point, -minimum.value, minimum.iterations, domain_violations
        );

        Ok(MleFit {
            params: ParameterVector::new(minimum.point),
            log_likelihood: -minimum.value,
            iterations: minimum.iterations,
            domain_violations,
        })
    }
}

/// Fit a Gamma model from the default starting point `[3, 3]`
pub fn mle_gamma(data: &[f64]) -> Result<ParameterVector> {
    let model = LikelihoodModel::Gamma;
    MleEstimator::default().fit(data, model, &model.default_init())
}

/// Fit a two-stage arrival model from the default starting point `[1, 2]`
pub fn mle_successive_poisson(data: &[f64]) -> Result<ParameterVector> {
    let model = LikelihoodModel::SuccessivePoisson;
    MleEstimator::default().fit(data, model, &model.default_init())
}
