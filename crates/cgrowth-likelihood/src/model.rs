//! Log-likelihood models for i.i.d. arrival-time measurements
//!
//! Each model is defined piecewise: parameter combinations outside the
//! model's domain evaluate to `f64::NEG_INFINITY` instead of raising an
//! error, which lets a derivative-free search step over infeasible points.

use cgrowth_core::{validate_sample, Error, ParameterVector, Result};
use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, Gamma};
use std::fmt;

/// Rates closer than this are treated as the Erlang-2 limit
pub const DEGENERATE_RATE_GAP: f64 = 1e-5;

/// The closed set of supported likelihood models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LikelihoodModel {
    /// Gamma distribution, `params = [alpha, b]` with rate `b` (scale `1/b`)
    Gamma,
    /// Sum of two exponential waiting times, `params = [b1, b2]` with `b1 < b2`
    SuccessivePoisson,
}

impl LikelihoodModel {
    /// Number of parameters the model takes
    pub fn n_params(&self) -> usize {
        match self {
            Self::Gamma | Self::SuccessivePoisson => 2,
        }
    }

    /// Parameter names, in parameter-vector order
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            Self::Gamma => &["alpha", "b"],
            Self::SuccessivePoisson => &["b1", "b2"],
        }
    }

    /// Default starting point for the optimizer
    pub fn default_init(&self) -> ParameterVector {
        match self {
            Self::Gamma => ParameterVector::from([3.0, 3.0]),
            Self::SuccessivePoisson => ParameterVector::from([1.0, 2.0]),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gamma => "gamma",
            Self::SuccessivePoisson => "successive_poisson",
        }
    }

    /// Log-likelihood of `data` under `params`
    ///
    /// Returns `NEG_INFINITY` for parameters outside the domain. Fails only
    /// for an empty or non-finite sample, or a parameter vector of the
    /// wrong length.
    pub fn log_likelihood(&self, params: &[f64], data: &[f64]) -> Result<f64> {
        self.check_params(params)?;
        validate_sample(data, "log-likelihood")?;
        Ok(self.evaluate(params, data))
    }

    /// Check that `params` has the length this model expects
    pub fn check_params(&self, params: &[f64]) -> Result<()> {
        if params.len() != self.n_params() {
            return Err(Error::InvalidParameter(format!(
                "{} model takes {} parameters, got {}",
                self.name(),
                self.n_params(),
                params.len()
            )));
        }
        Ok(())
    }

    /// Unchecked evaluation; callers have validated lengths and data
    pub(crate) fn evaluate(&self, params: &[f64], data: &[f64]) -> f64 {
        match self {
            Self::Gamma => gamma_log_likelihood(params[0], params[1], data),
            Self::SuccessivePoisson => successive_poisson_log_likelihood(params[0], params[1], data),
        }
    }
}

impl fmt::Display for LikelihoodModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gamma log-likelihood with shape `alpha` and rate `b`
pub fn gamma_log_likelihood(alpha: f64, b: f64, data: &[f64]) -> f64 {
    // NaN parameters fall through these comparisons and are rejected below
    if alpha <= 0.0 || b <= 0.0 {
        return f64::NEG_INFINITY;
    }
    match Gamma::new(alpha, b) {
        Ok(dist) => data.iter().map(|&t| dist.ln_pdf(t)).sum(),
        Err(_) => f64::NEG_INFINITY,
    }
}

/// Log-likelihood of the sum of two exponentials with rates `b1 < b2`
///
/// The density is `b1 b2 / (b2 - b1) * exp(-b1 t) * (1 - exp(-(b2 - b1) t))`.
/// Near `b1 == b2` the prefactor blows up while the bracket vanishes, so
/// that limit is evaluated as the Erlang-2 (Gamma(2, b1)) likelihood.
pub fn successive_poisson_log_likelihood(b1: f64, b2: f64, data: &[f64]) -> f64 {
    if b1 <= 0.0 || b2 <= 0.0 || b2 <= b1 {
        return f64::NEG_INFINITY;
    }
    if !(b1.is_finite() && b2.is_finite()) {
        return f64::NEG_INFINITY;
    }
    // Zero density off the support
    if data.iter().any(|&t| t < 0.0) {
        return f64::NEG_INFINITY;
    }

    if (b1 - b2).abs() < DEGENERATE_RATE_GAP {
        return gamma_log_likelihood(2.0, b1, data);
    }

    let prefactor = ((b1 * b2).ln() - (b2 - b1).ln()) * data.len() as f64;
    let delta = b1 - b2;

    // 1 - exp(delta t) == -expm1(delta t), which stays accurate for small t
    let tail: f64 = data
        .iter()
        .map(|&t| -b1 * t + (-(delta * t).exp_m1()).ln())
        .sum();

    prefactor + tail
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DATA: [f64; 6] = [1.1, 0.9, 1.3, 1.0, 0.8, 1.2];

    #[test]
    fn test_gamma_domain() {
        let model = LikelihoodModel::Gamma;
        for params in [[0.0, 1.0], [-1.0, 1.0], [2.0, 0.0], [2.0, -5.0]] {
            assert_eq!(model.log_likelihood(&params, &DATA).unwrap(), f64::NEG_INFINITY);
        }
        assert!(model.log_likelihood(&[2.0, 1.0], &DATA).unwrap().is_finite());
        assert_eq!(gamma_log_likelihood(f64::NAN, 1.0, &DATA), f64::NEG_INFINITY);
    }

    #[test]
    fn test_gamma_matches_closed_form() {
        // Erlang-2 with rate 1: ln f(t) = ln t - t
        let expected: f64 = DATA.iter().map(|&t| t.ln() - t).sum();
        assert_relative_eq!(gamma_log_likelihood(2.0, 1.0, &DATA), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_successive_poisson_domain() {
        let model = LikelihoodModel::SuccessivePoisson;
        for params in [[2.0, 2.0], [3.0, 1.0], [0.0, 1.0], [-1.0, 2.0], [1.0, -2.0]] {
            assert_eq!(model.log_likelihood(&params, &DATA).unwrap(), f64::NEG_INFINITY);
        }
        assert!(model.log_likelihood(&[1.0, 2.0], &DATA).unwrap().is_finite());
    }

    #[test]
    fn test_negative_measurement_is_off_support() {
        let data = [1.0, -0.5, 2.0];
        for model in [LikelihoodModel::Gamma, LikelihoodModel::SuccessivePoisson] {
            let params = model.default_init();
            assert_eq!(
                model.log_likelihood(params.as_slice(), &data).unwrap(),
                f64::NEG_INFINITY,
                "{model}"
            );
        }
        // Degenerate branch agrees
        assert_eq!(
            successive_poisson_log_likelihood(1.0, 1.0 + 1e-7, &data),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_successive_poisson_degenerate_limit() {
        let b1 = 1.5;
        let near = successive_poisson_log_likelihood(b1, b1 + 1e-6, &DATA);
        let erlang = gamma_log_likelihood(2.0, b1, &DATA);
        assert_relative_eq!(near, erlang, epsilon = 1e-9);
    }

    #[test]
    fn test_successive_poisson_continuous_across_branch() {
        // Just outside the degenerate gap the closed form should already
        // agree closely with the Erlang-2 limit.
        let b1 = 1.0;
        let closed = successive_poisson_log_likelihood(b1, b1 + 1e-3, &DATA);
        let erlang = gamma_log_likelihood(2.0, b1, &DATA);
        assert_relative_eq!(closed, erlang, epsilon = 1e-2);
    }

    #[test]
    fn test_successive_poisson_closed_form() {
        let (b1, b2) = (1.0_f64, 3.0_f64);
        let expected: f64 = DATA
            .iter()
            .map(|&t| (b1 * b2 / (b2 - b1) * ((-b1 * t).exp() - (-b2 * t).exp())).ln())
            .sum();
        assert_relative_eq!(
            successive_poisson_log_likelihood(b1, b2, &DATA),
            expected,
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_invalid_arguments() {
        let model = LikelihoodModel::Gamma;
        assert!(matches!(
            model.log_likelihood(&[1.0], &DATA),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            model.log_likelihood(&[1.0, 1.0], &[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_model_metadata() {
        assert_eq!(LikelihoodModel::Gamma.param_names(), &["alpha", "b"]);
        assert_eq!(LikelihoodModel::SuccessivePoisson.param_names(), &["b1", "b2"]);
        assert_eq!(LikelihoodModel::Gamma.default_init().as_slice(), &[3.0, 3.0]);
        assert_eq!(
            LikelihoodModel::SuccessivePoisson.default_init().as_slice(),
            &[1.0, 2.0]
        );
        assert_eq!(LikelihoodModel::SuccessivePoisson.to_string(), "successive_poisson");
    }
}
