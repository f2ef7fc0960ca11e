//! Log-likelihood models and maximum-likelihood estimation
//!
//! This crate provides:
//!
//! - **Models**: [`LikelihoodModel`], a closed set of i.i.d. likelihoods
//!   (Gamma and two-stage successive Poisson arrivals)
//! - **Optimization**: [`Powell`], a derivative-free direction-set minimizer
//! - **Estimation**: [`MleEstimator`], which fits a model by minimizing the
//!   negated log-likelihood
//!
//! # Example
//!
//! ```rust
//! use cgrowth_likelihood::{LikelihoodModel, MleEstimator};
//! use cgrowth_core::ParameterVector;
//!
//! let data = vec![1.1, 0.9, 1.3, 1.0, 0.8, 1.2, 1.4, 0.7];
//! let estimator = MleEstimator::default();
//!
//! let params = estimator
//!     .fit(&data, LikelihoodModel::Gamma, &ParameterVector::from([3.0, 3.0]))
//!     .unwrap();
//! println!("alpha = {:.3}, b = {:.3}", params[0], params[1]);
//! ```

pub mod mle;
pub mod model;
pub mod optimize;

pub use mle::{mle_gamma, mle_successive_poisson, MleEstimator, MleFit};
pub use model::{
    gamma_log_likelihood, successive_poisson_log_likelihood, LikelihoodModel,
    DEGENERATE_RATE_GAP,
};
pub use optimize::{Minimizer, Minimum, Powell};
