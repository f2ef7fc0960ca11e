//! Core types and resampling for cgrowth statistics
//!
//! This crate provides the pieces shared by the likelihood and confidence
//! crates:
//!
//! - **Error handling**: a single [`Error`] type and [`Result`] alias
//! - **Data types**: [`ParameterVector`] and sample validation
//! - **Resampling**: bootstrap and permutation samples driven by an explicit
//!   random source
//! - **Execution**: sequential or Rayon-backed replicate batches
//! - **Progress**: observers for long replicate runs
//! - **Generators**: synthetic Gamma and two-stage arrival data
//!
//! # Example
//!
//! ```rust
//! use cgrowth_core::Resampler;
//!
//! let data = vec![1.1, 0.9, 1.3, 1.0, 0.8, 1.2];
//! let mut resampler = Resampler::seeded(42);
//!
//! let sample = resampler.bootstrap_sample(&data).unwrap();
//! assert_eq!(sample.len(), data.len());
//!
//! let (x, y) = resampler.permutation_sample(&data[..2], &data[2..]).unwrap();
//! assert_eq!((x.len(), y.len()), (2, 4));
//! ```

pub mod error;
pub mod execution;
pub mod generate;
pub mod progress;
pub mod resample;
pub mod types;

// Re-export core types
pub use error::{Error, Result};

pub use execution::ExecutionStrategy;

pub use generate::{draw_gamma, draw_successive_poisson};
pub use progress::{CountingProgress, LoggingProgress, NullProgress, ProgressReporter};
pub use resample::{
    bootstrap_indices, bootstrap_sample, permutation_sample, resample_slice, Resampler,
};
pub use types::{validate_sample, ParameterVector};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
