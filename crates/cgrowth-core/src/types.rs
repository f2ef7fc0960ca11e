//! Sample and parameter vector types

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Check that a sample is usable by a likelihood or resampling operation
///
/// Samples are borrowed as `&[f64]` throughout the workspace; this is the
/// single place their invariants are enforced.
pub fn validate_sample(data: &[f64], context: &str) -> Result<()> {
    if data.is_empty() {
        return Err(Error::empty_input(context));
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(Error::non_finite(context));
    }
    Ok(())
}

/// A fixed-length vector of distribution parameters
///
/// Produced by the maximum-likelihood estimator and consumed by the
/// bootstrap engine. The length is determined by the likelihood model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterVector(Vec<f64>);

impl ParameterVector {
    /// Create a parameter vector from raw values
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector holds no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameter at `index`, if present
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Whether every component is finite
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }
}

impl Index<usize> for ParameterVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<Vec<f64>> for ParameterVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[f64; N]> for ParameterVector {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

impl From<&[f64]> for ParameterVector {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl AsRef<[f64]> for ParameterVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl fmt::Display for ParameterVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value:.4}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sample() {
        assert!(validate_sample(&[1.0, 2.0], "test").is_ok());
        assert!(matches!(
            validate_sample(&[], "test"),
            Err(Error::InvalidInput(_))
        ));
        assert!(validate_sample(&[1.0, f64::NAN], "test").is_err());
        assert!(validate_sample(&[f64::INFINITY], "test").is_err());
    }

    #[test]
    fn test_parameter_vector_access() {
        let params = ParameterVector::from([3.0, 2.0]);
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], 3.0);
        assert_eq!(params.get(1), Some(2.0));
        assert_eq!(params.get(2), None);
        assert!(params.is_finite());
        assert_eq!(params.as_slice(), &[3.0, 2.0]);
    }

    #[test]
    fn test_parameter_vector_display() {
        let params = ParameterVector::new(vec![1.5, 2.25]);
        assert_eq!(format!("{params}"), "[1.5000, 2.2500]");
    }
}
