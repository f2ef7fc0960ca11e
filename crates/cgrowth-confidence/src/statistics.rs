//! Scalar statistics used by bootstrap and permutation replicates

use cgrowth_core::{Error, Result};
use statrs::statistics::Statistics;

/// Arithmetic mean (`NaN` for an empty slice)
pub fn mean(data: &[f64]) -> f64 {
    data.mean()
}

/// Sample variance with Bessel's correction (`NaN` for fewer than 2 values)
pub fn sample_variance(data: &[f64]) -> f64 {
    data.variance()
}

/// Difference of Bessel-corrected sample variances, `var(x) - var(y)`
///
/// The canonical statistic for a permutation test of equal spread.
pub fn variance_difference(x: &[f64], y: &[f64]) -> f64 {
    sample_variance(x) - sample_variance(y)
}

/// Two-sided permutation p-value
///
/// Fraction of replicates at least as extreme as `observed` in absolute
/// value.
pub fn permutation_p_value(observed: f64, replicates: &[f64]) -> Result<f64> {
    if replicates.is_empty() {
        return Err(Error::empty_input("permutation p-value"));
    }
    if !observed.is_finite() {
        return Err(Error::non_finite("observed statistic"));
    }
    let extreme = replicates
        .iter()
        .filter(|r| r.abs() >= observed.abs())
        .count();
    Ok(extreme as f64 / replicates.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0);
        // population variance is 4, so the corrected one is 4 * 8 / 7
        assert_relative_eq!(sample_variance(&data), 32.0 / 7.0, epsilon = 1e-12);
        assert!(sample_variance(&[1.0]).is_nan());
    }

    #[test]
    fn test_variance_difference() {
        let x = [1.0, 2.0, 3.0];
        let y = [0.0, 10.0];
        assert_relative_eq!(variance_difference(&x, &y), 1.0 - 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_permutation_p_value() {
        let replicates = [-3.0, -1.0, 0.0, 1.0, 2.0];
        assert_relative_eq!(permutation_p_value(2.0, &replicates).unwrap(), 0.4);
        assert_relative_eq!(permutation_p_value(0.0, &replicates).unwrap(), 1.0);
        assert!(permutation_p_value(1.0, &[]).is_err());
        assert!(permutation_p_value(f64::NAN, &replicates).is_err());
    }
}
