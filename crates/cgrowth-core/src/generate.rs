//! Synthetic measurement generators
//!
//! Used for parametric bootstrap and for checking that fits recover known
//! parameters. Both generators use the rate parametrization of the
//! likelihood models.

use crate::{Error, Result};
use rand::Rng;
use rand_distr::{Distribution, Exp, Gamma};

/// Draw `size` values from a Gamma distribution with shape `alpha` and rate `b`
pub fn draw_gamma<R: Rng + ?Sized>(alpha: f64, b: f64, size: usize, rng: &mut R) -> Result<Vec<f64>> {
    if !(alpha > 0.0 && b > 0.0) || !alpha.is_finite() || !b.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "Gamma parameters must be positive and finite, got alpha={alpha}, b={b}"
        )));
    }
    let dist = Gamma::new(alpha, 1.0 / b)
        .map_err(|e| Error::InvalidParameter(format!("Gamma distribution: {e}")))?;
    Ok(dist.sample_iter(rng).take(size).collect())
}

/// Draw `size` arrival times of a two-stage process with rates `b1` and `b2`
///
/// Each value is the sum of two independent exponential waiting times.
pub fn draw_successive_poisson<R: Rng + ?Sized>(
    b1: f64,
    b2: f64,
    size: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if !(b1 > 0.0 && b2 > 0.0) || !b1.is_finite() || !b2.is_finite() {
        return Err(Error::InvalidParameter(format!(
            "Rates must be positive and finite, got b1={b1}, b2={b2}"
        )));
    }
    let first = Exp::new(b1).map_err(|e| Error::InvalidParameter(format!("Exp(b1): {e}")))?;
    let second = Exp::new(b2).map_err(|e| Error::InvalidParameter(format!("Exp(b2): {e}")))?;
    Ok((0..size)
        .map(|_| first.sample(rng) + second.sample(rng))
        .collect())
}
