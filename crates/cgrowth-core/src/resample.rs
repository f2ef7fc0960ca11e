//! Bootstrap and permutation sample generation
//!
//! Every operation takes an explicit random source. Callers seed it, which
//! keeps runs reproducible and lets parallel workers hold independent
//! generators instead of sharing one.

use crate::{Error, Result};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Draw `n` indices uniformly from `[0, n)` with replacement
///
/// # Panics
/// Panics if `n == 0`; callers validate sample sizes first.
pub fn bootstrap_indices<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<usize> {
    let dist = Uniform::new(0, n);
    (0..n).map(|_| dist.sample(rng)).collect()
}

/// Gather `source` at the given indices
pub fn resample_slice(source: &[f64], indices: &[usize]) -> Vec<f64> {
    indices
        .iter()
        .map(|&idx| {
            debug_assert!(idx < source.len(), "Index {idx} out of bounds");
            source[idx]
        })
        .collect()
}

/// Draw a bootstrap sample: `data.len()` values taken with replacement
pub fn bootstrap_sample<R: Rng + ?Sized>(data: &[f64], rng: &mut R) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(Error::empty_input("bootstrap sample"));
    }
    let indices = bootstrap_indices(rng, data.len());
    Ok(resample_slice(data, &indices))
}

/// Draw a permutation sample from two groups
///
/// The groups are pooled, shuffled, and split back into pieces of the
/// original sizes, so labels are exchanged while group sizes are kept.
pub fn permutation_sample<R: Rng + ?Sized>(
    x: &[f64],
    y: &[f64],
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if x.is_empty() || y.is_empty() {
        return Err(Error::empty_input("permutation sample"));
    }

    let mut pooled = Vec::with_capacity(x.len() + y.len());
    pooled.extend_from_slice(x);
    pooled.extend_from_slice(y);
    pooled.shuffle(rng);

    let y_perm = pooled.split_off(x.len());
    Ok((pooled, y_perm))
}

/// Owning wrapper around a random source for repeated resampling
#[derive(Debug, Clone)]
pub struct Resampler<R = StdRng> {
    rng: R,
}

impl Resampler<StdRng> {
    /// Create a resampler with a deterministic seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Create a resampler seeded from operating-system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Resampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// See [`bootstrap_sample`]
    pub fn bootstrap_sample(&mut self, data: &[f64]) -> Result<Vec<f64>> {
        bootstrap_sample(data, &mut self.rng)
    }

    /// See [`permutation_sample`]
    pub fn permutation_sample(&mut self, x: &[f64], y: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
        permutation_sample(x, y, &mut self.rng)
    }

    /// Access the underlying random source
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn into_rng(self) -> R {
        self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_bootstrap_sample_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let sample = bootstrap_sample(&data, &mut rng).unwrap();
        assert_eq!(sample.len(), data.len());
        assert!(sample.iter().all(|x| data.contains(x)));
    }

    #[test]
    fn test_bootstrap_sample_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(matches!(
            bootstrap_sample(&[], &mut rng),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bootstrap_single_element() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(bootstrap_sample(&[7.0], &mut rng).unwrap(), vec![7.0]);
    }

    #[test]
    fn test_bootstrap_duplicates_are_common() {
        // For n = 10 the chance of a draw with no repeated index is 10!/10^10,
        // about 3.6e-4, so nearly every draw must contain a duplicate.
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let data: Vec<f64> = (0..10).map(f64::from).collect();
        let draws = 2000;
        let with_duplicates = (0..draws)
            .filter(|_| {
                let mut sample = bootstrap_sample(&data, &mut rng).unwrap();
                sample.sort_by(|a, b| a.partial_cmp(b).unwrap());
                sample.windows(2).any(|w| w[0] == w[1])
            })
            .count();
        assert!(with_duplicates >= draws - 10, "got {with_duplicates}");
    }

    #[test]
    fn test_bootstrap_reproducible() {
        let data = vec![0.5, 1.5, 2.5, 3.5];
        let a = Resampler::seeded(99).bootstrap_sample(&data).unwrap();
        let b = Resampler::seeded(99).bootstrap_sample(&data).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_permutation_sample_sizes() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let (x_perm, y_perm) = permutation_sample(&x, &y, &mut rng).unwrap();
        assert_eq!(x_perm.len(), 3);
        assert_eq!(y_perm.len(), 5);
    }

    #[test]
    fn test_permutation_sample_empty_group() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(permutation_sample(&[], &[1.0], &mut rng).is_err());
        assert!(permutation_sample(&[1.0], &[], &mut rng).is_err());
    }

    #[test]
    fn test_entropy_resampler() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let mut resampler = Resampler::from_entropy();
        let sample = resampler.bootstrap_sample(&data).unwrap();
        assert_eq!(sample.len(), data.len());
        assert!(sample.iter().all(|v| data.contains(v)));
    }

    #[test]
    fn test_resample_slice() {
        let source = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let indices = vec![0, 2, 4, 1, 3];
        assert_eq!(resample_slice(&source, &indices), vec![1.0, 3.0, 5.0, 2.0, 4.0]);
    }

    #[test]
    fn test_bootstrap_indices_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let indices = bootstrap_indices(&mut rng, 4);
        assert_eq!(indices.len(), 4);
        assert!(indices.iter().all(|&i| i < 4));
    }
}
