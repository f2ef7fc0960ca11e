//! Property tests for bootstrap and permutation resampling

use cgrowth_core::{bootstrap_sample, permutation_sample};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn sorted(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    values
}

proptest! {
    #[test]
    fn bootstrap_preserves_length(
        data in prop::collection::vec(-1e6f64..1e6, 1..200),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let sample = bootstrap_sample(&data, &mut rng).unwrap();
        prop_assert_eq!(sample.len(), data.len());
        prop_assert!(sample.iter().all(|v| data.contains(v)));
    }

    #[test]
    fn permutation_preserves_sizes_and_multiset(
        x in prop::collection::vec(-1e3f64..1e3, 1..60),
        y in prop::collection::vec(-1e3f64..1e3, 1..60),
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (x_perm, y_perm) = permutation_sample(&x, &y, &mut rng).unwrap();
        prop_assert_eq!(x_perm.len(), x.len());
        prop_assert_eq!(y_perm.len(), y.len());

        let before = sorted(x.iter().chain(y.iter()).copied().collect());
        let after = sorted(x_perm.into_iter().chain(y_perm).collect());
        prop_assert_eq!(before, after);
    }
}

#[test]
fn permutation_mixes_groups() {
    // With two well-separated groups a single shuffle almost surely moves
    // at least one value across; over 50 draws it must happen.
    let x = vec![0.0; 20];
    let y = vec![1.0; 20];
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mixed = (0..50).any(|_| {
        let (x_perm, _) = permutation_sample(&x, &y, &mut rng).unwrap();
        x_perm.iter().any(|&v| v == 1.0)
    });
    assert!(mixed);
}
