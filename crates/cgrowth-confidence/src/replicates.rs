//! Replicate sets produced by bootstrap and permutation runs

use cgrowth_core::ParameterVector;
use serde::{Deserialize, Serialize};

/// Replicates in draw order, with the number of skipped draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateSet<T> {
    replicates: Vec<T>,
    failures: usize,
}

impl<T> ReplicateSet<T> {
    pub fn new(replicates: Vec<T>, failures: usize) -> Self {
        Self {
            replicates,
            failures,
        }
    }

    pub fn len(&self) -> usize {
        self.replicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replicates.is_empty()
    }

    /// Draws dropped under [`ReplicateFailurePolicy::Skip`](crate::ReplicateFailurePolicy::Skip)
    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.replicates.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.replicates
    }

    pub fn into_vec(self) -> Vec<T> {
        self.replicates
    }
}

impl ReplicateSet<ParameterVector> {
    /// Parameter dimension, taken from the first replicate
    pub fn n_params(&self) -> usize {
        self.replicates.first().map_or(0, ParameterVector::len)
    }

    /// Values of parameter `index` across all replicates
    pub fn component(&self, index: usize) -> Vec<f64> {
        self.replicates.iter().filter_map(|p| p.get(index)).collect()
    }
}

impl<'a, T> IntoIterator for &'a ReplicateSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.replicates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components() {
        let set = ReplicateSet::new(
            vec![
                ParameterVector::from([1.0, 10.0]),
                ParameterVector::from([2.0, 20.0]),
                ParameterVector::from([3.0, 30.0]),
            ],
            1,
        );
        assert_eq!(set.len(), 3);
        assert_eq!(set.failures(), 1);
        assert_eq!(set.n_params(), 2);
        assert_eq!(set.component(0), vec![1.0, 2.0, 3.0]);
        assert_eq!(set.component(1), vec![10.0, 20.0, 30.0]);
        assert!(set.component(2).is_empty());
    }

    #[test]
    fn test_empty_set() {
        let set: ReplicateSet<ParameterVector> = ReplicateSet::new(Vec::new(), 0);
        assert!(set.is_empty());
        assert_eq!(set.n_params(), 0);
    }
}
