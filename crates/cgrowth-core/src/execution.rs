//! Execution strategies for replicate batches
//!
//! Replicate draws are independent of one another, so a batch can run
//! sequentially or across the Rayon pool. Results always come back in
//! index order, which keeps parallel runs identical to sequential ones.

use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExecutionStrategy {
    /// Process items sequentially
    #[default]
    Sequential,
    /// Process items in parallel (sequential without the `parallel` feature)
    Parallel,
}

impl ExecutionStrategy {
    /// Run `f` for every index in `0..count`, returning results in index order
    pub fn execute_batch<F, R>(self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        match self {
            Self::Sequential => (0..count).map(f).collect(),
            #[cfg(feature = "parallel")]
            Self::Parallel => {
                use rayon::prelude::*;
                (0..count).into_par_iter().map(f).collect()
            }
            #[cfg(not(feature = "parallel"))]
            Self::Parallel => {
                log::debug!("parallel feature disabled, running batch sequentially");
                (0..count).map(f).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_batch_order() {
        let out = ExecutionStrategy::Sequential.execute_batch(5, |i| i * 10);
        assert_eq!(out, vec![0, 10, 20, 30, 40]);
    }

    #[test]
    fn test_strategy_batches_agree() {
        let seq = ExecutionStrategy::Sequential.execute_batch(100, |i| (i as f64).sqrt());
        let par = ExecutionStrategy::Parallel.execute_batch(100, |i| (i as f64).sqrt());
        assert_eq!(seq, par);
    }

    #[test]
    fn test_empty_batch() {
        let out: Vec<usize> = ExecutionStrategy::Parallel.execute_batch(0, |i| i);
        assert!(out.is_empty());
    }
}
