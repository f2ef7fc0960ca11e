//! Progress reporting for long replicate runs
//!
//! Reporters only observe a run; they never influence results or ordering.
//! Under parallel execution `on_replicate` may be called out of order and
//! from several threads at once.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Observer for replicate progress
pub trait ProgressReporter: Send + Sync {
    /// Called once before the first replicate
    fn on_start(&self, _total: usize) {}

    /// Called after replicate `index` (zero-based) completes
    fn on_replicate(&self, index: usize, total: usize);

    /// Called once after the last replicate
    fn on_finish(&self, _total: usize) {}
}

/// Reporter that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressReporter for NullProgress {
    fn on_replicate(&self, _index: usize, _total: usize) {}
}

/// Reporter that logs progress through the `log` facade
///
/// A reporter follows one run at a time: `on_start` resets its count.
/// Clones get their own counter, so concurrent runs should each be given
/// a clone.
#[derive(Debug)]
pub struct LoggingProgress {
    level: log::Level,
    stride: usize,
    completed: AtomicUsize,
}

impl LoggingProgress {
    /// Log every `stride` completed replicates at `level`
    pub fn new(level: log::Level, stride: usize) -> Self {
        Self {
            level,
            stride: stride.max(1),
            completed: AtomicUsize::new(0),
        }
    }

    /// Replicates completed in the current run
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}

impl Clone for LoggingProgress {
    fn clone(&self) -> Self {
        Self::new(self.level, self.stride)
    }
}

impl Default for LoggingProgress {
    fn default() -> Self {
        Self::new(log::Level::Info, 100)
    }
}

impl ProgressReporter for LoggingProgress {
    fn on_start(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        log::log!(self.level, "Starting {total} replicates");
    }

    fn on_replicate(&self, _index: usize, total: usize) {
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.stride == 0 || done == total {
            log::log!(self.level, "Replicates: {done}/{total}");
        }
    }

    fn on_finish(&self, total: usize) {
        log::log!(self.level, "Finished {total} replicates");
    }
}

/// Reporter that counts calls
#[derive(Debug, Default)]
pub struct CountingProgress {
    started: AtomicUsize,
    replicates: AtomicUsize,
    finished: AtomicUsize,
}

impl CountingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `on_replicate` calls seen so far
    pub fn replicates(&self) -> usize {
        self.replicates.load(Ordering::SeqCst)
    }

    /// Number of completed runs
    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    /// Number of started runs
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

impl ProgressReporter for CountingProgress {
    fn on_start(&self, _total: usize) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn on_replicate(&self, _index: usize, _total: usize) {
        self.replicates.fetch_add(1, Ordering::SeqCst);
    }

    fn on_finish(&self, _total: usize) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counting_progress() {
        let progress = CountingProgress::new();
        progress.on_start(3);
        for i in 0..3 {
            progress.on_replicate(i, 3);
        }
        progress.on_finish(3);

        assert_eq!(progress.started(), 1);
        assert_eq!(progress.replicates(), 3);
        assert_eq!(progress.finished(), 1);
    }

    #[test]
    fn test_logging_progress_counts() {
        let progress = LoggingProgress::new(log::Level::Debug, 0);
        progress.on_start(2);
        progress.on_replicate(0, 2);
        progress.on_replicate(1, 2);
        progress.on_finish(2);
        assert_eq!(progress.completed(), 2);
    }

    #[test]
    fn test_logging_progress_runs_are_independent() {
        let first = LoggingProgress::default();
        first.on_start(3);
        first.on_replicate(0, 3);
        first.on_replicate(1, 3);

        let second = first.clone();
        assert_eq!(second.completed(), 0);
        second.on_start(5);
        second.on_replicate(0, 5);
        assert_eq!(first.completed(), 2);
        assert_eq!(second.completed(), 1);

        // A new run on the same reporter starts from zero
        first.on_start(4);
        assert_eq!(first.completed(), 0);
    }
}
