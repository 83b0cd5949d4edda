//! Orchestrator configuration.

use serde::{Deserialize, Serialize};

/// Controls how a run dispatches unit evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Enable parallel dispatch (requires the `parallel` feature).
    pub parallel: bool,

    /// Minimum selected-unit count to trigger parallel dispatch.
    /// Below this, sequential evaluation is faster than thread overhead.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 32,
        }
    }
}

impl EngineConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always evaluates sequentially.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel dispatch.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the parallel dispatch threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// True when a batch of `count` units should be dispatched in parallel.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = EngineConfig::default();
        assert!(config.parallel);
        assert_eq!(config.parallel_threshold, 32);
    }

    #[test]
    fn test_sequential_never_parallelizes() {
        let config = EngineConfig::sequential();
        assert!(!config.should_parallelize(10_000));
    }

    #[test]
    fn test_threshold() {
        let config = EngineConfig::new().with_threshold(10);
        #[cfg(feature = "parallel")]
        {
            assert!(!config.should_parallelize(5));
            assert!(config.should_parallelize(10));
        }
        #[cfg(not(feature = "parallel"))]
        assert!(!config.should_parallelize(100));
    }
}
