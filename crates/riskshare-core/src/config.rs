//! Configuration for numeric computation.

use serde::{Deserialize, Serialize};

/// Controls how the numeric kernels schedule their work.
///
/// Results never depend on these settings; they only decide whether
/// independent cells are evaluated on the rayon thread pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComputeConfig {
    /// Enable parallel processing (requires the 'parallel' feature).
    pub parallel: bool,

    /// Minimum number of independent work items (asset pairs for a
    /// covariance estimate) to trigger parallel processing.
    /// Below this threshold, sequential is faster due to thread overhead.
    pub parallel_threshold: usize,
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 256, // Roughly 22 assets worth of pairs
        }
    }
}

impl ComputeConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }
}
