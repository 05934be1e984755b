//! Tuning constants for the engine, injected rather than read from global state.

/// Knobs for the configuration generator and the flag threshold the
/// strategy uses to promote a high probability into a certain-enough flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Cells at or below this count use exact enumeration; above it, sampling.
    pub exact_threshold: usize,
    /// Number of random draws the sampling generator takes above the threshold.
    pub sample_size: usize,
    /// Minimum probability at which the strategy flags instead of revealing.
    pub flag_threshold: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exact_threshold: 20,
            sample_size: 100_000,
            flag_threshold: 0.90,
        }
    }
}
