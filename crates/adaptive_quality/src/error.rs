//! Construction-time errors
//!
//! Runtime calls never fail. Invalid timestamps and FPS readings are
//! absorbed where they arrive; only misconfiguration is reported, and
//! only when a component is built.

use crate::config::ConfigError;
use crate::performance::QualityLevel;
use thiserror::Error;

/// Errors raised while validating configuration or building components
#[derive(Error, Debug)]
pub enum QualityError {
    /// High threshold must sit strictly above the low threshold
    #[error("Invalid thresholds: high ({high}) must be greater than low ({low})")]
    InvertedThresholds {
        /// Downgrade threshold
        low: f64,
        /// Upgrade threshold
        high: f64,
    },

    /// A threshold was NaN, infinite or negative
    #[error("Invalid threshold value: {0}")]
    InvalidThreshold(f64),

    /// Debounce count below two would let a single reading transition
    #[error("Debounce tick count must be at least 2, got {0}")]
    DebounceTooShort(u32),

    /// Sampling window length was zero, negative or not finite
    #[error("Invalid sampling window: {0} ms")]
    InvalidWindow(f64),

    /// Pause detection gap was zero, negative or not finite
    #[error("Invalid maximum frame gap: {0} ms")]
    InvalidFrameGap(f64),

    /// Pause detection gap shorter than one sampling window
    #[error("Maximum frame gap ({gap_ms} ms) must be at least the window length ({window_ms} ms)")]
    FrameGapShorterThanWindow {
        /// Configured pause detection gap
        gap_ms: f64,
        /// Configured window length
        window_ms: f64,
    },

    /// EMA smoothing factor outside (0, 1)
    #[error("Invalid smoothing factor: {0} (expected 0 < alpha < 1)")]
    InvalidSmoothing(f64),

    /// Floor level above ceiling level
    #[error("Empty quality range: floor {floor:?} is above ceiling {ceiling:?}")]
    EmptyLevelRange {
        /// Lowest allowed level
        floor: QualityLevel,
        /// Highest allowed level
        ceiling: QualityLevel,
    },

    /// A render parameter table entry is out of range
    #[error("Invalid render parameters for {level:?}: {reason}")]
    InvalidParameters {
        /// Level whose entry failed validation
        level: QualityLevel,
        /// What was wrong with it
        reason: String,
    },

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
