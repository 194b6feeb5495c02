//! # Unified Configuration
//!
//! Every tunable of the quality loop lives here rather than in scattered
//! literals: sampling window and smoothing, controller thresholds and
//! debounce, the level-to-parameter table and the render scheduling mode.
//!
//! ## Configuration Categories
//!
//! - **Sampler Config**: Window length, smoothing strategy, pause detection
//! - **Controller Config**: Hysteresis thresholds, debounce count, level range
//! - **Render Parameters**: Per-level pixel ratio, shadows, tessellation, AA
//! - **Scheduling**: Continuous or on-demand frame loop
//!
//! All structures deserialize with defaults for missing fields, so a config
//! file only needs to name what it overrides.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::performance::QualityLevel;
use crate::render::{RenderParameterTable, SchedulingMode};
use crate::QualityError;

/// How the sampler turns frame timestamps into an FPS estimate
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum SmoothingStrategy {
    /// Count frames over a fixed window, then publish and start a new one
    #[default]
    TumblingWindow,
    /// Exponential moving average of per-frame `1000 / delta_ms`
    ExponentialMovingAverage {
        /// Weight of the newest frame, in (0, 1)
        alpha: f64,
    },
}

/// # Frame Sampler Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Length of one publishing window in milliseconds
    pub window_ms: f64,
    /// Frame gaps longer than this are treated as a paused loop
    ///
    /// Must be at least `window_ms`. Hosts that know when they stop drawing
    /// should call [`FrameSampler::pause`](crate::performance::FrameSampler::pause)
    /// instead of relying on this.
    pub max_frame_gap_ms: f64,
    /// Smoothing strategy
    pub smoothing: SmoothingStrategy,
}

impl SamplerConfig {
    /// Create a sampler configuration with default values
    pub fn new() -> Self {
        Self {
            window_ms: 1000.0,
            max_frame_gap_ms: 10_000.0,
            smoothing: SmoothingStrategy::TumblingWindow,
        }
    }

    /// Set the window length
    pub fn with_window_ms(mut self, window_ms: f64) -> Self {
        self.window_ms = window_ms;
        self
    }

    /// Set the smoothing strategy
    pub fn with_smoothing(mut self, smoothing: SmoothingStrategy) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the pause detection gap
    pub fn with_max_frame_gap_ms(mut self, gap_ms: f64) -> Self {
        self.max_frame_gap_ms = gap_ms;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), QualityError> {
        if !self.window_ms.is_finite() || self.window_ms <= 0.0 {
            return Err(QualityError::InvalidWindow(self.window_ms));
        }

        if !self.max_frame_gap_ms.is_finite() || self.max_frame_gap_ms <= 0.0 {
            return Err(QualityError::InvalidFrameGap(self.max_frame_gap_ms));
        }

        if self.max_frame_gap_ms < self.window_ms {
            return Err(QualityError::FrameGapShorterThanWindow {
                gap_ms: self.max_frame_gap_ms,
                window_ms: self.window_ms,
            });
        }

        if let SmoothingStrategy::ExponentialMovingAverage { alpha } = self.smoothing {
            if !(alpha > 0.0 && alpha < 1.0) {
                return Err(QualityError::InvalidSmoothing(alpha));
            }
        }

        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fewest consecutive ticks a transition may require
///
/// A single slow frame lands in exactly one sampling window, so two ticks
/// keep it from causing a transition on its own.
pub const MIN_DEBOUNCE_TICKS: u32 = 2;

/// # Quality Controller Configuration
///
/// `low_threshold` and `high_threshold` bound a dead zone in which the
/// controller holds its level. A reading must fall outside it for
/// `debounce_ticks` consecutive ticks before one step is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Downgrade when FPS stays below this
    pub low_threshold: f64,
    /// Upgrade when FPS stays above this
    pub high_threshold: f64,
    /// Consecutive qualifying ticks required for a transition
    pub debounce_ticks: u32,
    /// Lowest level the controller may select
    pub floor: QualityLevel,
    /// Highest level the controller may select
    pub ceiling: QualityLevel,
}

impl ControllerConfig {
    /// Create a controller configuration with default values
    pub fn new() -> Self {
        Self {
            low_threshold: 35.0,
            high_threshold: 55.0,
            debounce_ticks: 3,
            floor: QualityLevel::Reduced,
            ceiling: QualityLevel::High,
        }
    }

    /// Set both hysteresis thresholds
    pub fn with_thresholds(mut self, low: f64, high: f64) -> Self {
        self.low_threshold = low;
        self.high_threshold = high;
        self
    }

    /// Set the debounce tick count
    pub fn with_debounce(mut self, ticks: u32) -> Self {
        self.debounce_ticks = ticks;
        self
    }

    /// Restrict the controller to `[floor, ceiling]`
    pub fn with_levels(mut self, floor: QualityLevel, ceiling: QualityLevel) -> Self {
        self.floor = floor;
        self.ceiling = ceiling;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), QualityError> {
        for threshold in [self.low_threshold, self.high_threshold] {
            if !threshold.is_finite() || threshold < 0.0 {
                return Err(QualityError::InvalidThreshold(threshold));
            }
        }

        if self.high_threshold <= self.low_threshold {
            return Err(QualityError::InvertedThresholds {
                low: self.low_threshold,
                high: self.high_threshold,
            });
        }

        if self.debounce_ticks < MIN_DEBOUNCE_TICKS {
            return Err(QualityError::DebounceTooShort(self.debounce_ticks));
        }

        if self.floor > self.ceiling {
            return Err(QualityError::EmptyLevelRange {
                floor: self.floor,
                ceiling: self.ceiling,
            });
        }

        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Quality Configuration
///
/// Top-level configuration for one render session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptiveQualityConfig {
    /// Render loop scheduling mode
    pub scheduling: SchedulingMode,
    /// Frame sampler configuration
    pub sampler: SamplerConfig,
    /// Quality controller configuration
    pub controller: ControllerConfig,
    /// Level-to-render-parameter table
    pub parameters: RenderParameterTable,
}

impl AdaptiveQualityConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampler configuration
    pub fn with_sampler(mut self, sampler: SamplerConfig) -> Self {
        self.sampler = sampler;
        self
    }

    /// Set the controller configuration
    pub fn with_controller(mut self, controller: ControllerConfig) -> Self {
        self.controller = controller;
        self
    }

    /// Set the parameter table
    pub fn with_parameters(mut self, parameters: RenderParameterTable) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the scheduling mode
    pub fn with_scheduling(mut self, scheduling: SchedulingMode) -> Self {
        self.scheduling = scheduling;
        self
    }

    /// Load and validate a configuration file
    pub fn load_validated(path: impl AsRef<std::path::Path>) -> Result<Self, QualityError> {
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), QualityError> {
        self.sampler.validate()?;
        self.controller.validate()?;
        self.parameters.validate()?;
        Ok(())
    }
}

impl Config for AdaptiveQualityConfig {}
