//! # Adaptive Quality
//!
//! Frame-rate driven rendering quality control for a real-time 3D viewer.
//!
//! ## Features
//!
//! - **Frame Sampling**: Rolling FPS estimate from per-frame timestamps
//! - **Hysteresis Control**: Debounced, dead-zone quality level transitions
//! - **Parameter Mapping**: Pure level-to-render-parameter tables
//! - **Scheduling Modes**: Continuous or invalidate-on-change render loops
//! - **Configuration**: TOML and RON config files with validation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use adaptive_quality::prelude::*;
//!
//! fn main() -> Result<(), QualityError> {
//!     let config = AdaptiveQualityConfig::default();
//!     let mut driver = RenderLoopDriver::new(&config, DeviceCapability::unknown())?;
//!
//!     let mut now_ms = 0.0;
//!     loop {
//!         let outcome = driver.frame(now_ms);
//!         if let Some(transition) = outcome.transition {
//!             println!("quality {:?} -> {:?}", transition.from, transition.to);
//!         }
//!         let _params = driver.parameters();
//!         // Configure the renderer from `_params` and draw
//!         now_ms += 16.0;
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core configuration
pub mod core;
pub mod config;

pub mod foundation;
pub mod performance;
pub mod render;

mod driver;
mod error;

#[cfg(test)]
mod tests;

pub use driver::{FrameOutcome, RenderLoopDriver};
pub use error::QualityError;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        QualityError,
        RenderLoopDriver, FrameOutcome,
        config::{Config, ConfigError},
        core::config::{AdaptiveQualityConfig, ControllerConfig, SamplerConfig, SmoothingStrategy},
        foundation::time::SessionClock,
        performance::{
            DeviceCapability, FrameSample, FrameSampler, PerformanceWindow,
            QualityController, QualityLevel, QualityTransition,
        },
        render::{RenderParameterSet, RenderParameterTable, SchedulingMode, SharedQuality},
    };
}
