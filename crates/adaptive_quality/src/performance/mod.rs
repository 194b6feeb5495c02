//! Performance monitoring and quality control
//!
//! The sampler turns frame timestamps into an FPS estimate; the controller
//! turns FPS readings into a [`QualityLevel`]. Data only flows one way:
//! sampler, then controller, then the render parameter mapping.

pub mod capability;
pub mod controller;
pub mod level;
pub mod sampler;

pub use capability::DeviceCapability;
pub use controller::{ControllerStats, QualityController, QualityTransition};
pub use level::QualityLevel;
pub use sampler::{FrameSample, FrameSampler, PerformanceWindow};
