//! Renderer-facing outputs of the quality loop
//!
//! - **Parameters**: Level-to-settings mapping consumed by the renderer
//! - **Scheduling**: Continuous versus on-demand frame loops
//! - **Shared**: Atomic level publication for a separate render thread

pub mod parameters;
pub mod scheduling;
pub mod shared;

pub use parameters::{RenderParameterSet, RenderParameterTable};
pub use scheduling::SchedulingMode;
pub use shared::SharedQuality;
