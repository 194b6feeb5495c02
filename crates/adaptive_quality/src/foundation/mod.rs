//! Foundation module - Core utilities
//!
//! - Monotonic session clock for the render loop driver
//! - Logging utilities

pub mod logging;
pub mod time;
