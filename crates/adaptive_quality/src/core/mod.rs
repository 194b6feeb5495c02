//! # Core Module
//!
//! Shared configuration for every part of the quality loop.

pub mod config;

pub use config::{AdaptiveQualityConfig, ControllerConfig, SamplerConfig, SmoothingStrategy};
