//! Device capability hints used to seed the initial quality level

use super::QualityLevel;
use serde::{Deserialize, Serialize};

/// Capability hint reported by the host at session start
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceCapability {
    /// Device pixel ratio ceiling, if the host could report one
    pub max_pixel_ratio: Option<f32>,
}

impl DeviceCapability {
    /// No capability information available
    pub const fn unknown() -> Self {
        Self { max_pixel_ratio: None }
    }

    /// Capability with a known pixel ratio ceiling
    pub const fn with_pixel_ratio(max_pixel_ratio: f32) -> Self {
        Self { max_pixel_ratio: Some(max_pixel_ratio) }
    }

    /// Highest level this device is expected to sustain
    ///
    /// Unknown or unusable hints fall back to [`QualityLevel::Nominal`].
    pub fn suggested_level(&self) -> QualityLevel {
        match self.max_pixel_ratio {
            Some(ratio) if ratio.is_finite() && ratio >= 1.5 => QualityLevel::High,
            Some(ratio) if ratio.is_finite() && ratio >= 1.0 => QualityLevel::Nominal,
            Some(ratio) if ratio.is_finite() && ratio > 0.0 => QualityLevel::Reduced,
            _ => QualityLevel::Nominal,
        }
    }

    /// Initial level for a controller limited to `[floor, ceiling]`
    pub fn initial_level(&self, floor: QualityLevel, ceiling: QualityLevel) -> QualityLevel {
        self.suggested_level().clamp_to(floor, ceiling)
    }
}
