//! Render parameter mapping
//!
//! Maps a [`QualityLevel`] to the concrete settings the renderer applies.
//! The controller only ever deals in levels; every number the renderer
//! sees comes from a [`RenderParameterTable`].

use serde::{Deserialize, Serialize};

use crate::performance::QualityLevel;
use crate::QualityError;

/// Allowed device pixel ratio multipliers
pub const PIXEL_RATIO_RANGE: (f32, f32) = (0.5, 2.0);

/// Allowed shadow map edge lengths
pub const SHADOW_MAP_RANGE: (u32, u32) = (64, 8192);

/// Read-only snapshot of renderer settings for one quality level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderParameterSet {
    /// Device pixel ratio multiplier for the render target
    pub pixel_ratio: f32,
    /// Whether the key light casts shadows
    pub shadow_enabled: bool,
    /// Shadow map edge length in texels
    pub shadow_map_resolution: u32,
    /// Subdivision detail of the product mesh
    pub mesh_tessellation_level: u32,
    /// Whether MSAA is requested
    pub antialias_enabled: bool,
}

impl RenderParameterSet {
    /// Check ranges for one table entry
    pub fn validate(&self, level: QualityLevel) -> Result<(), QualityError> {
        let invalid = |reason: String| QualityError::InvalidParameters { level, reason };
        let (min_ratio, max_ratio) = PIXEL_RATIO_RANGE;
        let (min_shadow, max_shadow) = SHADOW_MAP_RANGE;

        if !self.pixel_ratio.is_finite() || !(min_ratio..=max_ratio).contains(&self.pixel_ratio) {
            return Err(invalid(format!(
                "pixel ratio {} outside [{}, {}]",
                self.pixel_ratio, min_ratio, max_ratio
            )));
        }

        if !self.shadow_map_resolution.is_power_of_two()
            || !(min_shadow..=max_shadow).contains(&self.shadow_map_resolution)
        {
            return Err(invalid(format!(
                "shadow map resolution {} is not a power of two in [{}, {}]",
                self.shadow_map_resolution, min_shadow, max_shadow
            )));
        }

        if self.mesh_tessellation_level == 0 {
            return Err(invalid("mesh tessellation level must be at least 1".to_string()));
        }

        Ok(())
    }
}

/// One parameter set per quality level
///
/// Having a field per level keeps the mapping total: there is no level
/// without an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParameterTable {
    /// Settings for [`QualityLevel::Reduced`]
    pub reduced: RenderParameterSet,
    /// Settings for [`QualityLevel::Nominal`]
    pub nominal: RenderParameterSet,
    /// Settings for [`QualityLevel::High`]
    pub high: RenderParameterSet,
}

impl RenderParameterTable {
    /// Parameters for a level
    pub const fn parameters_for(&self, level: QualityLevel) -> RenderParameterSet {
        match level {
            QualityLevel::Reduced => self.reduced,
            QualityLevel::Nominal => self.nominal,
            QualityLevel::High => self.high,
        }
    }

    /// Replace the entry for one level
    pub fn with_level(mut self, level: QualityLevel, parameters: RenderParameterSet) -> Self {
        match level {
            QualityLevel::Reduced => self.reduced = parameters,
            QualityLevel::Nominal => self.nominal = parameters,
            QualityLevel::High => self.high = parameters,
        }
        self
    }

    /// Validate every entry
    pub fn validate(&self) -> Result<(), QualityError> {
        for level in QualityLevel::ALL {
            self.parameters_for(level).validate(level)?;
        }
        Ok(())
    }
}

impl Default for RenderParameterTable {
    fn default() -> Self {
        Self {
            reduced: RenderParameterSet {
                pixel_ratio: 0.75,
                shadow_enabled: false,
                shadow_map_resolution: 256,
                mesh_tessellation_level: 8,
                antialias_enabled: false,
            },
            nominal: RenderParameterSet {
                pixel_ratio: 1.0,
                shadow_enabled: true,
                shadow_map_resolution: 512,
                mesh_tessellation_level: 32,
                antialias_enabled: true,
            },
            high: RenderParameterSet {
                pixel_ratio: 1.5,
                shadow_enabled: true,
                shadow_map_resolution: 1024,
                mesh_tessellation_level: 64,
                antialias_enabled: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_valid() {
        assert!(RenderParameterTable::default().validate().is_ok());
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let table = RenderParameterTable::default();
        for level in QualityLevel::ALL {
            let first = table.parameters_for(level);
            let second = table.parameters_for(level);
            assert_eq!(first.pixel_ratio.to_bits(), second.pixel_ratio.to_bits());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_cost_rises_with_level() {
        let table = RenderParameterTable::default();
        let reduced = table.parameters_for(QualityLevel::Reduced);
        let nominal = table.parameters_for(QualityLevel::Nominal);
        let high = table.parameters_for(QualityLevel::High);

        assert!(reduced.pixel_ratio < nominal.pixel_ratio);
        assert!(nominal.pixel_ratio < high.pixel_ratio);
        assert!(!reduced.shadow_enabled);
        assert!(nominal.shadow_map_resolution < high.shadow_map_resolution);
        assert!(reduced.mesh_tessellation_level < nominal.mesh_tessellation_level);
    }

    #[test]
    fn test_with_level_replaces_one_entry() {
        let custom = RenderParameterSet {
            pixel_ratio: 2.0,
            shadow_enabled: true,
            shadow_map_resolution: 2048,
            mesh_tessellation_level: 96,
            antialias_enabled: true,
        };
        let table = RenderParameterTable::default().with_level(QualityLevel::High, custom);

        assert_eq!(table.parameters_for(QualityLevel::High), custom);
        assert_eq!(table.nominal, RenderParameterTable::default().nominal);
    }

    #[test]
    fn test_out_of_range_entries_rejected() {
        let base = RenderParameterTable::default().nominal;

        let bad_ratio = RenderParameterSet { pixel_ratio: 3.0, ..base };
        assert!(bad_ratio.validate(QualityLevel::Nominal).is_err());

        let nan_ratio = RenderParameterSet { pixel_ratio: f32::NAN, ..base };
        assert!(nan_ratio.validate(QualityLevel::Nominal).is_err());

        let bad_shadow = RenderParameterSet { shadow_map_resolution: 500, ..base };
        assert!(bad_shadow.validate(QualityLevel::Nominal).is_err());

        let no_mesh = RenderParameterSet { mesh_tessellation_level: 0, ..base };
        let err = RenderParameterTable::default()
            .with_level(QualityLevel::Reduced, no_mesh)
            .validate()
            .unwrap_err();
        assert!(matches!(err, QualityError::InvalidParameters { level: QualityLevel::Reduced, .. }));
    }
}
