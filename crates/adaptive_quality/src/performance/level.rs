//! Quality levels

use serde::{Deserialize, Serialize};

/// Discrete rendering-cost tier
///
/// Ordered from cheapest to most expensive. Transitions only ever move one
/// step at a time, see [`QualityLevel::step_down`] and [`QualityLevel::step_up`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityLevel {
    /// Lowest cost: reduced resolution, no shadows, coarse geometry
    Reduced = 0,
    /// Default viewer quality
    #[default]
    Nominal = 1,
    /// Supersampled resolution and high-detail shadows
    High = 2,
}

impl QualityLevel {
    /// All levels, cheapest first
    pub const ALL: [Self; 3] = [Self::Reduced, Self::Nominal, Self::High];

    /// Position in [`QualityLevel::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Level at the given index, if any
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Reduced),
            1 => Some(Self::Nominal),
            2 => Some(Self::High),
            _ => None,
        }
    }

    /// The next cheaper level, or `None` at the bottom
    pub const fn step_down(self) -> Option<Self> {
        match self {
            Self::Reduced => None,
            Self::Nominal => Some(Self::Reduced),
            Self::High => Some(Self::Nominal),
        }
    }

    /// The next more expensive level, or `None` at the top
    pub const fn step_up(self) -> Option<Self> {
        match self {
            Self::Reduced => Some(Self::Nominal),
            Self::Nominal => Some(Self::High),
            Self::High => None,
        }
    }

    /// Clamp into an inclusive range
    pub fn clamp_to(self, floor: Self, ceiling: Self) -> Self {
        self.max(floor).min(ceiling)
    }
}

impl std::fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Reduced => "reduced",
            Self::Nominal => "nominal",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered() {
        assert!(QualityLevel::Reduced < QualityLevel::Nominal);
        assert!(QualityLevel::Nominal < QualityLevel::High);
    }

    #[test]
    fn test_steps_move_one_level() {
        for level in QualityLevel::ALL {
            if let Some(lower) = level.step_down() {
                assert_eq!(lower.index() + 1, level.index());
            }
            if let Some(higher) = level.step_up() {
                assert_eq!(higher.index(), level.index() + 1);
            }
        }
        assert_eq!(QualityLevel::Reduced.step_down(), None);
        assert_eq!(QualityLevel::High.step_up(), None);
    }

    #[test]
    fn test_index_round_trip() {
        for level in QualityLevel::ALL {
            assert_eq!(QualityLevel::from_index(level.index()), Some(level));
        }
        assert_eq!(QualityLevel::from_index(3), None);
    }

    #[test]
    fn test_default_is_nominal() {
        assert_eq!(QualityLevel::default(), QualityLevel::Nominal);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(
            QualityLevel::High.clamp_to(QualityLevel::Reduced, QualityLevel::Nominal),
            QualityLevel::Nominal
        );
        assert_eq!(
            QualityLevel::Reduced.clamp_to(QualityLevel::Nominal, QualityLevel::High),
            QualityLevel::Nominal
        );
    }
}
