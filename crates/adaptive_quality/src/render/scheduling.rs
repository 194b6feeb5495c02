//! Render loop scheduling modes

use serde::{Deserialize, Serialize};

/// How the host decides when to draw a frame
///
/// Independent of the quality level: either mode works with any level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulingMode {
    /// Draw on every display refresh
    #[default]
    Continuous,
    /// Draw only after something invalidated the current image
    OnDemand,
}

impl SchedulingMode {
    /// Whether frames are drawn regardless of invalidation
    pub const fn is_continuous(self) -> bool {
        matches!(self, Self::Continuous)
    }
}
