//! Quality level state machine
//!
//! The controller holds exactly one [`QualityLevel`] and moves it one step
//! at a time. A reading below `low_threshold` counts toward a downgrade, a
//! reading above `high_threshold` counts toward an upgrade, and anything in
//! between resets both streaks. A transition needs `debounce_ticks`
//! consecutive qualifying readings.

use super::{DeviceCapability, QualityLevel};
use crate::core::config::ControllerConfig;
use crate::QualityError;

/// A committed level change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityTransition {
    /// Level before the change
    pub from: QualityLevel,
    /// Level after the change
    pub to: QualityLevel,
    /// Reading that completed the streak
    pub fps: f64,
}

impl QualityTransition {
    /// Whether the change lowered rendering cost
    pub fn is_downgrade(&self) -> bool {
        self.to < self.from
    }
}

/// Running counters for diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControllerStats {
    /// Ticks that carried a usable reading
    pub ticks_evaluated: u64,
    /// Ticks skipped for NaN or negative readings
    pub ticks_ignored: u64,
    /// Ticks skipped because their id was already evaluated
    pub duplicate_ticks: u64,
    /// Committed upgrades
    pub upgrades: u64,
    /// Committed downgrades
    pub downgrades: u64,
}

/// Hysteresis controller for the active quality level
#[derive(Debug, Clone)]
pub struct QualityController {
    low_threshold: f64,
    high_threshold: f64,
    debounce_ticks: u32,
    floor: QualityLevel,
    ceiling: QualityLevel,

    level: QualityLevel,
    downgrade_streak: u32,
    upgrade_streak: u32,
    last_tick: Option<u64>,
    stats: ControllerStats,
}

impl QualityController {
    /// Create a controller starting at `initial`, clamped into the configured range
    ///
    /// Fails on misconfigured thresholds, debounce or level range.
    pub fn new(config: &ControllerConfig, initial: QualityLevel) -> Result<Self, QualityError> {
        config.validate()?;

        let level = initial.clamp_to(config.floor, config.ceiling);
        log::debug!(
            "Quality controller: start {} in [{}, {}], thresholds {}/{}, debounce {}",
            level,
            config.floor,
            config.ceiling,
            config.low_threshold,
            config.high_threshold,
            config.debounce_ticks
        );

        Ok(Self {
            low_threshold: config.low_threshold,
            high_threshold: config.high_threshold,
            debounce_ticks: config.debounce_ticks,
            floor: config.floor,
            ceiling: config.ceiling,
            level,
            downgrade_streak: 0,
            upgrade_streak: 0,
            last_tick: None,
            stats: ControllerStats::default(),
        })
    }

    /// Create a controller seeded from a device capability hint
    pub fn with_capability(
        config: &ControllerConfig,
        capability: &DeviceCapability,
    ) -> Result<Self, QualityError> {
        Self::new(config, capability.initial_level(config.floor, config.ceiling))
    }

    /// Evaluate one tick and return the active level
    pub fn evaluate(&mut self, fps: f64) -> QualityLevel {
        self.evaluate_transition(fps);
        self.level
    }

    /// Evaluate one tick identified by `tick`
    ///
    /// Ticks must carry increasing ids; a repeated or older id is a no-op.
    pub fn evaluate_tick(&mut self, tick: u64, fps: f64) -> Option<QualityTransition> {
        if self.last_tick.is_some_and(|last| tick <= last) {
            self.stats.duplicate_ticks += 1;
            log::trace!("Ignoring stale evaluation tick {}", tick);
            return None;
        }
        self.last_tick = Some(tick);
        self.evaluate_transition(fps)
    }

    /// Evaluate one tick and report a transition if one fired
    ///
    /// NaN and negative readings (including negative infinity) are skipped
    /// without touching either streak. Positive infinity is a valid reading
    /// above any threshold.
    pub fn evaluate_transition(&mut self, fps: f64) -> Option<QualityTransition> {
        if fps.is_nan() || fps < 0.0 {
            self.stats.ticks_ignored += 1;
            log::debug!("Ignoring unusable fps reading {}", fps);
            return None;
        }
        self.stats.ticks_evaluated += 1;

        if fps < self.low_threshold {
            self.upgrade_streak = 0;
            self.downgrade_streak = self.downgrade_streak.saturating_add(1);
            if self.downgrade_streak >= self.debounce_ticks {
                self.downgrade_streak = 0;
                let target = self.level.step_down().filter(|next| *next >= self.floor);
                return target.map(|to| self.commit(to, fps));
            }
        } else if fps > self.high_threshold {
            self.downgrade_streak = 0;
            self.upgrade_streak = self.upgrade_streak.saturating_add(1);
            if self.upgrade_streak >= self.debounce_ticks {
                self.upgrade_streak = 0;
                let target = self.level.step_up().filter(|next| *next <= self.ceiling);
                return target.map(|to| self.commit(to, fps));
            }
        } else {
            self.downgrade_streak = 0;
            self.upgrade_streak = 0;
        }

        None
    }

    /// Active quality level
    pub fn current_level(&self) -> QualityLevel {
        self.level
    }

    /// Consecutive ticks below the low threshold
    pub fn downgrade_streak(&self) -> u32 {
        self.downgrade_streak
    }

    /// Consecutive ticks above the high threshold
    pub fn upgrade_streak(&self) -> u32 {
        self.upgrade_streak
    }

    /// Lowest selectable level
    pub fn floor(&self) -> QualityLevel {
        self.floor
    }

    /// Highest selectable level
    pub fn ceiling(&self) -> QualityLevel {
        self.ceiling
    }

    /// Diagnostic counters
    pub fn stats(&self) -> &ControllerStats {
        &self.stats
    }

    fn commit(&mut self, to: QualityLevel, fps: f64) -> QualityTransition {
        let transition = QualityTransition { from: self.level, to, fps };
        if transition.is_downgrade() {
            self.stats.downgrades += 1;
        } else {
            self.stats.upgrades += 1;
        }
        self.level = to;

        log::info!(
            "Quality {} -> {} at {:.1} fps (thresholds {}/{})",
            transition.from,
            transition.to,
            fps,
            self.low_threshold,
            self.high_threshold
        );
        transition
    }
}
