//! Render loop driver
//!
//! Owns one sampler, one controller and the parameter table for a render
//! session and wires them together in frame order.

use crate::{
    core::config::AdaptiveQualityConfig,
    foundation::time::SessionClock,
    performance::{
        DeviceCapability, FrameSample, FrameSampler, QualityController, QualityLevel,
        QualityTransition,
    },
    render::{RenderParameterSet, RenderParameterTable, SchedulingMode, SharedQuality},
    QualityError,
};

/// What happened during one [`RenderLoopDriver::frame`] call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameOutcome {
    /// Recorded sample, `None` if the timestamp was discarded
    pub sample: Option<FrameSample>,
    /// Whether a new sampling window triggered an evaluation tick
    pub evaluated: bool,
    /// Level change committed on this frame
    pub transition: Option<QualityTransition>,
}

/// Per-session quality loop
///
/// Call [`frame`](Self::frame) once per rendered frame, then configure the
/// renderer from [`parameters`](Self::parameters). One evaluation tick runs
/// each time the sampler publishes a new window.
///
/// Only continuous scheduling feeds the controller. On-demand frames are
/// paced by whatever invalidates the image, so their rate says nothing about
/// rendering cost; they still update the FPS readout but never change the
/// level. Hosts that animate for a while switch to
/// [`SchedulingMode::Continuous`] with
/// [`set_scheduling_mode`](Self::set_scheduling_mode) and back afterwards.
pub struct RenderLoopDriver {
    sampler: FrameSampler,
    controller: QualityController,
    table: RenderParameterTable,
    parameters: RenderParameterSet,
    scheduling: SchedulingMode,
    shared: SharedQuality,
    invalidated: bool,
}

impl RenderLoopDriver {
    /// Build the quality loop for a new session
    pub fn new(config: &AdaptiveQualityConfig, capability: DeviceCapability) -> Result<Self, QualityError> {
        log::info!("Initializing adaptive quality loop...");
        config.validate()?;

        let sampler = FrameSampler::new(&config.sampler)?;
        let controller = QualityController::with_capability(&config.controller, &capability)?;
        let table = config.parameters.clone();
        let level = controller.current_level();
        let parameters = table.parameters_for(level);

        log::info!(
            "Starting at {} quality ({:?} scheduling, capability {:?})",
            level,
            config.scheduling,
            capability.max_pixel_ratio
        );

        Ok(Self {
            sampler,
            controller,
            table,
            parameters,
            scheduling: config.scheduling,
            shared: SharedQuality::new(level),
            invalidated: true,
        })
    }

    /// Record a rendered frame at `now_ms` and run an evaluation tick if due
    pub fn frame(&mut self, now_ms: f64) -> FrameOutcome {
        let generation = self.sampler.window().generation;
        let sample = self.sampler.record_frame(now_ms);
        let window = *self.sampler.window();

        // Only an accepted frame satisfies a pending invalidation
        if sample.is_some() {
            self.invalidated = false;
        }

        let mut outcome = FrameOutcome {
            sample,
            ..FrameOutcome::default()
        };

        if window.generation != generation && self.scheduling.is_continuous() {
            outcome.evaluated = true;
            outcome.transition = self.controller.evaluate_tick(window.generation, window.windowed_fps);
        }

        if let Some(transition) = outcome.transition {
            self.apply(transition.to);
        }

        outcome
    }

    /// Record a frame using a session clock
    pub fn frame_now(&mut self, clock: &SessionClock) -> FrameOutcome {
        self.frame(clock.now_ms())
    }

    /// Tell the sampler the host stopped drawing
    ///
    /// The next frame resumes measurement without counting the idle time.
    pub fn pause(&mut self) {
        self.sampler.pause();
    }

    /// Switch between continuous and on-demand drawing
    ///
    /// Sampling pauses across the switch so frames from one mode never share
    /// a window with frames from the other.
    pub fn set_scheduling_mode(&mut self, scheduling: SchedulingMode) {
        if scheduling == self.scheduling {
            return;
        }
        log::debug!("Scheduling {:?} -> {:?}", self.scheduling, scheduling);
        self.scheduling = scheduling;
        self.sampler.pause();
    }

    /// Mark the current image stale so an on-demand loop draws again
    pub fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Whether the host should draw a frame now
    pub fn needs_frame(&self) -> bool {
        self.scheduling.is_continuous() || self.invalidated
    }

    /// Settings the renderer should use
    pub fn parameters(&self) -> &RenderParameterSet {
        &self.parameters
    }

    /// Active quality level
    pub fn level(&self) -> QualityLevel {
        self.controller.current_level()
    }

    /// Latest published FPS estimate
    pub fn current_fps(&self) -> f64 {
        self.sampler.current_fps()
    }

    /// Handle for a renderer on another thread
    pub fn shared_quality(&self) -> SharedQuality {
        self.shared.clone()
    }

    /// The parameter table in use
    pub fn table(&self) -> &RenderParameterTable {
        &self.table
    }

    /// Get the frame sampler
    pub fn sampler(&self) -> &FrameSampler {
        &self.sampler
    }

    /// Get the quality controller
    pub fn controller(&self) -> &QualityController {
        &self.controller
    }

    /// Scheduling mode for this session
    pub fn scheduling_mode(&self) -> SchedulingMode {
        self.scheduling
    }

    fn apply(&mut self, level: QualityLevel) {
        self.parameters = self.table.parameters_for(level);
        self.shared.publish(level);
        log::debug!("Render parameters now {:?}", self.parameters);
    }
}
