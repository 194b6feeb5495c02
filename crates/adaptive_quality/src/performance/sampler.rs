//! Frame sampling
//!
//! [`FrameSampler`] is fed one monotonic timestamp per rendered frame and
//! keeps a [`PerformanceWindow`] describing the most recent complete
//! sampling window. It never blocks and never fails: bad timestamps are
//! dropped and the previous estimate is kept.
//!
//! Hosts call [`FrameSampler::pause`] when they stop drawing (hidden tab,
//! idle on-demand loop) so the idle stretch is not read as slow frames. A
//! gap longer than `max_frame_gap_ms` is treated the same way for hosts
//! that never say so. Below that gap every frame counts, however slow.

use crate::core::config::{SamplerConfig, SmoothingStrategy};
use crate::QualityError;

/// One recorded frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSample {
    /// Monotonic clock reading in milliseconds
    pub timestamp_ms: f64,
    /// Time since the previous accepted frame, `None` for the first frame
    pub delta_ms: Option<f64>,
    /// `1000 / delta_ms`, `None` for the first frame or a zero delta
    pub instantaneous_fps: Option<f64>,
}

/// Aggregate over the last complete sampling window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerformanceWindow {
    /// Published frames-per-second estimate
    pub windowed_fps: f64,
    /// Frames folded into the last published window
    pub sample_count: u32,
    /// Measured span of the last published window
    pub window_duration_ms: f64,
    /// Number of windows published so far
    pub generation: u64,
}

/// Rolling frame-rate estimator
#[derive(Debug, Clone)]
pub struct FrameSampler {
    window_ms: f64,
    max_frame_gap_ms: f64,
    smoothing: SmoothingStrategy,

    last_timestamp: Option<f64>,
    window_start: f64,
    frames_in_window: u32,
    ema_fps: Option<f64>,
    paused: bool,

    window: PerformanceWindow,
    total_frames: u64,
    discarded_frames: u64,
    pauses: u64,
}

impl FrameSampler {
    /// Create a sampler from a validated configuration
    pub fn new(config: &SamplerConfig) -> Result<Self, QualityError> {
        config.validate()?;

        Ok(Self {
            window_ms: config.window_ms,
            max_frame_gap_ms: config.max_frame_gap_ms,
            smoothing: config.smoothing,
            last_timestamp: None,
            window_start: 0.0,
            frames_in_window: 0,
            ema_fps: None,
            paused: false,
            window: PerformanceWindow::default(),
            total_frames: 0,
            discarded_frames: 0,
            pauses: 0,
        })
    }

    /// Record a rendered frame
    ///
    /// Returns `None` when the timestamp is not finite or runs backwards;
    /// such frames leave every published value untouched.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<FrameSample> {
        if !now_ms.is_finite() {
            self.discard(now_ms);
            return None;
        }

        let Some(previous) = self.last_timestamp else {
            self.paused = false;
            self.last_timestamp = Some(now_ms);
            self.restart_window(now_ms);
            self.total_frames += 1;
            return Some(FrameSample {
                timestamp_ms: now_ms,
                delta_ms: None,
                instantaneous_fps: None,
            });
        };

        if now_ms < previous {
            self.discard(now_ms);
            return None;
        }

        let delta_ms = now_ms - previous;
        let instantaneous_fps = (delta_ms > 0.0).then(|| 1000.0 / delta_ms);
        self.last_timestamp = Some(now_ms);
        self.total_frames += 1;

        let sample = FrameSample {
            timestamp_ms: now_ms,
            delta_ms: Some(delta_ms),
            instantaneous_fps,
        };

        if std::mem::take(&mut self.paused) {
            log::debug!("Sampling resumed at {:.1} ms", now_ms);
            self.restart_window(now_ms);
            return Some(sample);
        }

        if delta_ms > self.max_frame_gap_ms {
            // Loop was paused; start over without publishing
            log::debug!("Frame gap of {:.1} ms treated as a pause", delta_ms);
            self.pauses += 1;
            self.restart_window(now_ms);
            return Some(sample);
        }

        self.frames_in_window += 1;

        if let (SmoothingStrategy::ExponentialMovingAverage { alpha }, Some(fps)) =
            (self.smoothing, instantaneous_fps)
        {
            self.ema_fps = Some(match self.ema_fps {
                Some(average) => average + alpha * (fps - average),
                None => fps,
            });
        }

        let elapsed_ms = now_ms - self.window_start;
        if elapsed_ms >= self.window_ms {
            self.publish(elapsed_ms);
            self.restart_window(now_ms);
        }

        Some(sample)
    }

    /// Stop measuring until the next recorded frame
    ///
    /// The frame that follows only re-anchors the window, so the time spent
    /// paused never reaches an estimate. The published window is kept.
    pub fn pause(&mut self) {
        if self.paused || self.last_timestamp.is_none() {
            return;
        }
        self.paused = true;
        self.pauses += 1;
        log::debug!("Sampling paused after {} frames", self.total_frames);
    }

    /// Whether the sampler is waiting for a frame to resume
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Latest published FPS estimate
    pub fn current_fps(&self) -> f64 {
        self.window.windowed_fps
    }

    /// Latest published window
    pub fn window(&self) -> &PerformanceWindow {
        &self.window
    }

    /// Frames accepted since creation, including pause-resume frames
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Frames rejected for bad timestamps
    pub fn discarded_frames(&self) -> u64 {
        self.discarded_frames
    }

    /// Number of pauses, explicit or detected from frame gaps
    pub fn pauses(&self) -> u64 {
        self.pauses
    }

    /// Smoothing strategy in use
    pub fn smoothing(&self) -> SmoothingStrategy {
        self.smoothing
    }

    fn publish(&mut self, elapsed_ms: f64) {
        let windowed_fps = match self.smoothing {
            SmoothingStrategy::TumblingWindow => {
                f64::from(self.frames_in_window) * 1000.0 / elapsed_ms
            }
            SmoothingStrategy::ExponentialMovingAverage { .. } => {
                self.ema_fps.unwrap_or(self.window.windowed_fps)
            }
        };

        self.window = PerformanceWindow {
            windowed_fps,
            sample_count: self.frames_in_window,
            window_duration_ms: elapsed_ms,
            generation: self.window.generation + 1,
        };

        log::trace!(
            "Window {} published: {:.1} fps over {} frames",
            self.window.generation,
            windowed_fps,
            self.frames_in_window
        );
    }

    fn restart_window(&mut self, now_ms: f64) {
        self.window_start = now_ms;
        self.frames_in_window = 0;
    }

    fn discard(&mut self, now_ms: f64) {
        self.discarded_frames += 1;
        log::debug!(
            "Discarding frame timestamp {} (previous {:?})",
            now_ms,
            self.last_timestamp
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tumbling() -> FrameSampler {
        FrameSampler::new(&SamplerConfig::default()).unwrap()
    }

    fn feed(sampler: &mut FrameSampler, start: f64, interval: f64, frames: usize) -> f64 {
        let mut now = start;
        for _ in 0..frames {
            sampler.record_frame(now);
            now += interval;
        }
        now - interval
    }

    #[test]
    fn test_first_frame_has_no_rate() {
        let mut sampler = tumbling();
        let sample = sampler.record_frame(100.0).unwrap();

        assert_eq!(sample.delta_ms, None);
        assert_eq!(sample.instantaneous_fps, None);
        assert_eq!(sampler.current_fps(), 0.0);
        assert_eq!(sampler.window().generation, 0);
    }

    #[test]
    fn test_instantaneous_fps() {
        let mut sampler = tumbling();
        sampler.record_frame(0.0);
        let sample = sampler.record_frame(20.0).unwrap();

        assert_relative_eq!(sample.delta_ms.unwrap(), 20.0);
        assert_relative_eq!(sample.instantaneous_fps.unwrap(), 50.0);
    }

    #[test]
    fn test_constant_interval_converges_within_one_window() {
        for interval in [10.0, 16.0, 25.0, 33.0, 50.0] {
            let mut sampler = tumbling();
            // One window plus one frame is enough to publish
            let frames = (1000.0 / interval) as usize + 2;
            feed(&mut sampler, 0.0, interval, frames);

            assert_eq!(sampler.window().generation, 1, "interval {interval}");
            assert_relative_eq!(sampler.current_fps(), 1000.0 / interval, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_window_reports_duration_and_count() {
        let mut sampler = tumbling();
        feed(&mut sampler, 0.0, 16.0, 64);

        let window = sampler.window();
        assert_eq!(window.sample_count, 63);
        assert_relative_eq!(window.window_duration_ms, 1008.0);
    }

    #[test]
    fn test_backwards_timestamp_is_discarded() {
        let mut sampler = tumbling();
        let last = feed(&mut sampler, 0.0, 20.0, 60);
        let before = *sampler.window();

        assert!(sampler.record_frame(last - 5.0).is_none());
        assert_eq!(*sampler.window(), before);
        assert_eq!(sampler.current_fps(), before.windowed_fps);
        assert_eq!(sampler.discarded_frames(), 1);

        // Accepted frames continue from the last good timestamp
        let sample = sampler.record_frame(last + 20.0).unwrap();
        assert_relative_eq!(sample.delta_ms.unwrap(), 20.0);
    }

    #[test]
    fn test_non_finite_timestamp_is_discarded() {
        let mut sampler = tumbling();
        feed(&mut sampler, 0.0, 20.0, 60);
        let before = sampler.current_fps();

        assert!(sampler.record_frame(f64::NAN).is_none());
        assert!(sampler.record_frame(f64::INFINITY).is_none());
        assert_eq!(sampler.current_fps(), before);
        assert_eq!(sampler.discarded_frames(), 2);
    }

    #[test]
    fn test_equal_timestamps_are_accepted() {
        let mut sampler = tumbling();
        sampler.record_frame(10.0);
        let sample = sampler.record_frame(10.0).unwrap();

        assert_eq!(sample.delta_ms, Some(0.0));
        assert_eq!(sample.instantaneous_fps, None);
    }

    #[test]
    fn test_long_gap_resumes_cleanly() {
        let mut sampler = tumbling();
        let last = feed(&mut sampler, 0.0, 16.0, 200);
        let before = sampler.current_fps();

        // Ten minutes without frames
        let resumed = last + 600_000.0;
        assert!(sampler.record_frame(resumed).is_some());
        assert_eq!(sampler.current_fps(), before);
        assert_eq!(sampler.pauses(), 1);

        let generation = sampler.window().generation;
        feed(&mut sampler, resumed + 16.0, 16.0, 64);
        assert_eq!(sampler.window().generation, generation + 1);
        assert_relative_eq!(sampler.current_fps(), 62.5, epsilon = 1e-9);
    }

    #[test]
    fn test_sub_one_fps_frames_still_publish() {
        let mut sampler = tumbling();
        feed(&mut sampler, 0.0, 1200.0, 5);

        assert_eq!(sampler.pauses(), 0);
        assert_eq!(sampler.window().generation, 4);
        assert_relative_eq!(sampler.current_fps(), 1000.0 / 1200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_explicit_pause_skips_idle_time() {
        let mut sampler = tumbling();
        let last = feed(&mut sampler, 0.0, 16.0, 64);
        let before = *sampler.window();

        sampler.pause();
        assert!(sampler.is_paused());

        // Five idle seconds, well under the gap threshold
        let resumed = last + 5000.0;
        sampler.record_frame(resumed);
        assert!(!sampler.is_paused());
        assert_eq!(*sampler.window(), before);
        assert_eq!(sampler.pauses(), 1);

        feed(&mut sampler, resumed + 16.0, 16.0, 64);
        assert_eq!(sampler.window().generation, before.generation + 1);
        assert_relative_eq!(sampler.current_fps(), 62.5, epsilon = 1e-9);
    }

    #[test]
    fn test_pause_before_first_frame_is_ignored() {
        let mut sampler = tumbling();
        sampler.pause();

        assert!(!sampler.is_paused());
        assert_eq!(sampler.pauses(), 0);
    }

    #[test]
    fn test_single_stall_barely_moves_window() {
        let mut sampler = tumbling();
        let mut now = feed(&mut sampler, 0.0, 16.0, 64);
        let generation = sampler.window().generation;

        // One 200 ms stall inside an otherwise steady window
        now += 200.0;
        sampler.record_frame(now);
        while sampler.window().generation == generation {
            now += 16.0;
            sampler.record_frame(now);
        }

        assert!(sampler.current_fps() > 50.0);
    }

    #[test]
    fn test_ema_smoothing() {
        let config = SamplerConfig::new()
            .with_smoothing(SmoothingStrategy::ExponentialMovingAverage { alpha: 0.1 });
        let mut sampler = FrameSampler::new(&config).unwrap();

        feed(&mut sampler, 0.0, 20.0, 52);
        assert_eq!(sampler.window().generation, 1);
        assert_relative_eq!(sampler.current_fps(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ema_damps_outlier() {
        let config = SamplerConfig::new()
            .with_smoothing(SmoothingStrategy::ExponentialMovingAverage { alpha: 0.1 });
        let mut sampler = FrameSampler::new(&config).unwrap();

        let mut now = feed(&mut sampler, 0.0, 16.0, 60);
        now += 200.0;
        sampler.record_frame(now);
        let generation = sampler.window().generation;
        while sampler.window().generation == generation {
            now += 16.0;
            sampler.record_frame(now);
        }

        assert!(sampler.current_fps() > 55.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SamplerConfig::new().with_window_ms(-1.0);
        assert!(FrameSampler::new(&config).is_err());
    }
}
