//! Headless product viewer demo
//!
//! Runs a simulated render session against a synthetic GPU whose frame
//! cost follows the active render parameters. Scene load changes over
//! time (idle, heavy distortion, idle again) so the quality loop has
//! something to react to. Transitions and FPS readouts go to the log.
//!
//! Usage: `viewer_demo [config.toml|config.ron]`

use adaptive_quality::foundation::logging;
use adaptive_quality::prelude::*;
use rand::prelude::*;
use thiserror::Error;

/// Polling interval while an on-demand loop is idle
const IDLE_POLL_MS: f64 = 1000.0 / 60.0;

/// Length of the simulated session
const SESSION_MS: f64 = 60_000.0;

/// Probability that any given frame hitches
const STALL_CHANCE: f64 = 0.002;

#[derive(Error, Debug)]
enum DemoError {
    #[error("Quality loop error: {0}")]
    Quality(#[from] QualityError),

    #[error("Usage: viewer_demo [config.toml|config.ron]")]
    Usage,
}

/// Scene load over the session, as a multiplier on frame cost
#[derive(Debug, Clone, Copy, PartialEq)]
enum LoadPhase {
    Idle,
    HeavyDistortion,
    Recovery,
}

impl LoadPhase {
    fn at(now_ms: f64) -> Self {
        match now_ms {
            t if t < 15_000.0 => Self::Idle,
            t if t < 35_000.0 => Self::HeavyDistortion,
            _ => Self::Recovery,
        }
    }

    fn multiplier(self) -> f64 {
        match self {
            Self::Idle | Self::Recovery => 1.0,
            Self::HeavyDistortion => 2.3,
        }
    }
}

/// Synthetic GPU frame cost model
///
/// Every term is scaled by the scene load. The fixed scene cost keeps
/// adjacent levels within a factor of 1.5 of each other, so a level that
/// is too slow under load has a neighbour that lands in the dead zone.
struct SimulatedGpu {
    rng: StdRng,
    scene_ms: f64,
    fill_ms: f64,
}

impl SimulatedGpu {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            scene_ms: 5.0,
            fill_ms: 2.0,
        }
    }

    /// Milliseconds of GPU work for one frame with `params`
    fn frame_cost(&mut self, params: &RenderParameterSet, load: f64) -> f64 {
        let ratio = f64::from(params.pixel_ratio);
        let mut cost = self.scene_ms + self.fill_ms * ratio * ratio;

        if params.shadow_enabled {
            cost += f64::from(params.shadow_map_resolution) / 512.0;
        }
        cost += f64::from(params.mesh_tessellation_level) / 32.0;
        if params.antialias_enabled {
            cost += 1.0;
        }

        cost *= load * self.rng.gen_range(0.9..1.1);
        if self.rng.gen_bool(STALL_CHANCE) {
            cost += 200.0;
        }
        cost
    }
}

fn load_config() -> Result<AdaptiveQualityConfig, DemoError> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading quality config from {}", path);
            AdaptiveQualityConfig::load_validated(path)?
        }
        None => AdaptiveQualityConfig::default(),
    };

    if args.next().is_some() {
        return Err(DemoError::Usage);
    }
    Ok(config)
}

fn run_session(config: &AdaptiveQualityConfig) -> Result<(), DemoError> {
    let capability = DeviceCapability::with_pixel_ratio(2.0);
    let mut driver = RenderLoopDriver::new(config, capability)?;
    let mut gpu = SimulatedGpu::new(0x5EED);

    let mut now_ms = 0.0;
    let mut phase = LoadPhase::at(now_ms);
    let mut transitions = Vec::new();

    while now_ms < SESSION_MS {
        let current = LoadPhase::at(now_ms);
        if current != phase {
            log::info!("Scene load: {:?} -> {:?}", phase, current);
            phase = current;
            driver.invalidate();
        }

        if !driver.needs_frame() {
            now_ms += IDLE_POLL_MS;
            continue;
        }

        let outcome = driver.frame(now_ms);
        if outcome.evaluated {
            let window = driver.sampler().window();
            log::info!(
                "{:>6.1}s  {:>5.1} fps  ({} frames / {:.0} ms)  quality {}",
                now_ms / 1000.0,
                window.windowed_fps,
                window.sample_count,
                window.window_duration_ms,
                driver.level()
            );
        }
        if let Some(transition) = outcome.transition {
            transitions.push((now_ms, transition));
        }

        // Uncapped loop: the next frame starts when the GPU finishes
        now_ms += gpu.frame_cost(driver.parameters(), phase.multiplier());
    }

    let stats = driver.controller().stats();
    log::info!(
        "Session complete: {} upgrades, {} downgrades, {} ticks, {} pauses, final quality {}",
        stats.upgrades,
        stats.downgrades,
        stats.ticks_evaluated,
        driver.sampler().pauses(),
        driver.level()
    );
    for (at_ms, transition) in transitions {
        log::info!(
            "  {:>6.1}s  {} -> {} at {:.1} fps",
            at_ms / 1000.0,
            transition.from,
            transition.to,
            transition.fps
        );
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    log::info!("Starting headless viewer demo");

    let config = load_config()?;
    let result = run_session(&config);

    match result {
        Ok(()) => {
            log::info!("Viewer demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Viewer demo failed: {}", e);
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped(name: &str) -> std::path::PathBuf {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("config").join(name)
    }

    #[test]
    fn test_shipped_toml_matches_defaults() {
        let config = AdaptiveQualityConfig::load_validated(shipped("quality.toml")).unwrap();
        assert_eq!(config, AdaptiveQualityConfig::default());
    }

    #[test]
    fn test_shipped_ron_is_valid() {
        let config = AdaptiveQualityConfig::load_validated(shipped("quality_ema.ron")).unwrap();
        assert_eq!(config.controller.debounce_ticks, 4);
        assert_eq!(config.parameters, RenderParameterTable::default());
    }

    #[test]
    fn test_heavy_load_is_slower() {
        let mut gpu = SimulatedGpu::new(1);
        let params = RenderParameterTable::default().parameters_for(QualityLevel::High);

        let idle: f64 = (0..100).map(|_| gpu.frame_cost(&params, 1.0)).sum();
        let heavy: f64 = (0..100).map(|_| gpu.frame_cost(&params, 2.3)).sum();
        assert!(heavy > idle);
    }

    #[test]
    fn test_session_runs_with_both_schedules() {
        for scheduling in [SchedulingMode::Continuous, SchedulingMode::OnDemand] {
            let config = AdaptiveQualityConfig::default().with_scheduling(scheduling);
            assert!(run_session(&config).is_ok());
        }
    }
}
