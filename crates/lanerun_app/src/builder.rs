use lanerun_core::ControlConfig;

use crate::runner::RunSummary;
use crate::traits::LaneRunApp;

/// How the loop gets its time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// Advance by `step` seconds per frame, as fast as possible.
    Fixed { step: f32 },
    /// Follow the wall clock and pace frames at `target_fps`.
    Realtime { target_fps: f32 },
}

impl Default for ClockMode {
    fn default() -> Self {
        ClockMode::Fixed { step: 1.0 / 60.0 }
    }
}

/// Initial loop configuration.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub controls: ControlConfig,
    pub clock: ClockMode,
    /// Stop after this many frames; `None` runs until the app asks to exit.
    pub max_frames: Option<u64>,
}

/// Entry point.  Uses the builder pattern to configure the loop.
pub struct App<A: LaneRunApp> {
    config: AppConfig,
    app_state: A,
}

impl<A: LaneRunApp> App<A> {
    pub fn new(app_state: A) -> Self {
        Self {
            config: AppConfig::default(),
            app_state,
        }
    }

    pub fn with_controls(mut self, controls: ControlConfig) -> Self {
        self.config.controls = controls;
        self
    }

    pub fn with_fixed_step(mut self, step: f32) -> Self {
        self.config.clock = ClockMode::Fixed { step };
        self
    }

    pub fn with_realtime(mut self, target_fps: f32) -> Self {
        self.config.clock = ClockMode::Realtime { target_fps };
        self
    }

    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.config.max_frames = Some(frames);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the loop to completion and hands back the app with the summary.
    pub fn run(self) -> anyhow::Result<(A, RunSummary)> {
        crate::runner::run_internal(self.config, self.app_state)
    }
}
