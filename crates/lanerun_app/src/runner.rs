use anyhow::Context as _;
use lanerun_core::{CameraMode, FixedClock, Time, TimeClock};

use crate::builder::{AppConfig, ClockMode};
use crate::context::{FrameContext, ZoomRequest};
use crate::driver::{FrameDriver, FrameOutput};
use crate::traits::LaneRunApp;

/// What a finished run looked like.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub lane_steps: u64,
    pub camera_mode_switches: u64,
    /// Output of the last frame, if any frame ran.
    pub last_frame: Option<FrameOutput>,
}

enum Clock {
    Fixed(FixedClock),
    Realtime { clock: TimeClock, frame_budget: std::time::Duration },
}

impl Clock {
    fn new(mode: ClockMode) -> Self {
        match mode {
            ClockMode::Fixed { step } => Clock::Fixed(FixedClock::new(step)),
            ClockMode::Realtime { target_fps } => {
                let fps = if target_fps.is_finite() && target_fps > 0.0 { target_fps } else { 60.0 };
                Clock::Realtime {
                    clock: TimeClock::new(),
                    frame_budget: std::time::Duration::from_secs_f32(1.0 / fps),
                }
            }
        }
    }

    fn tick(&mut self) -> Time {
        match self {
            Clock::Fixed(clock) => clock.tick(),
            Clock::Realtime { clock, .. } => clock.tick(),
        }
    }

    fn peek(&self) -> Time {
        match self {
            Clock::Fixed(_) => Time::default(),
            Clock::Realtime { clock, .. } => clock.peek(),
        }
    }

    /// Sleep off whatever is left of the frame budget.
    fn pace(&self, frame_start: std::time::Instant) {
        if let Clock::Realtime { frame_budget, .. } = self {
            if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}

pub(crate) fn run_internal<A: LaneRunApp>(
    config: AppConfig,
    mut app: A,
) -> anyhow::Result<(A, RunSummary)> {
    let mut driver = FrameDriver::new(&config.controls).context("invalid control config")?;
    let mut clock = Clock::new(config.clock);
    let mut summary = RunSummary::default();

    log::info!(
        "starting loop: lanes [{}, {}], step policy {:?}, clock {:?}, max frames {:?}",
        config.controls.lane.min_lane,
        config.controls.lane.max_lane,
        config.controls.step_policy,
        config.clock,
        config.max_frames,
    );

    let mut ctx = FrameContext::new(clock.peek());
    app.setup(&mut ctx);
    let mut pending = ctx;
    let mut last_mode = CameraMode::Passive;

    loop {
        if pending.exit_requested {
            break;
        }
        if config.max_frames.is_some_and(|max| summary.frames >= max) {
            break;
        }

        // requests made during the previous frame
        if pending.reset_requested {
            log::debug!("reset requested");
            driver.reset();
        }
        match pending.zoom_request {
            Some(ZoomRequest::Eased(d)) => driver.camera_mut().set_distance(d),
            Some(ZoomRequest::Instant(d)) => driver.camera_mut().set_distance_instant(d),
            None => {}
        }
        if let Some(rig) = pending.rig_request {
            driver.camera_mut().set_rig(rig);
        }

        let frame_start = std::time::Instant::now();
        let mut ctx = FrameContext::new(clock.tick());

        let input = app.sample_input(&mut ctx);
        let out = driver.step(&input, &ctx.time, |offset| app.place_body(offset, &ctx));
        app.present(&out, &mut ctx);

        summary.frames += 1;
        if out.lane_stepped {
            summary.lane_steps += 1;
        }
        if out.camera.mode != last_mode {
            summary.camera_mode_switches += 1;
            last_mode = out.camera.mode;
        }
        log::trace!(
            "frame {}: lane {:.3} body {:?} eye {:?} {:?}",
            out.frame,
            driver.locomotion().current_lane(),
            out.body_position,
            out.camera.position,
            out.camera.mode
        );
        summary.last_frame = Some(out);

        clock.pace(frame_start);
        pending = ctx;
    }

    log::info!(
        "loop finished after {} frames ({} lane steps, {} camera mode switches)",
        summary.frames,
        summary.lane_steps,
        summary.camera_mode_switches
    );
    app.finish(&summary);
    Ok((app, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::App;
    use lanerun_core::InputSnapshot;

    #[derive(Default)]
    struct Counter {
        presented: u64,
        finished: bool,
    }

    impl LaneRunApp for Counter {
        fn present(&mut self, _frame: &FrameOutput, _ctx: &mut FrameContext) {
            self.presented += 1;
        }

        fn finish(&mut self, _summary: &RunSummary) {
            self.finished = true;
        }
    }

    #[test]
    fn stops_at_max_frames() {
        let (app, summary) = App::new(Counter::default()).with_max_frames(12).run().unwrap();
        assert_eq!(summary.frames, 12);
        assert_eq!(app.presented, 12);
        assert!(app.finished);
        assert_eq!(summary.last_frame.unwrap().frame, 11);
    }

    struct QuitAfterStep;

    impl LaneRunApp for QuitAfterStep {
        fn sample_input(&mut self, ctx: &mut FrameContext) -> InputSnapshot {
            if ctx.frame() == 0 {
                InputSnapshot::right()
            } else {
                ctx.request_exit();
                InputSnapshot::default()
            }
        }
    }

    #[test]
    fn exit_request_ends_after_the_frame() {
        let (_, summary) = App::new(QuitAfterStep).run().unwrap();
        assert_eq!(summary.frames, 2);
        assert_eq!(summary.lane_steps, 1);
    }

    struct Zoomer;

    impl LaneRunApp for Zoomer {
        fn setup(&mut self, ctx: &mut FrameContext) {
            ctx.set_camera_distance_instant(30.0);
        }
    }

    struct FirstPerson;

    impl LaneRunApp for FirstPerson {
        fn sample_input(&mut self, ctx: &mut FrameContext) -> InputSnapshot {
            if ctx.frame() == 0 {
                ctx.set_camera_rig(lanerun_core::RigMode::FirstPerson);
            }
            InputSnapshot::default()
        }
    }

    #[test]
    fn rig_request_applies_from_the_next_frame() {
        let (_, summary) = App::new(FirstPerson).with_max_frames(2).run().unwrap();
        let out = summary.last_frame.unwrap();
        assert_eq!(out.camera.rig, lanerun_core::RigMode::FirstPerson);
    }

    #[test]
    fn setup_requests_apply_before_first_frame() {
        let (_, summary) = App::new(Zoomer).with_max_frames(1).run().unwrap();
        let out = summary.last_frame.unwrap();
        // passive radius 30 * 0.8 reached by 2 % from the spawn eye at z = 15
        assert!(out.camera.position.z > 15.0);
    }
}
