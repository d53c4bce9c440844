//! `lanerun_sim`: run the lane and camera controllers headless from a
//! scripted input timeline.
//!
//! ```text
//! lanerun_sim --frames 300 --script "10:left 60:look=40,10 120:right"
//! ```

mod script;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lanerun_app::{logging, App, FrameContext, FrameOutput, LaneRunApp, RunSummary};
use lanerun_core::{config, InputSnapshot};

use crate::script::Script;

/// Replays a lane runner input script and reports body and camera poses.
#[derive(Parser, Debug)]
#[command(name = "lanerun_sim", version, about)]
struct Args {
    /// Control tuning file (TOML); defaults are used if it does not exist.
    #[arg(long, default_value = "lanerun.toml")]
    config: PathBuf,

    /// Number of frames to run. Defaults to the last scripted frame + 60.
    #[arg(long)]
    frames: Option<u64>,

    /// Fixed time step in seconds.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Follow the wall clock at this frame rate instead of a fixed step.
    #[arg(long)]
    realtime: Option<f32>,

    /// Input events, e.g. "10:left 40:right 60:look=12,-4 90:zoom=25 120:rig=first_person".
    #[arg(long, default_value = "")]
    script: String,

    /// Read the script from a file instead.
    #[arg(long, conflicts_with = "script")]
    script_file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). Overrides LANERUN_LOG.
    #[arg(long)]
    log_level: Option<String>,
}

struct ScriptedApp {
    script: Script,
}

impl LaneRunApp for ScriptedApp {
    fn setup(&mut self, _ctx: &mut FrameContext) {
        if self.script.is_empty() {
            log::warn!("empty script, the body will stay on its start lane");
        } else {
            log::info!("script: {} frames with events", self.script.len());
        }
    }

    fn sample_input(&mut self, ctx: &mut FrameContext) -> InputSnapshot {
        let events = self.script.at(ctx.frame());
        // zoom, rig and reset apply before the next frame's step
        if let Some(d) = events.zoom {
            ctx.set_camera_distance(d);
        }
        if let Some(rig) = events.rig {
            ctx.set_camera_rig(rig);
        }
        if events.reset {
            ctx.request_reset();
        }
        events.input
    }

    fn present(&mut self, frame: &FrameOutput, _ctx: &mut FrameContext) {
        if frame.lane_stepped {
            log::info!(
                "frame {}: lane step, {:?}, body x {:.2}",
                frame.frame,
                frame.lane_phase,
                frame.body_position.x
            );
        }
        log::debug!(
            "frame {}: body {:?} eye {:?} yaw {:.3} pitch {:.3} {:?}",
            frame.frame,
            frame.body_position,
            frame.camera.position,
            frame.camera.yaw,
            frame.camera.pitch,
            frame.camera.mode
        );
    }

    fn finish(&mut self, summary: &RunSummary) {
        let Some(last) = &summary.last_frame else {
            log::info!("no frames ran");
            return;
        };
        log::info!(
            "final: body {:?} ({:?}), eye {:?} looking at {:?}, camera {:?}",
            last.body_position,
            last.lane_phase,
            last.camera.position,
            last.camera.look_at,
            last.camera.mode
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match &args.log_level {
        Some(text) => logging::parse_level(text)?,
        None => logging::level_from_env(),
    };
    logging::init(level)?;

    let script_text = match &args.script_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?,
        None => args.script.clone(),
    };
    let script = Script::parse(&script_text)?;
    let controls = config::load(&args.config)?;

    let frames = args
        .frames
        .unwrap_or_else(|| script.last_frame().map_or(0, |f| f + 1) + 60);

    let app = App::new(ScriptedApp { script })
        .with_controls(controls)
        .with_max_frames(frames);
    let app = match args.realtime {
        Some(fps) => app.with_realtime(fps),
        None => app.with_fixed_step(args.dt),
    };

    let (_, summary) = app.run()?;
    log::info!(
        "{} frames, {} lane steps, {} camera mode switches",
        summary.frames,
        summary.lane_steps,
        summary.camera_mode_switches
    );
    Ok(())
}
