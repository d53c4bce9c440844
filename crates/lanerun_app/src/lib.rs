//! Headless frame loop for the lanerun controllers.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lanerun_app::{App, FrameContext, LaneRunApp};
//! use lanerun_core::InputSnapshot;
//!
//! struct DodgeLeft;
//!
//! impl LaneRunApp for DodgeLeft {
//!     fn sample_input(&mut self, ctx: &mut FrameContext) -> InputSnapshot {
//!         if ctx.frame() == 10 { InputSnapshot::left() } else { InputSnapshot::default() }
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let (_, summary) = App::new(DodgeLeft).with_max_frames(120).run()?;
//!     println!("{summary:?}");
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod driver;
pub mod logging;
mod runner;
pub mod traits;

pub use builder::{App, AppConfig, ClockMode};
pub use context::FrameContext;
pub use driver::{FrameDriver, FrameOutput};
pub use runner::RunSummary;
pub use traits::LaneRunApp;

// Users can do `use lanerun_app::{ControlConfig, InputSnapshot, Vec3};`
// without adding lanerun_core as a direct dependency.
pub use lanerun_core::glam::{Mat4, Vec3};
pub use lanerun_core::{
    CameraMode, CameraPose, ControlConfig, InputSnapshot, LanePhase, RigMode, StepPolicy, Time,
};
