use lanerun_core::glam::Vec3;
use lanerun_core::InputSnapshot;

use crate::context::FrameContext;
use crate::driver::FrameOutput;
use crate::runner::RunSummary;

/// The trait every lanerun application implements.
///
/// All methods have default implementations so you only override what you
/// need.  The loop calls them in this order every frame:
/// `sample_input` → (controllers) `place_body` → (camera) `present`.
///
/// ```rust,ignore
/// struct Replay { events: Vec<InputSnapshot> }
///
/// impl LaneRunApp for Replay {
///     fn sample_input(&mut self, ctx: &mut FrameContext) -> InputSnapshot {
///         match self.events.get(ctx.frame() as usize) {
///             Some(e) => *e,
///             None => { ctx.request_exit(); InputSnapshot::default() }
///         }
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait LaneRunApp {
    /// Called once before the first frame.
    fn setup(&mut self, ctx: &mut FrameContext) {}

    /// Produce this frame's input.  Called before any controller runs.
    fn sample_input(&mut self, ctx: &mut FrameContext) -> InputSnapshot {
        InputSnapshot::default()
    }

    /// Turn the lateral lane offset into the body's world position.
    ///
    /// This is where a scene would add forward scroll and ground height; the
    /// default leaves the body on the origin plane.
    fn place_body(&mut self, lane_offset: Vec3, ctx: &FrameContext) -> Vec3 {
        lane_offset
    }

    /// Receive the frame's result (body position and camera pose).
    fn present(&mut self, frame: &FrameOutput, ctx: &mut FrameContext) {}

    /// Called once after the loop ends.
    fn finish(&mut self, summary: &RunSummary) {}
}
