use lanerun_core::{RigMode, Time};

/// Per-frame context passed to every [`LaneRunApp`](crate::LaneRunApp) callback.
///
/// Besides timing it carries the few requests an app can make of the loop;
/// they are applied before the next frame's controller step.
///
/// ```rust,ignore
/// fn sample_input(&mut self, ctx: &mut FrameContext) -> InputSnapshot {
///     if ctx.time.frame_count == 600 {
///         ctx.request_exit();
///     }
///     InputSnapshot::default()
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameContext {
    /// Frame timing: delta, elapsed, FPS.
    pub time: Time,

    pub(crate) exit_requested:  bool,
    pub(crate) reset_requested: bool,
    pub(crate) zoom_request:    Option<ZoomRequest>,
    pub(crate) rig_request:     Option<RigMode>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ZoomRequest {
    Eased(f32),
    Instant(f32),
}

impl FrameContext {
    pub(crate) fn new(time: Time) -> Self {
        Self { time, ..Default::default() }
    }

    /// Stop the loop after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Put body and camera back to their spawn state before the next step.
    pub fn request_reset(&mut self) {
        self.reset_requested = true;
    }

    /// Ease the camera orbit radius towards `distance`.
    pub fn set_camera_distance(&mut self, distance: f32) {
        self.zoom_request = Some(ZoomRequest::Eased(distance));
    }

    /// Cut the camera orbit radius to `distance`.
    pub fn set_camera_distance_instant(&mut self, distance: f32) {
        self.zoom_request = Some(ZoomRequest::Instant(distance));
    }

    /// Switch the camera rig; the eye smooths over to the new pose.
    pub fn set_camera_rig(&mut self, rig: RigMode) {
        self.rig_request = Some(rig);
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.time.frame_count
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.time.now_ms()
    }
}
