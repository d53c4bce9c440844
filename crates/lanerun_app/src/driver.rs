//! One frame of control, in the only order that is correct.
//!
//! ```text
//! input ─► step gate ─► LocomotionController::handle_input
//!                       LocomotionController::update(dt)
//!                       lateral offset ─► place_body ─► body position
//!       ─► OrbitCameraController::handle_pointer_delta
//!          OrbitCameraController::update(dt, body position, now)
//!                       ─► CameraPose
//! ```

use lanerun_core::glam::Vec3;
use lanerun_core::{
    CameraPose, ConfigError, ControlConfig, InputSnapshot, LanePhase, LocomotionController,
    OrbitCameraController, StepGate, Time,
};

/// What a frame produced, handed to the presentation callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub frame: u64,
    /// Lateral offset from the locomotion controller.
    pub lane_offset: Vec3,
    /// Body position after the scene placed it; the camera tracked this.
    pub body_position: Vec3,
    pub lane_phase: LanePhase,
    /// `true` if this frame accepted a lane step.
    pub lane_stepped: bool,
    pub camera: CameraPose,
}

#[derive(Debug, Clone)]
pub struct FrameDriver {
    locomotion: LocomotionController,
    gate:       StepGate,
    camera:     OrbitCameraController,
}

impl FrameDriver {
    pub fn new(config: &ControlConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            locomotion: LocomotionController::new(config.lane)?,
            gate:       StepGate::new(config.step_policy),
            camera:     OrbitCameraController::new(config.orbit)?,
        })
    }

    /// Runs one frame.  `place_body` maps the lateral lane offset to the
    /// body's world position (the scene owns forward motion and height).
    pub fn step<F>(&mut self, input: &InputSnapshot, time: &Time, place_body: F) -> FrameOutput
    where
        F: FnOnce(Vec3) -> Vec3,
    {
        let now_ms = time.now_ms();

        let lane_stepped =
            self.gate
                .apply(&mut self.locomotion, input.move_left, input.move_right, now_ms);
        self.locomotion.update(time.delta);

        let lane_offset = self.locomotion.world_offset();
        let body_position = place_body(lane_offset);

        self.camera.handle_pointer_delta(input.pointer_dx, input.pointer_dy, now_ms);
        self.camera.update(time.delta, body_position, now_ms);

        FrameOutput {
            frame: time.frame_count,
            lane_offset,
            body_position,
            lane_phase: self.locomotion.phase(),
            lane_stepped,
            camera: self.camera.pose(),
        }
    }

    /// Back to the spawn state: start lane, zero angles.  The eye position is
    /// kept so the next frames smooth back instead of cutting.
    pub fn reset(&mut self) {
        self.locomotion.reset();
        self.gate.reset();
        self.camera.reset();
    }

    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    pub fn camera(&self) -> &OrbitCameraController {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCameraController {
        &mut self.camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanerun_core::{CameraMode, FixedClock};

    #[test]
    fn camera_tracks_the_body_of_the_same_frame() {
        let mut driver = FrameDriver::new(&ControlConfig::default()).unwrap();
        let mut clock = FixedClock::new(0.016);

        let out = driver.step(&InputSnapshot::left(), &clock.tick(), |offset| {
            offset + Vec3::new(0.0, 1.0, -100.0)
        });
        assert!(out.lane_stepped);
        assert!(out.lane_offset.x < 0.0);
        assert_eq!(out.body_position, out.lane_offset + Vec3::new(0.0, 1.0, -100.0));
        assert_eq!(out.camera.look_at, out.body_position);
        assert_eq!(driver.camera().target_position().x, out.body_position.x);
    }

    #[test]
    fn pointer_input_activates_camera_same_frame() {
        let mut driver = FrameDriver::new(&ControlConfig::default()).unwrap();
        let mut clock = FixedClock::new(0.016);
        let out = driver.step(&InputSnapshot::look(5.0, -5.0), &clock.tick(), |o| o);
        assert_eq!(out.camera.mode, CameraMode::Active);
        assert!(out.camera.yaw < 0.0);
        assert!(out.camera.pitch > 0.0);
    }

    #[test]
    fn reset_returns_to_spawn() {
        let mut driver = FrameDriver::new(&ControlConfig::default()).unwrap();
        let mut clock = FixedClock::new(0.016);
        driver.step(&InputSnapshot::right(), &clock.tick(), |o| o);
        driver.reset();
        assert_eq!(driver.locomotion().desired_lane(), 0);
        assert_eq!(driver.locomotion().current_lane(), 0.0);
        assert!(!driver.camera().has_recent_input());
    }
}
