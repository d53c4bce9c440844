//! Orbit camera that follows the controlled body.
//!
//! `OrbitCameraController` stores the yaw/pitch angles that accumulate from
//! pointer movement and the smoothed eye position.  Each frame it picks a
//! profile from input recency:
//!
//! - **active** while pointer input is recent: full orbit radius, snappy
//!   smoothing;
//! - **passive** otherwise: shorter radius, slow drift behind the target.
//!
//! The eye never jumps; it closes a fixed fraction of the distance to the
//! ideal pose every frame.
//!
//! Pitch convention: positive pitch looks down, negative pitch looks up.
//!
//! The orbit is the default [`RigMode`].  Two more rigs share the same
//! angles and smoothing: a first-person eye at head height, and a slow timed
//! orbit for cinematic shots.

mod config;
mod zoom;

pub use config::OrbitConfig;
pub use zoom::DistanceTransition;

use glam::{Mat4, Vec3};
use serde::Deserialize;

use crate::error::ConfigError;

/// Input-recency profile of the orbit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMode {
    Active,
    Passive,
}

/// Where the eye sits relative to the tracked body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RigMode {
    /// Orbit behind the body, driven by yaw/pitch.
    #[default]
    ThirdPerson,
    /// Eye at `head_height` above the body, looking along yaw/pitch.
    FirstPerson,
    /// Timed orbit at a wider radius; ignores yaw/pitch.
    Cinematic,
}

/// Cinematic orbit radius and height relative to the regular ones.
const CINEMATIC_DISTANCE_RATIO: f32 = 1.5;
const CINEMATIC_HEIGHT_RATIO: f32 = 1.2;
/// Vertical bob of the cinematic orbit, world units.
const CINEMATIC_BOB: f32 = 2.0;

/// Everything the renderer needs to place and orient the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    /// Point the camera looks at: the tracked target, or a point ahead of
    /// the eye in first person.
    pub look_at: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub mode: CameraMode,
    pub rig: RigMode,
}

impl CameraPose {
    /// Right-handed view matrix looking from `position` to `look_at`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }
}

/// Profile parameters chosen for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Profile {
    distance:  f32,
    height:    f32,
    smoothing: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitCameraController {
    config: OrbitConfig,

    yaw:   f32,
    pitch: f32,

    position:        Vec3,
    target_position: Vec3,
    look_at:         Vec3,

    last_input_ms:    f64,
    has_recent_input: bool,
    mode:             CameraMode,
    rig:              RigMode,

    distance: DistanceTransition,
}

impl OrbitCameraController {
    /// Builds a rig behind the origin at yaw 0, in passive mode.
    pub fn new(config: OrbitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let start = Vec3::new(0.0, config.height, config.base_distance);
        Ok(Self {
            config,
            yaw: 0.0,
            pitch: 0.0,
            position: start,
            target_position: start,
            look_at: Vec3::ZERO,
            last_input_ms: 0.0,
            has_recent_input: false,
            mode: CameraMode::Passive,
            rig: config.rig,
            distance: DistanceTransition::new(
                config.base_distance,
                config.min_distance,
                config.max_distance,
                config.zoom_speed,
            ),
        })
    }

    /// Same as [`new`](Self::new) but starting from an explicit eye position.
    pub fn with_position(config: OrbitConfig, position: Vec3) -> Result<Self, ConfigError> {
        let mut cam = Self::new(config)?;
        cam.teleport(position);
        Ok(cam)
    }

    /// Applies one frame of pointer movement.
    ///
    /// Moving right (`dx > 0`) decreases yaw; moving down (`dy > 0`)
    /// decreases pitch.  Pitch is clamped to the configured range.
    /// Non-finite components count as zero.
    pub fn handle_pointer_delta(&mut self, dx: f32, dy: f32, now_ms: f64) {
        let dx = if dx.is_finite() { dx } else { 0.0 };
        let dy = if dy.is_finite() { dy } else { 0.0 };
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let sens = self.config.sensitivity;
        self.yaw -= dx * sens;
        self.pitch = (self.pitch - dy * sens).clamp(self.config.pitch_min, self.config.pitch_max);

        self.last_input_ms = now_ms;
        self.has_recent_input = true;
    }

    /// Moves the eye one smoothing step towards the ideal pose around
    /// `target`.
    ///
    /// `dt` only drives the zoom transition; the follow smoothing is a
    /// per-frame factor.
    pub fn update(&mut self, dt: f32, target: Vec3, now_ms: f64) {
        self.distance.advance(dt);

        let since_input = now_ms - self.last_input_ms;
        let mode = if self.has_recent_input && since_input < self.config.active_timeout_ms {
            CameraMode::Active
        } else {
            CameraMode::Passive
        };
        if since_input > self.config.reset_timeout_ms {
            self.has_recent_input = false;
        }
        if mode != self.mode {
            log::debug!("camera {:?} -> {:?} ({:.0} ms since input)", self.mode, mode, since_input);
            self.mode = mode;
        }

        let profile = self.profile(mode);
        let (ideal, smoothing) = match self.rig {
            RigMode::ThirdPerson => (self.ideal_position(target, profile), profile.smoothing),
            RigMode::FirstPerson => {
                (target + Vec3::Y * self.config.head_height, self.config.follow_speed)
            }
            RigMode::Cinematic => {
                (self.cinematic_position(target, now_ms), self.config.active_smoothing)
            }
        };
        self.target_position = ideal;
        self.position += (ideal - self.position) * smoothing;
        self.look_at = match self.rig {
            RigMode::FirstPerson => self.position + self.forward(),
            RigMode::ThirdPerson | RigMode::Cinematic => target,
        };
    }

    /// Unit view direction for the current angles; yaw 0, pitch 0 looks
    /// down -Z.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, -sin_pitch, -cos_yaw * cos_pitch)
    }

    fn cinematic_position(&self, target: Vec3, now_ms: f64) -> Vec3 {
        let t = (now_ms * 0.001) as f32;
        let radius = self.distance.current() * CINEMATIC_DISTANCE_RATIO;
        let height = self.config.height * CINEMATIC_HEIGHT_RATIO;
        Vec3::new(
            target.x + (t * 0.5).sin() * radius,
            target.y + height + (t * 0.3).sin() * CINEMATIC_BOB,
            target.z + (t * 0.5).cos() * radius,
        )
    }

    /// Switches the rig; the eye smooths over to the new pose.
    pub fn set_rig(&mut self, rig: RigMode) {
        if rig != self.rig {
            log::debug!("camera rig {:?} -> {:?}", self.rig, rig);
            self.rig = rig;
        }
    }

    pub fn rig(&self) -> RigMode {
        self.rig
    }

    fn profile(&self, mode: CameraMode) -> Profile {
        let base = self.distance.current();
        match mode {
            CameraMode::Active => Profile {
                distance:  base,
                height:    self.config.height,
                smoothing: self.config.active_smoothing,
            },
            CameraMode::Passive => Profile {
                distance:  base * self.config.passive_distance_ratio,
                height:    self.config.height * self.config.passive_height_ratio,
                smoothing: self.config.passive_smoothing,
            },
        }
    }

    fn ideal_position(&self, target: Vec3, profile: Profile) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let vertical = -self.pitch.sin() * profile.distance * self.config.pitch_visual_gain;
        Vec3::new(
            target.x + sin_yaw * profile.distance,
            target.y + profile.height + vertical,
            target.z + cos_yaw * profile.distance,
        )
    }

    /// Requests a new orbit radius; the change is eased over the next frames.
    pub fn set_distance(&mut self, distance: f32) {
        self.distance.set(distance);
    }

    /// Changes the orbit radius without easing.
    pub fn set_distance_instant(&mut self, distance: f32) {
        self.distance.set_instant(distance);
    }

    pub fn distance(&self) -> f32 {
        self.distance.current()
    }

    pub fn target_distance(&self) -> f32 {
        self.distance.target()
    }

    /// Changes pointer sensitivity; non-positive or NaN values are ignored.
    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        if sensitivity > 0.0 && sensitivity.is_finite() {
            self.config.sensitivity = sensitivity;
        }
    }

    /// Hard cut to `position`; the next update smooths from there.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.target_position = position;
    }

    /// Angles back to zero and recency cleared.  Position is left alone.
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.has_recent_input = false;
        self.last_input_ms = 0.0;
        self.mode = CameraMode::Passive;
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position,
            look_at:  self.look_at,
            yaw:      self.yaw,
            pitch:    self.pitch,
            mode:     self.mode,
            rig:      self.rig,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.pose().view_matrix()
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Ideal (unsmoothed) eye position computed by the last update.
    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Mode selected by the last update.
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn has_recent_input(&self) -> bool {
        self.has_recent_input
    }

    pub fn last_input_ms(&self) -> f64 {
        self.last_input_ms
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }
}
