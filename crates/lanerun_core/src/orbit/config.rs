use super::RigMode;
use crate::error::{self, ConfigError};

/// Immutable parameters of an [`OrbitCameraController`](super::OrbitCameraController).
///
/// Angles are radians, timeouts milliseconds, distances world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    /// Orbit radius in active mode.  Default: `15.0`
    pub base_distance: f32,
    /// Height of the camera above the target before pitch is applied.
    ///
    /// Default: `4.0`
    pub height: f32,
    /// Per-frame smoothing while input is recent.  Default: `0.12`
    pub active_smoothing: f32,
    /// Per-frame smoothing while idle.  Default: `0.02`
    pub passive_smoothing: f32,
    /// Radians per unit of pointer movement.  Default: `0.002`
    pub sensitivity: f32,
    /// Lowest pitch (looking up).  Default: `-60°`
    pub pitch_min: f32,
    /// Highest pitch (looking down).  Default: `45°`
    pub pitch_max: f32,
    /// Input younger than this keeps the camera active.  Default: `2000`
    pub active_timeout_ms: f64,
    /// Input older than this clears the recent-input flag.  Default: `5000`
    pub reset_timeout_ms: f64,
    /// Passive orbit radius as a fraction of the active one.  Default: `0.8`
    pub passive_distance_ratio: f32,
    /// Passive height as a fraction of `height`.  Default: `1.0`
    pub passive_height_ratio: f32,
    /// Amplifies vertical travel caused by pitch.  Default: `1.2`
    pub pitch_visual_gain: f32,
    /// Zoom limits for [`set_distance`](super::OrbitCameraController::set_distance).
    ///
    /// Default: `5.0..=50.0`
    pub min_distance: f32,
    pub max_distance: f32,
    /// Base rate of the eased zoom transition.  Default: `0.4`
    pub zoom_speed: f32,
    /// Rig the controller starts in.  Default: `ThirdPerson`
    pub rig: RigMode,
    /// First-person eye height above the body.  Default: `1.7`
    pub head_height: f32,
    /// Per-frame smoothing of the first-person eye.  Default: `0.1`
    pub follow_speed: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            base_distance:          15.0,
            height:                 4.0,
            active_smoothing:       0.12,
            passive_smoothing:      0.02,
            sensitivity:            0.002,
            pitch_min:              -std::f32::consts::FRAC_PI_3,
            pitch_max:              std::f32::consts::FRAC_PI_4,
            active_timeout_ms:      2000.0,
            reset_timeout_ms:       5000.0,
            passive_distance_ratio: 0.8,
            passive_height_ratio:   1.0,
            pitch_visual_gain:      1.2,
            min_distance:           5.0,
            max_distance:           50.0,
            zoom_speed:             0.4,
            rig:                    RigMode::ThirdPerson,
            head_height:            1.7,
            follow_speed:           0.1,
        }
    }
}

impl OrbitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        error::finite("pitch_min", self.pitch_min)?;
        error::finite("pitch_max", self.pitch_max)?;
        if self.pitch_min > self.pitch_max {
            return Err(ConfigError::InvertedPitchBounds { min: self.pitch_min, max: self.pitch_max });
        }
        error::positive("min_distance", self.min_distance)?;
        error::positive("max_distance", self.max_distance)?;
        if self.min_distance > self.max_distance {
            return Err(ConfigError::InvertedZoomLimits {
                min: self.min_distance,
                max: self.max_distance,
            });
        }
        error::positive("base_distance", self.base_distance)?;
        error::finite("height", self.height)?;
        error::smoothing("active_smoothing", self.active_smoothing)?;
        error::smoothing("passive_smoothing", self.passive_smoothing)?;
        error::positive("sensitivity", self.sensitivity)?;
        // a zero window would leave the camera passive while input still turns it
        error::positive("active_timeout_ms", self.active_timeout_ms as f32)?;
        error::non_negative("reset_timeout_ms", self.reset_timeout_ms as f32)?;
        error::positive("passive_distance_ratio", self.passive_distance_ratio)?;
        error::non_negative("passive_height_ratio", self.passive_height_ratio)?;
        error::non_negative("pitch_visual_gain", self.pitch_visual_gain)?;
        error::positive("zoom_speed", self.zoom_speed)?;
        error::finite("head_height", self.head_height)?;
        error::smoothing("follow_speed", self.follow_speed)?;

        if self.reset_timeout_ms < self.active_timeout_ms {
            log::warn!(
                "reset_timeout_ms ({}) is shorter than active_timeout_ms ({}); \
                 the active window ends early",
                self.reset_timeout_ms,
                self.active_timeout_ms
            );
        }
        Ok(())
    }

    /// Builder-style helper taking pitch limits in degrees.
    pub fn with_pitch_limits_deg(mut self, min_deg: f32, max_deg: f32) -> Self {
        self.pitch_min = min_deg.to_radians();
        self.pitch_max = max_deg.to_radians();
        self
    }
}
