//! Control tuning loaded from a TOML file.
//!
//! Every field is optional; anything missing keeps the defaults of
//! [`LaneConfig`] and [`OrbitConfig`].  A few environment variables override
//! the file for quick tuning sessions:
//!
//! | variable | field |
//! |---|---|
//! | `LANERUN_LANE_SPEED` | `lane.change_speed` |
//! | `LANERUN_MOUSE_SENS` | `camera.sensitivity` |
//! | `LANERUN_PITCH_MIN_DEG` | `camera.pitch_min_deg` |
//! | `LANERUN_PITCH_MAX_DEG` | `camera.pitch_max_deg` |
//! | `LANERUN_STEP_POLICY` | `lane.step_policy` |

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::lane::{LaneConfig, StepPolicy, DEFAULT_DEBOUNCE_MS};
use crate::orbit::{OrbitConfig, RigMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPolicyKind {
    EveryFrame,
    Debounced,
}

impl std::str::FromStr for StepPolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "every_frame" | "every-frame" => Ok(Self::EveryFrame),
            "debounced" => Ok(Self::Debounced),
            other => anyhow::bail!("unknown step policy `{other}`"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaneSection {
    pub min: Option<i32>,
    pub max: Option<i32>,
    pub start: Option<i32>,
    pub width: Option<f32>,
    pub change_speed: Option<f32>,
    pub snap_epsilon: Option<f32>,
    pub step_policy: Option<StepPolicyKind>,
    pub debounce_ms: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSection {
    pub distance: Option<f32>,
    pub height: Option<f32>,
    pub active_smoothing: Option<f32>,
    pub passive_smoothing: Option<f32>,
    pub sensitivity: Option<f32>,
    pub pitch_min_deg: Option<f32>,
    pub pitch_max_deg: Option<f32>,
    pub active_timeout_ms: Option<f64>,
    pub reset_timeout_ms: Option<f64>,
    pub passive_distance_ratio: Option<f32>,
    pub passive_height_ratio: Option<f32>,
    pub pitch_visual_gain: Option<f32>,
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub zoom_speed: Option<f32>,
    pub rig: Option<RigMode>,
    pub head_height: Option<f32>,
    pub follow_speed: Option<f32>,
}

/// On-disk shape of the control file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControlFile {
    #[serde(default)]
    pub lane: LaneSection,
    #[serde(default)]
    pub camera: CameraSection,
}

/// Validated configuration for one controlled body and its camera rig.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlConfig {
    pub lane: LaneConfig,
    pub orbit: OrbitConfig,
    pub step_policy: StepPolicy,
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lane.validate()?;
        self.orbit.validate()
    }
}

impl ControlFile {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse control TOML")
    }

    /// Fill in defaults and validate.
    pub fn into_config(self) -> Result<ControlConfig, ConfigError> {
        let l = self.lane;
        let d = LaneConfig::default();
        let lane = LaneConfig {
            min_lane:          l.min.unwrap_or(d.min_lane),
            max_lane:          l.max.unwrap_or(d.max_lane),
            start_lane:        l.start.unwrap_or(d.start_lane),
            lane_width:        l.width.unwrap_or(d.lane_width),
            lane_change_speed: l.change_speed.unwrap_or(d.lane_change_speed),
            snap_epsilon:      l.snap_epsilon.unwrap_or(d.snap_epsilon),
        };
        let step_policy = match l.step_policy.unwrap_or(StepPolicyKind::EveryFrame) {
            StepPolicyKind::EveryFrame => StepPolicy::EveryFrame,
            StepPolicyKind::Debounced => StepPolicy::Debounced {
                interval_ms: l.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS).max(0.0),
            },
        };

        let c = self.camera;
        let d = OrbitConfig::default();
        let orbit = OrbitConfig {
            base_distance:          c.distance.unwrap_or(d.base_distance),
            height:                 c.height.unwrap_or(d.height),
            active_smoothing:       c.active_smoothing.unwrap_or(d.active_smoothing),
            passive_smoothing:      c.passive_smoothing.unwrap_or(d.passive_smoothing),
            sensitivity:            c.sensitivity.unwrap_or(d.sensitivity),
            pitch_min:              c.pitch_min_deg.map_or(d.pitch_min, f32::to_radians),
            pitch_max:              c.pitch_max_deg.map_or(d.pitch_max, f32::to_radians),
            active_timeout_ms:      c.active_timeout_ms.unwrap_or(d.active_timeout_ms),
            reset_timeout_ms:       c.reset_timeout_ms.unwrap_or(d.reset_timeout_ms),
            passive_distance_ratio: c.passive_distance_ratio.unwrap_or(d.passive_distance_ratio),
            passive_height_ratio:   c.passive_height_ratio.unwrap_or(d.passive_height_ratio),
            pitch_visual_gain:      c.pitch_visual_gain.unwrap_or(d.pitch_visual_gain),
            min_distance:           c.min_distance.unwrap_or(d.min_distance),
            max_distance:           c.max_distance.unwrap_or(d.max_distance),
            zoom_speed:             c.zoom_speed.unwrap_or(d.zoom_speed),
            rig:                    c.rig.unwrap_or(d.rig),
            head_height:            c.head_height.unwrap_or(d.head_height),
            follow_speed:           c.follow_speed.unwrap_or(d.follow_speed),
        };

        let config = ControlConfig { lane, orbit, step_policy };
        config.validate()?;
        Ok(config)
    }

    /// Apply `LANERUN_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup; split out so tests don't have to
    /// mutate the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T>(key: &str, raw: &str) -> Result<T>
        where
            T: std::str::FromStr,
            T::Err: std::fmt::Display,
        {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("{key}={raw:?}: {e}"))
        }

        if let Some(v) = lookup("LANERUN_LANE_SPEED") {
            self.lane.change_speed = Some(parse("LANERUN_LANE_SPEED", &v)?);
        }
        if let Some(v) = lookup("LANERUN_MOUSE_SENS") {
            self.camera.sensitivity = Some(parse("LANERUN_MOUSE_SENS", &v)?);
        }
        if let Some(v) = lookup("LANERUN_PITCH_MIN_DEG") {
            self.camera.pitch_min_deg = Some(parse("LANERUN_PITCH_MIN_DEG", &v)?);
        }
        if let Some(v) = lookup("LANERUN_PITCH_MAX_DEG") {
            self.camera.pitch_max_deg = Some(parse("LANERUN_PITCH_MAX_DEG", &v)?);
        }
        if let Some(v) = lookup("LANERUN_STEP_POLICY") {
            self.lane.step_policy = Some(v.parse()?);
        }
        Ok(())
    }
}

/// Read `path` if it exists (defaults otherwise), apply environment
/// overrides, validate.
pub fn load(path: &Path) -> Result<ControlConfig> {
    let mut file = if path.is_file() {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        ControlFile::from_toml_str(&text)
            .with_context(|| format!("load {}", path.display()))?
    } else {
        log::info!("{} not found, using default controls", path.display());
        ControlFile::default()
    };
    file.apply_env_overrides()?;
    file.into_config()
        .with_context(|| format!("invalid control config in {}", path.display()))
}
