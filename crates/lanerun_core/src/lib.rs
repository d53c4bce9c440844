//! lanerun_core: per-frame control of a lane runner body and its camera.
//!
//! Two controllers run once per frame, in this order:
//!
//! 1. [`LocomotionController`] turns left/right intent into lane steps and
//!    slides the body between lanes;
//! 2. [`OrbitCameraController`] orbits the body from pointer input and
//!    smooths the eye position, switching between an active and a passive
//!    profile by input recency.
//!
//! Both are plain synchronous state machines: no I/O, no clocks of their
//! own, no failure after construction.

pub mod config;
pub mod error;
pub mod input;
pub mod lane;
pub mod orbit;
pub mod time;

pub use config::ControlConfig;
pub use error::ConfigError;
pub use input::{InputSnapshot, LaneAction};
#[cfg(feature = "input")]
pub use input::{InputState, KeyBindings, KeyCode};
pub use lane::{LaneConfig, LanePhase, LaneState, LocomotionController, StepGate, StepPolicy};
pub use orbit::{CameraMode, CameraPose, OrbitCameraController, OrbitConfig, RigMode};
pub use time::{FixedClock, Time, TimeClock};

// re-export glam so downstream crates use the same math types
pub use glam;
