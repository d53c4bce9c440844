//! Lane-based lateral locomotion.
//!
//! The body occupies a discrete lane but moves between lanes continuously:
//! `handle_input` picks the lane to go to, `update` slides the body there at
//! a bounded speed and snaps it onto the lane centre on arrival.

mod config;
mod gate;

pub use config::LaneConfig;
pub use gate::{StepGate, StepPolicy, DEFAULT_DEBOUNCE_MS};

use glam::Vec3;

use crate::error::ConfigError;

/// Where the body is relative to its target lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanePhase {
    /// Resting on the target lane.
    Idle,
    TransitioningLeft,
    TransitioningRight,
}

/// Lane bookkeeping of one controlled body.
///
/// `target_lane` always equals `desired_lane`; both stay inside the
/// configured bounds.  `current_lane` is the interpolated position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneState {
    pub current_lane: f32,
    pub target_lane:  i32,
    pub desired_lane: i32,
}

impl LaneState {
    fn at(lane: i32) -> Self {
        Self {
            current_lane: lane as f32,
            target_lane:  lane,
            desired_lane: lane,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LaneConfig,
    state:  LaneState,
}

impl LocomotionController {
    /// Builds a controller resting on `config.start_lane`.
    ///
    /// Fails if the configuration is inconsistent; nothing after
    /// construction can fail.
    pub fn new(config: LaneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: LaneState::at(config.start_lane),
        })
    }

    /// Applies one frame of directional intent.
    ///
    /// At most one lane step is taken per call, left winning over right.
    /// Requests past the outermost lane are ignored.
    pub fn handle_input(&mut self, move_left: bool, move_right: bool) {
        let LaneConfig { min_lane, max_lane, .. } = self.config;
        let before = self.state.desired_lane;

        if move_left && before > min_lane {
            self.state.desired_lane = (before - 1).max(min_lane);
        } else if move_right && before < max_lane {
            self.state.desired_lane = (before + 1).min(max_lane);
        }
        self.state.target_lane = self.state.desired_lane;

        if self.state.desired_lane != before {
            log::debug!(
                "lane step {} -> {} (current {:.3})",
                before,
                self.state.desired_lane,
                self.state.current_lane
            );
        }
    }

    /// Advances the body towards its target lane.
    ///
    /// `dt` is in seconds; negative or NaN values are treated as zero.
    pub fn update(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let target = self.state.target_lane as f32;
        let current = self.state.current_lane;
        let eps = self.config.snap_epsilon;

        // inside the band: land exactly (a no-op once converged)
        if (current - target).abs() <= eps {
            self.state.current_lane = target;
            return;
        }

        let direction = if target > current { 1.0 } else { -1.0 };
        let next = current + direction * self.config.lane_change_speed * dt;

        // snap once the step reaches (or passes) the epsilon band
        let arrived = if direction > 0.0 {
            next >= target - eps
        } else {
            next <= target + eps
        };
        self.state.current_lane = if arrived { target } else { next };

        if arrived {
            log::trace!("arrived on lane {}", self.state.target_lane);
        }
    }

    /// Lateral world offset of the body: `(current_lane * lane_width, 0, 0)`.
    ///
    /// Forward motion belongs to whoever scrolls the world.
    pub fn world_offset(&self) -> Vec3 {
        Vec3::new(self.state.current_lane * self.config.lane_width, 0.0, 0.0)
    }

    pub fn phase(&self) -> LanePhase {
        let gap = self.state.target_lane as f32 - self.state.current_lane;
        if gap > 0.0 {
            LanePhase::TransitioningRight
        } else if gap < 0.0 {
            LanePhase::TransitioningLeft
        } else {
            LanePhase::Idle
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase() == LanePhase::Idle
    }

    /// Puts the body back on the start lane, e.g. between runs.
    pub fn reset(&mut self) {
        self.state = LaneState::at(self.config.start_lane);
    }

    pub fn state(&self) -> LaneState {
        self.state
    }

    pub fn current_lane(&self) -> f32 {
        self.state.current_lane
    }

    pub fn target_lane(&self) -> i32 {
        self.state.target_lane
    }

    pub fn desired_lane(&self) -> i32 {
        self.state.desired_lane
    }

    pub fn config(&self) -> &LaneConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> LocomotionController {
        LocomotionController::new(LaneConfig {
            lane_width: 3.0,
            lane_change_speed: 12.0,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn spawns_idle_on_start_lane() {
        let c = controller();
        assert_eq!(c.state(), LaneState { current_lane: 0.0, target_lane: 0, desired_lane: 0 });
        assert_eq!(c.phase(), LanePhase::Idle);
        assert_eq!(c.world_offset(), Vec3::ZERO);
    }

    #[test]
    fn left_wins_when_both_held() {
        let mut c = controller();
        c.handle_input(true, true);
        assert_eq!(c.desired_lane(), -1);
        assert_eq!(c.target_lane(), -1);
    }

    #[test]
    fn one_step_per_call() {
        let cfg = LaneConfig { min_lane: -3, max_lane: 3, ..Default::default() };
        let mut c = LocomotionController::new(cfg).unwrap();
        c.handle_input(false, true);
        assert_eq!(c.desired_lane(), 1);
        c.handle_input(false, true);
        assert_eq!(c.desired_lane(), 2);
    }

    #[test]
    fn phase_follows_gap_sign() {
        let mut c = controller();
        c.handle_input(false, true);
        assert_eq!(c.phase(), LanePhase::TransitioningRight);
        c.update(0.016);
        assert_eq!(c.phase(), LanePhase::TransitioningRight);
        c.handle_input(true, false);
        assert_eq!(c.phase(), LanePhase::TransitioningLeft);
    }

    #[test]
    fn zero_and_negative_dt_do_nothing() {
        let mut c = controller();
        c.handle_input(true, false);
        c.update(0.0);
        assert_eq!(c.current_lane(), 0.0);
        c.update(-1.0);
        assert_eq!(c.current_lane(), 0.0);
        c.update(f32::NAN);
        assert_eq!(c.current_lane(), 0.0);
    }

    #[test]
    fn large_step_snaps_instead_of_overshooting() {
        let mut c = controller();
        c.handle_input(false, true);
        c.update(10.0);
        assert_eq!(c.current_lane(), 1.0);
        assert!(c.is_idle());
    }

    #[test]
    fn reversal_inside_snap_band_still_lands_on_lane() {
        let mut c = LocomotionController::new(LaneConfig::default()).unwrap();
        c.handle_input(true, false);
        // 18 * 0.0005 = 0.009, still inside the 0.01 band around lane 0
        c.update(0.0005);
        assert!(c.current_lane() < 0.0);
        c.handle_input(false, true);
        assert_eq!(c.target_lane(), 0);
        c.update(0.016);
        assert_eq!(c.current_lane(), 0.0);
        assert_eq!(c.phase(), LanePhase::Idle);
        assert_eq!(c.world_offset(), Vec3::ZERO);
    }

    #[test]
    fn reset_returns_to_start() {
        let mut c = controller();
        c.handle_input(true, false);
        c.update(0.05);
        c.reset();
        assert_eq!(c.state(), LaneState { current_lane: 0.0, target_lane: 0, desired_lane: 0 });
    }

    #[test]
    fn reversing_mid_transition_heads_back() {
        let mut c = controller();
        c.handle_input(true, false);
        c.update(0.016);
        let mid = c.current_lane();
        assert!(mid < 0.0 && mid > -1.0);
        c.handle_input(false, true);
        assert_eq!(c.target_lane(), 0);
        for _ in 0..10 {
            c.update(0.016);
        }
        assert_eq!(c.current_lane(), 0.0);
    }
}
