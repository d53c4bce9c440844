use crate::error::{self, ConfigError};

/// Immutable parameters of a [`LocomotionController`](super::LocomotionController).
///
/// # Example
/// ```rust,ignore
/// let cfg = LaneConfig { lane_width: 3.0, lane_change_speed: 12.0, ..Default::default() };
/// let controller = LocomotionController::new(cfg)?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneConfig {
    /// Leftmost lane.  Default: `-1`
    pub min_lane: i32,
    /// Rightmost lane.  Default: `1`
    pub max_lane: i32,
    /// Lane the body spawns in.  Default: `0`
    pub start_lane: i32,
    /// World units between two lane centres.  Default: `2.8`
    pub lane_width: f32,
    /// Lateral speed in lanes per second.  Default: `18.0`
    pub lane_change_speed: f32,
    /// Distance (in lanes) under which the body snaps onto its target.
    ///
    /// Default: `0.01`
    pub snap_epsilon: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            min_lane:          -1,
            max_lane:          1,
            start_lane:        0,
            lane_width:        2.8,
            lane_change_speed: 18.0,
            snap_epsilon:      0.01,
        }
    }
}

impl LaneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_lane > self.max_lane {
            return Err(ConfigError::InvertedLaneBounds { min: self.min_lane, max: self.max_lane });
        }
        if !(self.min_lane..=self.max_lane).contains(&self.start_lane) {
            return Err(ConfigError::StartLaneOutOfBounds {
                start: self.start_lane,
                min:   self.min_lane,
                max:   self.max_lane,
            });
        }
        error::positive("lane_width", self.lane_width)?;
        error::positive("lane_change_speed", self.lane_change_speed)?;
        error::non_negative("snap_epsilon", self.snap_epsilon)?;
        Ok(())
    }

    /// Number of lanes between the bounds, inclusive.
    pub fn lane_count(&self) -> u32 {
        self.min_lane.abs_diff(self.max_lane) + 1
    }
}
