//! Construction-time configuration errors.
//!
//! Per-frame calls never fail; everything that can be wrong is caught when a
//! controller is built from its config.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("lane bounds are inverted: min_lane {min} > max_lane {max}")]
    InvertedLaneBounds { min: i32, max: i32 },
    #[error("start lane {start} lies outside [{min}, {max}]")]
    StartLaneOutOfBounds { start: i32, min: i32, max: i32 },
    #[error("pitch bounds are inverted: pitch_min {min} > pitch_max {max}")]
    InvertedPitchBounds { min: f32, max: f32 },
    #[error("zoom limits are inverted: min_distance {min} > max_distance {max}")]
    InvertedZoomLimits { min: f32, max: f32 },
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("`{field}` must lie in (0, 1], got {value}")]
    SmoothingOutOfRange { field: &'static str, value: f32 },
    #[error("`{field}` is not a finite number")]
    NotFinite { field: &'static str },
}

/// Shared checks used by the config `validate` methods.
pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub(crate) fn smoothing(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(ConfigError::SmoothingOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothing_accepts_half_open_unit_interval() {
        assert!(smoothing("s", 1.0).is_ok());
        assert!(smoothing("s", 0.02).is_ok());
        assert_eq!(
            smoothing("s", 0.0),
            Err(ConfigError::SmoothingOutOfRange { field: "s", value: 0.0 })
        );
        assert!(smoothing("s", 1.5).is_err());
        assert_eq!(smoothing("s", f32::NAN), Err(ConfigError::NotFinite { field: "s" }));
    }

    #[test]
    fn messages_name_the_field() {
        let err = positive("lane_change_speed", -1.0).unwrap_err();
        assert_eq!(err.to_string(), "`lane_change_speed` must be positive, got -1");
    }
}
