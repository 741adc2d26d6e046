//! Data-driven game balance
//!
//! Every knob defaults to the values in [`crate::consts`]; a JSON document
//! only needs to name the fields it overrides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors produced while loading or validating tuning data
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A ratio or duration that must be positive is not
    NonPositive { field: &'static str, value: f64 },
    /// A `[min, max]` pair is inverted
    InvertedRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    /// The passage plus its margins does not fit on screen
    GapTooLarge { total: f64 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {}", e),
            TuningError::NonPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            TuningError::InvertedRange { field, min, max } => {
                write!(f, "{} range is inverted: min {} > max {}", field, min, max)
            }
            TuningError::GapTooLarge { total } => write!(
                f,
                "gap height plus both margins is {} of the screen (must be <= 1)",
                total
            ),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Bat ===
    pub bat_size: f64,
    pub bat_x: f64,
    pub gravity: f64,
    pub flap: f64,
    pub bat_frames: u32,
    pub bat_ticks_per_frame: u32,

    // === Obstacles ===
    pub spike_min: f64,
    pub spike_max: f64,
    pub spike_min_total: f64,
    pub spike_sprites: u32,
    pub gap_height: f64,
    pub gap_margin: f64,
    pub cluster_min: u32,
    pub cluster_max: u32,
    pub obstacle_slot: f64,
    /// Space between cluster members when drawn
    pub cluster_gap: f64,
    pub scroll: f64,

    // === Timing (ms) ===
    pub spawn_interval_min_ms: f64,
    pub spawn_interval_max_ms: f64,
    pub grace_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            bat_size: BAT_SIZE_H,
            bat_x: BAT_X_W,
            gravity: GRAVITY_H,
            flap: FLAP_H,
            bat_frames: BAT_FRAMES,
            bat_ticks_per_frame: BAT_TICKS_PER_FRAME,

            spike_min: SPIKE_MIN_H,
            spike_max: SPIKE_MAX_H,
            spike_min_total: SPIKE_MIN_TOTAL_H,
            spike_sprites: SPIKE_SPRITES,
            gap_height: GAP_HEIGHT_H,
            gap_margin: GAP_MARGIN_H,
            cluster_min: CLUSTER_MIN,
            cluster_max: CLUSTER_MAX,
            obstacle_slot: OBSTACLE_SLOT_W,
            cluster_gap: CLUSTER_GAP_W,
            scroll: SCROLL_W,

            spawn_interval_min_ms: SPAWN_INTERVAL_MIN_MS,
            spawn_interval_max_ms: SPAWN_INTERVAL_MAX_MS,
            grace_ms: GRACE_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("bat_size", self.bat_size),
            ("gravity", self.gravity),
            ("flap", self.flap),
            ("spike_min", self.spike_min),
            ("gap_height", self.gap_height),
            ("obstacle_slot", self.obstacle_slot),
            ("scroll", self.scroll),
            ("spawn_interval_min_ms", self.spawn_interval_min_ms),
            ("bat_frames", self.bat_frames as f64),
            ("bat_ticks_per_frame", self.bat_ticks_per_frame as f64),
            ("spike_sprites", self.spike_sprites as f64),
            ("cluster_min", self.cluster_min as f64),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }
        let non_negative = [("grace_ms", self.grace_ms), ("cluster_gap", self.cluster_gap)];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let ranges = [
            ("spike", self.spike_min, self.spike_max),
            (
                "spawn_interval_ms",
                self.spawn_interval_min_ms,
                self.spawn_interval_max_ms,
            ),
            (
                "cluster",
                self.cluster_min as f64,
                self.cluster_max as f64,
            ),
        ];
        for (field, min, max) in ranges {
            if min > max {
                return Err(TuningError::InvertedRange { field, min, max });
            }
        }

        let total = self.gap_height + 2.0 * self.gap_margin;
        if total > 1.0 {
            return Err(TuningError::GapTooLarge { total });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.001, "cluster_max": 2 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.001);
        assert_eq!(tuning.cluster_max, 2);
        assert_eq!(tuning.flap, FLAP_H);
        assert_eq!(tuning.grace_ms, GRACE_MS);
    }

    #[test]
    fn test_json_roundtrip() {
        let tuning = Tuning::default();
        let parsed = Tuning::from_json(&tuning.to_json()).unwrap();
        assert_eq!(parsed.cluster_max, tuning.cluster_max);
        assert_eq!(parsed.bat_ticks_per_frame, tuning.bat_ticks_per_frame);
        assert!((parsed.spike_max - tuning.spike_max).abs() < 1e-15);
        assert!((parsed.scroll - tuning.scroll).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ gravity: }").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = Tuning::from_json(r#"{ "spike_min": 0.3, "spike_max": 0.1 }"#).unwrap_err();
        assert!(matches!(err, TuningError::InvertedRange { field: "spike", .. }));
        assert!(err.to_string().contains("inverted"));
    }

    #[test]
    fn test_rejects_non_positive() {
        let err = Tuning::from_json(r#"{ "scroll": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NonPositive { field: "scroll", .. }));
    }

    #[test]
    fn test_rejects_oversized_gap() {
        let err = Tuning::from_json(r#"{ "gap_height": 0.7 }"#).unwrap_err();
        assert!(matches!(err, TuningError::GapTooLarge { .. }));
    }

    #[test]
    fn test_cluster_gap_override() {
        let tuning = Tuning::from_json(r#"{ "cluster_gap": 0.0 }"#).unwrap();
        assert_eq!(tuning.cluster_gap, 0.0);
        assert_eq!(Tuning::default().cluster_gap, CLUSTER_GAP_W);

        let err = Tuning::from_json(r#"{ "cluster_gap": -0.01 }"#).unwrap_err();
        assert!(matches!(err, TuningError::NonPositive { field: "cluster_gap", .. }));
    }
}
