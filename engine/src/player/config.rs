//! Motion tuning constants.
//!
//! Every number that shapes how the character feels lives here. All values
//! are in pixels and seconds, screen space y-down (negative velocity = up).
//!
//! # Example
//!
//! ```ignore
//! use ledge_runner_engine::player::MotionConfig;
//!
//! // Floatier jump, everything else default
//! let config = MotionConfig {
//!     holding_gravity: 300.0,
//!     ..MotionConfig::default()
//! };
//!
//! // Or from a partial JSON document
//! let config = MotionConfig::from_json_str(r#"{ "coyote_time": 0.15 }"#)?;
//! ```

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::{PLAYER_HEIGHT, PLAYER_WIDTH};

/// Tuning for steering, friction, gravity and the jump subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Horizontal acceleration toward the walk target on the ground (px/s²).
    pub ground_acceleration: f32,

    /// Multiplier on `ground_acceleration` while airborne, in (0, 1].
    pub air_control: f32,

    /// Deceleration with no direction held, on the ground (px/s²).
    pub ground_friction: f32,

    /// Deceleration with no direction held, in the air (px/s²).
    pub air_friction: f32,

    /// Horizontal speeds below this snap to zero under friction (px/s).
    pub friction_snap_speed: f32,

    /// Walk speed when the caller passes none (px/s).
    pub walk_speed: f32,

    /// Hard cap on horizontal speed (px/s).
    pub max_speed: f32,

    /// Launch velocity when the caller passes none (px/s, negative = up).
    pub jump_velocity: f32,

    /// Multiplier on the launch velocity for the airborne double jump.
    pub double_jump_scale: f32,

    /// Gravity outside the held phase of a jump (px/s²).
    pub normal_gravity: f32,

    /// Weaker gravity while the jump button is held early in the ascent (px/s²).
    pub holding_gravity: f32,

    /// Upward speed above which releasing jump cuts the ascent (px/s).
    pub jump_cut_threshold: f32,

    /// Longest time holding jump keeps `holding_gravity` active (s).
    pub max_jump_hold: f32,

    /// Gravity multiplier applied to `normal_gravity` after a jump cut.
    pub release_boost: f32,

    /// Grace period after leaving the ground during which a jump still counts
    /// as grounded (s).
    pub coyote_time: f32,

    /// Vertical speed under which ground contact counts as a landing (px/s).
    pub landing_threshold: f32,

    /// Horizontal speed under which a grounded walk settles to idle (px/s).
    pub stop_threshold: f32,

    /// Vertical speed above which an airborne character is forced into the
    /// jump state (px/s).
    pub air_state_threshold: f32,

    /// Standing collider size (px).
    pub collider_size: Vec2,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            ground_acceleration: 1600.0, // ~0.1s to walk speed
            air_control: 0.6,
            ground_friction: 1400.0,
            air_friction: 200.0,
            friction_snap_speed: 1.0,
            walk_speed: 160.0,
            max_speed: 300.0,
            jump_velocity: -330.0,
            double_jump_scale: 1.0,
            normal_gravity: 900.0,
            holding_gravity: 450.0,
            jump_cut_threshold: 100.0,
            max_jump_hold: 0.25,
            release_boost: 1.5,
            coyote_time: 0.1,
            landing_threshold: 10.0,
            stop_threshold: 10.0,
            air_state_threshold: 20.0,
            collider_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
        }
    }
}

impl MotionConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: MotionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded motion config from {}", path.display());
        Ok(config)
    }

    /// Gravity after a jump cut.
    #[inline]
    pub fn cut_gravity(&self) -> f32 {
        self.normal_gravity * self.release_boost
    }

    /// Horizontal acceleration for the current contact state.
    #[inline]
    pub fn acceleration(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_acceleration
        } else {
            self.ground_acceleration * self.air_control
        }
    }

    /// Friction for the current contact state.
    #[inline]
    pub fn friction(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_friction
        } else {
            self.air_friction
        }
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            ("ground_acceleration", self.ground_acceleration),
            ("air_control", self.air_control),
            ("ground_friction", self.ground_friction),
            ("air_friction", self.air_friction),
            ("friction_snap_speed", self.friction_snap_speed),
            ("walk_speed", self.walk_speed),
            ("max_speed", self.max_speed),
            ("jump_velocity", self.jump_velocity),
            ("double_jump_scale", self.double_jump_scale),
            ("normal_gravity", self.normal_gravity),
            ("holding_gravity", self.holding_gravity),
            ("jump_cut_threshold", self.jump_cut_threshold),
            ("max_jump_hold", self.max_jump_hold),
            ("release_boost", self.release_boost),
            ("coyote_time", self.coyote_time),
            ("landing_threshold", self.landing_threshold),
            ("stop_threshold", self.stop_threshold),
            ("air_state_threshold", self.air_state_threshold),
            ("collider_size.x", self.collider_size.x),
            ("collider_size.y", self.collider_size.y),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(field, "must be finite"));
        }

        let positive = [
            ("ground_acceleration", self.ground_acceleration),
            ("walk_speed", self.walk_speed),
            ("max_speed", self.max_speed),
            ("double_jump_scale", self.double_jump_scale),
            ("normal_gravity", self.normal_gravity),
            ("holding_gravity", self.holding_gravity),
            ("max_jump_hold", self.max_jump_hold),
            ("release_boost", self.release_boost),
            ("coyote_time", self.coyote_time),
            ("collider_size.x", self.collider_size.x),
            ("collider_size.y", self.collider_size.y),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, value)| *value <= 0.0) {
            return Err(invalid(field, "must be positive"));
        }

        let non_negative = [
            ("ground_friction", self.ground_friction),
            ("air_friction", self.air_friction),
            ("friction_snap_speed", self.friction_snap_speed),
            ("jump_cut_threshold", self.jump_cut_threshold),
            ("landing_threshold", self.landing_threshold),
            ("stop_threshold", self.stop_threshold),
            ("air_state_threshold", self.air_state_threshold),
        ];
        if let Some((field, _)) = non_negative.iter().find(|(_, value)| *value < 0.0) {
            return Err(invalid(field, "must not be negative"));
        }

        if self.air_control > 1.0 || self.air_control <= 0.0 {
            return Err(invalid("air_control", "must be in (0, 1]"));
        }
        if self.jump_velocity >= 0.0 {
            return Err(invalid("jump_velocity", "must be negative (upward)"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    log::warn!("Rejected motion config: {field} {reason}");
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur while loading a [`MotionConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON deserialization error.
    Json(serde_json::Error),
    /// A value parsed but is out of range.
    Invalid { field: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid motion config: {field} {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}
