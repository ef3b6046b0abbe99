//! Player Collider
//!
//! Axis-aligned body box for the character with feet-anchored resizing.
//!
//! # Stances
//!
//! - Standing: full height (32x64 px by default, one tile wide and two tall)
//! - Ducking: half height, same width
//!
//! # Feet Anchoring
//!
//! The box is described relative to the sprite origin (top-left of the frame):
//! `offset` is where the box starts, `size` how large it is. Resizing keeps
//! `offset.y + size.y` fixed so the character never sinks into or hovers
//! above the floor when it ducks or stands up.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Standing collider width in pixels
pub const PLAYER_WIDTH: f32 = 32.0;

/// Standing collider height in pixels
pub const PLAYER_HEIGHT: f32 = 64.0;

/// Fraction of full height kept while ducking
pub const DUCK_HEIGHT_RATIO: f32 = 0.5;

/// Collider heights the character can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Standing,
    Ducking,
}

impl Stance {
    /// Height multiplier relative to the full collider.
    pub fn height_ratio(&self) -> f32 {
        match self {
            Stance::Standing => 1.0,
            Stance::Ducking => DUCK_HEIGHT_RATIO,
        }
    }
}

/// Body box relative to the sprite origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl Default for Collider {
    fn default() -> Self {
        Self::full(Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

impl Collider {
    /// A standing collider filling the frame from its top-left corner.
    pub fn full(size: Vec2) -> Self {
        Self {
            size,
            offset: Vec2::ZERO,
        }
    }

    /// Y coordinate of the bottom edge, relative to the sprite origin.
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.offset.y + self.size.y
    }

    /// Y coordinate of the top edge, relative to the sprite origin.
    #[inline]
    pub fn top_y(&self) -> f32 {
        self.offset.y
    }

    /// Resize to `height`, keeping the bottom edge where it is.
    pub fn resize_height_anchored(&mut self, height: f32) {
        let feet = self.feet_y();
        self.size.y = height;
        self.offset.y = feet - height;
    }

    /// Collider for `stance`, derived from the full standing size.
    ///
    /// Returns `true` if the box changed.
    pub fn apply_stance(&mut self, stance: Stance, full_height: f32) -> bool {
        let height = full_height * stance.height_ratio();
        if (self.size.y - height).abs() < f32::EPSILON {
            return false;
        }
        self.resize_height_anchored(height);
        true
    }
}
