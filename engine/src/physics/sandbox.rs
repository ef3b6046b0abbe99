//! Platform sandbox
//!
//! One body moving over a set of horizontal one-way platforms. Landing is
//! resolved by sweeping the feet edge between the previous and the new
//! position: if it crossed a platform top that overlaps the body
//! horizontally, the body is snapped onto it.
//!
//! # Example
//!
//! ```ignore
//! use glam::Vec2;
//! use ledge_runner_engine::physics::{Platform, Sandbox};
//!
//! let mut sandbox = Sandbox::new(Vec2::new(100.0, 436.0))
//!     .with_platform(Platform::new(0.0, 800.0, 500.0));
//!
//! let touching = sandbox.step(report.velocity, report.collider, dt);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::player::Collider;

/// Distance within which feet count as resting on a platform (px).
pub const CONTACT_TOLERANCE: f32 = 0.5;

/// A horizontal one-way platform, solid from above only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub left: f32,
    pub right: f32,
    pub top: f32,
}

impl Platform {
    pub fn new(left: f32, right: f32, top: f32) -> Self {
        Self { left, right, top }
    }

    /// Whether the span `[left, right]` overlaps this platform.
    #[inline]
    pub fn overlaps(&self, left: f32, right: f32) -> bool {
        left < self.right && right > self.left
    }
}

/// A body (sprite origin) and the platforms it can stand on.
#[derive(Debug, Clone, Default)]
pub struct Sandbox {
    position: Vec2,
    platforms: Vec<Platform>,
}

impl Sandbox {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            platforms: Vec::new(),
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    /// Sprite origin (top-left of the frame).
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// World-space y of the collider's bottom edge.
    pub fn feet_y(&self, collider: &Collider) -> f32 {
        self.position.y + collider.feet_y()
    }

    /// Move the body by `velocity * dt` and resolve landing.
    ///
    /// Returns whether the feet rest on a platform afterwards.
    pub fn step(&mut self, velocity: Vec2, collider: Collider, dt: f32) -> bool {
        let feet_before = self.feet_y(&collider);
        self.position += velocity * dt;

        // Rising bodies pass through one-way platforms
        if velocity.y < 0.0 {
            return false;
        }

        let feet_after = self.feet_y(&collider);
        let left = self.position.x + collider.offset.x;
        let right = left + collider.size.x;

        let landing = self
            .platforms
            .iter()
            .filter(|p| p.overlaps(left, right))
            .filter(|p| {
                feet_before <= p.top + CONTACT_TOLERANCE && feet_after >= p.top - CONTACT_TOLERANCE
            })
            .map(|p| p.top)
            .reduce(f32::min);

        match landing {
            Some(top) => {
                self.position.y = top - collider.feet_y();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;
    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn floor_at(y: f32) -> Sandbox {
        let collider = Collider::default();
        Sandbox::new(Vec2::new(100.0, y - collider.feet_y()))
            .with_platform(Platform::new(0.0, 400.0, y))
    }

    #[test]
    fn test_resting_body_touches() {
        let mut sandbox = floor_at(500.0);
        assert!(sandbox.step(Vec2::ZERO, Collider::default(), DT));
        assert!(approx_eq(sandbox.feet_y(&Collider::default()), 500.0));
    }

    #[test]
    fn test_falling_body_snaps_to_top() {
        let collider = Collider::default();
        let mut sandbox = floor_at(500.0);
        sandbox.set_position(Vec2::new(100.0, 500.0 - collider.feet_y() - 2.0));

        assert!(sandbox.step(Vec2::new(0.0, 600.0), collider, DT));
        assert!(approx_eq(sandbox.feet_y(&collider), 500.0));
    }

    #[test]
    fn test_rising_body_passes_through() {
        let collider = Collider::default();
        let mut sandbox = floor_at(500.0);
        assert!(!sandbox.step(Vec2::new(0.0, -330.0), collider, DT));
        assert!(sandbox.feet_y(&collider) < 500.0);
    }

    #[test]
    fn test_walking_off_edge_loses_contact() {
        let collider = Collider::default();
        let mut sandbox = floor_at(500.0);
        sandbox.set_position(Vec2::new(399.0, sandbox.position().y));
        assert!(!sandbox.step(Vec2::new(160.0, 0.0), collider, DT));
    }

    #[test]
    fn test_ducked_collider_keeps_feet() {
        let mut ducked = Collider::default();
        ducked.resize_height_anchored(32.0);
        let mut sandbox = floor_at(500.0);
        assert!(sandbox.step(Vec2::ZERO, ducked, DT));
        assert!(approx_eq(sandbox.feet_y(&ducked), 500.0));
    }

    #[test]
    fn test_highest_crossed_platform_wins() {
        let collider = Collider::default();
        let mut sandbox = Sandbox::new(Vec2::new(0.0, 0.0))
            .with_platform(Platform::new(-50.0, 50.0, 80.0))
            .with_platform(Platform::new(-50.0, 50.0, 70.0));

        assert!(sandbox.step(Vec2::new(0.0, 1200.0), collider, DT));
        assert!(approx_eq(sandbox.feet_y(&collider), 70.0));
    }
}
