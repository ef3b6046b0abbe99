//! Physics module
//!
//! A headless stand-in for the host engine's arcade physics. The character
//! core never moves bodies itself: it reports a velocity each tick and reads
//! back a single `touching_ground` bit. This module closes that loop for
//! tests and the demo binary.
//!
//! # Unit System
//!
//! - Distances in pixels, screen space y-down
//! - Velocities in px/s
//!
//! # Submodules
//!
//! - [`sandbox`] - Flat one-way platforms and a single body

pub mod sandbox;

pub use sandbox::{CONTACT_TOLERANCE, Platform, Sandbox};
