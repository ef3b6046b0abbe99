//! Ledge Runner Engine Library
//!
//! Headless character control for a 2D side-view platformer. The library
//! owns gameplay state and motion; rendering and collision are collaborators
//! it talks to through plain data (velocity out, ground contact in,
//! animation commands out, clip completions in).
//!
//! # Modules
//!
//! - [`player`] - Character state, motion, jump subsystem and the controller facade
//! - [`animation`] - Animation keys, playback commands and a headless clip player
//! - [`physics`] - Flat-platform sandbox standing in for the host physics
//!
//! # Example
//!
//! ```ignore
//! use ledge_runner_engine::{Direction, MotionConfig, PlayerController};
//! use ledge_runner_engine::physics::{Platform, Sandbox};
//!
//! let mut player = PlayerController::new(MotionConfig::default());
//! let mut sandbox = Sandbox::new(glam::Vec2::new(100.0, 436.0))
//!     .with_platform(Platform::new(0.0, 800.0, 500.0));
//!
//! let mut touching = true;
//! let mut time = 0.0;
//! for frame in 0..120 {
//!     if frame == 10 {
//!         player.jump(None);
//!     }
//!     player.walk(Direction::Right, None);
//!
//!     time += DT;
//!     let report = player.update(time, DT, touching);
//!     touching = sandbox.step(report.velocity, report.collider, DT);
//! }
//! ```

pub mod animation;
pub mod physics;
pub mod player;

// Re-export the facade and the types its signatures use
pub use animation::{AnimKey, AnimationCommand, ClipPlayer, Playback};
pub use player::{
    CharacterCommand, Direction, Facing, GameplayState, MotionConfig, PlayerController,
    TickReport,
};
