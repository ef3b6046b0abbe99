//! Player Module
//!
//! Character control for a 2D side-view platformer: discrete gameplay
//! states, accelerated walking, variable-height jumps with coyote time and a
//! double jump, and a feet-anchored ducking collider.
//!
//! # Components
//!
//! - [`PlayerController`] - Facade for the input/scene layer
//! - [`Character`] - Plain data: state, flags, kinematics, jump bookkeeping
//! - [`StateMachine`] - Transition service with entry side effects
//! - [`MotionController`] - Steering, friction, gravity and the jump subsystem
//!   - Jump logic lives in [`jump`]
//! - [`Collider`] - Body box with feet-anchored resizing
//! - [`MotionConfig`] - Tuning constants, loadable from JSON

pub mod character;
pub mod collider;
pub mod config;
pub mod controller;
pub mod jump;
pub mod motion_controller;
pub mod state_machine;

pub use character::{ActionFlags, Character, Direction, Facing, GameplayState, JumpState};
pub use collider::{Collider, Stance, DUCK_HEIGHT_RATIO, PLAYER_HEIGHT, PLAYER_WIDTH};
pub use config::{ConfigError, MotionConfig};
pub use controller::{CharacterCommand, PlayerController, TickReport};
pub use motion_controller::{MotionController, MAX_DT, MIN_DT, clamp_dt};
pub use state_machine::{StateEntry, StateMachine};
