//! Character data.
//!
//! A plain data-owning struct: discrete gameplay state, the exclusive action
//! flags, kinematic state, and jump bookkeeping. It has no behaviour of its
//! own beyond read accessors. [`StateMachine`](super::StateMachine) and
//! [`MotionController`](super::MotionController) mutate it by reference.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collider::Collider;
use super::config::MotionConfig;
use crate::animation::{AnimationCommand, AnimationQueue};

/// Discrete gameplay/animation state. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameplayState {
    #[default]
    Idle,
    Walking,
    Jumping,
    Ducking,
    Attacking,
    Hurt,
    Dead,
    Talking,
}

/// Commanded horizontal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// -1.0 for left, 1.0 for right.
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Which way the sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// Whether the sprite must be drawn mirrored.
    pub fn flip_x(&self) -> bool {
        matches!(self, Facing::Left)
    }
}

impl From<Direction> for Facing {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Facing::Left,
            Direction::Right => Facing::Right,
        }
    }
}

/// Mutually exclusive action flags, set only by state entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActionFlags {
    pub attacking: bool,
    pub ducking: bool,
    pub talking: bool,
}

/// Jump subsystem bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpState {
    /// Jump input still held since the last accepted jump.
    pub button_held: bool,
    /// Clock time of the last accepted jump.
    pub start_time: f32,
    /// The ascent was cut short by an early release.
    pub cut: bool,
    /// Clock time of the last grounded tick.
    pub last_grounded_time: Option<f32>,
    /// One airborne jump is still available.
    pub can_double_jump: bool,
    /// A jump launched this airborne episode; grounded contact is stale until
    /// the character settles on the ground again.
    pub launched: bool,
}

/// A controlled platformer character.
#[derive(Debug, Clone)]
pub struct Character {
    pub(crate) state: GameplayState,
    pub(crate) alive: bool,
    pub(crate) flags: ActionFlags,

    pub(crate) velocity: Vec2,
    pub(crate) move_direction: Option<Direction>,
    /// Last non-`None` direction, for momentum capture on takeoff.
    pub(crate) last_direction: Option<Direction>,
    pub(crate) facing: Facing,
    pub(crate) target_velocity_x: f32,
    pub(crate) acceleration_x: f32,

    pub(crate) collider: Collider,
    pub(crate) full_height: f32,

    pub(crate) gravity: f32,
    pub(crate) jump: JumpState,

    /// Ground contact as of the last tick (or cleared by a launch).
    pub(crate) grounded: bool,
    /// Airborne flag persisted from the previous tick.
    pub(crate) was_airborne: bool,
    /// Controller clock in seconds.
    pub(crate) time: f32,

    pub(crate) animations: AnimationQueue,
}

impl Character {
    /// A fresh character: Idle, alive, at rest, full collider, normal gravity.
    ///
    /// No animation is queued yet; the state machine selects the idle clip
    /// when the controller enters Idle.
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            state: GameplayState::Idle,
            alive: true,
            flags: ActionFlags::default(),
            velocity: Vec2::ZERO,
            move_direction: None,
            last_direction: None,
            facing: Facing::Right,
            target_velocity_x: 0.0,
            acceleration_x: 0.0,
            collider: Collider::full(config.collider_size),
            full_height: config.collider_size.y,
            gravity: config.normal_gravity,
            jump: JumpState::default(),
            grounded: false,
            was_airborne: false,
            time: 0.0,
            animations: AnimationQueue::new(),
        }
    }

    pub fn state(&self) -> GameplayState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn flags(&self) -> ActionFlags {
        self.flags
    }

    pub fn is_attacking(&self) -> bool {
        self.flags.attacking
    }

    pub fn is_ducking(&self) -> bool {
        self.flags.ducking
    }

    pub fn is_talking(&self) -> bool {
        self.flags.talking
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn move_direction(&self) -> Option<Direction> {
        self.move_direction
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn target_velocity_x(&self) -> f32 {
        self.target_velocity_x
    }

    pub fn acceleration_x(&self) -> f32 {
        self.acceleration_x
    }

    pub fn collider(&self) -> Collider {
        self.collider
    }

    /// Gravity the controller selected on the last tick (or by a jump action).
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn jump_state(&self) -> JumpState {
        self.jump
    }

    pub fn can_double_jump(&self) -> bool {
        self.jump.can_double_jump
    }

    pub fn is_jump_cut(&self) -> bool {
        self.jump.cut
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Grounded contact that is not the stale contact left behind by a launch.
    pub fn is_on_ground(&self) -> bool {
        self.grounded && !self.jump.launched
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn current_animation(&self) -> Option<AnimationCommand> {
        self.animations.current()
    }

    pub fn pending_animations(&self) -> &[AnimationCommand] {
        self.animations.pending()
    }

    pub(crate) fn drain_animations(&mut self) -> Vec<AnimationCommand> {
        self.animations.drain()
    }

    /// Host-side ground contact update between ticks.
    pub(crate) fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }
}
