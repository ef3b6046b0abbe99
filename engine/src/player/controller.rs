//! Player Controller
//!
//! The surface the input/scene layer talks to. Owns one [`Character`] and
//! the [`MotionController`] that drives it.
//!
//! # Frame Order
//!
//! 1. Apply input actions (`walk`, `jump`, ...). They see the grounded state
//!    and velocity from the previous tick.
//! 2. `update(time, delta, touching_ground)` integrates one tick.
//! 3. Hand the reported velocity to physics, and drain animation commands
//!    for the renderer.
//! 4. Forward clip completions through `on_animation_complete`.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut player = PlayerController::new(MotionConfig::default());
//!
//! if input.right { player.walk(Direction::Right, None) } else { player.stop_walking() }
//! if input.jump_pressed { player.jump(None); }
//! if input.jump_released { player.jump_release(); }
//!
//! let report = player.update(time, delta, touching_ground);
//! for command in player.drain_animation_commands() {
//!     sprite.play(command);
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::character::{Character, Direction, Facing, GameplayState};
use super::collider::Collider;
use super::config::MotionConfig;
use super::motion_controller::{MotionController, clamp_dt};
use crate::animation::{AnimKey, AnimationCommand};

static_assertions::assert_impl_all!(PlayerController: Send, Sync, Clone);
static_assertions::assert_impl_all!(CharacterCommand: Send, Copy);
static_assertions::assert_impl_all!(TickReport: Send, Copy);

/// One input action, as issued by the input layer or a script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CharacterCommand {
    Walk {
        direction: Direction,
        #[serde(default)]
        speed: Option<f32>,
    },
    StopWalking,
    Jump {
        #[serde(default)]
        velocity: Option<f32>,
    },
    JumpRelease,
    Duck,
    StandUp,
    Attack,
    Hurt,
    Die,
    Talk,
    StopTalking,
}

/// What one tick produced, for physics and presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    pub time: f32,
    pub state: GameplayState,
    pub velocity: glam::Vec2,
    pub gravity: f32,
    pub collider: Collider,
    pub facing: Facing,
    pub grounded: bool,
}

/// Facade over a single controlled character.
#[derive(Debug, Clone)]
pub struct PlayerController {
    character: Character,
    motion: MotionController,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(MotionConfig::default())
    }
}

impl PlayerController {
    /// A fresh character, Idle with the idle clip queued.
    ///
    /// Ground contact is unknown until the first `update`, so `jump` and
    /// `duck` are rejected before it. Hosts run one update before routing
    /// input.
    pub fn new(config: MotionConfig) -> Self {
        let motion = MotionController::new(config);
        let mut character = Character::new(motion.config());
        motion
            .state_machine()
            .request_state(&mut character, GameplayState::Idle);
        Self { character, motion }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn config(&self) -> &MotionConfig {
        self.motion.config()
    }

    pub fn state(&self) -> GameplayState {
        self.character.state()
    }

    /// Recreate the character from config. The only way out of Dead.
    pub fn reset(&mut self) {
        log::debug!("Resetting character");
        *self = Self::new(*self.motion.config());
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    pub fn walk(&mut self, direction: Direction, speed: Option<f32>) {
        self.motion.walk(&mut self.character, direction, speed);
    }

    pub fn stop_walking(&mut self) {
        self.motion.stop_walking(&mut self.character);
    }

    /// Returns whether the jump was accepted.
    pub fn jump(&mut self, velocity: Option<f32>) -> bool {
        self.motion.jump(&mut self.character, velocity)
    }

    pub fn jump_release(&mut self) {
        self.motion.jump_release(&mut self.character);
    }

    pub fn duck(&mut self) {
        self.motion.duck(&mut self.character);
    }

    pub fn stand_up(&mut self) {
        self.motion.stand_up(&mut self.character);
    }

    pub fn attack(&mut self) {
        if self.character.is_attacking() || !self.character.is_alive() {
            return;
        }
        self.request(GameplayState::Attacking);
    }

    pub fn hurt(&mut self) {
        if !self.character.is_alive() {
            return;
        }
        self.request(GameplayState::Hurt);
    }

    pub fn die(&mut self) {
        self.request(GameplayState::Dead);
    }

    pub fn talk(&mut self) {
        if !self.character.is_alive() {
            return;
        }
        self.request(GameplayState::Talking);
    }

    pub fn stop_talking(&mut self) {
        if self.character.is_talking() {
            self.request(GameplayState::Idle);
        }
    }

    /// Dispatch a [`CharacterCommand`].
    pub fn apply(&mut self, command: CharacterCommand) {
        match command {
            CharacterCommand::Walk { direction, speed } => self.walk(direction, speed),
            CharacterCommand::StopWalking => self.stop_walking(),
            CharacterCommand::Jump { velocity } => {
                self.jump(velocity);
            }
            CharacterCommand::JumpRelease => self.jump_release(),
            CharacterCommand::Duck => self.duck(),
            CharacterCommand::StandUp => self.stand_up(),
            CharacterCommand::Attack => self.attack(),
            CharacterCommand::Hurt => self.hurt(),
            CharacterCommand::Die => self.die(),
            CharacterCommand::Talk => self.talk(),
            CharacterCommand::StopTalking => self.stop_talking(),
        }
    }

    fn request(&mut self, target: GameplayState) {
        self.motion
            .state_machine()
            .request_state(&mut self.character, target);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn is_jumping(&self) -> bool {
        self.character.state() == GameplayState::Jumping
    }

    pub fn is_walking(&self) -> bool {
        self.character.state() == GameplayState::Walking
    }

    pub fn is_dead(&self) -> bool {
        !self.character.is_alive()
    }

    // ------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------

    /// Integrate one frame ending at clock `time`.
    pub fn update(&mut self, time: f32, delta: f32, touching_ground: bool) -> TickReport {
        let dt = clamp_dt(delta);
        self.character.time = time - dt;
        self.tick(dt, touching_ground)
    }

    /// Integrate one frame on the controller's own clock.
    pub fn tick(&mut self, dt: f32, touching_ground: bool) -> TickReport {
        self.motion.tick(&mut self.character, dt, touching_ground);
        self.report()
    }

    pub fn report(&self) -> TickReport {
        let character = &self.character;
        TickReport {
            time: character.time(),
            state: character.state(),
            velocity: character.velocity(),
            gravity: character.gravity(),
            collider: character.collider(),
            facing: character.facing(),
            grounded: character.is_grounded(),
        }
    }

    /// Feedback from the render collaborator.
    pub fn on_animation_complete(&mut self, key: AnimKey) {
        self.motion
            .state_machine()
            .on_animation_complete(&mut self.character, key);
    }

    /// Hand queued animation commands to the renderer, oldest first.
    pub fn drain_animation_commands(&mut self) -> Vec<AnimationCommand> {
        self.character.drain_animations()
    }

    pub fn current_animation(&self) -> Option<AnimationCommand> {
        self.character.current_animation()
    }
}
