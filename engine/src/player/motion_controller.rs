//! Player Motion Controller
//!
//! Owns the continuous side of the character: horizontal steering with
//! acceleration and friction, gravity integration, and the ground/air
//! bookkeeping that drives state changes (landing, falling off a ledge).
//! The jump subsystem lives in [`jump`](super::jump) as a second `impl` block.
//!
//! # Physics Model
//!
//! - Walk speed: 160 px/s, reached in ~0.1s (ground acceleration 1600 px/s²)
//! - Air control: 60% of ground acceleration
//! - Friction: 1400 px/s² on the ground, 200 px/s² in the air
//! - Gravity: 900 px/s² (450 while a jump is held, 1350 after a jump cut)
//!
//! # Per-Tick Order
//!
//! 1. Record ground contact time
//! 2. Select gravity
//! 3. Integrate vertical velocity (airborne only)
//! 4. Capture momentum on takeoff
//! 5. Integrate horizontal velocity (steer or friction)
//! 6. Land
//! 7. Settle a stopped walk to idle
//! 8. Force the jump state when airborne for any other reason
//! 9. Remember whether this tick was airborne
//!
//! # Usage
//!
//! ```rust,ignore
//! let motion = MotionController::new(MotionConfig::default());
//! let mut character = Character::new(motion.config());
//!
//! // Input edges first...
//! motion.walk(&mut character, Direction::Right, None);
//! motion.jump(&mut character, None);
//!
//! // ...then the tick
//! motion.tick(&mut character, delta_time, touching_ground);
//! let velocity = character.velocity();
//! ```

use super::character::{Character, Direction, GameplayState};
use super::config::MotionConfig;
use super::state_machine::StateMachine;

/// Smallest time step the integrator accepts, in seconds.
pub const MIN_DT: f32 = 0.0001;

/// Largest time step the integrator accepts, in seconds.
pub const MAX_DT: f32 = 0.1;

/// Clamp a frame delta to the integrator's accepted range.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    dt.clamp(MIN_DT, MAX_DT)
}

/// Steering, friction, gravity and jump logic over a [`Character`].
#[derive(Debug, Clone, Default)]
pub struct MotionController {
    pub(crate) config: MotionConfig,
    pub(crate) machine: StateMachine,
}

impl MotionController {
    pub fn new(config: MotionConfig) -> Self {
        Self {
            config,
            machine: StateMachine::new(),
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn state_machine(&self) -> &StateMachine {
        &self.machine
    }

    /// Start walking in `direction`.
    ///
    /// No-op while attacking, ducking or dead. `speed` defaults to the
    /// configured walk speed and is capped at max speed.
    pub fn walk(&self, character: &mut Character, direction: Direction, speed: Option<f32>) {
        if character.flags.attacking || !character.alive || character.flags.ducking {
            return;
        }

        let speed = speed
            .unwrap_or(self.config.walk_speed)
            .abs()
            .min(self.config.max_speed);

        character.move_direction = Some(direction);
        character.last_direction = Some(direction);
        character.target_velocity_x = direction.sign() * speed;
        character.acceleration_x = self.config.acceleration(character.is_on_ground());
        character.facing = direction.into();

        // The jump clip outranks walking while airborne
        if character.state != GameplayState::Jumping {
            self.machine.request_state(character, GameplayState::Walking);
        }
    }

    /// Release the direction input.
    ///
    /// On the ground the walk target drops to zero; in the air the target is
    /// left alone so the character keeps its momentum.
    pub fn stop_walking(&self, character: &mut Character) {
        if character.flags.ducking || !character.alive {
            return;
        }

        character.move_direction = None;
        let on_ground = character.is_on_ground();
        if on_ground {
            character.target_velocity_x = 0.0;
        }
        character.acceleration_x = 0.0;

        if on_ground && !character.flags.attacking {
            self.machine.request_state(character, GameplayState::Idle);
        }
    }

    /// Crouch in place. Needs ground contact; no-op while attacking or dead.
    pub fn duck(&self, character: &mut Character) {
        if !character.is_on_ground() || character.flags.attacking || !character.alive {
            return;
        }

        character.velocity.x = 0.0;
        character.target_velocity_x = 0.0;
        self.machine.request_state(character, GameplayState::Ducking);
    }

    pub fn stand_up(&self, character: &mut Character) {
        if character.flags.ducking {
            self.machine.request_state(character, GameplayState::Idle);
        }
    }

    /// Advance the character by `dt` seconds with the given ground contact.
    pub fn tick(&self, character: &mut Character, dt: f32, grounded: bool) {
        let dt = clamp_dt(dt);
        character.time += dt;
        character.grounded = grounded;
        let airborne = !grounded;

        if grounded {
            character.jump.last_grounded_time = Some(character.time);
            // Contact resolution: the floor absorbs downward speed
            if character.velocity.y > 0.0 {
                character.velocity.y = 0.0;
            }
            // Settled contact (not the launch frame) ends the airborne episode,
            // whatever state the character touched down in
            if character.velocity.y >= 0.0 {
                character.jump.launched = false;
                character.jump.can_double_jump = false;
                character.jump.button_held = false;
                character.jump.cut = false;
            }
        }

        character.gravity = self.select_gravity(character, airborne);

        if airborne {
            character.velocity.y += character.gravity * dt;
        }

        let took_off = airborne && !character.was_airborne;
        if took_off && character.move_direction.is_none() && character.last_direction.is_some() {
            character.target_velocity_x = character.velocity.x;
        }

        character.velocity.x = match character.move_direction {
            Some(_) => steer(
                character.velocity.x,
                character.target_velocity_x,
                character.acceleration_x * dt,
            ),
            None => apply_friction(
                character.velocity.x,
                self.config.friction(grounded) * dt,
                self.config.friction_snap_speed,
            ),
        };
        character.velocity.x = character
            .velocity
            .x
            .clamp(-self.config.max_speed, self.config.max_speed);

        if grounded
            && character.was_airborne
            && character.state == GameplayState::Jumping
            && character.velocity.y.abs() < self.config.landing_threshold
        {
            self.machine.request_state(character, GameplayState::Idle);
        }

        if grounded
            && character.velocity.x.abs() < self.config.stop_threshold
            && character.state == GameplayState::Walking
        {
            self.machine.request_state(character, GameplayState::Idle);
        }

        if airborne
            && character.velocity.y.abs() > self.config.air_state_threshold
            && !matches!(
                character.state,
                GameplayState::Jumping | GameplayState::Hurt | GameplayState::Dead
            )
        {
            // Walked off a ledge or knocked into the air: no double jump granted
            self.machine.request_state(character, GameplayState::Jumping);
        }

        character.was_airborne = airborne;

        log::trace!(
            "tick t={:.3} grounded={} v=({:.1}, {:.1}) g={:.0} state={:?}",
            character.time,
            grounded,
            character.velocity.x,
            character.velocity.y,
            character.gravity,
            character.state
        );
    }

}

/// Move `current` toward `target` by at most `max_change`, never overshooting.
fn steer(current: f32, target: f32, max_change: f32) -> f32 {
    let diff = target - current;
    if diff.abs() <= max_change {
        target
    } else {
        current + diff.signum() * max_change
    }
}

/// Slow `current` toward zero by `reduction`, never crossing zero; speeds
/// under `snap` stop outright.
fn apply_friction(current: f32, reduction: f32, snap: f32) -> f32 {
    let speed = current.abs();
    if speed < snap || speed <= reduction {
        0.0
    } else {
        current - current.signum() * reduction
    }
}
