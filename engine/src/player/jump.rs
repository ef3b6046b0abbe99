//! Jump subsystem.
//!
//! Variable-height jumps, coyote time, a single air jump, and gravity
//! selection. Lives in its own file as a second `impl MotionController`.
//!
//! # Gravity Phases
//!
//! | Phase            | Condition                                        | Gravity           |
//! |------------------|--------------------------------------------------|-------------------|
//! | Grounded         | ground contact                                   | normal            |
//! | Cut              | released early, still rising                     | normal × boost    |
//! | Holding          | jump held, rising, within the max hold time      | holding           |
//! | Falling / other  | everything else                                  | normal            |
//!
//! Releasing early switches to cut gravity, so the peak height grows with how
//! long the button was held, up to the max hold time.
//!
//! # Eligibility
//!
//! A jump is a ground jump when the character stands on settled ground, or
//! left the ground without jumping less than `coyote_time` ago. A ground jump
//! grants one air jump. The air jump is spent on use, and any unused one is
//! dropped once the character settles on the ground, whatever its state.
//! Walking off a ledge never grants one.

use super::character::{Character, GameplayState};
use super::motion_controller::MotionController;

impl MotionController {
    /// Try to jump. `velocity` defaults to the configured launch velocity.
    ///
    /// Returns whether a jump was accepted.
    pub fn jump(&self, character: &mut Character, velocity: Option<f32>) -> bool {
        if character.flags.attacking || !character.alive || character.flags.ducking {
            return false;
        }

        let velocity = velocity.unwrap_or(self.config.jump_velocity);

        if character.is_on_ground() || self.in_coyote_window(character) {
            self.launch(character, velocity);
            character.jump.can_double_jump = true;
            log::debug!("Ground jump at t={:.3}", character.time);
            true
        } else if character.jump.can_double_jump {
            character.jump.can_double_jump = false;
            self.launch(character, velocity * self.config.double_jump_scale);
            log::debug!("Double jump at t={:.3}", character.time);
            true
        } else {
            log::trace!("Jump ignored at t={:.3}: no jump available", character.time);
            false
        }
    }

    /// Release the jump input.
    ///
    /// Cuts the ascent when still rising faster than the cut threshold.
    pub fn jump_release(&self, character: &mut Character) {
        if !character.jump.button_held || character.state != GameplayState::Jumping {
            return;
        }

        character.jump.button_held = false;
        if -character.velocity.y > self.config.jump_cut_threshold {
            character.jump.cut = true;
            character.gravity = self.config.cut_gravity();
        }
    }

    /// Gravity for this tick.
    pub(crate) fn select_gravity(&self, character: &Character, airborne: bool) -> f32 {
        if !airborne {
            return self.config.normal_gravity;
        }

        let rising = character.velocity.y < 0.0;
        let jump = &character.jump;

        if jump.cut && rising {
            return self.config.cut_gravity();
        }

        let held_time = character.time - jump.start_time;
        if character.state == GameplayState::Jumping
            && jump.button_held
            && held_time <= self.config.max_jump_hold
            && rising
        {
            self.config.holding_gravity
        } else {
            self.config.normal_gravity
        }
    }

    /// Left the ground without jumping, recently enough to still jump.
    fn in_coyote_window(&self, character: &Character) -> bool {
        if character.jump.launched {
            return false;
        }
        character
            .jump
            .last_grounded_time
            .is_some_and(|t| character.time - t < self.config.coyote_time)
    }

    fn launch(&self, character: &mut Character, velocity: f32) {
        character.velocity.y = velocity;
        character.jump.button_held = true;
        character.jump.start_time = character.time;
        character.jump.cut = false;
        character.jump.launched = true;
        character.jump.last_grounded_time = None;
        character.gravity = self.config.holding_gravity;
        character.grounded = false;
        self.machine.request_state(character, GameplayState::Jumping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::MotionConfig;

    const DT: f32 = 1.0 / 60.0;

    fn grounded() -> (MotionController, Character) {
        let motion = MotionController::new(MotionConfig::default());
        let mut character = Character::new(motion.config());
        motion.tick(&mut character, DT, true);
        (motion, character)
    }

    #[test]
    fn test_ground_jump_launches() {
        let (motion, mut character) = grounded();
        assert!(motion.jump(&mut character, None));

        assert_eq!(character.velocity().y, -330.0);
        assert_eq!(character.state(), GameplayState::Jumping);
        assert_eq!(character.gravity(), 450.0);
        assert!(character.jump_state().button_held);
        assert!(character.can_double_jump());
        assert!(!character.is_on_ground());
    }

    #[test]
    fn test_two_jumps_then_nothing() {
        let (motion, mut character) = grounded();

        assert!(motion.jump(&mut character, Some(-330.0)));
        assert!(motion.jump(&mut character, Some(-330.0)));
        assert_eq!(character.velocity().y, -330.0);
        assert!(!character.can_double_jump());

        let before = character.velocity();
        assert!(!motion.jump(&mut character, Some(-330.0)));
        assert_eq!(character.velocity(), before);
    }

    #[test]
    fn test_stale_contact_after_launch_is_not_ground() {
        let (motion, mut character) = grounded();
        motion.jump(&mut character, None);

        // Physics has not moved the body yet: contact is still reported
        motion.tick(&mut character, DT, true);
        assert!(character.velocity().y < 0.0);

        assert!(motion.jump(&mut character, None));
        assert!(!motion.jump(&mut character, None));
    }

    #[test]
    fn test_double_jump_scale() {
        let config = MotionConfig {
            double_jump_scale: 0.8,
            ..MotionConfig::default()
        };
        let motion = MotionController::new(config);
        let mut character = Character::new(motion.config());
        motion.tick(&mut character, DT, true);

        motion.jump(&mut character, None);
        motion.jump(&mut character, None);
        assert!((character.velocity().y - (-264.0)).abs() < 0.001);
    }

    #[test]
    fn test_coyote_window_edges() {
        let window = MotionConfig::default().coyote_time;

        let (motion, mut inside) = grounded();
        let left_at = inside.time();
        inside.grounded = false;
        inside.time = left_at + window - 0.01;
        assert!(motion.jump(&mut inside, None));
        assert!(inside.can_double_jump());

        let (motion, mut outside) = grounded();
        let left_at = outside.time();
        outside.grounded = false;
        outside.time = left_at + window + 0.01;
        assert!(!motion.jump(&mut outside, None));
    }

    #[test]
    fn test_no_coyote_after_launch() {
        let (motion, mut character) = grounded();
        motion.jump(&mut character, None);
        motion.tick(&mut character, DT, false);

        // The air jump is the only one left
        assert!(motion.jump(&mut character, None));
        assert!(!motion.jump(&mut character, None));
    }

    #[test]
    fn test_jump_blocked_by_actions() {
        let (motion, mut character) = grounded();
        motion.duck(&mut character);
        assert!(!motion.jump(&mut character, None));

        motion.stand_up(&mut character);
        motion
            .state_machine()
            .request_state(&mut character, GameplayState::Attacking);
        assert!(!motion.jump(&mut character, None));

        motion
            .state_machine()
            .request_state(&mut character, GameplayState::Dead);
        assert!(!motion.jump(&mut character, None));
    }

    #[test]
    fn test_release_cuts_fast_ascent() {
        let (motion, mut character) = grounded();
        motion.jump(&mut character, None);
        motion.tick(&mut character, DT, false);

        motion.jump_release(&mut character);
        assert!(character.is_jump_cut());
        assert!(!character.jump_state().button_held);
        assert_eq!(character.gravity(), 1350.0);

        // Cut gravity survives the next tick's reselection
        motion.tick(&mut character, DT, false);
        assert_eq!(character.gravity(), 1350.0);
    }

    #[test]
    fn test_release_near_apex_does_not_cut() {
        let (motion, mut character) = grounded();
        motion.jump(&mut character, Some(-80.0));
        motion.tick(&mut character, DT, false);

        motion.jump_release(&mut character);
        assert!(!character.is_jump_cut());
        assert!(!character.jump_state().button_held);
    }

    #[test]
    fn test_release_without_jump_is_noop() {
        let (motion, mut character) = grounded();
        let before = character.jump_state();
        motion.jump_release(&mut character);
        assert_eq!(character.jump_state(), before);
    }

    #[test]
    fn test_holding_gravity_expires() {
        let (motion, mut character) = grounded();
        motion.jump(&mut character, None);

        motion.tick(&mut character, DT, false);
        assert_eq!(character.gravity(), 450.0);

        // 0.3s > max hold, still rising
        for _ in 0..17 {
            motion.tick(&mut character, DT, false);
        }
        assert!(character.velocity().y < 0.0);
        assert_eq!(character.gravity(), 900.0);
    }

    #[test]
    fn test_landing_restores_air_jump_grant() {
        let (motion, mut character) = grounded();
        motion.jump(&mut character, None);
        motion.jump(&mut character, None);

        for _ in 0..120 {
            motion.tick(&mut character, DT, false);
        }
        motion.tick(&mut character, DT, true);
        assert_eq!(character.state(), GameplayState::Idle);
        assert!(!character.can_double_jump());

        assert!(motion.jump(&mut character, None));
        assert!(character.can_double_jump());
    }
}
