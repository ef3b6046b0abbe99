//! Gameplay State Machine
//!
//! Applies discrete state transitions to a [`Character`] and replays their
//! entry side effects.
//!
//! # Transition Policy
//!
//! The machine does not check whether a target is reachable from the current
//! state. Callers gate their own requests (walk is a no-op while attacking,
//! duck needs ground contact, ...). The only rule enforced here is that Dead
//! is absorbing: once `alive` is false, every request except Dead is dropped.
//!
//! # Entry Side Effects
//!
//! Applied on every accepted request, in this order:
//!
//! 1. Clear the exclusive flags (attacking, ducking, talking)
//! 2. Set the flag owned by the target state, if any
//! 3. Resize the collider for the target stance (feet-anchored)
//! 4. Queue the target's animation
//!
//! Re-entering the current state replays the same effects and leaves the
//! character unchanged apart from restarting a one-shot clip.

use super::character::{Character, GameplayState};
use super::collider::Stance;
use crate::animation::{AnimKey, AnimationCommand, Playback};

/// Everything a state does on entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateEntry {
    pub attacking: bool,
    pub ducking: bool,
    pub talking: bool,
    pub stance: Stance,
    pub animation: AnimationCommand,
}

impl GameplayState {
    /// Entry side effects for this state.
    pub fn entry(&self) -> StateEntry {
        let (key, playback) = self.animation();
        StateEntry {
            attacking: matches!(self, GameplayState::Attacking),
            ducking: matches!(self, GameplayState::Ducking),
            talking: matches!(self, GameplayState::Talking),
            stance: match self {
                GameplayState::Ducking => Stance::Ducking,
                _ => Stance::Standing,
            },
            animation: AnimationCommand::new(key, playback),
        }
    }

    /// Clip and playback mode for this state.
    pub fn animation(&self) -> (AnimKey, Playback) {
        match self {
            GameplayState::Idle => (AnimKey::Idle, Playback::Loop),
            GameplayState::Walking => (AnimKey::Walk, Playback::Loop),
            GameplayState::Jumping => (AnimKey::Jump, Playback::OnceHold),
            GameplayState::Ducking => (AnimKey::Duck, Playback::OnceHold),
            GameplayState::Attacking => (AnimKey::Attack, Playback::Once),
            GameplayState::Hurt => (AnimKey::Hurt, Playback::Once),
            GameplayState::Dead => (AnimKey::Die, Playback::OnceHold),
            GameplayState::Talking => (AnimKey::Talk, Playback::Loop),
        }
    }
}

/// Stateless transition service over [`Character`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StateMachine;

impl StateMachine {
    pub fn new() -> Self {
        Self
    }

    /// Enter `target`, replaying its entry side effects.
    ///
    /// Returns `false` without touching the character if it is dead and
    /// `target` is not [`GameplayState::Dead`].
    pub fn request_state(&self, character: &mut Character, target: GameplayState) -> bool {
        if !character.alive && target != GameplayState::Dead {
            log::trace!("Dropped {:?} request: character is dead", target);
            return false;
        }

        let previous = character.state;
        let entry = target.entry();
        character.state = target;

        character.flags.attacking = entry.attacking;
        character.flags.ducking = entry.ducking;
        character.flags.talking = entry.talking;

        if target == GameplayState::Dead {
            character.alive = false;
        }

        character
            .collider
            .apply_stance(entry.stance, character.full_height);

        character.animations.push(entry.animation);

        if previous != target {
            log::debug!("State {:?} -> {:?} at t={:.3}", previous, target, character.time);
        }
        true
    }

    /// React to the render collaborator finishing a one-shot clip.
    pub fn on_animation_complete(&self, character: &mut Character, key: AnimKey) {
        match key {
            AnimKey::Attack => {
                character.flags.attacking = false;
                if character.state == GameplayState::Attacking {
                    self.request_state(character, GameplayState::Idle);
                }
            }
            AnimKey::Jump => {
                if character.state == GameplayState::Jumping && character.is_on_ground() {
                    self.request_state(character, GameplayState::Idle);
                }
            }
            AnimKey::Hurt => {
                if character.state == GameplayState::Hurt && character.alive {
                    self.request_state(character, GameplayState::Idle);
                }
            }
            AnimKey::Die => {
                character.alive = false;
            }
            AnimKey::Idle | AnimKey::Walk | AnimKey::Duck | AnimKey::Talk => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::MotionConfig;

    const ALL_STATES: [GameplayState; 8] = [
        GameplayState::Idle,
        GameplayState::Walking,
        GameplayState::Jumping,
        GameplayState::Ducking,
        GameplayState::Attacking,
        GameplayState::Hurt,
        GameplayState::Dead,
        GameplayState::Talking,
    ];

    fn character() -> Character {
        Character::new(&MotionConfig::default())
    }

    #[test]
    fn test_at_most_one_flag_per_state() {
        for state in ALL_STATES {
            let entry = state.entry();
            let set = [entry.attacking, entry.ducking, entry.talking]
                .iter()
                .filter(|flag| **flag)
                .count();
            assert!(set <= 1, "{state:?} sets {set} flags");
        }
    }

    #[test]
    fn test_only_ducking_halves_collider() {
        for state in ALL_STATES {
            let expected = if state == GameplayState::Ducking {
                Stance::Ducking
            } else {
                Stance::Standing
            };
            assert_eq!(state.entry().stance, expected);
        }
    }

    #[test]
    fn test_flags_follow_state() {
        let machine = StateMachine::new();
        let mut character = character();

        machine.request_state(&mut character, GameplayState::Attacking);
        assert!(character.is_attacking());

        machine.request_state(&mut character, GameplayState::Talking);
        assert!(character.is_talking());
        assert!(!character.is_attacking());

        machine.request_state(&mut character, GameplayState::Ducking);
        assert!(character.is_ducking());
        assert!(!character.is_talking());

        machine.request_state(&mut character, GameplayState::Idle);
        assert_eq!(character.flags(), Default::default());
    }

    #[test]
    fn test_dead_is_absorbing() {
        let machine = StateMachine::new();
        let mut character = character();

        assert!(machine.request_state(&mut character, GameplayState::Dead));
        assert!(!character.is_alive());

        for state in ALL_STATES {
            if state == GameplayState::Dead {
                continue;
            }
            assert!(!machine.request_state(&mut character, state));
            assert_eq!(character.state(), GameplayState::Dead);
        }
        assert!(machine.request_state(&mut character, GameplayState::Dead));
    }

    #[test]
    fn test_rejected_request_has_no_side_effects() {
        let machine = StateMachine::new();
        let mut character = character();
        machine.request_state(&mut character, GameplayState::Dead);
        let queued = character.pending_animations().len();

        machine.request_state(&mut character, GameplayState::Ducking);
        assert_eq!(character.pending_animations().len(), queued);
        assert_eq!(character.collider().size.y, 64.0);
    }

    #[test]
    fn test_request_is_idempotent() {
        let machine = StateMachine::new();
        for state in ALL_STATES {
            let mut once = character();
            machine.request_state(&mut once, state);

            let mut twice = character();
            machine.request_state(&mut twice, state);
            machine.request_state(&mut twice, state);

            assert_eq!(once.state(), twice.state());
            assert_eq!(once.flags(), twice.flags());
            assert_eq!(once.is_alive(), twice.is_alive());
            assert_eq!(once.collider(), twice.collider());
            assert_eq!(once.current_animation(), twice.current_animation());
        }
    }

    #[test]
    fn test_attack_complete_returns_to_idle() {
        let machine = StateMachine::new();
        let mut character = character();
        machine.request_state(&mut character, GameplayState::Attacking);

        machine.on_animation_complete(&mut character, AnimKey::Attack);
        assert!(!character.is_attacking());
        assert_eq!(character.state(), GameplayState::Idle);
    }

    #[test]
    fn test_jump_complete_needs_ground() {
        let machine = StateMachine::new();
        let mut character = character();
        machine.request_state(&mut character, GameplayState::Jumping);

        machine.on_animation_complete(&mut character, AnimKey::Jump);
        assert_eq!(character.state(), GameplayState::Jumping);

        character.set_grounded(true);
        machine.on_animation_complete(&mut character, AnimKey::Jump);
        assert_eq!(character.state(), GameplayState::Idle);
    }

    #[test]
    fn test_hurt_complete_returns_to_idle() {
        let machine = StateMachine::new();
        let mut character = character();
        machine.request_state(&mut character, GameplayState::Hurt);

        machine.on_animation_complete(&mut character, AnimKey::Hurt);
        assert_eq!(character.state(), GameplayState::Idle);
    }

    #[test]
    fn test_die_complete_keeps_dead() {
        let machine = StateMachine::new();
        let mut character = character();
        machine.request_state(&mut character, GameplayState::Dead);

        machine.on_animation_complete(&mut character, AnimKey::Die);
        assert_eq!(character.state(), GameplayState::Dead);
        assert!(!character.is_alive());
    }

    #[test]
    fn test_animation_table() {
        assert_eq!(
            GameplayState::Jumping.animation(),
            (AnimKey::Jump, Playback::OnceHold)
        );
        assert_eq!(GameplayState::Talking.animation(), (AnimKey::Talk, Playback::Loop));
        assert_eq!(GameplayState::Dead.animation(), (AnimKey::Die, Playback::OnceHold));
    }
}
