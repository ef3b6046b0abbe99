//! Headless Clip Player
//!
//! Stands in for the sprite renderer when the controller runs without one
//! (demo binary, integration tests). It consumes [`AnimationCommand`]s, keeps
//! a clock for the active clip, and reports the key of every one-shot clip
//! that runs to its end. Looping clips never complete.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut clips = ClipPlayer::new();
//! clips.set_duration(AnimKey::Attack, 0.3);
//!
//! // Each frame:
//! clips.play_all(player.drain_animation_commands());
//! for key in clips.advance(delta_time) {
//!     player.on_animation_complete(key);
//! }
//! ```

use std::collections::HashMap;

use super::{AnimKey, AnimationCommand};

/// Clip length used for keys without an explicit duration, in seconds.
pub const DEFAULT_CLIP_DURATION: f32 = 0.4;

/// Active clip bookkeeping.
#[derive(Debug, Clone, Copy)]
struct ActiveClip {
    command: AnimationCommand,
    elapsed: f32,
    finished: bool,
}

/// Times clips and reports one-shot completions.
#[derive(Debug, Clone, Default)]
pub struct ClipPlayer {
    durations: HashMap<AnimKey, f32>,
    active: Option<ActiveClip>,
}

impl ClipPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a player with per-key clip lengths.
    pub fn with_durations(durations: impl IntoIterator<Item = (AnimKey, f32)>) -> Self {
        Self {
            durations: durations.into_iter().collect(),
            active: None,
        }
    }

    pub fn set_duration(&mut self, key: AnimKey, seconds: f32) {
        self.durations.insert(key, seconds);
    }

    pub fn duration(&self, key: AnimKey) -> f32 {
        self.durations
            .get(&key)
            .copied()
            .unwrap_or(DEFAULT_CLIP_DURATION)
    }

    /// Key of the clip on screen, if any.
    pub fn playing(&self) -> Option<AnimKey> {
        self.active.map(|clip| clip.command.key)
    }

    /// Start a clip. A command for the clip already playing only restarts it
    /// when `restart` is set.
    pub fn play(&mut self, command: AnimationCommand) {
        if let Some(active) = &mut self.active {
            if active.command.key == command.key && !command.restart {
                active.command = command;
                return;
            }
        }
        self.active = Some(ActiveClip {
            command,
            elapsed: 0.0,
            finished: false,
        });
    }

    pub fn play_all(&mut self, commands: impl IntoIterator<Item = AnimationCommand>) {
        for command in commands {
            self.play(command);
        }
    }

    /// Advance the active clip and return the keys that completed this frame.
    pub fn advance(&mut self, dt: f32) -> Vec<AnimKey> {
        let mut completed = Vec::new();
        let Some(key) = self.playing() else {
            return completed;
        };
        let length = self.duration(key);
        let Some(clip) = &mut self.active else {
            return completed;
        };
        if clip.finished || !clip.command.playback.is_one_shot() {
            return completed;
        }

        clip.elapsed += dt;
        if clip.elapsed >= length {
            clip.finished = true;
            completed.push(clip.command.key);
        }
        completed
    }
}
