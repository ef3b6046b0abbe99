//! Animation Module
//!
//! The contract between the character core and whatever plays sprite animations.
//! The core never talks to a renderer directly: every state entry pushes an
//! [`AnimationCommand`] onto an outbound queue, and the host feeds completion
//! notifications back through `on_animation_complete`.
//!
//! # Keys
//!
//! Animation keys are a closed set shared with the sprite-sheet preloader:
//! `idle`, `walk`, `jump`, `duck`, `attack`, `hurt`, `die`, `talk`.
//!
//! # Submodules
//!
//! - [`clip_player`] - Headless clip timer that reports one-shot completions

pub mod clip_player;

pub use clip_player::{ClipPlayer, DEFAULT_CLIP_DURATION};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sprite animation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimKey {
    Idle,
    Walk,
    Jump,
    Duck,
    Attack,
    Hurt,
    Die,
    Talk,
}

impl AnimKey {
    /// Every key, in sprite-sheet tag order.
    pub const ALL: [AnimKey; 8] = [
        AnimKey::Idle,
        AnimKey::Walk,
        AnimKey::Jump,
        AnimKey::Duck,
        AnimKey::Attack,
        AnimKey::Hurt,
        AnimKey::Die,
        AnimKey::Talk,
    ];

    /// The string identifier used by the sprite-sheet tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimKey::Idle => "idle",
            AnimKey::Walk => "walk",
            AnimKey::Jump => "jump",
            AnimKey::Duck => "duck",
            AnimKey::Attack => "attack",
            AnimKey::Hurt => "hurt",
            AnimKey::Die => "die",
            AnimKey::Talk => "talk",
        }
    }
}

impl fmt::Display for AnimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimKey {
    type Err = UnknownAnimKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownAnimKey(s.to_string()))
    }
}

/// A string that is not one of the sprite-sheet tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAnimKey(pub String);

impl fmt::Display for UnknownAnimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown animation key: {}", self.0)
    }
}

impl std::error::Error for UnknownAnimKey {}

/// How a clip plays once started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Playback {
    /// Repeats until replaced.
    Loop,
    /// Plays once, then reports completion.
    Once,
    /// Plays once, reports completion, and holds the last frame.
    OnceHold,
}

impl Playback {
    /// Whether the clip ever completes.
    pub fn is_one_shot(&self) -> bool {
        !matches!(self, Playback::Loop)
    }
}

/// A "play animation" request for the render collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationCommand {
    pub key: AnimKey,
    pub playback: Playback,
    /// Restart from frame zero even if `key` is already playing.
    pub restart: bool,
}

impl AnimationCommand {
    pub fn new(key: AnimKey, playback: Playback) -> Self {
        Self {
            key,
            playback,
            restart: playback.is_one_shot(),
        }
    }
}

/// Outbound animation commands plus the most recently selected clip.
#[derive(Debug, Clone, Default)]
pub struct AnimationQueue {
    pending: Vec<AnimationCommand>,
    current: Option<AnimationCommand>,
}

impl AnimationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command. The command also becomes the current clip.
    ///
    /// Re-selecting the looping clip that is already current is dropped.
    pub fn push(&mut self, command: AnimationCommand) {
        if !command.restart && self.current == Some(command) {
            return;
        }
        self.current = Some(command);
        self.pending.push(command);
    }

    /// The last clip the core selected.
    pub fn current(&self) -> Option<AnimationCommand> {
        self.current
    }

    /// Commands not yet handed to the host.
    pub fn pending(&self) -> &[AnimationCommand] {
        &self.pending
    }

    /// Hand all queued commands to the host, oldest first.
    pub fn drain(&mut self) -> Vec<AnimationCommand> {
        std::mem::take(&mut self.pending)
    }
}
