//! Headless Platformer Demo
//!
//! Run with: `cargo run --bin platformer_demo [script.json] [config.json]`
//!
//! Simulates one character at 60 Hz on a small level (a floor, a gap, and a
//! lower ledge), driven by a scripted input timeline. State changes are
//! logged; set `RUST_LOG=debug` (or `trace`) for transition and tick detail.
//!
//! Script format:
//!
//! ```json
//! {
//!   "duration": 6.0,
//!   "steps": [
//!     { "at": 0.2, "command": { "action": "walk", "direction": "right" } },
//!     { "at": 0.8, "command": { "action": "jump" } },
//!     { "at": 0.9, "command": { "action": "jump_release" } }
//!   ]
//! }
//! ```
//!
//! A `walk` command stays held (re-issued every frame) until `stop_walking`.

use std::error::Error;
use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use ledge_runner_engine::physics::{Platform, Sandbox};
use ledge_runner_engine::player::{Collider, MotionConfig};
use ledge_runner_engine::{AnimKey, CharacterCommand, ClipPlayer, Direction, PlayerController};

// ============================================================================
// CONSTANTS
// ============================================================================

const FRAME_DT: f32 = 1.0 / 60.0;
const FLOOR_Y: f32 = 400.0;
const LEDGE_Y: f32 = 460.0;
/// Below this the character has fallen out of the level.
const KILL_Y: f32 = 900.0;

// ============================================================================
// SCRIPT
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
struct Script {
    duration: f32,
    steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct ScriptStep {
    at: f32,
    command: CharacterCommand,
}

impl Script {
    fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let json = std::fs::read_to_string(path)?;
        let mut script: Script = serde_json::from_str(&json)?;
        script.steps.sort_by(|a, b| a.at.total_cmp(&b.at));
        log::info!("Loaded {} script steps from {}", script.steps.len(), path.display());
        Ok(script)
    }

    fn builtin() -> Self {
        let walk_right = CharacterCommand::Walk {
            direction: Direction::Right,
            speed: None,
        };
        let steps = [
            (0.2, walk_right),
            (0.8, CharacterCommand::Jump { velocity: None }),
            (0.95, CharacterCommand::JumpRelease),
            (1.6, CharacterCommand::StopWalking),
            (2.0, CharacterCommand::Duck),
            (2.5, CharacterCommand::StandUp),
            (2.8, CharacterCommand::Attack),
            (3.4, walk_right),
            (5.0, CharacterCommand::StopWalking),
            (5.3, CharacterCommand::Talk),
            (6.0, CharacterCommand::StopTalking),
        ];
        Self {
            duration: 7.0,
            steps: steps
                .into_iter()
                .map(|(at, command)| ScriptStep { at, command })
                .collect(),
        }
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let script = match args.next() {
        Some(path) => Script::load(Path::new(&path))?,
        None => Script::builtin(),
    };
    let config = match args.next() {
        Some(path) => MotionConfig::load(path)?,
        None => MotionConfig::default(),
    };

    let collider = Collider::full(config.collider_size);
    let mut sandbox = Sandbox::new(Vec2::new(64.0, FLOOR_Y - collider.feet_y()))
        .with_platform(Platform::new(0.0, 480.0, FLOOR_Y))
        .with_platform(Platform::new(560.0, 1600.0, LEDGE_Y));

    let mut player = PlayerController::new(config);
    let mut clips = ClipPlayer::with_durations([
        (AnimKey::Attack, 0.3),
        (AnimKey::Hurt, 0.25),
        (AnimKey::Jump, 0.2),
        (AnimKey::Die, 0.6),
    ]);

    let mut touching = sandbox.step(Vec2::ZERO, collider, FRAME_DT);
    let mut held_walk: Option<CharacterCommand> = None;
    let mut next_step = 0;
    let mut time = 0.0_f32;
    let mut state = player.state();
    let mut peak_height = 0.0_f32;

    log::info!(
        "Simulating {:.1}s at {:.0} Hz with {} scripted steps",
        script.duration,
        1.0 / FRAME_DT,
        script.steps.len()
    );

    while time < script.duration {
        time += FRAME_DT;

        // Input edges due this frame
        while let Some(step) = script.steps.get(next_step).filter(|s| s.at <= time) {
            match step.command {
                CharacterCommand::Walk { .. } => held_walk = Some(step.command),
                CharacterCommand::StopWalking => held_walk = None,
                _ => {}
            }
            log::debug!("t={:.2}s input {:?}", time, step.command);
            player.apply(step.command);
            next_step += 1;
        }
        if let Some(command) = held_walk {
            player.apply(command);
        }

        let report = player.update(time, FRAME_DT, touching);
        touching = sandbox.step(report.velocity, report.collider, FRAME_DT);

        clips.play_all(player.drain_animation_commands());
        for key in clips.advance(FRAME_DT) {
            player.on_animation_complete(key);
        }

        let feet = sandbox.feet_y(&report.collider);
        peak_height = peak_height.max(FLOOR_Y - feet);
        if feet > KILL_Y && !player.is_dead() {
            log::warn!("t={:.2}s fell out of the level", time);
            player.die();
        }

        if player.state() != state {
            log::info!(
                "t={:.2}s {:?} -> {:?} at ({:.1}, {:.1}) v=({:.1}, {:.1})",
                time,
                state,
                player.state(),
                sandbox.position().x,
                feet,
                report.velocity.x,
                report.velocity.y
            );
            state = player.state();
        }
    }

    let final_report = player.report();
    println!("Simulated {:.2}s", time);
    println!("  final state:  {:?}", final_report.state);
    println!(
        "  position:     ({:.1}, {:.1})",
        sandbox.position().x,
        sandbox.feet_y(&final_report.collider)
    );
    println!("  peak height:  {:.1} px above the floor", peak_height);
    println!("  report:       {}", serde_json::to_string(&final_report)?);
    Ok(())
}
