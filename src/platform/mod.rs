//! Platform abstraction layer
//!
//! The simulation talks to the outside world only through these traits:
//! - Frame pacing
//! - Input events and the pointer position
//! - Screen geometry
//! - Quad submission and text textures
//!
//! [`run_session`] drives the tick loop through them.

pub mod headless;

use glam::Vec2;

use crate::renderer::{FrameGeometry, GameOverLabels, TextTexture, build_frame};
use crate::settings::Settings;
use crate::sim::{GamePhase, InputEvent, SimulationState, TickInput, tick};

pub use headless::HeadlessPlatform;

/// Blocks until the next frame slot
pub trait FramePacer {
    fn wait_for_next_frame(&mut self, target_fps: u32);
}

/// Drains pending input, oldest first
pub trait EventSource {
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

pub trait PointerSource {
    /// Pointer position in screen pixels
    fn pointer_position(&self) -> Vec2;
}

pub trait ScreenGeometry {
    /// Screen size in pixels, fixed for the session
    fn screen_size(&self) -> Vec2;
}

/// Draws a finished frame
pub trait Renderer {
    fn draw(&mut self, frame: &FrameGeometry);
}

/// Rasterizes strings into textures
pub trait TextTextures {
    fn texture_for(&mut self, text: &str) -> TextTexture;
}

/// Everything a session needs from the host
pub trait Platform:
    FramePacer + EventSource + PointerSource + ScreenGeometry + Renderer + TextTextures
{
}

impl<T> Platform for T where
    T: FramePacer + EventSource + PointerSource + ScreenGeometry + Renderer + TextTextures
{
}

/// Outcome of a finished session
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    /// Score of every finished run, in play order
    pub scores: Vec<u64>,
    /// Runs started, including one abandoned by quitting
    pub runs: u32,
    pub ticks: u64,
}

impl SessionSummary {
    pub fn best(&self) -> Option<u64> {
        self.scores.iter().copied().max()
    }
}

/// Run the game until the player quits
pub fn run_session<P: Platform>(platform: &mut P, settings: Settings, seed: u64) -> SessionSummary {
    let mut state = SimulationState::new(settings, platform.screen_size(), seed);
    let mut summary = SessionSummary::default();
    let mut labels: Option<GameOverLabels> = None;

    log::info!("Session starting with seed {seed}");

    while state.phase != GamePhase::Quit {
        platform.wait_for_next_frame(state.target_fps());

        let input = TickInput {
            events: platform.poll_events(),
            pointer: Some(platform.pointer_position()),
        };
        let before = state.phase;
        tick(&mut state, &input);

        if state.phase != before {
            match state.phase {
                GamePhase::GameOver => {
                    let score = state.score.unwrap_or_default();
                    summary.scores.push(score);
                    log::info!("Run {} scored {score}", state.runs);
                    labels = Some(GameOverLabels {
                        score: platform.texture_for(&score.to_string()),
                        again: platform.texture_for("again"),
                        quit: platform.texture_for("quit"),
                    });
                }
                _ => labels = None,
            }
        }

        if state.phase == GamePhase::Quit {
            break;
        }
        platform.draw(&build_frame(&state, labels.as_ref()));
    }

    summary.runs = state.runs;
    summary.ticks = state.time_ticks;
    log::info!(
        "Session over after {} run(s); best score {:?}",
        summary.runs,
        summary.best()
    );
    summary
}
