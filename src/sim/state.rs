//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`SimulationState`]; there is
//! no global state.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::boundary::BoundaryRing;
use super::camera::LateralBounds;
use super::color::ColorAnimator;
use super::obstacle::ObstacleField;
use crate::settings::Settings;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Nothing built yet
    Start,
    /// Active gameplay
    Playing,
    /// Frozen on the collision frame
    Collided,
    /// Score shown, waiting for "again" or "quit"
    GameOver,
    /// Tunnel rebuilding, then waiting for a click to play
    Restarting,
    /// Session finished
    Quit,
}

/// Player position and motion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Lateral (x, y) position
    pub lateral: Vec2,
    /// Distance traveled since play started; the score source
    pub traveled: f32,
    /// Forward coordinate at which scoring started
    pub origin_z: f32,
    /// Forward distance per tick
    pub speed: f32,
    pub bounds: LateralBounds,
}

impl Player {
    pub fn new(speed: f32) -> Self {
        Self {
            lateral: Vec2::ZERO,
            traveled: 0.0,
            origin_z: 0.0,
            speed,
            bounds: LateralBounds::default(),
        }
    }

    /// Current coordinate on the forward axis (decreases as the player moves)
    #[inline]
    pub fn forward_z(&self) -> f32 {
        self.origin_z - self.traveled
    }

    /// Eye position for the renderer
    pub fn eye(&self) -> Vec3 {
        self.lateral.extend(self.forward_z())
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub settings: Settings,
    /// Run seed for reproducibility
    pub seed: u64,
    /// The single random source of the simulation
    pub rng: Pcg32,
    /// Screen size in pixels, fixed for the session
    pub screen: Vec2,
    pub phase: GamePhase,
    /// Countdown for timed phases (collision hold, game-over ceiling)
    pub phase_ticks: u32,
    /// Restart finished scrolling in and waits for a click
    pub awaiting_start: bool,
    /// Window focus; play is suspended without it
    pub active: bool,
    pub player: Player,
    pub ring: BoundaryRing,
    pub obstacles: ObstacleField,
    pub color: ColorAnimator,
    /// Score of the last finished run
    pub score: Option<u64>,
    /// Runs started in this session
    pub runs: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimulationState {
    /// Create a new state with the given seed; the first tick builds the tunnel
    pub fn new(settings: Settings, screen: Vec2, seed: u64) -> Self {
        let settings = settings.sanitized();
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = ObstacleField::new(&mut rng);
        let color = ColorAnimator::new(&mut rng);
        Self {
            player: Player::new(settings.initial_speed),
            ring: BoundaryRing::new(settings.ring_length),
            settings,
            seed,
            rng,
            screen,
            phase: GamePhase::Start,
            phase_ticks: 0,
            awaiting_start: false,
            active: true,
            obstacles,
            color,
            score: None,
            runs: 0,
            time_ticks: 0,
        }
    }

    /// Frame rate the pacer should run the current phase at
    pub fn target_fps(&self) -> u32 {
        match self.phase {
            GamePhase::Restarting if self.awaiting_start => self.settings.prompt_fps,
            GamePhase::Restarting => self.settings.restart_fps,
            _ => self.settings.fps,
        }
    }

    /// Reset per-run state. Allocated segments and obstacles are parked
    /// for reuse, not dropped.
    pub fn reset_session(&mut self) {
        self.player = Player::new(self.settings.initial_speed);
        self.obstacles.reset(&mut self.rng);
        self.ring.reset();
        self.score = None;
        self.active = true;
        self.awaiting_start = false;
        self.phase_ticks = 0;
    }
}
