//! Game settings
//!
//! Loaded from an optional JSON file. Missing fields take the defaults of
//! the classic game; a missing or broken file falls back to all defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FPS, INITIAL_SPEED, SPEED_GAIN};

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frame rate while playing and on the game-over screen
    pub fps: u32,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,

    // === Movement ===
    /// Forward speed at the start of each run
    pub initial_speed: f32,
    /// Forward speed gained every playing tick
    pub acceleration: f32,

    // === Tunnel ===
    /// Number of wall segments kept alive
    pub ring_length: usize,
    /// Segments placed at once when restarting, before the scroll-in
    pub restart_preload: usize,

    // === Pacing of the non-play screens ===
    /// Frame rate of the restart scroll-in
    pub restart_fps: u32,
    /// Frame rate of the "click to play" prompt
    pub prompt_fps: u32,
    /// How long the collision frame stays frozen
    pub collision_hold_ms: u32,
    /// How long the game-over screen waits before quitting
    pub game_over_seconds: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            seed: None,

            initial_speed: INITIAL_SPEED,
            acceleration: SPEED_GAIN,

            ring_length: 20,
            restart_preload: 6,

            restart_fps: 18,
            prompt_fps: 15,
            collision_hold_ms: 500,
            game_over_seconds: 30,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("Could not read settings from {}: {err}", path.display());
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(err) => {
                log::warn!("Invalid settings in {}: {err}; using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Replace values that would stall the game with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.fps == 0 {
            self.fps = defaults.fps;
        }
        if self.restart_fps == 0 {
            self.restart_fps = defaults.restart_fps;
        }
        if self.prompt_fps == 0 {
            self.prompt_fps = defaults.prompt_fps;
        }
        if self.ring_length == 0 {
            self.ring_length = defaults.ring_length;
        }
        self.restart_preload = self.restart_preload.min(self.ring_length);
        self
    }

    /// Ticks the collision frame stays on screen (at least one)
    pub fn collision_hold_ticks(&self) -> u32 {
        (self.collision_hold_ms * self.fps / 1000).max(1)
    }

    /// Tick ceiling of the game-over screen
    pub fn game_over_ticks(&self) -> u32 {
        self.fps * self.game_over_seconds
    }
}
