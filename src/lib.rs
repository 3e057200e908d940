//! Tunnel Run - an endless 3D tunnel runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tunnel ring, obstacles, collisions, game state)
//! - `renderer`: Quad generation for the external renderer
//! - `platform`: Collaborator traits (pacing, input, drawing, text) and the session loop
//! - `settings`: Data-driven configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Half-size of every cube (obstacles and wall quads)
    pub const CUBE_SIZE: f32 = 0.25;
    /// Lateral bound of the player position on both axes
    pub const BOUND: f32 = CUBE_SIZE * 7.0 / 5.0;
    /// Footprint sample offset from the player position
    pub const FOOTPRINT_OFFSET: f32 = BOUND - CUBE_SIZE * 2.0;

    /// Distance between consecutive tunnel segments along -Z
    pub const SEGMENT_STEP: f32 = 0.5;
    /// Obstacles spawn this far behind the ring cursor (toward the player)
    pub const OBSTACLE_LEAD: f32 = 1.0;

    /// Default play rate
    pub const DEFAULT_FPS: u32 = 40;
    /// Starting forward speed (units per tick)
    pub const INITIAL_SPEED: f32 = 0.1;
    /// Speed gain per playing tick
    pub const SPEED_GAIN: f32 = 5e-5;

    /// Pointer offset is divided by this multiple of the screen extent
    pub const POINTER_SCALE: f32 = 2.0;

    /// Starting ambient color
    pub const INITIAL_COLOR: [f32; 3] = [0.0, 0.3, 0.8];
    /// If every channel drops below this, the color is bumped
    pub const COLOR_FLOOR: f32 = 0.2;
    pub const COLOR_BUMP: f32 = 0.5;
}

/// Round to four decimal places
#[inline]
pub fn round4(v: f32) -> f32 {
    (v * 10_000.0).round() / 10_000.0
}
