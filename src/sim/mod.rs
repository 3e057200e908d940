//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod boundary;
pub mod camera;
pub mod collision;
pub mod color;
pub mod entity;
pub mod geometry;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use boundary::{BoundaryRing, Segment};
pub use camera::{LateralBounds, compute_delta};
pub use collision::{Extent, collides, footprint};
pub use color::ColorAnimator;
pub use entity::TunnelEntity;
pub use geometry::{CUBE, CubeFaces, Face, Translate, Translation, make_cube, translate};
pub use obstacle::{Corner, Motion, Obstacle, ObstacleField};
pub use state::{GamePhase, Player, SimulationState};
pub use tick::{InputEvent, TickInput, click_quits, tick};
