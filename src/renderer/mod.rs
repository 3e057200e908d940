//! Rendering hand-off
//!
//! Builds textured quads from the simulation for an external renderer.

pub mod frame;
pub mod vertex;

pub use frame::{
    FrameGeometry, GameOverLabels, QuadBatch, QuadTag, TextTexture, TextureHandle, build_frame,
};
pub use vertex::{Quad, QuadVertex};
