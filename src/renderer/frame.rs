//! Per-frame quad generation
//!
//! Turns the simulation state into ordered quad batches. The external
//! renderer only has to upload and draw them; no rendering handle is kept
//! here.

use glam::{Vec2, Vec3};

use super::vertex::{Quad, colors, quad_from_face, quad_from_points};
use crate::sim::{GamePhase, SimulationState, TunnelEntity};

/// Opaque texture reference handed out by the text provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// A rendered string: its texture and height / width ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextTexture {
    pub handle: TextureHandle,
    pub aspect: f32,
}

/// Textures shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverLabels {
    pub score: TextTexture,
    pub again: TextTexture,
    pub quit: TextTexture,
}

/// What a batch is textured with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadTag {
    /// Shaded glow texture tinted with the ambient color
    Glow,
    /// Play button of the start prompt
    PlayButton,
    Text(TextureHandle),
}

/// Quads sharing a texture and color
#[derive(Debug, Clone)]
pub struct QuadBatch {
    pub tag: QuadTag,
    pub color: [f32; 4],
    /// Alpha-blended on top of the tunnel
    pub blend: bool,
    pub quads: Vec<Quad>,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone)]
pub struct FrameGeometry {
    /// Camera position; the camera always looks down -Z
    pub eye: Vec3,
    pub clear_color: [f32; 4],
    pub batches: Vec<QuadBatch>,
}

impl FrameGeometry {
    pub fn quad_count(&self) -> usize {
        self.batches.iter().map(|b| b.quads.len()).sum()
    }

    pub fn has_tag(&self, pred: impl Fn(QuadTag) -> bool) -> bool {
        self.batches.iter().any(|b| pred(b.tag))
    }
}

/// Half extents that fit a label of the given aspect into a unit box
pub fn fit_label(aspect: f32) -> Vec2 {
    if aspect > 1.0 {
        Vec2::new(0.5 / aspect, 0.5)
    } else {
        Vec2::new(0.5, 0.5 * aspect)
    }
}

/// Build the quad batches for the current phase
pub fn build_frame(state: &SimulationState, labels: Option<&GameOverLabels>) -> FrameGeometry {
    let z = state.player.forward_z();
    let ambient = state.color.color.extend(1.0).to_array();
    let inverse = state.color.inverse().extend(1.0).to_array();

    let mut glow: Vec<Quad> = state
        .ring
        .segments()
        .flat_map(|segment| segment.quads())
        .map(quad_from_face)
        .collect();
    if matches!(state.phase, GamePhase::Playing | GamePhase::Collided) {
        glow.extend(
            state
                .obstacles
                .live()
                .flat_map(|obstacle| obstacle.quads())
                .map(quad_from_face),
        );
    }

    let mut batches = vec![QuadBatch {
        tag: QuadTag::Glow,
        color: ambient,
        blend: false,
        quads: glow,
    }];

    match state.phase {
        GamePhase::GameOver => {
            if let Some(labels) = labels {
                let half = fit_label(labels.score.aspect);
                let sz = z - 5.0;
                batches.push(QuadBatch {
                    tag: QuadTag::Text(labels.score.handle),
                    color: inverse,
                    blend: true,
                    quads: vec![quad_from_points([
                        [-half.x, -half.y, sz],
                        [-half.x, half.y, sz],
                        [half.x, half.y, sz],
                        [half.x, -half.y, sz],
                    ])],
                });
                // "again" on the lower left wall, "quit" on the upper right wall
                batches.push(QuadBatch {
                    tag: QuadTag::Text(labels.again.handle),
                    color: colors::AGAIN,
                    blend: true,
                    quads: vec![quad_from_points([
                        [-0.49, -0.49, z - 0.5],
                        [-0.49, 0.0, z - 0.5],
                        [-0.49, 0.0, z - 1.5],
                        [-0.49, -0.49, z - 1.5],
                    ])],
                });
                batches.push(QuadBatch {
                    tag: QuadTag::Text(labels.quit.handle),
                    color: colors::QUIT,
                    blend: true,
                    quads: vec![quad_from_points([
                        [0.49, 0.0, z - 1.5],
                        [0.49, 0.49, z - 1.5],
                        [0.49, 0.49, z - 0.5],
                        [0.49, 0.0, z - 0.5],
                    ])],
                });
            }
        }
        GamePhase::Restarting if state.awaiting_start => {
            let bz = z - 2.0;
            batches.push(QuadBatch {
                tag: QuadTag::PlayButton,
                color: inverse,
                blend: true,
                quads: vec![quad_from_points([
                    [-0.5, -0.5, bz],
                    [-0.5, 0.5, bz],
                    [0.5, 0.5, bz],
                    [0.5, -0.5, bz],
                ])],
            });
        }
        _ => {}
    }

    FrameGeometry {
        eye: state.player.eye(),
        clear_color: colors::BACKGROUND,
        batches,
    }
}
