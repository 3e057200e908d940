//! Vertex types for quad submission

use bytemuck::{Pod, Zeroable};

use crate::sim::Face;

/// Textured vertex: world position and texture coordinate
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl QuadVertex {
    pub const fn new(x: f32, y: f32, z: f32, uv: [f32; 2]) -> Self {
        Self {
            position: [x, y, z],
            uv,
        }
    }
}

/// Texture corner for each vertex of a quad, in vertex order
pub const UV_CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]];

/// Four vertices, drawn as one quad
pub type Quad = [QuadVertex; 4];

/// Texture a face with the full texture
pub fn quad_from_face(face: &Face) -> Quad {
    std::array::from_fn(|i| {
        let v = face[i];
        QuadVertex::new(v.x, v.y, v.z, UV_CORNERS[i])
    })
}

/// Texture an arbitrary set of corner points
pub fn quad_from_points(points: [[f32; 3]; 4]) -> Quad {
    std::array::from_fn(|i| {
        let [x, y, z] = points[i];
        QuadVertex::new(x, y, z, UV_CORNERS[i])
    })
}

/// Colors for overlay elements
pub mod colors {
    pub const AGAIN: [f32; 4] = [0.1, 0.9, 0.2, 1.0];
    pub const QUIT: [f32; 4] = [0.9, 0.1, 0.2, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
