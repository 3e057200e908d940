//! Axis-aligned collision between the player footprint and cube geometry
//!
//! The player is sampled at four lateral corner points. A cube is hit when
//! the player's forward coordinate sits inside the cube's depth (shrunk by a
//! third of a cube on each side for the player's own thickness) and any
//! footprint point lies inside the cube's lateral extent.

use glam::{Vec2, Vec3, Vec4};

use super::geometry::{CubeFaces, cube_vertices};
use crate::consts::{CUBE_SIZE, FOOTPRINT_OFFSET};

/// Axis-aligned bounding extent of a vertex set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: Vec3,
    pub max: Vec3,
}

impl Extent {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Extent of a set of homogeneous vertices; `None` when the set is empty
    pub fn from_vertices(vertices: impl IntoIterator<Item = Vec4>) -> Option<Self> {
        let mut iter = vertices.into_iter().map(Vec4::truncate);
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, v| Self {
            min: acc.min.min(v),
            max: acc.max.max(v),
        }))
    }

    pub fn of_cube(cube: &CubeFaces) -> Self {
        // A cube always has vertices
        Self::from_vertices(cube_vertices(cube)).unwrap_or(Self::new(Vec3::ZERO, Vec3::ZERO))
    }

    /// Whether the forward coordinate is inside the depth band, shrunk by `h/3`.
    /// Both shrunk edges count as inside.
    pub fn spans_forward(&self, z: f32) -> bool {
        let inset = CUBE_SIZE / 3.0;
        self.min.z + inset <= z && z <= self.max.z - inset
    }

    /// Inclusive lateral containment
    pub fn contains_lateral(&self, p: Vec2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

/// The four lateral sample points of the player
pub fn footprint(lateral: Vec2) -> [Vec2; 4] {
    let d = FOOTPRINT_OFFSET;
    [
        lateral + Vec2::new(-d, -d),
        lateral + Vec2::new(-d, d),
        lateral + Vec2::new(d, -d),
        lateral + Vec2::new(d, d),
    ]
}

/// Test a single cube against the player
pub fn collides_cube(lateral: Vec2, cube: &CubeFaces, player_z: f32) -> bool {
    let extent = Extent::of_cube(cube);
    extent.spans_forward(player_z)
        && footprint(lateral).iter().any(|&p| extent.contains_lateral(p))
}

/// Test a collection of cubes; true if any one of them is hit
pub fn collides<'a>(
    lateral: Vec2,
    cubes: impl IntoIterator<Item = &'a CubeFaces>,
    player_z: f32,
) -> bool {
    cubes
        .into_iter()
        .any(|cube| collides_cube(lateral, cube, player_z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::{CUBE, translate};

    const H: f32 = CUBE_SIZE;

    fn corner_cube(x: f32, y: f32, z: f32) -> CubeFaces {
        translate(&CUBE, x, y, z)
    }

    #[test]
    fn test_extent_of_cube() {
        let extent = Extent::of_cube(&corner_cube(1.0, 2.0, -3.0));
        assert_eq!(extent.min, Vec3::new(0.75, 1.75, -3.25));
        assert_eq!(extent.max, Vec3::new(1.25, 2.25, -2.75));
    }

    #[test]
    fn test_empty_vertex_set_has_no_extent() {
        assert!(Extent::from_vertices(std::iter::empty()).is_none());
    }

    #[test]
    fn test_footprint_is_symmetric() {
        let points = footprint(Vec2::ZERO);
        let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + *p);
        assert!(sum.length() < 1e-6);
        assert!(points.iter().all(|p| (p.x.abs() - 0.15).abs() < 1e-6));
    }

    #[test]
    fn test_forward_band_is_shrunk() {
        let extent = Extent::of_cube(&corner_cube(0.0, 0.0, -5.0));
        assert!(extent.spans_forward(-5.0));
        assert!(!extent.spans_forward(-5.0 + H - 0.01));
        assert!(!extent.spans_forward(-5.0 - H + 0.01));
    }

    #[test]
    fn test_forward_band_edges_are_inclusive() {
        let extent = Extent::of_cube(&corner_cube(0.0, 0.0, -5.0));
        let near = extent.max.z - CUBE_SIZE / 3.0;
        let far = extent.min.z + CUBE_SIZE / 3.0;
        assert!(extent.spans_forward(near));
        assert!(extent.spans_forward(far));
        assert!(!extent.spans_forward(near + 1e-4));
        assert!(!extent.spans_forward(far - 1e-4));
    }

    #[test]
    fn test_no_hit_when_far_from_depth() {
        // Bottom-left corner only, player centered but far away
        let cube = corner_cube(-H, -H, -5.0);
        assert!(!collides(Vec2::ZERO, [&cube], 0.0));
        assert!(!collides(Vec2::ZERO, [&cube], -10.0));
    }

    #[test]
    fn test_hit_full_block_at_center() {
        let cubes = [
            corner_cube(-H, -H, -5.0),
            corner_cube(-H, H, -5.0),
            corner_cube(H, H, -5.0),
            corner_cube(H, -H, -5.0),
        ];
        assert!(collides(Vec2::ZERO, &cubes, -5.0));
    }

    #[test]
    fn test_single_corner_dodged_from_opposite_corner() {
        let cube = corner_cube(-H, -H, -5.0);
        // Centered: the bottom-left sample point is inside the cube
        assert!(collides(Vec2::ZERO, [&cube], -5.0));
        // Hugging the top-right bound clears it
        assert!(!collides(Vec2::new(0.35, 0.35), [&cube], -5.0));
    }
}
