//! Cube template geometry and affine translation
//!
//! Vertices are homogeneous points (w = 1). The cube template is immutable;
//! every positioned cube or wall quad is a translated copy of it.

use glam::{Mat4, Vec3, Vec4};

use crate::consts::CUBE_SIZE;

/// A quadrilateral: four coplanar vertices, clockwise when seen from the front
pub type Face = [Vec4; 4];

/// The six faces of a cube
pub type CubeFaces = [Face; 6];

const H: f32 = CUBE_SIZE;

// R/L = right/left, U/D = up/down, F/B = front/back
const R_U_F: Vec4 = Vec4::new(H, H, H, 1.0);
const R_U_B: Vec4 = Vec4::new(H, H, -H, 1.0);
const R_D_F: Vec4 = Vec4::new(H, -H, H, 1.0);
const R_D_B: Vec4 = Vec4::new(H, -H, -H, 1.0);
const L_U_F: Vec4 = Vec4::new(-H, H, H, 1.0);
const L_U_B: Vec4 = Vec4::new(-H, H, -H, 1.0);
const L_D_F: Vec4 = Vec4::new(-H, -H, H, 1.0);
const L_D_B: Vec4 = Vec4::new(-H, -H, -H, 1.0);

pub const RIGHT_FACE: Face = [R_U_F, R_U_B, R_D_B, R_D_F];
pub const LEFT_FACE: Face = [L_U_F, L_D_F, L_D_B, L_U_B];
pub const UP_FACE: Face = [R_U_F, L_U_F, L_U_B, R_U_B];
pub const DOWN_FACE: Face = [R_D_F, R_D_B, L_D_B, L_D_F];
pub const FRONT_FACE: Face = [R_U_F, R_D_F, L_D_F, L_U_F];
pub const BACK_FACE: Face = [R_U_B, L_U_B, L_D_B, R_D_B];

/// Cube template centered at the origin with half-size [`CUBE_SIZE`]
pub const CUBE: CubeFaces = [
    RIGHT_FACE, LEFT_FACE, UP_FACE, DOWN_FACE, FRONT_FACE, BACK_FACE,
];

/// Build a cube with the given center and half-size from the template
pub fn make_cube(center: Vec3, half_size: f32) -> CubeFaces {
    let scale = half_size / CUBE_SIZE;
    CUBE.map(|face| face.map(|v| (v.truncate() * scale + center).extend(1.0)))
}

/// A pure translation stored as a homogeneous 4x4 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translation(Mat4);

impl Default for Translation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Translation {
    pub const IDENTITY: Self = Self(Mat4::IDENTITY);

    pub fn new(offset: Vec3) -> Self {
        Self(Mat4::from_translation(offset))
    }

    pub fn xyz(dx: f32, dy: f32, dz: f32) -> Self {
        Self::new(Vec3::new(dx, dy, dz))
    }

    /// Offset vector encoded by the matrix
    #[inline]
    pub fn offset(&self) -> Vec3 {
        self.0.w_axis.truncate()
    }

    /// Apply `self`, then `next`
    pub fn then(self, next: Translation) -> Self {
        Self(next.0 * self.0)
    }

    #[inline]
    pub fn apply(&self, v: Vec4) -> Vec4 {
        self.0 * v
    }

    pub fn matrix(&self) -> Mat4 {
        self.0
    }
}

/// Anything built from homogeneous vertices that can be moved as a whole
pub trait Translate: Sized {
    /// Return a translated copy; `self` is left untouched
    fn translated(&self, t: &Translation) -> Self;
}

impl Translate for Vec4 {
    #[inline]
    fn translated(&self, t: &Translation) -> Self {
        t.apply(*self)
    }
}

impl<T: Translate, const N: usize> Translate for [T; N] {
    fn translated(&self, t: &Translation) -> Self {
        std::array::from_fn(|i| self[i].translated(t))
    }
}

/// Translate a vertex set by (dx, dy, dz) into a new, independently owned set
pub fn translate<T: Translate>(set: &T, dx: f32, dy: f32, dz: f32) -> T {
    set.translated(&Translation::xyz(dx, dy, dz))
}

/// Iterate every vertex of a cube
pub fn cube_vertices(cube: &CubeFaces) -> impl Iterator<Item = Vec4> + '_ {
    cube.iter().flat_map(|face| face.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    #[test]
    fn test_template_has_eight_distinct_vertices() {
        let mut seen: Vec<Vec4> = Vec::new();
        for v in cube_vertices(&CUBE) {
            assert_eq!(v.w, 1.0);
            if !seen.contains(&v) {
                seen.push(v);
            }
        }
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_faces_are_planar() {
        // Each face pins exactly one axis to a constant
        for face in CUBE {
            let pinned = (0..3)
                .filter(|&axis| face.iter().all(|v| v[axis] == face[0][axis]))
                .count();
            assert_eq!(pinned, 1);
        }
    }

    #[test]
    fn test_make_cube_center_and_size() {
        let cube = make_cube(Vec3::new(1.0, -2.0, 3.0), 0.5);
        let xs: Vec<f32> = cube_vertices(&cube).map(|v| v.x).collect();
        let zs: Vec<f32> = cube_vertices(&cube).map(|v| v.z).collect();
        assert!(xs.iter().all(|&x| x == 0.5 || x == 1.5));
        assert!(zs.iter().all(|&z| z == 2.5 || z == 3.5));
    }

    #[test]
    fn test_translate_leaves_input_untouched() {
        let before = CUBE;
        let moved = translate(&CUBE, 1.0, 2.0, 3.0);
        assert_eq!(before, CUBE);
        assert_eq!(moved[0][0], Vec4::new(H + 1.0, H + 2.0, H + 3.0, 1.0));
    }

    #[test]
    fn test_translation_offset_roundtrip() {
        let t = Translation::xyz(0.5, -0.25, 4.0);
        assert_eq!(t.offset(), Vec3::new(0.5, -0.25, 4.0));
    }

    proptest! {
        #[test]
        fn translate_by_zero_is_identity(
            x in -100.0f32..100.0, y in -100.0f32..100.0, z in -100.0f32..100.0
        ) {
            let face: Face = [
                Vec4::new(x, y, z, 1.0),
                Vec4::new(-x, y, z, 1.0),
                Vec4::new(x, -y, z, 1.0),
                Vec4::new(x, y, -z, 1.0),
            ];
            prop_assert_eq!(translate(&face, 0.0, 0.0, 0.0), face);
        }

        #[test]
        fn translations_compose_additively(
            a in -50.0f32..50.0, b in -50.0f32..50.0, c in -50.0f32..50.0,
            d in -50.0f32..50.0, e in -50.0f32..50.0, f in -50.0f32..50.0,
        ) {
            let first = Translation::xyz(a, b, c);
            let second = Translation::xyz(d, e, f);
            let combined = Translation::xyz(a + d, b + e, c + f);

            let stepwise = CUBE.translated(&first).translated(&second);
            let direct = CUBE.translated(&combined);
            for (s, t) in cube_vertices(&stepwise).zip(cube_vertices(&direct)) {
                prop_assert!(close(s, t));
            }
            prop_assert!((first.then(second).offset() - combined.offset()).abs().max_element() < 1e-3);
        }
    }
}
