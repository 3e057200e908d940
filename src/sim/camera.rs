//! Pointer to lateral movement mapping
//!
//! The pointer's offset from the screen center becomes a small per-tick
//! step. The step is clamped so the player never leaves the lateral bounds.

use glam::Vec2;

use crate::consts::{BOUND, POINTER_SCALE};
use crate::round4;

/// Inclusive lateral box the player position must stay in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralBounds {
    pub low: Vec2,
    pub high: Vec2,
}

impl Default for LateralBounds {
    fn default() -> Self {
        Self::symmetric(BOUND)
    }
}

impl LateralBounds {
    pub fn symmetric(bound: f32) -> Self {
        Self {
            low: Vec2::splat(-bound),
            high: Vec2::splat(bound),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.cmpge(self.low).all() && p.cmple(self.high).all()
    }
}

/// Raw per-tick step for a pointer position, before clamping.
///
/// Pointer right moves the player right and pointer up moves it up
/// (screen Y grows downward).
pub fn pointer_delta(pointer: Vec2, screen: Vec2) -> Vec2 {
    if screen.x <= 0.0 || screen.y <= 0.0 {
        return Vec2::ZERO;
    }
    let center = (screen / 2.0).floor();
    let offset = (pointer - center) / (POINTER_SCALE * screen);
    Vec2::new(round4(offset.x), round4(-offset.y))
}

/// Clamp one axis so `current + delta` lands inside `[low, high]`
fn clamp_axis(current: f32, delta: f32, low: f32, high: f32) -> f32 {
    let target = current + delta;
    if delta < 0.0 && target < low {
        low
    } else if delta > 0.0 && target > high {
        high
    } else {
        target
    }
}

/// Map a pointer position to this tick's lateral step.
///
/// Returns `(delta, new_position)`; a step that would cross a bound is
/// truncated to land exactly on it.
pub fn compute_delta(
    pointer: Vec2,
    screen: Vec2,
    current: Vec2,
    bounds: &LateralBounds,
) -> (Vec2, Vec2) {
    let raw = pointer_delta(pointer, screen);
    let next = Vec2::new(
        clamp_axis(current.x, raw.x, bounds.low.x, bounds.high.x),
        clamp_axis(current.y, raw.y, bounds.low.y, bounds.high.y),
    );
    (next - current, next)
}
