//! Ambient color drift shared by the walls and obstacles
//!
//! The color holds for a while, then drifts linearly toward a random target
//! over a random number of ticks, then holds again.

use glam::Vec3;
use rand::Rng;

use crate::consts::{COLOR_BUMP, COLOR_FLOOR, INITIAL_COLOR};

/// Hold duration range (ticks)
pub const HOLD_TICKS: std::ops::RangeInclusive<u32> = 100..=200;
/// Transition duration range (ticks)
pub const TRANSITION_TICKS: std::ops::RangeInclusive<u32> = 50..=100;

#[derive(Debug, Clone)]
pub struct ColorAnimator {
    /// Current RGB, each channel in [0, 1]
    pub color: Vec3,
    /// Ticks left before the next transition starts
    pub hold_ticks: u32,
    /// Ticks left in the current transition
    pub transition_ticks: u32,
    /// Per-tick change during a transition
    pub delta: Vec3,
}

impl ColorAnimator {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut animator = Self {
            color: Vec3::from_array(INITIAL_COLOR),
            hold_ticks: 0,
            transition_ticks: 0,
            delta: Vec3::ZERO,
        };
        animator.plan(rng);
        animator
    }

    /// Pick the next hold, transition length and target
    fn plan<R: Rng>(&mut self, rng: &mut R) {
        self.hold_ticks = rng.random_range(HOLD_TICKS);
        self.transition_ticks = rng.random_range(TRANSITION_TICKS);
        let target = Vec3::new(rng.random(), rng.random(), rng.random());
        self.delta = (target - self.color) / self.transition_ticks as f32;
    }

    /// Advance one tick
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        if self.hold_ticks > 0 {
            self.hold_ticks -= 1;
        } else if self.transition_ticks > 0 {
            self.transition_ticks -= 1;
            self.color = (self.color + self.delta).clamp(Vec3::ZERO, Vec3::ONE);
            // Never let it go fully dark
            if self.color.cmplt(Vec3::splat(COLOR_FLOOR)).all() {
                self.color += Vec3::splat(COLOR_BUMP);
            }
        } else {
            self.plan(rng);
        }
    }

    pub fn rgb(&self) -> [f32; 3] {
        self.color.to_array()
    }

    /// Complementary color, used for overlays drawn on top of the tunnel
    pub fn inverse(&self) -> Vec3 {
        Vec3::ONE - self.color
    }
}
