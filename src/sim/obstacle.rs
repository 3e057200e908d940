//! Obstacle generation, animation and retirement
//!
//! An obstacle blocks up to four tunnel corners, selected by a 4-bit mask:
//! bit 0 bottom-left, bit 1 top-left, bit 2 top-right, bit 3 bottom-right.
//! A fully blocked obstacle (mask 15) always opens one corner by sliding it
//! out of the tunnel. Other obstacles sometimes slide in along the forward
//! axis instead.
//!
//! Retired obstacles go to a pool and are rebuilt in place on the next spawn.

use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use rand::Rng;

use super::collision::collides;
use super::entity::{TunnelEntity, pop_passed};
use super::geometry::{CUBE, CubeFaces, Face, Translate, Translation};
use crate::consts::CUBE_SIZE;

const H: f32 = CUBE_SIZE;

/// Mask with every corner occupied
pub const FULL_BLOCK: u8 = 15;
/// Ticks before a corner of a full block starts sliding out
pub const SLIDE_OUT_DELAY: u32 = 16;
/// Ticks before slide-in cubes start moving
pub const SLIDE_IN_DELAY: u32 = 12;
/// Chance that a partial obstacle slides in
pub const SLIDE_IN_CHANCE: f64 = 0.3;
/// Slide-in cubes start this many ticks of travel further away
pub const SLIDE_IN_LEAD_TICKS: f32 = 13.0;
/// Extra countdown added after a slide-in obstacle
pub const SLIDE_IN_SPAWN_GAP: f32 = 3.0;
/// Passed once the player is within this distance of the anchor
pub const PASS_CLEARANCE: f32 = CUBE_SIZE * 2.0 / 3.0;

/// Corner slots of the tunnel cross-section, in mask bit order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    BottomLeft = 0,
    TopLeft = 1,
    TopRight = 2,
    BottomRight = 3,
}

/// Exit directions indexed by `(corner + choice) mod 4`
const EXITS: [Vec2; 4] = [
    Vec2::new(0.0, -1.0),
    Vec2::new(-1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 0.0),
];

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
    ];

    pub fn from_index(i: usize) -> Self {
        Self::ALL[i & 3]
    }

    pub fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Center of the corner cube relative to the obstacle anchor
    pub fn offset(self) -> Vec2 {
        match self {
            Corner::BottomLeft => Vec2::new(-H, -H),
            Corner::TopLeft => Vec2::new(-H, H),
            Corner::TopRight => Vec2::new(H, H),
            Corner::BottomRight => Vec2::new(H, -H),
        }
    }

    /// The two outward directions a cube can leave this corner by
    pub fn exits(self) -> [Vec2; 2] {
        let k = self as usize;
        [EXITS[k], EXITS[(k + 1) & 3]]
    }
}

/// How an obstacle's moving cubes behave
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Static,
    /// One corner of a full block slides out laterally
    SlideOut { corner: Corner },
    /// Every cube closes in along the forward axis
    SlideIn,
}

/// A cluster of corner cubes blocking part of the tunnel
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Spawn order, used to check retirement is first-in first-out
    pub serial: u64,
    pub anchor: Vec3,
    /// Corner mask, 1..=15
    pub mask: u8,
    pub motion: Motion,
    /// Cubes that never move
    pub cubes: Vec<CubeFaces>,
    /// Cubes translated by `velocity` every tick once `delay` runs out
    pub moving: Vec<CubeFaces>,
    pub velocity: Translation,
    pub delay: u32,
    passed: bool,
}

impl Obstacle {
    /// Blank record, filled in by [`Obstacle::init`]
    pub fn empty() -> Self {
        Self {
            serial: 0,
            anchor: Vec3::ZERO,
            mask: 0,
            motion: Motion::Static,
            cubes: Vec::with_capacity(4),
            moving: Vec::with_capacity(4),
            velocity: Translation::IDENTITY,
            delay: 0,
            passed: false,
        }
    }

    /// Rebuild in place for a new mask at `anchor`.
    ///
    /// `speed` scales the animation. Returns true when the obstacle slides
    /// in, which asks the spawner for extra spacing.
    pub fn init<R: Rng>(
        &mut self,
        serial: u64,
        anchor: Vec3,
        mask: u8,
        speed: f32,
        rng: &mut R,
    ) -> bool {
        self.serial = serial;
        self.anchor = anchor;
        self.mask = mask;
        self.motion = Motion::Static;
        self.cubes.clear();
        self.moving.clear();
        self.velocity = Translation::IDENTITY;
        self.delay = 0;
        self.passed = false;

        for corner in Corner::ALL {
            if mask & corner.bit() != 0 {
                let at = anchor + corner.offset().extend(0.0);
                self.cubes.push(CUBE.translated(&Translation::new(at)));
            }
        }

        if mask == FULL_BLOCK {
            let k = rng.random_range(0..4usize);
            let choice = rng.random_range(0..2usize);
            let corner = Corner::from_index(k);
            let dir = corner.exits()[choice] * (speed / 6.0);
            self.moving.push(self.cubes.remove(k));
            self.velocity = Translation::new(dir.extend(0.0));
            self.delay = SLIDE_OUT_DELAY;
            self.motion = Motion::SlideOut { corner };
            false
        } else if rng.random_bool(SLIDE_IN_CHANCE) {
            let lead = Translation::xyz(0.0, 0.0, -SLIDE_IN_LEAD_TICKS * speed);
            self.moving
                .extend(self.cubes.drain(..).map(|cube| cube.translated(&lead)));
            self.velocity = Translation::xyz(0.0, 0.0, speed / 2.0);
            self.delay = SLIDE_IN_DELAY;
            self.motion = Motion::SlideIn;
            true
        } else {
            false
        }
    }

    /// Static and moving cubes together
    pub fn all_cubes(&self) -> impl Iterator<Item = &CubeFaces> {
        self.cubes.iter().chain(self.moving.iter())
    }

    /// Whether any cube of this obstacle hits the player
    pub fn collides(&self, lateral: Vec2, player_z: f32) -> bool {
        collides(lateral, self.all_cubes(), player_z)
    }

    /// Run the animation for one tick
    pub fn animate(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
        } else if !self.moving.is_empty() {
            let velocity = self.velocity;
            for cube in &mut self.moving {
                *cube = cube.translated(&velocity);
            }
        }
    }
}

impl TunnelEntity for Obstacle {
    fn quads(&self) -> impl Iterator<Item = &Face> {
        self.all_cubes().flat_map(|cube| cube.iter())
    }

    fn is_passed(&self) -> bool {
        self.passed
    }

    fn update(&mut self, player_z: f32) {
        self.animate();
        self.passed = self.anchor.z > player_z - PASS_CLEARANCE;
    }
}

/// Live obstacles, the reuse pool and the spawn countdown
#[derive(Debug, Clone)]
pub struct ObstacleField {
    live: VecDeque<Obstacle>,
    pool: Vec<Obstacle>,
    /// Distance left before the next spawn
    pub spawn_timer: f32,
    spawned: u64,
}

impl ObstacleField {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self {
            live: VecDeque::new(),
            pool: Vec::new(),
            spawn_timer: initial_countdown(rng),
            spawned: 0,
        }
    }

    /// Move every live obstacle to the pool and restart the countdown
    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.pool.extend(self.live.drain(..));
        self.spawn_timer = initial_countdown(rng);
    }

    /// Count down by `speed`; when the countdown runs out, spawn one
    /// obstacle with a random mask at `anchor`.
    pub fn try_spawn<R: Rng>(
        &mut self,
        speed: f32,
        anchor: Vec3,
        rng: &mut R,
    ) -> Option<&Obstacle> {
        if self.spawn_timer >= speed / 2.0 {
            self.spawn_timer -= speed;
            return None;
        }
        self.spawn_timer = rng.random_range(2..=5) as f32;
        let mask = rng.random_range(1..=FULL_BLOCK);
        Some(self.spawn(mask, anchor, speed, rng))
    }

    /// Spawn a specific mask right away, leaving the countdown alone except
    /// for the slide-in spacing.
    pub fn spawn<R: Rng>(
        &mut self,
        mask: u8,
        anchor: Vec3,
        speed: f32,
        rng: &mut R,
    ) -> &Obstacle {
        let mut obstacle = self.pool.pop().unwrap_or_else(Obstacle::empty);
        self.spawned += 1;
        if obstacle.init(self.spawned, anchor, mask, speed, rng) {
            self.spawn_timer += SLIDE_IN_SPAWN_GAP;
        }
        log::debug!(
            "Spawned obstacle #{} mask={:04b} motion={:?} at z={:.2}",
            obstacle.serial,
            obstacle.mask,
            obstacle.motion,
            obstacle.anchor.z
        );
        self.live.push_back(obstacle);
        &self.live[self.live.len() - 1]
    }

    /// Collision-test then update every live obstacle. Returns true if any hit.
    pub fn step(&mut self, lateral: Vec2, player_z: f32) -> bool {
        let mut hit = false;
        for obstacle in &mut self.live {
            if obstacle.collides(lateral, player_z) {
                hit = true;
            }
            obstacle.update(player_z);
        }
        hit
    }

    /// Move passed obstacles from the front of the queue into the pool
    pub fn retire(&mut self) -> usize {
        let mut retired = 0;
        while let Some(obstacle) = pop_passed(&mut self.live) {
            self.pool.push(obstacle);
            retired += 1;
        }
        retired
    }

    /// Live obstacles, oldest first
    pub fn live(&self) -> impl Iterator<Item = &Obstacle> {
        self.live.iter()
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Retired obstacles, in retirement order
    pub fn pool(&self) -> &[Obstacle] {
        &self.pool
    }
}

fn initial_countdown<R: Rng>(rng: &mut R) -> f32 {
    rng.random_range(0..=5) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Extent;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng(seed: u64) -> Pcg32 {
        Pcg32::seed_from_u64(seed)
    }

    fn centers(cubes: &[CubeFaces]) -> Vec<Vec2> {
        cubes
            .iter()
            .map(|c| {
                let e = Extent::of_cube(c);
                ((e.min + e.max) * 0.5).truncate()
            })
            .collect()
    }

    #[test]
    fn test_corner_bits_and_offsets() {
        assert_eq!(Corner::BottomLeft.bit(), 1);
        assert_eq!(Corner::TopLeft.bit(), 2);
        assert_eq!(Corner::TopRight.bit(), 4);
        assert_eq!(Corner::BottomRight.bit(), 8);
        assert_eq!(Corner::TopLeft.offset(), Vec2::new(-H, H));
    }

    #[test]
    fn test_exits_point_away_from_center() {
        for corner in Corner::ALL {
            for dir in corner.exits() {
                // Moving along an exit never brings the cube toward the axis
                assert!(dir.dot(corner.offset()) > 0.0, "{corner:?} {dir:?}");
            }
        }
    }

    #[test]
    fn test_mask_selects_corners() {
        let mut r = rng(1);
        for mask in 1..FULL_BLOCK {
            let mut o = Obstacle::empty();
            o.init(1, Vec3::new(0.0, 0.0, -4.0), mask, 0.1, &mut r);
            let expected: Vec<Vec2> = Corner::ALL
                .iter()
                .filter(|c| mask & c.bit() != 0)
                .map(|c| c.offset())
                .collect();
            let all: Vec<CubeFaces> = o.all_cubes().copied().collect();
            assert_eq!(all.len(), mask.count_ones() as usize);
            let found = centers(&all);
            for center in expected {
                assert!(found.iter().any(|f| (*f - center).length() < 1e-5));
            }
        }
    }

    #[test]
    fn test_full_block_opens_one_corner() {
        for seed in 0..20 {
            let mut o = Obstacle::empty();
            o.init(1, Vec3::new(0.0, 0.0, -4.0), FULL_BLOCK, 0.12, &mut rng(seed));
            assert_eq!(o.cubes.len(), 3);
            assert_eq!(o.moving.len(), 1);
            assert_eq!(o.delay, SLIDE_OUT_DELAY);
            let Motion::SlideOut { corner } = o.motion else {
                panic!("full block must slide out");
            };
            let step = o.velocity.offset().truncate();
            assert!((step.length() - 0.02).abs() < 1e-6);
            assert!(corner.exits().iter().any(|d| (*d * 0.02 - step).length() < 1e-6));
        }
    }

    #[test]
    fn test_slide_out_waits_then_moves() {
        let mut o = Obstacle::empty();
        o.init(1, Vec3::new(0.0, 0.0, -4.0), FULL_BLOCK, 0.1, &mut rng(3));
        let start = o.moving[0];
        for _ in 0..SLIDE_OUT_DELAY {
            o.update(0.0);
        }
        assert_eq!(o.moving[0], start);
        o.update(0.0);
        o.update(0.0);
        let moved = Extent::of_cube(&o.moving[0]).min - Extent::of_cube(&start).min;
        // Velocity is re-applied each tick
        assert!((moved.truncate().length() - 2.0 * 0.1 / 6.0).abs() < 1e-5);
        assert_eq!(moved.z, 0.0);
    }

    #[test]
    fn test_slide_in_closes_on_anchor() {
        // Find a seed whose partial obstacle slides in
        let (mut o, speed) = (0..200)
            .find_map(|seed| {
                let mut o = Obstacle::empty();
                o.init(1, Vec3::new(0.0, 0.0, -8.0), 3, 0.1, &mut rng(seed))
                    .then_some((o, 0.1f32))
            })
            .expect("some seed slides in");
        assert_eq!(o.motion, Motion::SlideIn);
        assert!(o.cubes.is_empty());
        assert_eq!(o.moving.len(), 2);
        assert_eq!(o.delay, SLIDE_IN_DELAY);
        let lead = SLIDE_IN_LEAD_TICKS * speed;
        let ticks = SLIDE_IN_DELAY + (lead / (speed / 2.0)).round() as u32;
        for _ in 0..ticks {
            o.animate();
        }
        let z = (Extent::of_cube(&o.moving[0]).min.z + Extent::of_cube(&o.moving[0]).max.z) / 2.0;
        assert!((z - -8.0).abs() < 1e-3);
    }

    #[test]
    fn test_passed_uses_clearance() {
        let mut o = Obstacle::empty();
        o.init(1, Vec3::new(0.0, 0.0, -4.0), 1, 0.1, &mut rng(5));
        o.update(-3.5);
        assert!(!o.is_passed());
        o.update(-3.9);
        assert!(o.is_passed());
    }

    #[test]
    fn test_countdown_spawns_and_resets() {
        let mut r = rng(9);
        let mut field = ObstacleField::new(&mut r);
        field.spawn_timer = 0.2;
        let anchor = Vec3::new(0.0, 0.0, -9.0);
        assert!(field.try_spawn(0.1, anchor, &mut r).is_none());
        assert!(field.try_spawn(0.1, anchor, &mut r).is_none());
        let spawned = field.try_spawn(0.1, anchor, &mut r).map(|o| o.mask);
        assert!(matches!(spawned, Some(1..=15)));
        assert!(field.spawn_timer >= 2.0 && field.spawn_timer <= 8.0);
        assert_eq!(field.live_len(), 1);
    }

    #[test]
    fn test_slide_in_spawn_adds_gap() {
        let mut r = rng(13);
        let mut field = ObstacleField::new(&mut r);
        let mut slid_in = false;
        for _ in 0..200 {
            field.spawn_timer = 10.0;
            let motion = field.spawn(3, Vec3::new(0.0, 0.0, -9.0), 0.1, &mut r).motion;
            if motion == Motion::SlideIn {
                assert_eq!(field.spawn_timer, 10.0 + SLIDE_IN_SPAWN_GAP);
                slid_in = true;
                break;
            }
            assert_eq!(field.spawn_timer, 10.0);
        }
        assert!(slid_in);
    }

    #[test]
    fn test_pool_is_reused() {
        let mut r = rng(11);
        let mut field = ObstacleField::new(&mut r);
        field.spawn(1, Vec3::new(0.0, 0.0, -1.0), 0.1, &mut r);
        field.step(Vec2::new(0.35, 0.35), -2.0);
        assert_eq!(field.retire(), 1);
        assert_eq!(field.pool_len(), 1);
        field.spawn(6, Vec3::new(0.0, 0.0, -5.0), 0.1, &mut r);
        assert_eq!(field.pool_len(), 0);
        assert_eq!(field.live_len(), 1);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let masks = |seed| {
            let mut r = rng(seed);
            let mut field = ObstacleField::new(&mut r);
            let mut out = Vec::new();
            for _ in 0..500 {
                if let Some(o) = field.try_spawn(0.1, Vec3::new(0.0, 0.0, -9.0), &mut r) {
                    out.push((o.mask, o.motion));
                }
            }
            out
        };
        assert_eq!(masks(42), masks(42));
        assert!(!masks(42).is_empty());
    }

    proptest! {
        #[test]
        fn retirement_is_fifo(seed in any::<u64>(), ticks in 50usize..400) {
            let mut r = rng(seed);
            let mut field = ObstacleField::new(&mut r);
            let speed = 0.1;
            let mut player_z = 0.0f32;
            let mut cursor = -10.0f32;
            for _ in 0..ticks {
                player_z -= speed;
                cursor -= speed;
                field.try_spawn(speed, Vec3::new(0.0, 0.0, cursor + 1.0), &mut r);
                field.step(Vec2::new(0.35, 0.35), player_z);
                field.retire();
            }
            let retired: Vec<u64> = field.pool().iter().map(|o| o.serial).collect();
            prop_assert!(retired.windows(2).all(|w| w[0] < w[1]));
            if let Some(&last) = retired.last() {
                prop_assert!(field.live().all(|o| o.serial > last));
            }
        }
    }
}
