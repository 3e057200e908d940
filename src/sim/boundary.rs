//! Tunnel wall segments and the ring that recycles them
//!
//! The ring always holds the same number of segments. When the oldest one
//! falls behind the player it is rebuilt in place one step past the newest,
//! so the tunnel stays contiguous without allocating.

use std::collections::VecDeque;

use glam::Vec3;

use super::entity::{TunnelEntity, pop_passed};
use super::geometry::{DOWN_FACE, Face, LEFT_FACE, RIGHT_FACE, Translate, Translation, UP_FACE};
use crate::consts::{CUBE_SIZE, OBSTACLE_LEAD, SEGMENT_STEP};

const H: f32 = CUBE_SIZE;

/// One forward slice of tunnel wall: two quads on each of the four sides
#[derive(Debug, Clone)]
pub struct Segment {
    /// Anchor on the tunnel axis
    pub anchor: Vec3,
    /// Right-facing, left-facing, up-facing, down-facing pairs
    pub quads: [Face; 8],
    /// Far edge of the slice along the forward axis
    depth: f32,
    passed: bool,
}

impl Segment {
    pub fn new(anchor: Vec3) -> Self {
        let Vec3 { x, y, z } = anchor;
        let at = |face: &Face, dx: f32, dy: f32| face.translated(&Translation::xyz(x + dx, y + dy, z));
        Self {
            anchor,
            quads: [
                // Left wall (faces the tunnel axis)
                at(&RIGHT_FACE, -3.0 * H, -H),
                at(&RIGHT_FACE, -3.0 * H, H),
                // Right wall
                at(&LEFT_FACE, 3.0 * H, -H),
                at(&LEFT_FACE, 3.0 * H, H),
                // Floor
                at(&UP_FACE, -H, -3.0 * H),
                at(&UP_FACE, H, -3.0 * H),
                // Ceiling
                at(&DOWN_FACE, -H, 3.0 * H),
                at(&DOWN_FACE, H, 3.0 * H),
            ],
            depth: z - H,
            passed: false,
        }
    }

    /// Rebuild this segment at a new anchor, reusing its storage
    pub fn reinit(&mut self, anchor: Vec3) {
        *self = Self::new(anchor);
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }
}

impl TunnelEntity for Segment {
    fn quads(&self) -> impl Iterator<Item = &Face> {
        self.quads.iter()
    }

    fn is_passed(&self) -> bool {
        self.passed
    }

    fn update(&mut self, player_z: f32) {
        self.passed = self.depth > player_z;
    }
}

/// Fixed-length ring of tunnel segments advancing along -Z
#[derive(Debug, Clone)]
pub struct BoundaryRing {
    segments: VecDeque<Segment>,
    /// Storage parked during a restart, reused before allocating
    idle: Vec<Segment>,
    capacity: usize,
    /// Anchor of the most recently placed segment
    cursor: Vec3,
}

impl BoundaryRing {
    /// Create an empty ring; call [`BoundaryRing::fill`] to populate it
    pub fn new(capacity: usize) -> Self {
        Self {
            segments: VecDeque::with_capacity(capacity),
            idle: Vec::new(),
            capacity,
            cursor: Vec3::ZERO,
        }
    }

    /// Add segments until the ring is full
    pub fn fill(&mut self) {
        while self.push_next() {}
    }

    /// Place one segment a step past the cursor. Returns false when full.
    pub fn push_next(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        let anchor = self.next_anchor();
        let segment = match self.idle.pop() {
            Some(mut segment) => {
                segment.reinit(anchor);
                segment
            }
            None => Segment::new(anchor),
        };
        self.segments.push_back(segment);
        true
    }

    fn next_anchor(&mut self) -> Vec3 {
        self.cursor.z -= SEGMENT_STEP;
        self.cursor
    }

    /// Update passed flags and recycle every stale segment at the front.
    ///
    /// Returns how many segments were rebuilt.
    pub fn advance(&mut self, player_z: f32) -> usize {
        for segment in &mut self.segments {
            segment.update(player_z);
        }
        let mut recycled = 0;
        while let Some(mut segment) = pop_passed(&mut self.segments) {
            let anchor = self.next_anchor();
            segment.reinit(anchor);
            self.segments.push_back(segment);
            recycled += 1;
        }
        if recycled > 0 {
            log::debug!("Recycled {recycled} segment(s), cursor z={:.2}", self.cursor.z);
        }
        recycled
    }

    /// Park all live segments and rewind the cursor to the origin
    pub fn reset(&mut self) {
        self.idle.extend(self.segments.drain(..));
        self.cursor = Vec3::ZERO;
    }

    /// Live segments, oldest (nearest) first
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.segments.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn idle_len(&self) -> usize {
        self.idle.len()
    }

    pub fn cursor(&self) -> Vec3 {
        self.cursor
    }

    /// Where the next obstacle appears: just inside the far end of the tunnel
    pub fn spawn_anchor(&self) -> Vec3 {
        self.cursor + Vec3::Z * OBSTACLE_LEAD
    }
}
