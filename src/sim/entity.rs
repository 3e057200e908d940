//! Shared capability of everything that scrolls past the player
//!
//! Tunnel segments and obstacles both carry geometry and a `passed` flag.
//! The ring and the obstacle field retire passed entities from the front of
//! their queues with the same rule.

use std::collections::VecDeque;

use super::geometry::Face;

/// A drawable entity living somewhere along the forward axis
pub trait TunnelEntity {
    /// Every quad of the entity, in draw order
    fn quads(&self) -> impl Iterator<Item = &Face>;

    /// Whether the player has left this entity behind
    fn is_passed(&self) -> bool;

    /// Advance one tick given the player's forward coordinate
    fn update(&mut self, player_z: f32);
}

/// Pop the oldest entity if the player has passed it
pub fn pop_passed<T: TunnelEntity>(queue: &mut VecDeque<T>) -> Option<T> {
    if queue.front().is_some_and(|entity| entity.is_passed()) {
        queue.pop_front()
    } else {
        None
    }
}
