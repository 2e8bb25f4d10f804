//! Collision detection
//!
//! Everything collides as a circle whose diameter is the entity's size.

use glam::Vec2;

use super::state::{Player, Thought};

/// True when two circles, given by centre and diameter, overlap.
///
/// Touching exactly (distance == sum of radii) is not a hit.
#[inline]
pub fn circles_overlap(a_center: Vec2, a_size: f32, b_center: Vec2, b_size: f32) -> bool {
    a_center.distance(b_center) < a_size / 2.0 + b_size / 2.0
}

/// Player (top-left positioned) against a thought (centre positioned)
#[inline]
pub fn player_hits(player: &Player, thought: &Thought) -> bool {
    circles_overlap(player.center(), player.size, thought.pos, thought.size)
}
