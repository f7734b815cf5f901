//! Collision detection between circular objects
//!
//! Every object is treated as a circle of radius `size` centered on its
//! position. Detection only: responses are chosen by the driver.

use glam::Vec2;

/// Check whether two circles overlap or touch.
///
/// Tangent circles count as colliding (`distance <= ra + rb`). Any NaN
/// component makes the comparison false, so a NaN-tainted object never
/// registers a collision.
#[inline]
pub fn circles_collide(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) <= a_radius + b_radius
}
