//! Deterministic simulation module
//!
//! Entity data and the rules applied to it. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (registry sequence order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod response;
pub mod spawn;
pub mod tick;

pub use collision::circles_collide;
pub use entity::{Collideable, Drawable, EntityKind, GameObject, Rect};
pub use response::{CollisionAction, Response, ResponseTable};
pub use spawn::Spawner;
pub use tick::{TickReport, collision_pairs, tick};
