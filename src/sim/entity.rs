//! Game object shape and capabilities
//!
//! A game object is plain data. What it can do is split into two capability
//! traits: `Collideable` (kinematics + circle collision) and `Drawable`
//! (display style). `GameObject` implements both.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::circles_collide;

/// Kind tag used to select collision responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Neutral,
    Evil,
}

/// Something with a position, a per-tick velocity and a collision radius
pub trait Collideable {
    fn pos(&self) -> Vec2;
    fn vel(&self) -> Vec2;
    /// Collision radius
    fn size(&self) -> f32;

    /// Circle overlap test against another collideable.
    ///
    /// Inclusive at the boundary and symmetric. Pure: neither side is
    /// mutated. NaN positions or sizes always yield `false`.
    fn does_collide(&self, other: &impl Collideable) -> bool
    where
        Self: Sized,
    {
        circles_collide(self.pos(), self.size(), other.pos(), other.size())
    }
}

/// Display style consumed by renderers
pub trait Drawable {
    fn css_color(&self) -> &str;
    fn is_filled(&self) -> bool;
}

/// Axis-aligned rectangle (arena bounds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// A moving, collidable, drawable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub pos: Vec2,
    /// Displacement applied per tick
    pub vel: Vec2,
    /// Collision radius. Expected positive; not validated.
    pub size: f32,
    pub css_color: String,
    pub is_filled: bool,
    #[serde(default)]
    pub is_evil: bool,
}

impl GameObject {
    pub fn new(
        pos: Vec2,
        vel: Vec2,
        size: f32,
        css_color: impl Into<String>,
        is_filled: bool,
        is_evil: bool,
    ) -> Self {
        Self {
            pos,
            vel,
            size,
            css_color: css_color.into(),
            is_filled,
            is_evil,
        }
    }

    pub fn kind(&self) -> EntityKind {
        if self.is_evil {
            EntityKind::Evil
        } else {
            EntityKind::Neutral
        }
    }

    /// Integrate one tick of motion
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// True when the whole circle lies beyond the bounds
    pub fn is_outside(&self, bounds: Rect) -> bool {
        self.pos.x + self.size < bounds.min.x
            || self.pos.x - self.size > bounds.max.x
            || self.pos.y + self.size < bounds.min.y
            || self.pos.y - self.size > bounds.max.y
    }
}

impl Collideable for GameObject {
    #[inline]
    fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    fn vel(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    fn size(&self) -> f32 {
        self.size
    }
}

impl Drawable for GameObject {
    fn css_color(&self) -> &str {
        &self.css_color
    }

    fn is_filled(&self) -> bool {
        self.is_filled
    }
}
