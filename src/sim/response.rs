//! Collision responses keyed by entity kind
//!
//! Objects carry no behavior. When the driver finds a colliding pair it looks
//! up each object's kind here and runs the matching function.

use super::entity::{EntityKind, GameObject};

/// What the driver should do with an object after it collided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionAction {
    #[default]
    Keep,
    Remove,
}

/// Response run on `this` after it collided with `other`
pub type Response = fn(this: &mut GameObject, other: &GameObject) -> CollisionAction;

/// Dispatch table from entity kind to response
#[derive(Debug, Clone, Copy)]
pub struct ResponseTable {
    pub neutral: Response,
    pub evil: Response,
}

impl Default for ResponseTable {
    /// Neutral objects are destroyed by evil ones; evil objects survive everything
    fn default() -> Self {
        Self {
            neutral: destroyed_by_evil,
            evil: ignore,
        }
    }
}

impl ResponseTable {
    /// Table where every collision is ignored
    pub fn inert() -> Self {
        Self {
            neutral: ignore,
            evil: ignore,
        }
    }

    /// Replace the response for one kind
    pub fn with(mut self, kind: EntityKind, response: Response) -> Self {
        match kind {
            EntityKind::Neutral => self.neutral = response,
            EntityKind::Evil => self.evil = response,
        }
        self
    }

    pub fn get(&self, kind: EntityKind) -> Response {
        match kind {
            EntityKind::Neutral => self.neutral,
            EntityKind::Evil => self.evil,
        }
    }

    /// Run the response registered for `this`'s kind
    pub fn respond(&self, this: &mut GameObject, other: &GameObject) -> CollisionAction {
        (self.get(this.kind()))(this, other)
    }
}

pub fn ignore(_this: &mut GameObject, _other: &GameObject) -> CollisionAction {
    CollisionAction::Keep
}

pub fn remove_on_contact(_this: &mut GameObject, _other: &GameObject) -> CollisionAction {
    CollisionAction::Remove
}

pub fn destroyed_by_evil(_this: &mut GameObject, other: &GameObject) -> CollisionAction {
    if other.is_evil {
        CollisionAction::Remove
    } else {
        CollisionAction::Keep
    }
}

/// Evil objects turn whatever they touch evil (and take on its color)
pub fn corrupted_by_evil(this: &mut GameObject, other: &GameObject) -> CollisionAction {
    if other.is_evil && !this.is_evil {
        this.is_evil = true;
        this.css_color.clone_from(&other.css_color);
    }
    CollisionAction::Keep
}
