//! Object Arena - moving, collidable, drawable game objects
//!
//! Core modules:
//! - `sim`: Entity model, collision predicate, response table and tick driver
//! - `store`: Observable ordered registry of live objects
//! - `settings`: Data-driven run configuration

pub mod settings;
pub mod sim;
pub mod store;

pub use settings::{Settings, SettingsError};
pub use store::{GameObjects, ObjectRef, Registry, Subscription};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Spawn defaults
    pub const SPAWN_COUNT: usize = 24;
    pub const EVIL_RATIO: f32 = 0.25;
    pub const MIN_SIZE: f32 = 4.0;
    pub const MAX_SIZE: f32 = 16.0;
    /// Maximum per-tick displacement along each axis
    pub const MAX_SPEED: f32 = 3.0;

    /// Default colors
    pub const NEUTRAL_COLOR: &str = "#4ade80";
    pub const EVIL_COLOR: &str = "#ef4444";

    /// Headless run length
    pub const DEFAULT_TICKS: u32 = 600;
}
