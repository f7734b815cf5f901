//! Run settings
//!
//! Loaded from an optional JSON file. Missing fields take their defaults,
//! and an unreadable or malformed file falls back to defaults entirely.
//! Numeric fields that cannot describe an arena (non-finite, negative
//! extents) are reset by [`Settings::sanitized`].

use std::path::Path;
use std::{fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// Simulation and spawn settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for spawning
    pub seed: u64,
    /// Number of ticks the headless driver runs
    pub ticks: u32,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Remove objects that leave the arena entirely
    pub remove_offscreen: bool,

    // === Spawning ===
    pub spawn_count: usize,
    /// Probability (0.0 - 1.0) that a spawned object is evil
    pub evil_ratio: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Per-axis speed limit (pixels per tick)
    pub max_speed: f32,
    pub neutral_color: String,
    pub evil_color: String,
    pub filled: bool,

    // === Logging ===
    /// Debug-level logging (RUST_LOG still wins)
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            ticks: DEFAULT_TICKS,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            remove_offscreen: true,

            spawn_count: SPAWN_COUNT,
            evil_ratio: EVIL_RATIO,
            min_size: MIN_SIZE,
            max_size: MAX_SIZE,
            max_speed: MAX_SPEED,
            neutral_color: NEUTRAL_COLOR.to_string(),
            evil_color: EVIL_COLOR.to_string(),
            filled: true,

            verbose: false,
        }
    }
}

/// Why a settings file could not be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not read settings: {0}")]
    Io(#[from] io::Error),
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Settings {
    /// Parse settings as written, without sanitizing
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read and parse a settings file once, without sanitizing
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Load sanitized settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, path.display());
                Self::default()
            }
        }
    }

    /// Replace values no arena can use with their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;

        reset_unless(positive, "arena_width", &mut self.arena_width, defaults.arena_width);
        reset_unless(positive, "arena_height", &mut self.arena_height, defaults.arena_height);
        reset_unless(non_negative, "min_size", &mut self.min_size, defaults.min_size);
        reset_unless(non_negative, "max_size", &mut self.max_size, defaults.max_size);
        reset_unless(non_negative, "max_speed", &mut self.max_speed, defaults.max_speed);
        reset_unless(
            |v| (0.0..=1.0).contains(&v),
            "evil_ratio",
            &mut self.evil_ratio,
            defaults.evil_ratio,
        );
        self
    }

    pub fn arena(&self) -> Rect {
        Rect::from_size(self.arena_width, self.arena_height)
    }

    /// Size range with the bounds in ascending order
    pub fn size_range(&self) -> (f32, f32) {
        if self.min_size <= self.max_size {
            (self.min_size, self.max_size)
        } else {
            (self.max_size, self.min_size)
        }
    }
}

fn reset_unless(valid: impl Fn(f32) -> bool, name: &str, value: &mut f32, default: f32) {
    if !valid(*value) {
        log::warn!("settings: {} = {} is unusable, using {}", name, value, default);
        *value = default;
    }
}
