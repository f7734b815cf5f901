//! Seeded object spawning
//!
//! Same seed + same settings => same objects, in the same order. Never
//! panics on odd settings: ranges rand cannot sample collapse to their
//! midpoint.

use glam::Vec2;
use rand::distr::Uniform;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::GameObject;
use crate::settings::Settings;

/// Builds random objects inside the arena
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// One random object fully inside the arena (when the arena is large enough)
    pub fn spawn(&mut self, settings: &Settings) -> GameObject {
        let (min_size, max_size) = settings.size_range();
        let size = self.uniform(min_size, max_size);

        let arena = settings.arena();
        let pos = arena.min
            + Vec2::new(
                self.coord(size, arena.width()),
                self.coord(size, arena.height()),
            );

        // Scale a unit sample so the range width can never overflow
        let speed = settings.max_speed.abs();
        let vel = if speed > 0.0 && speed.is_finite() {
            Vec2::new(
                self.rng.random_range(-1.0f32..=1.0),
                self.rng.random_range(-1.0f32..=1.0),
            ) * speed
        } else {
            Vec2::ZERO
        };

        let evil_ratio = if settings.evil_ratio.is_nan() {
            0.0
        } else {
            settings.evil_ratio.clamp(0.0, 1.0)
        };
        let is_evil = self.rng.random_bool(f64::from(evil_ratio));
        let css_color = if is_evil {
            &settings.evil_color
        } else {
            &settings.neutral_color
        };

        GameObject::new(pos, vel, size, css_color.as_str(), settings.filled, is_evil)
    }

    /// `settings.spawn_count` objects
    pub fn spawn_batch(&mut self, settings: &Settings) -> Vec<GameObject> {
        (0..settings.spawn_count).map(|_| self.spawn(settings)).collect()
    }

    fn coord(&mut self, size: f32, extent: f32) -> f32 {
        let (lo, hi) = (size, extent - size);
        if hi > lo {
            self.uniform(lo, hi)
        } else {
            extent / 2.0
        }
    }

    /// Sample `[lo, hi]`, or the midpoint when the range is empty or not finite
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        match Uniform::new_inclusive(lo, hi) {
            Ok(dist) => self.rng.sample(dist),
            Err(_) => lo / 2.0 + hi / 2.0,
        }
    }
}
