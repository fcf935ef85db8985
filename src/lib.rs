//! Autominer - asteroid mining arcade simulation core
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, world)
//! - `player`: Player cash and fleet size
//! - `persistence`: Save/load of player progress
//! - `platform`: Host collaborators (camera focus)
//! - `settings`: Data-driven world configuration

pub mod persistence;
pub mod platform;
pub mod player;
pub mod settings;
pub mod sim;

pub use player::{Economy, Player};
pub use settings::WorldConfig;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World square edge length, centered on the origin
    pub const WORLD_SIZE: f32 = 2500.0;
    /// Target rock population
    pub const NUM_ROCKS: usize = 150;

    /// Damage dealt by a single bullet hit
    pub const BULLET_DAMAGE: f32 = 34.0;
    /// Bullet muzzle speed (units/s)
    pub const BULLET_SPEED: f32 = 400.0;
    /// Seconds before an unused bullet expires
    pub const BULLET_LIFETIME: f32 = 2.0;
    pub const BULLET_RADIUS: f32 = 2.0;

    /// Max per-axis speed of a freshly spawned rock fragment
    pub const ROCK_SPAWN_SPEED: f32 = 20.0;
    /// Max per-axis speed of a freshly spawned crystal
    pub const CRYSTAL_SPAWN_SPEED: f32 = 5.0;
    /// Chance that a hit knocks a crystal loose
    pub const ROCK_CRYSTAL_CHANCE: f32 = 0.33;
    /// Max rock spin (rad/s, either direction)
    pub const ROCK_MAX_SPIN: f32 = 3.0;

    pub const CRYSTAL_RADIUS: f32 = 2.0;
    /// Cash awarded per crystal delivered to the station
    pub const CRYSTAL_VALUE: u64 = 10;
    /// Homing acceleration toward the crystal's target (units/s²)
    pub const CRYSTAL_PULL: f32 = 120.0;
    pub const CRYSTAL_DRAG: f32 = 1.0;

    pub const SHIP_RADIUS: f32 = 8.0;
    /// Crystals inside this radius home toward the ship
    pub const SHIP_ATTRACTOR_RADIUS: f32 = 64.0;
    pub const SHIP_CARGO_CAPACITY: u32 = 20;
    pub const SHIP_DRAG: f32 = 0.8;

    pub const STATION_RADIUS: f32 = 48.0;
    pub const STATION_COLLECTOR_RADIUS: f32 = 24.0;

    /// Draw layers (lower draws first)
    pub const LAYER_ROCK: i32 = -5;
    pub const LAYER_BULLET: i32 = -5;
    pub const LAYER_CRYSTAL: i32 = -4;
    pub const LAYER_STATION: i32 = -10;
    pub const LAYER_SHIP: i32 = 0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit vector pointing along `rotation`
#[inline]
pub fn heading(rotation: f32) -> Vec2 {
    Vec2::new(rotation.cos(), rotation.sin())
}

/// Uniform float in `[min, max]`
///
/// Returns `min` when the range is empty or inverted instead of panicking.
#[inline]
pub fn random_in_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Uniform point inside the axis-aligned square of edge `size` centered on the origin
pub fn random_point_in_square<R: Rng>(rng: &mut R, size: f32) -> Vec2 {
    let half = size / 2.0;
    Vec2::new(
        random_in_range(rng, -half, half),
        random_in_range(rng, -half, half),
    )
}
