//! Shared entity state
//!
//! Every simulated object embeds a [`Body`]: position, velocity, spin,
//! collision radius and the destroyed flag the world reaps on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::rock::RockSize;
use crate::normalize_angle;

/// Stable handle to an entity owned by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Entity variants, used for scene attach events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Rock,
    Crystal,
    Bullet,
    Ship,
    Station,
}

/// Spawn intent emitted by an entity and carried out by the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    Rock { pos: Vec2, size: RockSize },
    Crystal { pos: Vec2, collectible: bool },
}

/// Physical state common to all entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Facing (radians, normalized to [-π, π))
    pub rotation: f32,
    /// Angular velocity (radians/sec)
    pub spin: f32,
    /// Fraction of velocity shed per second
    pub drag: f32,
    /// Collision radius
    pub radius: f32,
    /// Draw/update ordering hint (lower first)
    pub layer: i32,
    destroyed: bool,
}

impl Body {
    pub fn new(id: EntityId, radius: f32, layer: i32) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
            spin: 0.0,
            drag: 0.0,
            radius,
            layer,
            destroyed: false,
        }
    }

    /// Builder-style placement
    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    /// Advance position and rotation by one timestep, then apply drag
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation = normalize_angle(self.rotation + self.spin * dt);
        if self.drag > 0.0 {
            self.vel *= (1.0 - self.drag * dt).max(0.0);
        }
    }

    /// Move by exactly one velocity step (not scaled by dt)
    ///
    /// Spawned entities use this to start clear of whatever spawned them.
    pub fn nudge_by_velocity(&mut self) {
        self.pos += self.vel;
    }

    /// Collision volume at the current position
    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Mark for reaping. Returns true only for the call that flipped the flag.
    pub fn destroy(&mut self) -> bool {
        !std::mem::replace(&mut self.destroyed, true)
    }
}
