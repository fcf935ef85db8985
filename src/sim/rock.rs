//! Destructible rocks
//!
//! A rock's size drives its radius, health, drag and sprite frame through a
//! fixed table. Shattering a rock yields two fragments of the next size down.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId, SpawnRequest};
use crate::consts::*;
use crate::random_in_range;

/// Rock size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RockSize {
    Small,
    Medium,
    #[default]
    Large,
}

/// Sprite sheet rectangle for a rock size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteFrame {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Per-size configuration row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockStats {
    pub radius: f32,
    pub health: f32,
    pub drag: f32,
    pub frame: SpriteFrame,
}

const SMALL: RockStats = RockStats {
    radius: 4.0,
    health: 20.0,
    drag: 0.5,
    frame: SpriteFrame { x: 48, y: 16, w: 16, h: 16 },
};

const MEDIUM: RockStats = RockStats {
    radius: 8.0,
    health: 50.0,
    drag: 1.0,
    frame: SpriteFrame { x: 48, y: 0, w: 16, h: 16 },
};

const LARGE: RockStats = RockStats {
    radius: 16.0,
    health: 100.0,
    drag: 1.5,
    frame: SpriteFrame { x: 16, y: 0, w: 32, h: 32 },
};

impl RockSize {
    /// Parse a size name. Anything unrecognized is treated as `Large`.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "small" => RockSize::Small,
            "medium" => RockSize::Medium,
            _ => RockSize::Large,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RockSize::Small => "small",
            RockSize::Medium => "medium",
            RockSize::Large => "large",
        }
    }

    pub fn stats(&self) -> &'static RockStats {
        match self {
            RockSize::Small => &SMALL,
            RockSize::Medium => &MEDIUM,
            RockSize::Large => &LARGE,
        }
    }

    /// Size of the fragments this rock breaks into, if any
    pub fn smaller(&self) -> Option<RockSize> {
        match self {
            RockSize::Large => Some(RockSize::Medium),
            RockSize::Medium => Some(RockSize::Small),
            RockSize::Small => None,
        }
    }
}

/// A rock entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rock {
    pub body: Body,
    size: RockSize,
    pub health: f32,
    pub frame: SpriteFrame,
    pub crystals_to_drop: u32,
    /// Chance per hit of knocking a crystal loose
    pub crystal_chance: f32,
}

impl Rock {
    /// A fresh large rock with random spin
    pub fn new<R: Rng>(id: EntityId, rng: &mut R) -> Self {
        let mut body = Body::new(id, LARGE.radius, LAYER_ROCK);
        body.spin = random_in_range(rng, -ROCK_MAX_SPIN, ROCK_MAX_SPIN);
        let mut rock = Self {
            body,
            size: RockSize::Large,
            health: LARGE.health,
            frame: LARGE.frame,
            crystals_to_drop: random_in_range(rng, 3.0, 5.0).round() as u32,
            crystal_chance: ROCK_CRYSTAL_CHANCE,
        };
        rock.set_size(RockSize::Large);
        rock
    }

    pub fn size(&self) -> RockSize {
        self.size
    }

    /// Reconfigure radius, health, drag and frame for `size`
    pub fn set_size(&mut self, size: RockSize) {
        let stats = size.stats();
        self.size = size;
        self.body.radius = stats.radius;
        self.body.drag = stats.drag;
        self.health = stats.health;
        self.frame = stats.frame;
    }

    /// Apply damage. May knock loose a collectible crystal, lethal hit or not.
    pub fn take_damage<R: Rng>(&mut self, amount: f32, rng: &mut R) -> Option<SpawnRequest> {
        self.health -= amount;

        if rng.random::<f32>() < self.crystal_chance {
            Some(SpawnRequest::Crystal {
                pos: self.body.pos,
                collectible: true,
            })
        } else {
            None
        }
    }

    /// Per-frame hook: shatter once health runs out
    pub fn update(&mut self) -> Option<[SpawnRequest; 2]> {
        if self.health <= 0.0 {
            self.destroy()
        } else {
            None
        }
    }

    /// Mark destroyed and return the fragments to spawn
    ///
    /// Fragments are only produced by the first call.
    pub fn destroy(&mut self) -> Option<[SpawnRequest; 2]> {
        if !self.body.destroy() {
            return None;
        }
        let size = self.size.smaller()?;
        let pos: Vec2 = self.body.pos;
        Some([SpawnRequest::Rock { pos, size }, SpawnRequest::Rock { pos, size }])
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.body.is_destroyed()
    }
}
