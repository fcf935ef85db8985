//! Projectiles fired by ships

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId};
use crate::consts::*;
use crate::heading;

/// A single-use projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub body: Body,
    pub damage: f32,
    /// Entity that fired it, if any
    pub owner: Option<EntityId>,
    /// Seconds left before it expires
    pub ttl: f32,
}

impl Bullet {
    /// Bullet at `pos` travelling along `rotation`
    pub fn new(id: EntityId, pos: Vec2, rotation: f32, owner: Option<EntityId>) -> Self {
        let mut body = Body::new(id, BULLET_RADIUS, LAYER_BULLET).at(pos);
        body.rotation = rotation;
        body.vel = heading(rotation) * BULLET_SPEED;
        Self {
            body,
            damage: BULLET_DAMAGE,
            owner,
            ttl: BULLET_LIFETIME,
        }
    }

    /// Per-frame hook: age out
    pub fn update(&mut self, dt: f32) {
        self.ttl -= dt;
        if self.ttl <= 0.0 {
            self.body.destroy();
        }
    }

    pub fn destroy(&mut self) -> bool {
        self.body.destroy()
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.body.is_destroyed()
    }
}
