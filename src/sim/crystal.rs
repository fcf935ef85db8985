//! Crystal pickups
//!
//! Collectible crystals are knocked loose from rocks and picked up by mining
//! ships. Non-collectible crystals are cargo on its way into the station and
//! score cash when they reach the collector.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, EntityId};
use crate::consts::*;

/// Where a crystal is homing to
///
/// A handle, not a reference: ships are looked up by id every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrystalTarget {
    Ship(EntityId),
    Station,
}

/// A crystal entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crystal {
    pub body: Body,
    pub collectible: bool,
    pub target: Option<CrystalTarget>,
}

impl Crystal {
    pub fn new(id: EntityId, collectible: bool) -> Self {
        let mut body = Body::new(id, CRYSTAL_RADIUS, LAYER_CRYSTAL);
        body.drag = CRYSTAL_DRAG;
        Self {
            body,
            collectible,
            target: None,
        }
    }

    /// Per-frame hook: accelerate toward the resolved target position
    ///
    /// `target_pos` is `None` when the target no longer exists, which clears it.
    pub fn update(&mut self, dt: f32, target_pos: Option<Vec2>) {
        if self.target.is_none() {
            return;
        }
        match target_pos {
            Some(pos) => {
                let dir = (pos - self.body.pos).normalize_or_zero();
                self.body.vel += dir * CRYSTAL_PULL * dt;
            }
            None => self.target = None,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_homes_toward_target() {
        let mut c = Crystal::new(EntityId(1), true);
        c.target = Some(CrystalTarget::Station);
        c.update(0.5, Some(Vec2::new(100.0, 0.0)));
        assert!(c.body.vel.x > 0.0);
        assert!(c.body.vel.y.abs() < 1e-6);
    }

    #[test]
    fn test_lost_target_is_cleared() {
        let mut c = Crystal::new(EntityId(1), true);
        c.target = Some(CrystalTarget::Ship(EntityId(7)));
        c.update(0.1, None);
        assert_eq!(c.target, None);
        assert_eq!(c.body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_untargeted_crystal_drifts() {
        let mut c = Crystal::new(EntityId(1), false);
        c.update(0.1, Some(Vec2::new(50.0, 50.0)));
        assert_eq!(c.body.vel, Vec2::ZERO);
    }
}
