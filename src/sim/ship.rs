//! Mining ships and the home station

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::entity::{Body, EntityId};
use crate::consts::*;

/// What a ship is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShipState {
    /// Parked, ignores crystals
    Idle,
    /// Collecting and attracting crystals
    #[default]
    Mining,
    /// Heading home to drop cargo at the station
    Unloading,
}

/// A player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub body: Body,
    pub state: ShipState,
    pub cargo: u32,
    pub cargo_capacity: u32,
    /// Radius of the crystal-attracting volume
    pub attractor_radius: f32,
}

impl Ship {
    pub fn new(id: EntityId, cargo_capacity: u32) -> Self {
        let mut body = Body::new(id, SHIP_RADIUS, LAYER_SHIP);
        body.drag = SHIP_DRAG;
        Self {
            body,
            state: ShipState::Mining,
            cargo: 0,
            cargo_capacity,
            attractor_radius: SHIP_ATTRACTOR_RADIUS,
        }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.body.id
    }

    /// Fill level in [0, 1]
    pub fn cargo_percent(&self) -> f32 {
        if self.cargo_capacity == 0 {
            return 1.0;
        }
        (self.cargo as f32 / self.cargo_capacity as f32).min(1.0)
    }

    pub fn is_cargo_full(&self) -> bool {
        self.cargo >= self.cargo_capacity
    }

    pub fn add_cargo(&mut self, amount: u32) {
        self.cargo = self.cargo.saturating_add(amount).min(self.cargo_capacity);
    }

    /// Empty the hold and go back to mining. Returns the units unloaded.
    pub fn unload_cargo(&mut self) -> u32 {
        let amount = std::mem::take(&mut self.cargo);
        self.state = ShipState::Mining;
        amount
    }

    /// Per-frame hook: a full hold sends the ship home
    pub fn update(&mut self) {
        if self.state == ShipState::Mining && self.is_cargo_full() {
            self.state = ShipState::Unloading;
        }
    }

    /// Hull collision volume
    #[inline]
    pub fn circle(&self) -> Circle {
        self.body.circle()
    }

    /// Larger volume that pulls collectible crystals in
    #[inline]
    pub fn attractor(&self) -> Circle {
        Circle::new(self.body.pos, self.attractor_radius)
    }
}

/// The home base: unloading point and crystal collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub body: Body,
    pub collector_radius: f32,
}

impl Station {
    pub fn new(id: EntityId, pos: Vec2) -> Self {
        Self {
            body: Body::new(id, STATION_RADIUS, LAYER_STATION).at(pos),
            collector_radius: STATION_COLLECTOR_RADIUS,
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        self.body.circle()
    }

    /// Volume that scores non-collectible crystals
    #[inline]
    pub fn collector(&self) -> Circle {
        Circle::new(self.body.pos, self.collector_radius)
    }
}
