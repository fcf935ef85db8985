//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (collection order, newest last)
//! - No rendering or platform dependencies beyond the host traits

pub mod bullet;
pub mod circle;
pub mod collision;
pub mod crystal;
pub mod entity;
pub mod rock;
pub mod ship;
pub mod state;
pub mod tick;

pub use bullet::Bullet;
pub use circle::Circle;
pub use collision::{CollisionResult, Reposition, circle_collision, collide};
pub use crystal::{Crystal, CrystalTarget};
pub use entity::{Body, EntityId, EntityKind, SpawnRequest};
pub use rock::{Rock, RockSize, RockStats, SpriteFrame};
pub use ship::{Ship, ShipState, Station};
pub use state::{World, WorldEvent};
