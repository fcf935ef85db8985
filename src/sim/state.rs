//! World state: entity collections, spawning and queries
//!
//! The world is the only owner of entities. Everything else refers to them by
//! [`EntityId`]. Spawns from entities arrive as [`SpawnRequest`]s so the
//! bookkeeping stays in one place.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::bullet::Bullet;
use super::crystal::{Crystal, CrystalTarget};
use super::entity::{EntityId, EntityKind, SpawnRequest};
use super::rock::{Rock, RockSize};
use super::ship::{Ship, Station};
use crate::consts::*;
use crate::platform::{CameraFocus, FocusTarget};
use crate::player::Player;
use crate::settings::WorldConfig;
use crate::{random_in_range, random_point_in_square};

/// Something the host should react to (scene graph, HUD, audio)
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    /// Entity entered the world and should be attached to the scene
    Attached {
        id: EntityId,
        kind: EntityKind,
        layer: i32,
    },
    /// Entity was reaped and should be detached from the scene
    Detached { id: EntityId },
    /// A rock ran out of health
    RockShattered { id: EntityId, size: RockSize },
    /// Cash credited to the player
    CashAwarded { amount: u64 },
    /// A ship emptied its hold at the station
    CargoUnloaded { ship: EntityId, amount: u32 },
}

/// The simulated world
#[derive(Debug)]
pub struct World {
    pub config: WorldConfig,
    pub(crate) rng: Pcg32,
    pub rocks: Vec<Rock>,
    pub bullets: Vec<Bullet>,
    pub crystals: Vec<Crystal>,
    pub ships: Vec<Ship>,
    pub station: Station,
    /// Frames stepped so far
    pub time_ticks: u64,
    pub(crate) events: Vec<WorldEvent>,
    ship_focus_index: isize,
    next_id: u32,
}

impl World {
    /// Create a world with its starting rock population and the station at the origin
    pub fn new(config: WorldConfig) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        let mut world = Self {
            config,
            rng,
            rocks: Vec::new(),
            bullets: Vec::new(),
            crystals: Vec::new(),
            ships: Vec::new(),
            station: Station::new(EntityId(0), Vec2::ZERO),
            time_ticks: 0,
            events: Vec::new(),
            ship_focus_index: 0,
            next_id: 1,
        };
        world.attach(world.station.body.id, EntityKind::Station, LAYER_STATION);

        for _ in 0..world.config.num_rocks {
            world.create_rock();
        }

        world
    }

    /// Full session start: world, the player's fleet around the station,
    /// and the camera on the first ship
    pub fn start(config: WorldConfig, player: &Player, camera: &mut impl CameraFocus) -> Self {
        let mut world = Self::new(config);
        let spread = world.station.body.radius;
        for _ in 0..player.ships {
            let offset = Vec2::new(
                random_in_range(&mut world.rng, -spread, spread),
                random_in_range(&mut world.rng, -spread, spread),
            );
            let pos = world.station.body.pos + offset;
            world.spawn_ship(pos);
        }
        log::info!(
            "World started: seed={} rocks={} ships={}",
            world.config.seed,
            world.rocks.len(),
            world.ships.len()
        );
        world.focus_on_ship(camera);
        world
    }

    /// Allocate a new entity ID
    ///
    /// IDs wrap past `u32::MAX` back to 1; ID 0 always stays the station's.
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = match self.next_id.checked_add(1) {
            Some(next) => next,
            None => {
                log::warn!("Entity ID space exhausted, wrapping");
                1
            }
        };
        id
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn attach(&mut self, id: EntityId, kind: EntityKind, layer: i32) {
        self.events.push(WorldEvent::Attached { id, kind, layer });
    }

    /// Carry out a spawn intent emitted by an entity
    pub fn apply_spawn(&mut self, request: SpawnRequest) {
        match request {
            SpawnRequest::Rock { pos, size } => {
                self.request_rock(pos, size);
            }
            SpawnRequest::Crystal { pos, collectible } => {
                self.request_crystal(pos, collectible);
            }
        }
    }

    /// Fire a bullet from `position` along `rotation`
    pub fn request_bullet(
        &mut self,
        position: Vec2,
        rotation: f32,
        owner: Option<EntityId>,
    ) -> EntityId {
        let id = self.next_entity_id();
        let bullet = Bullet::new(id, position, rotation, owner);
        self.bullets.push(bullet);
        self.attach(id, EntityKind::Bullet, LAYER_BULLET);
        id
    }

    /// Spawn a rock of `size` drifting away from `position`
    pub fn request_rock(&mut self, position: Vec2, size: RockSize) -> EntityId {
        let id = self.next_entity_id();
        let mut rock = Rock::new(id, &mut self.rng);
        rock.set_size(size);
        rock.crystal_chance = self.config.rock_crystal_chance;
        rock.body.pos = position;
        rock.body.vel = Vec2::new(
            random_in_range(&mut self.rng, -ROCK_SPAWN_SPEED, ROCK_SPAWN_SPEED),
            random_in_range(&mut self.rng, -ROCK_SPAWN_SPEED, ROCK_SPAWN_SPEED),
        );
        // Start clear of whatever spawned it
        rock.body.nudge_by_velocity();

        log::debug!("Spawned {} rock {:?} at {}", size.as_str(), id, rock.body.pos);
        let layer = rock.body.layer;
        self.rocks.push(rock);
        self.attach(id, EntityKind::Rock, layer);
        id
    }

    /// Spawn a crystal drifting away from `position`
    pub fn request_crystal(&mut self, position: Vec2, collectible: bool) -> EntityId {
        let id = self.next_entity_id();
        let mut crystal = Crystal::new(id, collectible);
        crystal.body.pos = position;
        crystal.body.vel = Vec2::new(
            random_in_range(&mut self.rng, -CRYSTAL_SPAWN_SPEED, CRYSTAL_SPAWN_SPEED),
            random_in_range(&mut self.rng, -CRYSTAL_SPAWN_SPEED, CRYSTAL_SPAWN_SPEED),
        );
        crystal.body.nudge_by_velocity();

        self.crystals.push(crystal);
        self.attach(id, EntityKind::Crystal, LAYER_CRYSTAL);
        id
    }

    /// Add a ship docked at the station
    pub fn add_player_ship(&mut self) -> EntityId {
        let pos = self.station.body.pos;
        self.spawn_ship(pos)
    }

    fn spawn_ship(&mut self, pos: Vec2) -> EntityId {
        let id = self.next_entity_id();
        let mut ship = Ship::new(id, self.config.ship_cargo_capacity);
        ship.body.pos = pos;
        self.ships.push(ship);
        self.attach(id, EntityKind::Ship, LAYER_SHIP);
        id
    }

    /// Create a rock of random size anywhere in the world
    pub fn create_rock(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let mut rock = Rock::new(id, &mut self.rng);
        rock.crystal_chance = self.config.rock_crystal_chance;
        rock.body.pos = random_point_in_square(&mut self.rng, self.config.world_size);

        let roll: f32 = self.rng.random();
        if roll > 0.66 {
            rock.set_size(RockSize::Medium);
        } else if roll > 0.33 {
            rock.set_size(RockSize::Small);
        }

        let layer = rock.body.layer;
        self.rocks.push(rock);
        self.attach(id, EntityKind::Rock, layer);
        id
    }

    pub fn ship(&self, id: EntityId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    pub fn ship_mut(&mut self, id: EntityId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id() == id)
    }

    /// Fire from a ship's nose. `None` if the ship doesn't exist.
    pub fn fire_from_ship(&mut self, id: EntityId) -> Option<EntityId> {
        let ship = self.ship(id)?;
        let (pos, rotation) = (ship.body.pos, ship.body.rotation);
        let muzzle = pos + crate::heading(rotation) * ship.body.radius;
        Some(self.request_bullet(muzzle, rotation, Some(id)))
    }

    /// Resolve a crystal target handle to a position
    pub fn target_position(&self, target: CrystalTarget) -> Option<Vec2> {
        match target {
            CrystalTarget::Station => Some(self.station.body.pos),
            CrystalTarget::Ship(id) => self.ship(id).map(|s| s.body.pos),
        }
    }

    /// Closest rock to `pos`, `None` when there are no rocks
    pub fn nearest_rock(&self, pos: Vec2) -> Option<&Rock> {
        self.rocks.iter().min_by(|a, b| {
            a.body
                .pos
                .distance_squared(pos)
                .partial_cmp(&b.body.pos.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// A uniformly chosen rock, `None` when there are no rocks
    pub fn random_rock(&mut self) -> Option<&Rock> {
        if self.rocks.is_empty() {
            return None;
        }
        let last = (self.rocks.len() - 1) as f32;
        let index = random_in_range(&mut self.rng, 0.0, last).round() as usize;
        self.rocks.get(index.min(self.rocks.len() - 1))
    }

    /// Point the camera at the ship under the focus index, wrapping around
    pub fn focus_on_ship(&mut self, camera: &mut impl CameraFocus) {
        if self.ships.is_empty() {
            return;
        }
        let count = self.ships.len() as isize;
        if self.ship_focus_index > count - 1 {
            self.ship_focus_index = 0;
        } else if self.ship_focus_index < 0 {
            self.ship_focus_index = count - 1;
        }
        let id = self.ships[self.ship_focus_index as usize].id();
        camera.set_target(FocusTarget::Ship(id));
    }

    pub fn focus_next_ship(&mut self, camera: &mut impl CameraFocus) {
        self.ship_focus_index += 1;
        self.focus_on_ship(camera);
    }

    pub fn focus_prev_ship(&mut self, camera: &mut impl CameraFocus) {
        self.ship_focus_index -= 1;
        self.focus_on_ship(camera);
    }

    pub fn focus_on_station(&self, camera: &mut impl CameraFocus) {
        camera.set_target(FocusTarget::Station);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::FollowCamera;

    fn empty_world(seed: u64) -> World {
        let config = WorldConfig {
            num_rocks: 0,
            ..WorldConfig::default()
        };
        World::new(config.with_seed(seed))
    }

    #[test]
    fn test_entity_ids_wrap_past_station() {
        let mut world = empty_world(5);
        world.next_id = u32::MAX;
        assert_eq!(world.next_entity_id(), EntityId(u32::MAX));
        assert_eq!(world.next_entity_id(), EntityId(1));
    }

    #[test]
    fn test_new_world_population() {
        let config = WorldConfig {
            num_rocks: 25,
            ..WorldConfig::default()
        };
        let world = World::new(config);
        assert_eq!(world.rocks.len(), 25);
        let half = world.config.world_size / 2.0;
        assert!(
            world
                .rocks
                .iter()
                .all(|r| r.body.pos.x.abs() <= half && r.body.pos.y.abs() <= half)
        );
    }

    #[test]
    fn test_request_rock_offset_is_velocity() {
        let mut world = empty_world(3);
        let origin = Vec2::new(100.0, -50.0);
        world.request_rock(origin, RockSize::Medium);

        let rock = &world.rocks[0];
        assert_eq!(rock.size(), RockSize::Medium);
        assert!((rock.body.pos - origin - rock.body.vel).length() < 1e-4);
        assert!(rock.body.vel.x.abs() <= ROCK_SPAWN_SPEED);
        assert!(rock.body.vel.y.abs() <= ROCK_SPAWN_SPEED);
    }

    #[test]
    fn test_request_rock_is_deterministic() {
        let mut a = empty_world(11);
        let mut b = empty_world(11);
        a.request_rock(Vec2::ZERO, RockSize::Medium);
        b.request_rock(Vec2::ZERO, RockSize::Medium);
        assert_eq!(a.rocks[0].body.pos, b.rocks[0].body.pos);
    }

    #[test]
    fn test_crystal_spawns_clear_of_origin() {
        let mut world = empty_world(1);
        let pos = Vec2::new(5.0, 5.0);
        world.request_crystal(pos, true);
        let c = &world.crystals[0];
        assert!((c.body.pos - Vec2::new(5.0, 5.0) - c.body.vel).length() < 1e-4);
        assert!(c.collectible);
    }

    #[test]
    fn test_spawns_emit_attach_events() {
        let mut world = empty_world(1);
        world.drain_events();
        let id = world.request_bullet(Vec2::ZERO, 0.0, None);
        assert_eq!(
            world.drain_events(),
            vec![WorldEvent::Attached {
                id,
                kind: EntityKind::Bullet,
                layer: LAYER_BULLET
            }]
        );
        assert!(world.drain_events().is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut world = empty_world(1);
        let a = world.request_rock(Vec2::ZERO, RockSize::Small);
        let b = world.request_crystal(Vec2::ZERO, false);
        let c = world.add_player_ship();
        assert!(a != b && b != c && a != c);
        assert_ne!(a, world.station.body.id);
    }

    #[test]
    fn test_nearest_rock() {
        let mut world = empty_world(1);
        assert!(world.nearest_rock(Vec2::ZERO).is_none());

        world.request_rock(Vec2::new(500.0, 0.0), RockSize::Small);
        let near = world.request_rock(Vec2::new(-100.0, 0.0), RockSize::Small);
        assert_eq!(world.nearest_rock(Vec2::ZERO).unwrap().body.id, near);
    }

    #[test]
    fn test_random_rock_on_empty_world() {
        let mut world = empty_world(1);
        assert!(world.random_rock().is_none());
        world.request_rock(Vec2::ZERO, RockSize::Large);
        assert!(world.random_rock().is_some());
    }

    #[test]
    fn test_start_places_fleet_and_focuses() {
        let mut camera = FollowCamera::default();
        let player = Player { cash: 0, ships: 3 };
        let config = WorldConfig {
            num_rocks: 5,
            ..WorldConfig::default()
        };
        let world = World::start(config, &player, &mut camera);

        assert_eq!(world.ships.len(), 3);
        let r = world.station.body.radius;
        for ship in &world.ships {
            assert!(ship.body.pos.x.abs() <= r && ship.body.pos.y.abs() <= r);
        }
        assert_eq!(camera.target, Some(FocusTarget::Ship(world.ships[0].id())));
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut camera = FollowCamera::default();
        let mut world = empty_world(1);
        let first = world.add_player_ship();
        let second = world.add_player_ship();

        world.focus_next_ship(&mut camera);
        assert_eq!(camera.target, Some(FocusTarget::Ship(second)));
        world.focus_next_ship(&mut camera);
        assert_eq!(camera.target, Some(FocusTarget::Ship(first)));
        world.focus_prev_ship(&mut camera);
        assert_eq!(camera.target, Some(FocusTarget::Ship(second)));

        world.focus_on_station(&mut camera);
        assert_eq!(camera.target, Some(FocusTarget::Station));
    }

    #[test]
    fn test_fire_from_ship() {
        let mut world = empty_world(1);
        let ship = world.add_player_ship();
        let bullet = world.fire_from_ship(ship).unwrap();
        assert_eq!(world.bullets[0].body.id, bullet);
        assert_eq!(world.bullets[0].owner, Some(ship));
        assert!(world.fire_from_ship(EntityId(9999)).is_none());
    }

    #[test]
    fn test_apply_spawn_crystal() {
        let mut world = empty_world(1);
        world.apply_spawn(SpawnRequest::Crystal {
            pos: Vec2::ZERO,
            collectible: false,
        });
        assert_eq!(world.crystals.len(), 1);
        assert!(!world.crystals[0].collectible);
    }
}
