//! Fixed timestep frame step
//!
//! One frame runs, strictly in order:
//! 1. reap entities destroyed last frame
//! 2. move every entity and run its per-frame hook
//! 3. resolve collisions against the new positions
//! 4. top the rock population back up (one rock per frame at most)
//!
//! Damage only accumulates during the collision pass. A rock that drops to
//! zero health shatters during the next frame's step and is reaped the frame
//! after that.

use super::collision::{Reposition, collide};
use super::crystal::CrystalTarget;
use super::entity::SpawnRequest;
use super::ship::ShipState;
use super::state::{World, WorldEvent};
use crate::player::Economy;

/// Mutable references to two distinct elements of a slice
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i != j);
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

impl World {
    /// Advance the world by one frame
    pub fn update(&mut self, dt: f32, economy: &mut impl Economy) {
        self.reap_destroyed();
        self.step_entities(dt);
        self.do_collisions(economy);
        self.do_min_rock_check();
        self.time_ticks += 1;
    }

    /// Remove destroyed bullets, rocks and crystals
    pub fn reap_destroyed(&mut self) {
        let events = &mut self.events;
        let mut reap = |id| events.push(WorldEvent::Detached { id });

        self.bullets.retain(|b| {
            if b.is_destroyed() {
                reap(b.body.id);
            }
            !b.is_destroyed()
        });
        self.rocks.retain(|r| {
            if r.is_destroyed() {
                reap(r.body.id);
            }
            !r.is_destroyed()
        });
        self.crystals.retain(|c| {
            if c.is_destroyed() {
                reap(c.body.id);
            }
            !c.is_destroyed()
        });
    }

    /// Integrate motion and run per-entity hooks
    ///
    /// Fragments from shattered rocks join the world after every existing
    /// entity has moved.
    pub fn step_entities(&mut self, dt: f32) {
        let mut spawns: Vec<SpawnRequest> = Vec::new();

        for rock in &mut self.rocks {
            rock.body.integrate(dt);
            let was_destroyed = rock.is_destroyed();
            let fragments = rock.update();
            if !was_destroyed && rock.is_destroyed() {
                log::debug!("Rock {:?} ({}) shattered", rock.body.id, rock.size().as_str());
                self.events.push(WorldEvent::RockShattered {
                    id: rock.body.id,
                    size: rock.size(),
                });
            }
            spawns.extend(fragments.into_iter().flatten());
        }

        for bullet in &mut self.bullets {
            bullet.body.integrate(dt);
            bullet.update(dt);
        }

        for ship in &mut self.ships {
            ship.body.integrate(dt);
            ship.update();
        }

        for i in 0..self.crystals.len() {
            let target_pos = self.crystals[i]
                .target
                .and_then(|target| self.target_position(target));
            let crystal = &mut self.crystals[i];
            crystal.body.integrate(dt);
            crystal.update(dt, target_pos);
        }

        for request in spawns {
            self.apply_spawn(request);
        }
    }

    /// Resolve every pairwise interaction for this frame
    pub fn do_collisions(&mut self, economy: &mut impl Economy) {
        let mut spawns: Vec<SpawnRequest> = Vec::new();

        // Rocks vs bullets, then rocks vs rocks
        for i in (0..self.rocks.len()).rev() {
            if self.rocks[i].is_destroyed() {
                continue;
            }

            for bullet in self.bullets.iter_mut().rev() {
                if bullet.is_destroyed() {
                    continue;
                }
                let rock = &mut self.rocks[i];
                if collide(&mut bullet.body, &mut rock.body, Reposition::Bounce, 1.0, 0.0, 0.01) {
                    if let Some(loose) = rock.take_damage(bullet.damage, &mut self.rng) {
                        spawns.push(loose);
                    }
                    bullet.destroy();
                }
            }

            for j in (0..i).rev() {
                let (rock, other) = pair_mut(&mut self.rocks, i, j);
                if other.is_destroyed() {
                    continue;
                }
                collide(&mut rock.body, &mut other.body, Reposition::Bounce, 0.5, 0.5, 0.0);
            }
        }

        for request in spawns.drain(..) {
            self.apply_spawn(request);
        }

        // Crystals vs mining ships and the station collector
        let collector = self.station.collector();
        let crystal_value = self.config.crystal_value;
        for crystal in self.crystals.iter_mut().rev() {
            for ship in self.ships.iter_mut().rev() {
                if crystal.is_destroyed() {
                    break;
                }
                if ship.is_cargo_full() || ship.state != ShipState::Mining {
                    continue;
                }

                let volume = crystal.body.circle();
                if crystal.collectible {
                    if volume.overlaps(&ship.circle()) {
                        ship.add_cargo(1);
                        crystal.destroy();
                    } else if volume.overlaps(&ship.attractor()) {
                        crystal.target = Some(CrystalTarget::Ship(ship.id()));
                    }
                } else if volume.overlaps(&collector) {
                    economy.award_cash(crystal_value);
                    economy.save_progress();
                    log::info!("Crystal delivered, +{} cash", crystal_value);
                    self.events.push(WorldEvent::CashAwarded {
                        amount: crystal_value,
                    });
                    crystal.destroy();
                } else {
                    crystal.target = Some(CrystalTarget::Station);
                }
            }
        }

        // Unloading ships docking with the station
        let dock = self.station.circle();
        for ship in self.ships.iter_mut().rev() {
            if ship.state != ShipState::Unloading || !ship.circle().overlaps(&dock) {
                continue;
            }
            let amount = ship.unload_cargo();
            log::debug!("Ship {:?} unloaded {} crystals", ship.id(), amount);
            self.events.push(WorldEvent::CargoUnloaded {
                ship: ship.id(),
                amount,
            });
            for _ in 0..amount {
                spawns.push(SpawnRequest::Crystal {
                    pos: ship.body.pos,
                    collectible: false,
                });
            }
        }

        for request in spawns {
            self.apply_spawn(request);
        }
    }

    /// Replenish the rock population by at most one rock
    pub fn do_min_rock_check(&mut self) {
        if self.rocks.len() < self.config.num_rocks {
            self.create_rock();
        }
    }
}
