//! Autominer headless runner
//!
//! Steps the simulation at a fixed timestep without a renderer. Ships sweep
//! their guns and fire on a cadence so the whole rock/crystal/cash loop runs.
//!
//! Usage: `autominer [frames] [config.json] [save.json]`
//! `AUTOMINER_SEED` overrides the configured seed.

use autominer::persistence::{JsonFileStore, SavingEconomy};
use autominer::platform::FollowCamera;
use autominer::sim::{World, WorldEvent};
use autominer::{Economy, WorldConfig};

/// Frames between volleys
const FIRE_INTERVAL: u64 = 20;
/// Frames between progress reports
const REPORT_INTERVAL: u64 = 600;

fn main() {
    env_logger::init();
    log::info!("Autominer (headless) starting...");

    let mut args = std::env::args().skip(1);
    let frames: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(3600);
    let config_path = args.next().unwrap_or_else(|| "autominer.json".to_string());
    let save_path = args.next().unwrap_or_else(|| "autominer-save.json".to_string());

    let mut config = WorldConfig::load(&config_path);
    if let Some(seed) = std::env::var("AUTOMINER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
    {
        config = config.with_seed(seed);
    }
    let dt = config.sim_dt;

    let mut economy = SavingEconomy::open(JsonFileStore::new(save_path));
    let mut camera = FollowCamera::default();
    let mut world = World::start(config, &economy.player, &mut camera);

    let mut shattered = 0u32;
    let mut unloaded = 0u32;
    for frame in 0..frames {
        if frame % FIRE_INTERVAL == 0 {
            let ids: Vec<_> = world.ships.iter().map(|s| s.id()).collect();
            for id in ids {
                if let Some(ship) = world.ship_mut(id) {
                    ship.body.rotation += 0.35;
                }
                world.fire_from_ship(id);
            }
        }

        world.update(dt, &mut economy);

        for event in world.drain_events() {
            match event {
                WorldEvent::RockShattered { .. } => shattered += 1,
                WorldEvent::CargoUnloaded { amount, .. } => unloaded += amount,
                _ => {}
            }
        }

        if frame % REPORT_INTERVAL == 0 {
            log::info!(
                "frame {}: rocks={} crystals={} bullets={} cash={}",
                frame,
                world.rocks.len(),
                world.crystals.len(),
                world.bullets.len(),
                economy.player.cash
            );
        }
    }

    economy.save_progress();
    println!(
        "Simulated {} frames: {} rocks shattered, {} crystals unloaded, cash {}",
        frames, shattered, unloaded, economy.player.cash
    );
}
