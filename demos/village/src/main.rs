//! village: a handful of villagers living through two days.
//!
//! Each villager claims a bed (retrying unreachable ones with a jittered
//! back-off), wanders or idles during the day, glances at and greets its
//! neighbours, and sleeps in its bed at night.
//!
//! ```text
//! cargo run -p village -- demos/village/config.json
//! RUST_LOG=brain_behavior=trace cargo run -p village
//! ```

mod behaviors;
mod world;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use brain_core::{ActivityId, EntityId, Tick};
use brain_sim::{BrainObserver, Population};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use behaviors::{HOME, IDLE, REST, villager};
use world::{Village, VillageConfig};

// ── Observer ──────────────────────────────────────────────────────────────────

/// Counts behavior starts per label.
#[derive(Default)]
struct StartCounter {
    starts: BTreeMap<String, usize>,
    ticks:  u64,
}

impl BrainObserver for StartCounter {
    fn on_tick_end(&mut self, _tick: Tick, _thought: usize) {
        self.ticks += 1;
    }

    fn on_behavior_started(&mut self, _entity: EntityId, _tick: Tick, label: &str) {
        *self.starts.entry(label.to_string()).or_default() += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();

    // 1. Configuration.
    let path = std::env::args().nth(1).map(PathBuf::from);
    let config = VillageConfig::load(path.as_deref())?;
    info!(
        villagers = config.villagers,
        beds = config.beds.len(),
        ticks = config.sim.total_ticks,
        seed = config.sim.seed,
        "config loaded"
    );

    // 2. World and brains.
    let mut population = Population::new(config.sim.clone(), Village::from_config(&config));
    for e in 0..config.villagers {
        population.insert(villager(EntityId(e), &config)?)?;
    }

    // 3. Run, following the day/night schedule.
    let mut counter = StartCounter::default();
    let end = config.sim.end_tick();
    let t0 = Instant::now();
    while population.clock.now() < end {
        let now = population.clock.now();
        let night = config.is_night(now);
        if night != population.world.is_night {
            info!(tick = now.0, night, "schedule change");
        }
        population.world.is_night = night;
        let plan: &[ActivityId] = if night { &[REST, IDLE] } else { &[IDLE] };
        for brain in population.brains_mut() {
            brain.set_active_activity_to_first_valid(plan);
        }
        population.step(&mut counter);
    }
    population.stop_all();
    let elapsed = t0.elapsed();

    // 4. Summary.
    println!(
        "Simulated {} ticks in {:.3} s",
        counter.ticks,
        elapsed.as_secs_f64()
    );
    println!(
        "  path checks: {}  greetings: {}  hums: {}",
        population.world.path_checks, population.world.greetings, population.world.hums
    );
    println!();

    println!("{:<40} {:>8}", "Behavior", "Starts");
    println!("{}", "-".repeat(49));
    for (label, n) in &counter.starts {
        println!("{label:<40} {n:>8}");
    }
    println!();

    println!("{:<14} {:<16} {:<16} {:<10}", "Villager", "Home", "Position", "Activity");
    println!("{}", "-".repeat(58));
    for brain in population.brains() {
        let home = brain
            .memory()
            .get(HOME)
            .map_or_else(|| "-".to_string(), |h| h.to_string());
        let activity = match brain.current_activity() {
            Some(REST) => "rest",
            Some(IDLE) => "idle",
            _ => "-",
        };
        println!(
            "{:<14} {:<16} {:<16} {:<10}",
            brain.entity().to_string(),
            home,
            population.world.position(brain.entity()).to_string(),
            activity,
        );
    }

    Ok(())
}
