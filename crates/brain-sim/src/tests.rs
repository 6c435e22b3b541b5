//! Unit tests for brain-sim.

use brain_behavior::{Behavior, BehaviorContext, BoxedBehavior, Timed};
use brain_core::{ActivityId, EntityId, SimConfig, Tick};
use brain_memory::{EntryCondition, MemoryBuilder, MemoryKey};

use crate::{BrainBuilder, BrainConfig, BrainObserver, NoopObserver, Population, SimError};

// ── Helpers ───────────────────────────────────────────────────────────────────

const CORE: ActivityId = ActivityId(0);
const IDLE: ActivityId = ActivityId(1);
const WORK: ActivityId = ActivityId(2);

const JOB_SITE: MemoryKey<u32> = MemoryKey::new(0, "job_site");
const WORK_TARGET: MemoryKey<u32> = MemoryKey::new(1, "work_target");
const HEARD_BELL: MemoryKey<()> = MemoryKey::new(2, "heard_bell");

#[derive(Default)]
struct World {
    /// `(entity, event)` in the order events happened.
    log: Vec<(u32, String)>,
}

impl World {
    fn events_of(&self, entity: u32) -> Vec<&str> {
        self.log
            .iter()
            .filter(|(e, _)| *e == entity)
            .map(|(_, s)| s.as_str())
            .collect()
    }
}

/// Logs `name:start`, `name:tick`, `name:stop`.
struct Act {
    name: &'static str,
}

impl Behavior<World> for Act {
    fn on_start(&mut self, ctx: &mut BehaviorContext<'_, World>) {
        ctx.world.log.push((ctx.entity.0, format!("{}:start", self.name)));
    }

    fn on_tick(&mut self, ctx: &mut BehaviorContext<'_, World>) {
        ctx.world.log.push((ctx.entity.0, format!("{}:tick", self.name)));
    }

    fn on_stop(&mut self, ctx: &mut BehaviorContext<'_, World>) {
        ctx.world.log.push((ctx.entity.0, format!("{}:stop", self.name)));
    }

    fn label(&self) -> String {
        self.name.to_string()
    }
}

fn act(name: &'static str, ticks: u64) -> BoxedBehavior<World> {
    Box::new(Timed::new(Act { name }).with_fixed_duration(ticks))
}

fn memory() -> MemoryBuilder {
    MemoryBuilder::new()
        .register(JOB_SITE)
        .register(WORK_TARGET)
        .register(HEARD_BELL)
}

/// Core `look` (priority 0), idle `wander` (5), work `work` (5, needs a
/// job site, erases the work target on exit).
fn villager(entity: u32) -> BrainBuilder<World> {
    BrainBuilder::new(EntityId(entity), 42, memory())
        .add_activity(CORE, vec![(0, act("look", 3))])
        .add_activity(IDLE, vec![(5, act("wander", 10))])
        .add_activity_with_conditions(
            WORK,
            vec![(5, act("work", 10))],
            EntryCondition::new().present(JOB_SITE),
            [WORK_TARGET.id()],
        )
        .core_activities([CORE])
        .default_activity(IDLE)
}

#[derive(Default)]
struct Recorder {
    started:    Vec<(EntityId, Tick, String)>,
    stopped:    Vec<(EntityId, Tick, String)>,
    tick_ends:  Vec<(Tick, usize)>,
    final_tick: Option<Tick>,
}

impl BrainObserver for Recorder {
    fn on_tick_end(&mut self, tick: Tick, thought: usize) {
        self.tick_ends.push((tick, thought));
    }

    fn on_behavior_started(&mut self, entity: EntityId, tick: Tick, label: &str) {
        self.started.push((entity, tick, label.to_string()));
    }

    fn on_behavior_stopped(&mut self, entity: EntityId, tick: Tick, label: &str) {
        self.stopped.push((entity, tick, label.to_string()));
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.final_tick = Some(final_tick);
    }
}

// ── BrainConfig ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use super::*;

    #[test]
    fn default_thinks_every_tick() {
        let c = BrainConfig::default();
        assert!((0..10).all(|t| c.should_think(Tick(t))));
    }

    #[test]
    fn cadence_with_offset() {
        let c = BrainConfig { think_every_ticks: 4, think_offset_ticks: 1 };
        let thinks: Vec<u64> = (0..12).filter(|&t| c.should_think(Tick(t))).collect();
        assert_eq!(thinks, vec![3, 7, 11]);
    }

    #[test]
    fn deterministic_offset_spreads_entities() {
        let offsets: Vec<u32> = (0..5)
            .map(|e| BrainConfig::deterministic(EntityId(e), 5).think_offset_ticks)
            .collect();
        assert_eq!(offsets, vec![0, 1, 2, 3, 4]);
        assert_eq!(BrainConfig::deterministic(EntityId(9), 0).think_every_ticks, 1);
    }
}

// ── BrainBuilder validation ───────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn builds_and_enters_default_activity() {
        let brain = villager(0).build().unwrap();
        assert_eq!(brain.current_activity(), Some(IDLE));
        assert!(brain.is_active(CORE));
        assert!(brain.is_active(IDLE));
        assert!(!brain.is_active(WORK));
        assert_eq!(brain.behavior_count(), 3);
    }

    #[test]
    fn duplicate_activity_errors() {
        let result = villager(0).add_activity(IDLE, vec![]).build();
        assert!(matches!(result, Err(SimError::DuplicateActivity(a)) if a == IDLE));
    }

    #[test]
    fn unknown_core_activity_errors() {
        let result = villager(0).core_activities([ActivityId(99)]).build();
        assert!(matches!(
            result,
            Err(SimError::UnknownActivity { what: "core activity", .. })
        ));
    }

    #[test]
    fn unknown_default_activity_errors() {
        let result = BrainBuilder::<World>::new(EntityId(0), 0, memory())
            .default_activity(WORK)
            .build();
        assert!(matches!(
            result,
            Err(SimError::UnknownActivity { what: "default activity", .. })
        ));
    }

    #[test]
    fn zero_think_interval_errors() {
        let result = villager(0)
            .config(BrainConfig { think_every_ticks: 0, think_offset_ticks: 0 })
            .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn memory_conflict_surfaces() {
        const CLASH: MemoryKey<String> = MemoryKey::new(0, "clash");
        let result = BrainBuilder::<World>::new(EntityId(0), 0, memory().register(CLASH)).build();
        assert!(matches!(result, Err(SimError::Memory(_))));
    }
}

// ── Brain ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod brain {
    use super::*;

    #[test]
    fn starts_in_priority_order_then_ticks() {
        let mut world = World::default();
        let mut brain = villager(0).build().unwrap();
        brain.tick(&mut world, Tick(0), &mut NoopObserver);
        // A behavior started this tick is also updated this tick.
        assert_eq!(
            world.events_of(0),
            vec!["look:start", "wander:start", "look:tick", "wander:tick"]
        );
        brain.tick(&mut world, Tick(1), &mut NoopObserver);
        assert_eq!(world.events_of(0)[4..], ["look:tick", "wander:tick"]);
        assert_eq!(brain.running_behaviors(), vec!["look", "wander"]);
    }

    #[test]
    fn inactive_activity_never_starts() {
        let mut world = World::default();
        let mut brain = villager(0).build().unwrap();
        for t in 0..30 {
            brain.tick(&mut world, Tick(t), &mut NoopObserver);
        }
        assert!(!world.events_of(0).contains(&"work:start"));
    }

    #[test]
    fn requirements_gate_activity_switch() {
        let mut brain = villager(0).build().unwrap();
        assert!(!brain.set_active_activity_if_possible(WORK));
        assert_eq!(brain.current_activity(), Some(IDLE));

        brain.memory_mut().set(JOB_SITE, 3);
        assert!(brain.set_active_activity_if_possible(WORK));
        assert_eq!(brain.current_activity(), Some(WORK));
        assert!(!brain.is_active(IDLE));
        assert!(brain.is_active(CORE));

        assert!(!brain.set_active_activity_if_possible(ActivityId(77)));
    }

    #[test]
    fn leaving_activity_erases_its_memories() {
        let mut brain = villager(0).build().unwrap();
        brain.memory_mut().set(JOB_SITE, 3);
        assert!(brain.set_active_activity_if_possible(WORK));
        brain.memory_mut().set(WORK_TARGET, 8);

        // Re-selecting the current activity is not a switch.
        assert!(brain.set_active_activity_if_possible(WORK));
        assert!(brain.memory().has_value(WORK_TARGET));

        brain.use_default_activity();
        assert_eq!(brain.current_activity(), Some(IDLE));
        assert!(!brain.memory().has_value(WORK_TARGET));
        assert!(brain.memory().has_value(JOB_SITE));
    }

    #[test]
    fn first_valid_activity_wins() {
        let mut brain = villager(0).build().unwrap();
        assert_eq!(brain.set_active_activity_to_first_valid(&[WORK, IDLE]), Some(IDLE));
        brain.memory_mut().set(JOB_SITE, 1);
        assert_eq!(brain.set_active_activity_to_first_valid(&[WORK, IDLE]), Some(WORK));
        assert_eq!(brain.set_active_activity_to_first_valid(&[ActivityId(50)]), None);
        assert_eq!(brain.current_activity(), Some(WORK));
    }

    #[test]
    fn behaviors_of_left_activity_wind_down() {
        let mut world = World::default();
        let mut brain = villager(0).build().unwrap();
        brain.tick(&mut world, Tick(0), &mut NoopObserver);
        brain.memory_mut().set(JOB_SITE, 1);
        assert!(brain.set_active_activity_if_possible(WORK));

        brain.tick(&mut world, Tick(1), &mut NoopObserver);
        let events = world.events_of(0);
        assert!(events.contains(&"wander:tick"), "{events:?}");
        assert!(events.contains(&"work:start"), "{events:?}");
        assert!(!events.contains(&"wander:stop"));
    }

    #[test]
    fn think_cadence_limits_starts_not_ticks() {
        let mut world = World::default();
        let mut brain = villager(0)
            .config(BrainConfig { think_every_ticks: 5, think_offset_ticks: 0 })
            .build()
            .unwrap();
        let mut thought = Vec::new();
        for t in 0..12 {
            if brain.tick(&mut world, Tick(t), &mut NoopObserver) {
                thought.push(t);
            }
        }
        assert_eq!(thought, vec![0, 5, 10]);

        // look ends at 3: ticks on 0..=3, stops at 4, restarts on the next think tick.
        let look: Vec<&str> = world
            .events_of(0)
            .into_iter()
            .filter(|e| e.starts_with("look"))
            .collect();
        assert_eq!(
            look[..8],
            [
                "look:start", "look:tick", "look:tick", "look:tick", "look:tick",
                "look:stop", "look:start", "look:tick",
            ]
        );
    }

    #[test]
    fn memory_expires_during_tick() {
        let mut world = World::default();
        let mut brain = villager(0).build().unwrap();
        brain.memory_mut().set_with_expiry(HEARD_BELL, (), 2);
        brain.tick(&mut world, Tick(0), &mut NoopObserver);
        assert!(brain.memory().has_value(HEARD_BELL));
        brain.tick(&mut world, Tick(1), &mut NoopObserver);
        assert!(!brain.memory().has_value(HEARD_BELL));
    }

    #[test]
    fn stop_all_stops_everything() {
        let mut world = World::default();
        let mut brain = villager(0).build().unwrap();
        brain.tick(&mut world, Tick(0), &mut NoopObserver);
        brain.stop_all(&mut world, Tick(1));
        assert!(brain.running_behaviors().is_empty());
        let events = world.events_of(0);
        assert!(events.ends_with(&["look:stop", "wander:stop"]));
    }

    #[test]
    fn observer_sees_starts_and_stops() {
        let mut world = World::default();
        let mut brain = villager(4).build().unwrap();
        let mut rec = Recorder::default();
        for t in 0..5 {
            brain.tick(&mut world, Tick(t), &mut rec);
        }
        assert_eq!(rec.started[0], (EntityId(4), Tick(0), "look".to_string()));
        assert_eq!(rec.started[1], (EntityId(4), Tick(0), "wander".to_string()));
        assert_eq!(rec.stopped, vec![(EntityId(4), Tick(4), "look".to_string())]);
        // Start phase precedes update, so look cannot restart on its stop tick.
        assert_eq!(rec.started.len(), 2);
    }
}

// ── Population ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod population {
    use super::*;

    fn config(total_ticks: u64) -> SimConfig {
        SimConfig { start_tick: 0, total_ticks, seed: 42 }
    }

    #[test]
    fn brains_tick_in_ascending_entity_order() {
        let mut pop = Population::new(config(1), World::default());
        for e in [7, 2, 5] {
            pop.insert(villager(e).build().unwrap()).unwrap();
        }
        pop.run(&mut NoopObserver);
        let order: Vec<u32> = pop
            .world
            .log
            .iter()
            .filter(|(_, s)| s == "look:start")
            .map(|(e, _)| *e)
            .collect();
        assert_eq!(order, vec![2, 5, 7]);
    }

    #[test]
    fn duplicate_entity_errors() {
        let mut pop = Population::new(config(1), World::default());
        pop.insert(villager(1).build().unwrap()).unwrap();
        let err = pop.insert(villager(1).build().unwrap());
        assert!(matches!(err, Err(SimError::DuplicateEntity(EntityId(1)))));
        assert_eq!(pop.len(), 1);
    }

    #[test]
    fn lookup_of_missing_entity_errors() {
        let mut pop: Population<World> = Population::new(config(1), World::default());
        assert!(matches!(pop.brain(EntityId(3)), Err(SimError::Core(_))));
        assert!(pop.remove(EntityId(3)).is_err());
    }

    #[test]
    fn remove_stops_running_behaviors() {
        let mut pop = Population::new(config(10), World::default());
        pop.insert(villager(1).build().unwrap()).unwrap();
        pop.run_ticks(1, &mut NoopObserver);
        let brain = pop.remove(EntityId(1)).unwrap();
        assert!(brain.running_behaviors().is_empty());
        assert!(pop.is_empty());
        assert!(pop.world.events_of(1).contains(&"wander:stop"));
    }

    #[test]
    fn run_covers_configured_ticks() {
        let mut pop = Population::new(config(25), World::default());
        pop.insert(villager(0).build().unwrap()).unwrap();
        pop.insert(villager(1).build().unwrap()).unwrap();
        let mut rec = Recorder::default();
        pop.run(&mut rec);
        assert_eq!(rec.tick_ends.len(), 25);
        assert!(rec.tick_ends.iter().all(|&(_, thought)| thought == 2));
        assert_eq!(rec.final_tick, Some(Tick(25)));
        assert_eq!(pop.clock.now(), Tick(25));
    }

    #[test]
    fn activity_switch_through_population() {
        let mut pop = Population::new(config(5), World::default());
        pop.insert(villager(3).build().unwrap()).unwrap();
        {
            let brain = pop.brain_mut(EntityId(3)).unwrap();
            brain.memory_mut().set(JOB_SITE, 1);
            assert!(brain.set_active_activity_if_possible(WORK));
        }
        pop.run(&mut NoopObserver);
        assert!(pop.world.events_of(3).contains(&"work:start"));
        assert!(!pop.world.events_of(3).contains(&"wander:start"));
    }
}
