use std::collections::{BTreeMap, BTreeSet};

use brain_behavior::{
    sequence, sometimes, trigger_fn, Behavior, BehaviorContext, BehaviorControl, BoxedBehavior,
    DoNothing, GateBehavior, IntervalTicker, OneShot, RetryMap, Timed, Trigger, UniformInterval,
};
use brain_core::{ActivityId, BlockPos, EntityId, SimConfig, Tick};
use brain_memory::{EntryCondition, MemoryBuilder, MemoryKey};
use brain_sim::{Brain, BrainBuilder, BrainConfig, BrainObserver, Population};

const CORE: ActivityId = ActivityId(0);
const IDLE: ActivityId = ActivityId(1);
const REST: ActivityId = ActivityId(2);

const HOME: MemoryKey<BlockPos> = MemoryKey::new(0, "home");
const WALK_TARGET: MemoryKey<BlockPos> = MemoryKey::new(1, "walk_target");
const LOOK_TARGET: MemoryKey<EntityId> = MemoryKey::new(2, "look_target");

const REACHABLE_A: BlockPos = BlockPos::new(0, 64, 10);
const REACHABLE_B: BlockPos = BlockPos::new(5, 64, 10);
const WALLED_OFF: BlockPos = BlockPos::new(10, 64, 10);

type Ctx<'a> = BehaviorContext<'a, Village>;

#[derive(Debug, Default, PartialEq)]
struct Village {
    beds:        BTreeMap<BlockPos, Option<EntityId>>,
    reachable:   BTreeSet<BlockPos>,
    positions:   BTreeMap<EntityId, BlockPos>,
    path_checks: BTreeMap<(EntityId, BlockPos), u32>,
    sleepers:    Vec<(Tick, EntityId)>,
}

impl Village {
    fn position(&self, entity: EntityId) -> BlockPos {
        self.positions.get(&entity).copied().unwrap_or_default()
    }
}

fn step_toward(from: BlockPos, to: BlockPos) -> BlockPos {
    from.offset((to.x - from.x).signum(), 0, (to.z - from.z).signum())
}

// ── Behaviors ─────────────────────────────────────────────────────────────────

/// Claims the first free, reachable bed; unreachable ones back off.
#[derive(Default)]
struct AcquireBed {
    retries: RetryMap<BlockPos>,
}

impl Trigger<Village> for AcquireBed {
    fn trigger(&mut self, ctx: &mut Ctx<'_>) -> bool {
        self.retries.purge_stale(ctx.now);
        let candidates: Vec<BlockPos> = ctx
            .world
            .beds
            .iter()
            .filter(|(pos, owner)| owner.is_none() && self.retries.is_eligible(pos, ctx.now))
            .map(|(pos, _)| *pos)
            .collect();
        for pos in candidates {
            *ctx.world.path_checks.entry((ctx.entity, pos)).or_default() += 1;
            if ctx.world.reachable.contains(&pos) {
                ctx.world.beds.insert(pos, Some(ctx.entity));
                ctx.memory.set(HOME, pos);
                self.retries.forget(&pos);
                return true;
            }
            self.retries.record_failure(pos, ctx.now, ctx.rng);
        }
        false
    }
}

struct Wander;

impl Behavior<Village> for Wander {
    fn on_start(&mut self, ctx: &mut Ctx<'_>) {
        let dx = ctx.rng.gen_range(-5..=5);
        let dz = ctx.rng.gen_range(-5..=5);
        let target = ctx.world.position(ctx.entity).offset(dx, 0, dz);
        ctx.memory.set(WALK_TARGET, target);
    }

    fn can_still_use(&mut self, ctx: &mut Ctx<'_>) -> bool {
        ctx.memory.has_value(WALK_TARGET)
    }

    fn on_tick(&mut self, ctx: &mut Ctx<'_>) {
        let Some(&target) = ctx.memory.get(WALK_TARGET) else {
            return;
        };
        let next = step_toward(ctx.world.position(ctx.entity), target);
        ctx.world.positions.insert(ctx.entity, next);
        if next == target {
            ctx.memory.erase(WALK_TARGET);
        }
    }

    fn on_stop(&mut self, ctx: &mut Ctx<'_>) {
        ctx.memory.erase(WALK_TARGET);
    }
}

struct Sleep;

impl Behavior<Village> for Sleep {
    fn check_extra_start_conditions(&mut self, ctx: &mut Ctx<'_>) -> bool {
        let Some(&home) = ctx.memory.get(HOME) else {
            return false;
        };
        ctx.world.beds.get(&home) == Some(&Some(ctx.entity))
    }

    fn on_start(&mut self, ctx: &mut Ctx<'_>) {
        if let Some(&home) = ctx.memory.get(HOME) {
            ctx.world.positions.insert(ctx.entity, home);
        }
        ctx.world.sleepers.push((ctx.now, ctx.entity));
    }

    fn can_still_use(&mut self, ctx: &mut Ctx<'_>) -> bool {
        ctx.memory.has_value(HOME)
    }
}

fn look_at_nearest(ctx: &mut Ctx<'_>) -> bool {
    let here = ctx.world.position(ctx.entity);
    let nearest = ctx
        .world
        .positions
        .iter()
        .filter(|(e, _)| **e != ctx.entity)
        .min_by_key(|(e, p)| (here.dist_sqr(**p), **e))
        .map(|(e, _)| *e);
    match nearest {
        Some(e) => {
            ctx.memory.set_with_expiry(LOOK_TARGET, e, 10);
            true
        }
        None => false,
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn boxed(node: impl BehaviorControl<Village> + 'static) -> BoxedBehavior<Village> {
    Box::new(node)
}

fn villager(entity: u32, seed: u64) -> Brain<Village> {
    let memory = MemoryBuilder::new()
        .register(HOME)
        .register(WALK_TARGET)
        .register(LOOK_TARGET);

    let find_home = OneShot::new(sequence(
        trigger_fn("Homeless", |ctx: &mut Ctx<'_>| !ctx.memory.has_value(HOME)),
        AcquireBed::default(),
    ));
    let ticker = IntervalTicker::new(UniformInterval::new(20, 40).unwrap());
    let look = OneShot::new(sometimes(ticker, trigger_fn("LookAtNearest", look_at_nearest)));
    let idle = GateBehavior::run_one(vec![
        (boxed(Timed::new(Wander).with_duration(30, 60)), 2),
        (boxed(DoNothing::timed(30, 60)), 1),
    ])
    .with_label("Idle");
    let sleep = Timed::new(Sleep)
        .with_entry_condition(EntryCondition::new().present(HOME))
        .with_duration(100, 200);

    BrainBuilder::new(EntityId(entity), seed, memory)
        .config(BrainConfig::deterministic(EntityId(entity), 2))
        .add_activity(CORE, vec![(0, boxed(find_home)), (1, boxed(look))])
        .add_activity(IDLE, vec![(10, boxed(idle))])
        .add_activity_with_conditions(
            REST,
            vec![(10, boxed(sleep))],
            EntryCondition::new().present(HOME),
            [WALK_TARGET.id()],
        )
        .core_activities([CORE])
        .default_activity(IDLE)
        .build()
        .unwrap()
}

#[derive(Default)]
struct StartLog(Vec<(Tick, EntityId, String)>);

impl BrainObserver for StartLog {
    fn on_behavior_started(&mut self, entity: EntityId, tick: Tick, label: &str) {
        self.0.push((tick, entity, label.to_string()));
    }
}

/// 200 ticks of daytime, then bedtime for 200 more.
fn run_day(seed: u64) -> (Population<Village>, StartLog) {
    let mut village = Village::default();
    for bed in [REACHABLE_A, REACHABLE_B, WALLED_OFF] {
        village.beds.insert(bed, None);
    }
    village.reachable.extend([REACHABLE_A, REACHABLE_B]);
    for e in 0..4 {
        village.positions.insert(EntityId(e), BlockPos::new(e as i32 * 3, 64, 0));
    }

    let config = SimConfig { start_tick: 0, total_ticks: 400, seed };
    let mut population = Population::new(config, village);
    for e in 0..4 {
        population.insert(villager(e, seed)).unwrap();
    }

    let mut log = StartLog::default();
    population.run_ticks(200, &mut log);
    for brain in population.brains_mut() {
        brain.set_active_activity_if_possible(REST);
    }
    population.run(&mut log);
    (population, log)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn every_reachable_bed_is_claimed_once() {
    let (population, _) = run_day(7);
    let owners: Vec<EntityId> = population.world.beds.values().flatten().copied().collect();
    assert_eq!(owners.len(), 2);
    assert_ne!(owners[0], owners[1]);
    assert_eq!(population.world.beds[&WALLED_OFF], None);

    for brain in population.brains() {
        if let Some(&home) = brain.memory().get(HOME) {
            assert_eq!(population.world.beds[&home], Some(brain.entity()));
        }
    }
    let homed = population.brains().filter(|b| b.memory().has_value(HOME)).count();
    assert_eq!(homed, 2);
}

#[test]
fn unreachable_bed_is_retried_with_backoff() {
    let (population, _) = run_day(7);
    let homeless: Vec<EntityId> = population
        .brains()
        .filter(|b| !b.memory().has_value(HOME))
        .map(|b| b.entity())
        .collect();
    assert_eq!(homeless.len(), 2);
    for entity in homeless {
        let checks = population.world.path_checks[&(entity, WALLED_OFF)];
        // Thinking every other tick for 400 ticks would be 200 checks unthrottled.
        assert!(checks >= 2, "{entity} never retried");
        assert!(checks <= 11, "{entity} checked {checks} times");
    }
}

#[test]
fn homed_villagers_go_to_bed_at_night() {
    let (population, _) = run_day(11);
    for brain in population.brains() {
        let slept = population
            .world
            .sleepers
            .iter()
            .any(|&(t, e)| e == brain.entity() && t >= Tick(200));
        match brain.memory().get(HOME) {
            Some(_) => {
                assert!(slept, "{} never slept", brain.entity());
                assert_eq!(brain.current_activity(), Some(REST));
            }
            None => {
                assert!(!slept);
                assert_eq!(brain.current_activity(), Some(IDLE));
            }
        }
    }
    assert!(population.world.sleepers.iter().all(|&(t, _)| t >= Tick(200)));
}

#[test]
fn idle_gate_runs_one_child_at_a_time() {
    let (_, log) = run_day(3);
    let idle_starts = log.0.iter().filter(|(_, _, l)| l.starts_with("(Idle)")).count();
    assert!(idle_starts > 0);
    for (_, _, label) in &log.0 {
        if let Some(rest) = label.strip_prefix("(Idle): [") {
            let running = rest.trim_end_matches(']');
            assert!(!running.contains(','), "two idle children running: {label}");
        }
    }
}

#[test]
fn same_seed_same_day() {
    let (a, log_a) = run_day(99);
    let (b, log_b) = run_day(99);
    assert_eq!(a.world, b.world);
    assert_eq!(log_a.0, log_b.0);
}

#[test]
fn different_seed_different_day() {
    let (a, _) = run_day(1);
    let (b, _) = run_day(2);
    assert_ne!(a.world.positions, b.world.positions);
}
