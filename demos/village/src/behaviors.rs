//! Villager behaviors and the brain layout that wires them together.

use brain_behavior::{
    Behavior, BehaviorContext, BehaviorControl, BoxedBehavior, BoxedTrigger, DoNothing,
    GateBehavior, IntervalTicker, OneShot, RetryMap, RetryPolicy, Timed, Trigger, TriggerGate,
    UniformInterval, sequence, sometimes, trigger_fn,
};
use brain_core::{ActivityId, BlockPos, EntityId, Tick};
use brain_memory::{EntryCondition, MemoryBuilder, MemoryKey};
use brain_sim::{Brain, BrainBuilder, BrainConfig, SimResult};
use tracing::debug;

use crate::world::{Village, VillageConfig};

pub const CORE: ActivityId = ActivityId(0);
pub const IDLE: ActivityId = ActivityId(1);
pub const REST: ActivityId = ActivityId(2);

pub const HOME: MemoryKey<BlockPos> = MemoryKey::new(0, "home");
pub const WALK_TARGET: MemoryKey<BlockPos> = MemoryKey::new(1, "walk_target");
pub const LOOK_TARGET: MemoryKey<EntityId> = MemoryKey::new(2, "look_target");

type Ctx<'a> = BehaviorContext<'a, Village>;

// ── Finding a bed ─────────────────────────────────────────────────────────────

/// Claims the first free bed that passes a path check.  Beds that fail are
/// retried with a growing, jittered delay.
pub struct AcquireBed {
    retries: RetryMap<BlockPos>,
}

impl AcquireBed {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { retries: RetryMap::new(policy) }
    }
}

impl Trigger<Village> for AcquireBed {
    fn trigger(&mut self, ctx: &mut Ctx<'_>) -> bool {
        self.retries.purge_stale(ctx.now);
        let here = ctx.world.position(ctx.entity);
        let mut candidates: Vec<BlockPos> = ctx
            .world
            .beds
            .iter()
            .filter(|(bed, owner)| owner.is_none() && self.retries.is_eligible(bed, ctx.now))
            .map(|(bed, _)| *bed)
            .collect();
        candidates.sort_by_key(|bed| (here.dist_sqr(*bed), *bed));

        for bed in candidates {
            ctx.world.path_checks += 1;
            if ctx.world.can_reach(bed) {
                ctx.world.beds.insert(bed, Some(ctx.entity));
                ctx.memory.set(HOME, bed);
                self.retries.forget(&bed);
                debug!(entity = %ctx.entity, tick = ctx.now.0, %bed, "bed claimed");
                return true;
            }
            self.retries.record_failure(bed, ctx.now, ctx.rng);
        }
        false
    }
}

// ── Walking and sleeping ──────────────────────────────────────────────────────

/// Walks to a random spot within five blocks.
pub struct Wander;

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
        let here = ctx.world.position(ctx.entity);
        let next = here.offset((target.x - here.x).signum(), 0, (target.z - here.z).signum());
        ctx.world.positions.insert(ctx.entity, next);
        if next == target {
            ctx.memory.erase(WALK_TARGET);
        }
    }

    fn on_stop(&mut self, ctx: &mut Ctx<'_>) {
        ctx.memory.erase(WALK_TARGET);
    }
}

/// Sleeps in the claimed bed until morning.
pub struct Sleep;

impl Behavior<Village> for Sleep {
    fn check_extra_start_conditions(&mut self, ctx: &mut Ctx<'_>) -> bool {
        ctx.world.is_night
            && ctx
                .memory
                .get(HOME)
                .is_some_and(|&home| ctx.world.bed_owner(home) == Some(ctx.entity))
    }

    fn on_start(&mut self, ctx: &mut Ctx<'_>) {
        if let Some(&home) = ctx.memory.get(HOME) {
            ctx.world.positions.insert(ctx.entity, home);
        }
    }

    fn can_still_use(&mut self, ctx: &mut Ctx<'_>) -> bool {
        ctx.world.is_night && ctx.memory.has_value(HOME)
    }

    fn timed_out(&self, _now: Tick, _end: Tick) -> bool {
        false
    }
}

// ── Small talk ────────────────────────────────────────────────────────────────

fn look_at_nearest(ctx: &mut Ctx<'_>) -> bool {
    let here = ctx.world.position(ctx.entity);
    let nearest = ctx
        .world
        .positions
        .iter()
        .filter(|(e, _)| **e != ctx.entity)
        .min_by_key(|(e, p)| (here.dist_sqr(**p), **e))
        .map(|(e, _)| *e);
    let Some(target) = nearest else {
        return false;
    };
    ctx.memory.set_with_expiry(LOOK_TARGET, target, 40);
    true
}

fn greet(ctx: &mut Ctx<'_>) -> bool {
    if !ctx.memory.has_value(LOOK_TARGET) {
        return false;
    }
    ctx.world.greetings += 1;
    true
}

fn hum(ctx: &mut Ctx<'_>) -> bool {
    ctx.world.hums += 1;
    true
}

fn small_talk() -> OneShot<impl Trigger<Village>> {
    let chatter: Vec<(BoxedTrigger<Village>, u32)> = vec![
        (Box::new(trigger_fn("Greet", greet)), 3),
        (Box::new(trigger_fn("Hum", hum)), 1),
    ];
    let ticker = IntervalTicker::new(UniformInterval { min: 60, max: 90 });
    OneShot::new(sometimes(ticker, TriggerGate::one_shuffled(chatter)))
}

// ── Brain layout ──────────────────────────────────────────────────────────────

fn boxed(node: impl BehaviorControl<Village> + 'static) -> BoxedBehavior<Village> {
    Box::new(node)
}

/// ```text
/// CORE  0  OneShot(Homeless -> AcquireBed)
///       1  OneShot(Sometimes(LookAtNearest))
///       2  OneShot(Sometimes(TriggerGate[Greet, Hum]))
/// IDLE 10  Gate "Idle" RunOne { Wander ×2, DoNothing ×1 }
/// REST 10  Sleep                        (needs HOME; erases WALK_TARGET on exit)
/// ```
pub fn villager(entity: EntityId, config: &VillageConfig) -> SimResult<Brain<Village>> {
    let memory = MemoryBuilder::new()
        .register(HOME)
        .register(WALK_TARGET)
        .register(LOOK_TARGET);

    let find_home = OneShot::new(sequence(
        trigger_fn("Homeless", |ctx: &mut Ctx<'_>| !ctx.memory.has_value(HOME)),
        AcquireBed::new(config.bed_retry),
    ));
    let look = OneShot::new(sometimes(
        IntervalTicker::new(UniformInterval { min: 20, max: 40 }),
        trigger_fn("LookAtNearest", look_at_nearest),
    ));
    let idle = GateBehavior::run_one(vec![
        (boxed(Timed::new(Wander).with_duration_range(config.idle_duration)), 2),
        (boxed(Timed::new(DoNothing).with_duration_range(config.idle_duration)), 1),
    ])
    .with_label("Idle");
    let sleep = Timed::new(Sleep).with_entry_condition(EntryCondition::new().present(HOME));

    BrainBuilder::new(entity, config.sim.seed, memory)
        .config(BrainConfig::deterministic(entity, config.think_every_ticks))
        .add_activity(
            CORE,
            vec![(0, boxed(find_home)), (1, boxed(look)), (2, boxed(small_talk()))],
        )
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
}
