//! `Brain`: one entity's memory, activities and behavior set.
//!
//! # Tick
//!
//! ```text
//! Brain::tick(world, now):
//!   ① Forget    Memory::tick() drops expired values.
//!   ② Start     on think ticks only: every STOPPED behavior of an active
//!               activity gets try_start, in ascending priority order.
//!   ③ Update    every RUNNING behavior gets tick_or_stop, in the same
//!               order, whether or not its activity is still active.
//! ```
//!
//! Core activities are always active.  At most one further activity is the
//! *current* one; switching to another activity erases the memories the old
//! one declared, but leaves its running behaviors to wind down on their own.

use brain_behavior::{BehaviorContext, BoxedBehavior, Status};
use brain_core::{ActivityId, EntityId, EntityRng, Tick};
use brain_memory::{EntryCondition, Memory, MemoryKeyId};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{BrainConfig, BrainObserver};

// ── Registry entries ──────────────────────────────────────────────────────────

/// One behavior slot: the node plus where it sits in the start order.
pub(crate) struct Slot<W> {
    pub(crate) priority: i32,
    pub(crate) activity: ActivityId,
    pub(crate) behavior: BoxedBehavior<W>,
}

/// Switching rules of one activity.
#[derive(Default)]
pub(crate) struct ActivityRules {
    pub(crate) requirements:  EntryCondition,
    pub(crate) erase_on_exit: Vec<MemoryKeyId>,
}

// ── Brain ─────────────────────────────────────────────────────────────────────

/// Owns everything one entity decides with.
///
/// Create via [`BrainBuilder`][crate::BrainBuilder].
pub struct Brain<W> {
    pub(crate) entity:   EntityId,
    pub(crate) config:   BrainConfig,
    pub(crate) memory:   Memory,
    pub(crate) rng:      EntityRng,
    /// Sorted by priority; ties keep registration order.
    pub(crate) slots:    Vec<Slot<W>>,
    pub(crate) rules:    FxHashMap<ActivityId, ActivityRules>,
    pub(crate) core:     Vec<ActivityId>,
    pub(crate) default:  Option<ActivityId>,
    pub(crate) current:  Option<ActivityId>,
}

impl<W> Brain<W> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn config(&self) -> BrainConfig {
        self.config
    }

    #[inline]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Sensors and the application write memories through this.
    #[inline]
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    #[inline]
    pub fn rng_mut(&mut self) -> &mut EntityRng {
        &mut self.rng
    }

    /// The current non-core activity, if any.
    #[inline]
    pub fn current_activity(&self) -> Option<ActivityId> {
        self.current
    }

    pub fn core_activities(&self) -> &[ActivityId] {
        &self.core
    }

    pub fn is_active(&self, activity: ActivityId) -> bool {
        self.current == Some(activity) || self.core.contains(&activity)
    }

    pub fn has_activity(&self, activity: ActivityId) -> bool {
        self.rules.contains_key(&activity)
    }

    pub fn behavior_count(&self) -> usize {
        self.slots.len()
    }

    /// Debug labels of all running behaviors, in tick order.
    pub fn running_behaviors(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|s| s.behavior.status().is_running())
            .map(|s| s.behavior.debug_label())
            .collect()
    }

    // ── Activity switching ────────────────────────────────────────────────

    /// `true` if `activity` is registered and its memory requirements hold.
    pub fn activity_requirements_met(&self, activity: ActivityId) -> bool {
        self.rules
            .get(&activity)
            .is_some_and(|r| r.requirements.is_satisfied_by(&self.memory))
    }

    /// Make `activity` current if it is registered and its requirements hold.
    ///
    /// Returns `true` if `activity` is current afterwards.  Leaving the
    /// previous activity erases the memories it declared.
    pub fn set_active_activity_if_possible(&mut self, activity: ActivityId) -> bool {
        if !self.activity_requirements_met(activity) {
            return false;
        }
        self.set_active_activity(activity);
        true
    }

    /// Make the first activity in `candidates` whose requirements hold
    /// current.  Returns it, or `None` if none qualifies (current unchanged).
    pub fn set_active_activity_to_first_valid(
        &mut self,
        candidates: &[ActivityId],
    ) -> Option<ActivityId> {
        let found = candidates
            .iter()
            .copied()
            .find(|&a| self.activity_requirements_met(a))?;
        self.set_active_activity(found);
        Some(found)
    }

    /// Fall back to the default activity (if one was configured).
    pub fn use_default_activity(&mut self) {
        if let Some(default) = self.default {
            self.set_active_activity_if_possible(default);
        }
    }

    fn set_active_activity(&mut self, activity: ActivityId) {
        if self.current == Some(activity) {
            return;
        }
        let previous = self.current.replace(activity);
        if let Some(rules) = previous.and_then(|prev| self.rules.get(&prev)) {
            for &key in &rules.erase_on_exit {
                self.memory.erase(key);
            }
        }
        debug!(
            entity = %self.entity,
            from = ?previous,
            to = %activity,
            "activity changed"
        );
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance this brain by one tick.  Returns `true` if it thought (ran
    /// the start phase) this tick.
    pub fn tick<O: BrainObserver>(&mut self, world: &mut W, now: Tick, observer: &mut O) -> bool {
        self.memory.tick();

        let thinks = self.config.should_think(now);
        if thinks {
            self.start_each_stopped_behavior(world, now, observer);
        }
        self.tick_each_running_behavior(world, now, observer);
        thinks
    }

    /// Force-stop every running behavior.
    pub fn stop_all(&mut self, world: &mut W, now: Tick) {
        let Self { entity, memory, rng, slots, .. } = self;
        let mut ctx = BehaviorContext::new(world, *entity, now, memory, rng);
        for slot in slots.iter_mut() {
            if slot.behavior.status().is_running() {
                slot.behavior.force_stop(&mut ctx);
            }
        }
    }

    fn start_each_stopped_behavior<O: BrainObserver>(
        &mut self,
        world:    &mut W,
        now:      Tick,
        observer: &mut O,
    ) {
        let Self { entity, memory, rng, slots, core, current, .. } = self;
        let mut ctx = BehaviorContext::new(world, *entity, now, memory, rng);
        for slot in slots.iter_mut() {
            let active = *current == Some(slot.activity) || core.contains(&slot.activity);
            if !active || slot.behavior.status() != Status::Stopped {
                continue;
            }
            if slot.behavior.try_start(&mut ctx) {
                observer.on_behavior_started(*entity, now, &slot.behavior.debug_label());
            }
        }
    }

    fn tick_each_running_behavior<O: BrainObserver>(
        &mut self,
        world:    &mut W,
        now:      Tick,
        observer: &mut O,
    ) {
        let Self { entity, memory, rng, slots, .. } = self;
        let mut ctx = BehaviorContext::new(world, *entity, now, memory, rng);
        for slot in slots.iter_mut() {
            if !slot.behavior.status().is_running() {
                continue;
            }
            slot.behavior.tick_or_stop(&mut ctx);
            if !slot.behavior.status().is_running() {
                observer.on_behavior_stopped(*entity, now, &slot.behavior.debug_label());
            }
        }
    }
}

impl<W> std::fmt::Debug for Brain<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Brain")
            .field("entity", &self.entity)
            .field("current", &self.current)
            .field("core", &self.core)
            .field("running", &self.running_behaviors())
            .field("memory", &self.memory)
            .finish()
    }
}
