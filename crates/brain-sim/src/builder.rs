//! Fluent builder for constructing a [`Brain`].

use brain_behavior::BoxedBehavior;
use brain_core::{ActivityId, EntityId, EntityRng};
use brain_memory::{EntryCondition, MemoryBuilder, MemoryKeyId};
use rustc_hash::FxHashMap;

use crate::brain::{ActivityRules, Slot};
use crate::{Brain, BrainConfig, SimError, SimResult};

/// Fluent builder for [`Brain<W>`].
///
/// # Required inputs
///
/// - `EntityId` and the global seed: the brain's [`EntityRng`] is derived
///   from both, so the same seed replays the same decisions.
/// - [`MemoryBuilder`] with every key the behaviors use registered.
///
/// # Optional inputs (have defaults)
///
/// | Method                        | Default                            |
/// |-------------------------------|------------------------------------|
/// | `.config(c)`                  | `BrainConfig::default()` (every tick) |
/// | `.core_activities(v)`         | none                               |
/// | `.default_activity(a)`        | none; no activity current at start |
///
/// # Example
///
/// ```rust,ignore
/// let brain = BrainBuilder::new(EntityId(7), seed, memory)
///     .add_activity(CORE, vec![(0, Box::new(look) as BoxedBehavior<World>)])
///     .add_activity_with_conditions(
///         WORK,
///         vec![(10, Box::new(work_gate) as BoxedBehavior<World>)],
///         EntryCondition::new().present(JOB_SITE),
///         [JOB_SITE.id()],
///     )
///     .core_activities([CORE])
///     .default_activity(IDLE)
///     .build()?;
/// ```
pub struct BrainBuilder<W> {
    entity:     EntityId,
    seed:       u64,
    memory:     MemoryBuilder,
    config:     BrainConfig,
    activities: Vec<(ActivityId, Vec<(i32, BoxedBehavior<W>)>, ActivityRules)>,
    core:       Vec<ActivityId>,
    default:    Option<ActivityId>,
}

impl<W> BrainBuilder<W> {
    /// Create a builder with all required inputs.
    pub fn new(entity: EntityId, seed: u64, memory: MemoryBuilder) -> Self {
        Self {
            entity,
            seed,
            memory,
            config:     BrainConfig::default(),
            activities: Vec::new(),
            core:       Vec::new(),
            default:    None,
        }
    }

    pub fn config(mut self, config: BrainConfig) -> Self {
        self.config = config;
        self
    }

    /// Register an activity with no switching requirements.
    ///
    /// Lower `priority` values are offered a start first.
    pub fn add_activity(
        self,
        activity:  ActivityId,
        behaviors: Vec<(i32, BoxedBehavior<W>)>,
    ) -> Self {
        self.add_activity_with_conditions(activity, behaviors, EntryCondition::new(), [])
    }

    /// Register an activity that may only become current while
    /// `requirements` hold, and that erases `erase_on_exit` when left.
    pub fn add_activity_with_conditions(
        mut self,
        activity:      ActivityId,
        behaviors:     Vec<(i32, BoxedBehavior<W>)>,
        requirements:  EntryCondition,
        erase_on_exit: impl IntoIterator<Item = MemoryKeyId>,
    ) -> Self {
        let rules = ActivityRules {
            requirements,
            erase_on_exit: erase_on_exit.into_iter().collect(),
        };
        self.activities.push((activity, behaviors, rules));
        self
    }

    /// Activities that are always active, alongside the current one.
    pub fn core_activities(mut self, core: impl IntoIterator<Item = ActivityId>) -> Self {
        self.core = core.into_iter().collect();
        self
    }

    /// Activity made current at build time and by
    /// [`Brain::use_default_activity`].
    pub fn default_activity(mut self, activity: ActivityId) -> Self {
        self.default = Some(activity);
        self
    }

    /// Validate inputs, build the memory and return a ready-to-tick
    /// [`Brain`].
    pub fn build(self) -> SimResult<Brain<W>> {
        if self.config.think_every_ticks == 0 {
            return Err(SimError::Config("think_every_ticks must be at least 1".into()));
        }

        // ── Register activities and flatten their behaviors ───────────────
        let mut rules: FxHashMap<ActivityId, ActivityRules> = FxHashMap::default();
        let mut slots: Vec<Slot<W>> = Vec::new();
        for (activity, behaviors, activity_rules) in self.activities {
            if rules.insert(activity, activity_rules).is_some() {
                return Err(SimError::DuplicateActivity(activity));
            }
            slots.extend(
                behaviors
                    .into_iter()
                    .map(|(priority, behavior)| Slot { priority, activity, behavior }),
            );
        }
        // Stable: equal priorities keep registration order.
        slots.sort_by_key(|s| s.priority);

        let mut core = self.core;
        core.sort_unstable();
        core.dedup();
        for &activity in &core {
            if !rules.contains_key(&activity) {
                return Err(SimError::UnknownActivity { activity, what: "core activity" });
            }
        }
        if let Some(activity) = self.default {
            if !rules.contains_key(&activity) {
                return Err(SimError::UnknownActivity { activity, what: "default activity" });
            }
        }

        let mut brain = Brain {
            entity:  self.entity,
            config:  self.config,
            memory:  self.memory.build()?,
            rng:     EntityRng::new(self.seed, self.entity),
            slots,
            rules,
            core,
            default: self.default,
            current: None,
        };
        brain.use_default_activity();
        Ok(brain)
    }
}
