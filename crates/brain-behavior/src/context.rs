//! The per-call view of one entity handed to every behavior operation.

use brain_core::{EntityId, EntityRng, Tick};
use brain_memory::Memory;

/// Everything a behavior may touch while it runs for one entity.
///
/// Built by the owning scheduler once per entity per tick and lent to the
/// node tree.  `W` is the application's world/entity handle; the scheduler
/// core never looks inside it, it only threads it through to the hooks of
/// concrete behaviors (navigation, combat, inventory, …).
///
/// # Lifetimes
///
/// All borrows live for one entity's evaluation within one tick.  Nothing
/// here may be retained by a behavior between calls; state that must
/// survive across ticks lives in the behavior's own fields or in `memory`.
pub struct BehaviorContext<'a, W> {
    /// Application world handle.
    pub world: &'a mut W,

    /// The acting entity.
    pub entity: EntityId,

    /// Current game time.
    pub now: Tick,

    /// The acting entity's memory.
    pub memory: &'a mut Memory,

    /// The acting entity's RNG.  All random draws go through this.
    pub rng: &'a mut EntityRng,
}

impl<'a, W> BehaviorContext<'a, W> {
    /// Build a context for one entity at tick `now`.
    #[inline]
    pub fn new(
        world:  &'a mut W,
        entity: EntityId,
        now:    Tick,
        memory: &'a mut Memory,
        rng:    &'a mut EntityRng,
    ) -> Self {
        Self { world, entity, now, memory, rng }
    }
}
