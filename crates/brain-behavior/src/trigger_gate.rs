//! `TriggerGate`: stateless weighted choice among triggers.

use crate::{
    BehaviorContext, BoxedTrigger, OneShot, OrderPolicy, RunningPolicy, ShufflingList, Trigger,
};

/// A trigger that, each time it fires, walks its weighted child triggers
/// (reshuffled first under [`OrderPolicy::Shuffled`]) and fires the first
/// one that accepts ([`RunningPolicy::RunOne`]) or every one that accepts
/// ([`RunningPolicy::TryAll`]).
///
/// Children keep no running state, so unlike [`GateBehavior`] nothing has
/// to be ticked or stopped afterwards.  The gate itself always reports
/// success: it counts as having acted even when no child accepted.
///
/// [`GateBehavior`]: crate::GateBehavior
pub struct TriggerGate<W> {
    triggers: ShufflingList<BoxedTrigger<W>>,
    order:    OrderPolicy,
    running:  RunningPolicy,
}

impl<W> TriggerGate<W> {
    /// # Panics
    /// Panics if any weight is zero.
    pub fn new(
        triggers: Vec<(BoxedTrigger<W>, u32)>,
        order:    OrderPolicy,
        running:  RunningPolicy,
    ) -> Self {
        Self {
            triggers: triggers.into_iter().collect(),
            order,
            running,
        }
    }

    /// Weighted random pick of one accepting trigger per firing.
    pub fn one_shuffled(triggers: Vec<(BoxedTrigger<W>, u32)>) -> Self {
        Self::new(triggers, OrderPolicy::Shuffled, RunningPolicy::RunOne)
    }

    /// Fire every accepting trigger, in weighted random order.
    pub fn all_shuffled(triggers: Vec<(BoxedTrigger<W>, u32)>) -> Self {
        Self::new(triggers, OrderPolicy::Shuffled, RunningPolicy::TryAll)
    }

    /// Wrap in a [`OneShot`] so it can sit in a gate or a brain.
    pub fn into_one_shot(self) -> OneShot<Self> {
        OneShot::new(self)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }
}

impl<W> Trigger<W> for TriggerGate<W> {
    fn trigger(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        if self.order == OrderPolicy::Shuffled {
            self.triggers.shuffle(ctx.rng);
        }
        for trigger in self.triggers.iter_mut() {
            if trigger.trigger(ctx) && self.running == RunningPolicy::RunOne {
                break;
            }
        }
        true
    }

    fn label(&self) -> String {
        let names: Vec<String> = self.triggers.iter().map(|t| t.label()).collect();
        format!("TriggerGate[{}]", names.join(", "))
    }
}
