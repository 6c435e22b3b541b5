//! `GateBehavior`: a composite that starts a policy-chosen subset of its
//! children and runs while any of them runs.
//!
//! Order and running policy are independent:
//!
//! | Order      | Running  | Meaning                                          |
//! |------------|----------|--------------------------------------------------|
//! | `Ordered`  | `RunOne` | prefer the first child, fall back down the list  |
//! | `Shuffled` | `RunOne` | pick one eligible child at weighted random       |
//! | `Ordered`  | `TryAll` | start every eligible child, in a fixed order     |
//! | `Shuffled` | `TryAll` | start every eligible child, order irrelevant     |

use brain_core::EntityRng;
use brain_memory::{EntryCondition, MemoryKeyId};
use tracing::{debug, trace};

use crate::{BehaviorContext, BehaviorControl, BoxedBehavior, ShufflingList, Status};

/// How children are ordered at each start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderPolicy {
    /// Keep insertion order.
    Ordered,
    /// Weighted reshuffle before every start.
    Shuffled,
}

impl OrderPolicy {
    fn apply<T>(self, list: &mut ShufflingList<T>, rng: &mut EntityRng) {
        if self == OrderPolicy::Shuffled {
            list.shuffle(rng);
        }
    }
}

/// Which children are started.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunningPolicy {
    /// Stop at the first stopped child whose `try_start` succeeds.
    RunOne,
    /// Attempt every stopped child regardless of earlier outcomes.
    TryAll,
}

impl RunningPolicy {
    fn apply<W>(self, children: &mut ShufflingList<BoxedBehavior<W>>, ctx: &mut BehaviorContext<'_, W>) {
        let stopped = children.iter_mut().filter(|c| c.status() == Status::Stopped);
        match self {
            RunningPolicy::RunOne => {
                for child in stopped {
                    if child.try_start(ctx) {
                        break;
                    }
                }
            }
            RunningPolicy::TryAll => {
                for child in stopped {
                    child.try_start(ctx);
                }
            }
        }
    }
}

/// Composite node over weighted children.
pub struct GateBehavior<W> {
    label:           &'static str,
    entry_condition: EntryCondition,
    exit_erased:     Vec<MemoryKeyId>,
    order:           OrderPolicy,
    running:         RunningPolicy,
    children:        ShufflingList<BoxedBehavior<W>>,
    status:          Status,
}

impl<W> GateBehavior<W> {
    /// Build a gate.
    ///
    /// `exit_erased` keys are cleared whenever the gate stops, whichever
    /// child (if any) set them.
    ///
    /// # Panics
    /// Panics if any child weight is zero.
    pub fn new(
        entry_condition: EntryCondition,
        exit_erased:     impl IntoIterator<Item = MemoryKeyId>,
        order:           OrderPolicy,
        running:         RunningPolicy,
        children:        Vec<(BoxedBehavior<W>, u32)>,
    ) -> Self {
        let mut exit_erased: Vec<MemoryKeyId> = exit_erased.into_iter().collect();
        exit_erased.sort_unstable();
        exit_erased.dedup();
        Self {
            label: "GateBehavior",
            entry_condition,
            exit_erased,
            order,
            running,
            children: children.into_iter().collect(),
            status: Status::Stopped,
        }
    }

    /// Weighted random choice of one eligible child (shuffled, run-one).
    pub fn run_one(children: Vec<(BoxedBehavior<W>, u32)>) -> Self {
        Self::new(
            EntryCondition::new(),
            [],
            OrderPolicy::Shuffled,
            RunningPolicy::RunOne,
            children,
        )
        .with_label("RunOne")
    }

    /// Every eligible child, in a fresh weighted order each start
    /// (shuffled, try-all).
    pub fn try_all(children: Vec<(BoxedBehavior<W>, u32)>) -> Self {
        Self::new(
            EntryCondition::new(),
            [],
            OrderPolicy::Shuffled,
            RunningPolicy::TryAll,
            children,
        )
        .with_label("TryAll")
    }

    /// First eligible child in insertion order (ordered, run-one).
    pub fn first_eligible(children: Vec<(BoxedBehavior<W>, u32)>) -> Self {
        Self::new(
            EntryCondition::new(),
            [],
            OrderPolicy::Ordered,
            RunningPolicy::RunOne,
            children,
        )
        .with_label("FirstEligible")
    }

    /// Name shown in debug output.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn order_policy(&self) -> OrderPolicy {
        self.order
    }

    pub fn running_policy(&self) -> RunningPolicy {
        self.running
    }

    pub fn entry_condition(&self) -> &EntryCondition {
        &self.entry_condition
    }

    pub fn exit_erased(&self) -> &[MemoryKeyId] {
        &self.exit_erased
    }

    /// Children in current order.
    pub fn children(&self) -> impl Iterator<Item = &BoxedBehavior<W>> + '_ {
        self.children.iter()
    }

    /// Number of children currently running.
    pub fn running_children(&self) -> usize {
        self.children.iter().filter(|c| c.status().is_running()).count()
    }

    fn stop(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        self.status = Status::Stopped;
        for child in self.children.iter_mut().filter(|c| c.status().is_running()) {
            child.force_stop(ctx);
        }
        for &key in &self.exit_erased {
            ctx.memory.erase(key);
        }
    }
}

impl<W> BehaviorControl<W> for GateBehavior<W> {
    #[inline]
    fn status(&self) -> Status {
        self.status
    }

    /// Succeeds whenever the entry condition holds, even if no child
    /// starts; the gate then stops on its next `tick_or_stop`.
    fn try_start(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        if self.status.is_running() || !self.entry_condition.is_satisfied_by(ctx.memory) {
            return false;
        }
        self.status = Status::Running;
        self.order.apply(&mut self.children, ctx.rng);
        self.running.apply(&mut self.children, ctx);
        trace!(
            entity = %ctx.entity,
            tick = ctx.now.0,
            gate = self.label,
            started = self.running_children(),
            "gate started"
        );
        true
    }

    fn tick_or_stop(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        if !self.status.is_running() {
            return;
        }
        for child in self.children.iter_mut().filter(|c| c.status().is_running()) {
            child.tick_or_stop(ctx);
        }
        if self.running_children() == 0 {
            self.stop(ctx);
            debug!(
                entity = %ctx.entity,
                tick = ctx.now.0,
                gate = self.label,
                "gate stopped: no running children"
            );
        }
    }

    /// Stops running children, then erases every exit-erased key, even if
    /// the gate was already stopped.
    fn force_stop(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        self.stop(ctx);
    }

    fn debug_label(&self) -> String {
        let running: Vec<String> = self
            .children
            .iter()
            .filter(|c| c.status().is_running())
            .map(|c| c.debug_label())
            .collect();
        format!("({}): [{}]", self.label, running.join(", "))
    }
}
