//! `BehaviorControl`: the contract every schedulable node implements.

use std::fmt;

use crate::BehaviorContext;

/// Lifecycle state of a node.
///
/// A node is `Running` if and only if its most recent `try_start`
/// succeeded and no stop (timeout, failed continuation, or `force_stop`)
/// has happened since.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Status {
    #[default]
    Stopped,
    Running,
}

impl Status {
    #[inline]
    pub fn is_running(self) -> bool {
        self == Status::Running
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Stopped => "stopped",
            Status::Running => "running",
        })
    }
}

/// A schedulable unit of conditional, timed, resumable logic.
///
/// Nodes are long-lived: one instance per entity, started and stopped many
/// times over the entity's lifetime.  The owning scheduler drives them:
///
/// ```text
/// if node.status() == Stopped { node.try_start(ctx); }
/// ...later ticks...
/// if node.status() == Running { node.tick_or_stop(ctx); }
/// ```
///
/// # Contract
///
/// - [`status`][Self::status] and [`debug_label`][Self::debug_label] are
///   pure queries.
/// - [`try_start`][Self::try_start] checks preconditions before any side
///   effect.  `false` is the ordinary "not applicable this tick" answer and
///   leaves all state unchanged.  Callers check `status()` first; the stock
///   nodes answer `false` without side effects if already running.
/// - [`tick_or_stop`][Self::tick_or_stop] is meaningful only while running:
///   it either does one tick of work or stops.
/// - [`force_stop`][Self::force_stop] is unconditional, idempotent, and
///   releases everything the node claimed.
pub trait BehaviorControl<W> {
    fn status(&self) -> Status;

    fn try_start(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool;

    fn tick_or_stop(&mut self, ctx: &mut BehaviorContext<'_, W>);

    fn force_stop(&mut self, ctx: &mut BehaviorContext<'_, W>);

    fn debug_label(&self) -> String;
}

impl<W, N: BehaviorControl<W> + ?Sized> BehaviorControl<W> for Box<N> {
    #[inline]
    fn status(&self) -> Status {
        (**self).status()
    }

    #[inline]
    fn try_start(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        (**self).try_start(ctx)
    }

    #[inline]
    fn tick_or_stop(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        (**self).tick_or_stop(ctx)
    }

    #[inline]
    fn force_stop(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        (**self).force_stop(ctx)
    }

    fn debug_label(&self) -> String {
        (**self).debug_label()
    }
}

/// Boxed node, the element type of gates and brains.
pub type BoxedBehavior<W> = Box<dyn BehaviorControl<W>>;

/// Last path segment of a type name, generics stripped:
/// `brain_behavior::timed::Timed<app::Walk>` → `Timed`.
pub(crate) fn short_type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
