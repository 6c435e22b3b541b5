//! Single-tick nodes: the `Trigger` contract, the `OneShot` node that
//! adapts a trigger to [`BehaviorControl`], and trigger combinators.

use tracing::trace;

use crate::control::short_type_name;
use crate::{BehaviorContext, BehaviorControl, IntervalTicker, Status};

// ── Trigger ───────────────────────────────────────────────────────────────────

/// A synchronous check-and-act.  Returns `true` if it acted.
pub trait Trigger<W> {
    fn trigger(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool;

    fn label(&self) -> String {
        short_type_name::<Self>()
    }
}

impl<W, T: Trigger<W> + ?Sized> Trigger<W> for Box<T> {
    #[inline]
    fn trigger(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        (**self).trigger(ctx)
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// Boxed trigger, the element type of trigger gates.
pub type BoxedTrigger<W> = Box<dyn Trigger<W>>;

// ── OneShot ───────────────────────────────────────────────────────────────────

/// Fire-and-forget node.
///
/// All work happens inside `try_start`; a successful start leaves the node
/// running only until the next `tick_or_stop`, which stops it without doing
/// anything else.  Lets composites treat instant actions exactly like
/// multi-tick behaviors.
pub struct OneShot<T> {
    trigger: T,
    status:  Status,
}

impl<T> OneShot<T> {
    pub fn new(trigger: T) -> Self {
        Self { trigger, status: Status::Stopped }
    }

    pub fn inner(&self) -> &T {
        &self.trigger
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.trigger
    }
}

impl<W, T: Trigger<W>> BehaviorControl<W> for OneShot<T> {
    #[inline]
    fn status(&self) -> Status {
        self.status
    }

    fn try_start(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        if self.status.is_running() {
            return false;
        }
        if self.trigger.trigger(ctx) {
            self.status = Status::Running;
            trace!(
                entity = %ctx.entity,
                tick = ctx.now.0,
                behavior = %self.trigger.label(),
                "one-shot fired"
            );
            true
        } else {
            false
        }
    }

    fn tick_or_stop(&mut self, _ctx: &mut BehaviorContext<'_, W>) {
        self.status = Status::Stopped;
    }

    fn force_stop(&mut self, _ctx: &mut BehaviorContext<'_, W>) {
        self.status = Status::Stopped;
    }

    fn debug_label(&self) -> String {
        self.trigger.label()
    }
}

// ── Combinators ───────────────────────────────────────────────────────────────

/// A closure used as a trigger.  Build with [`trigger_fn`].
pub struct FnTrigger<F> {
    label: &'static str,
    f:     F,
}

/// Wrap a closure as a named [`Trigger`].
///
/// ```rust,ignore
/// let forget_anger = trigger_fn("ForgetAnger", |ctx: &mut BehaviorContext<'_, World>| {
///     ctx.memory.take(ANGRY_AT).is_some()
/// });
/// ```
pub fn trigger_fn<W, F>(label: &'static str, f: F) -> FnTrigger<F>
where
    F: FnMut(&mut BehaviorContext<'_, W>) -> bool,
{
    FnTrigger { label, f }
}

impl<W, F> Trigger<W> for FnTrigger<F>
where
    F: FnMut(&mut BehaviorContext<'_, W>) -> bool,
{
    #[inline]
    fn trigger(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        (self.f)(ctx)
    }

    fn label(&self) -> String {
        self.label.to_string()
    }
}

/// Fires `second` only if `first` fired; reports whether both did.
pub struct Sequence<A, B> {
    first:  A,
    second: B,
}

pub fn sequence<A, B>(first: A, second: B) -> Sequence<A, B> {
    Sequence { first, second }
}

impl<W, A: Trigger<W>, B: Trigger<W>> Trigger<W> for Sequence<A, B> {
    fn trigger(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        self.first.trigger(ctx) && self.second.trigger(ctx)
    }

    fn label(&self) -> String {
        format!("{} -> {}", self.first.label(), self.second.label())
    }
}

/// Fires `inner` only on ticks where its [`IntervalTicker`] elapses.
pub struct Sometimes<T> {
    ticker: IntervalTicker,
    inner:  T,
}

pub fn sometimes<T>(ticker: IntervalTicker, inner: T) -> Sometimes<T> {
    Sometimes { ticker, inner }
}

impl<W, T: Trigger<W>> Trigger<W> for Sometimes<T> {
    fn trigger(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        if !self.ticker.tick_down_and_check(ctx.rng) {
            return false;
        }
        self.inner.trigger(ctx)
    }

    fn label(&self) -> String {
        format!("Sometimes({})", self.inner.label())
    }
}
