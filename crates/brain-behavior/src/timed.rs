//! `Timed`: the standard multi-tick behavior with a bounded lifetime.
//!
//! # State machine
//!
//! ```text
//!             try_start: entry condition holds
//!                        && check_extra_start_conditions
//!   STOPPED ───────────────────────────────────────────────► RUNNING
//!      ▲        end = now + uniform[min, max]; on_start         │
//!      │                                                         │ tick_or_stop:
//!      │  timed_out(now, end) || !can_still_use → on_stop        │ otherwise on_tick
//!      └─────────────────────────────────────────────────────────┘
//!                  force_stop (any state, idempotent)
//! ```
//!
//! Concrete behaviors implement [`Behavior`] (only the hooks they need) and
//! are wrapped in [`Timed`], which owns the status, the sampled end tick and
//! the declarative entry condition.

use brain_core::{EntityRng, Tick};
use brain_memory::EntryCondition;
use tracing::trace;

use crate::control::short_type_name;
use crate::{BehaviorContext, BehaviorControl, BehaviorError, BehaviorResult, Status};

// ── DurationRange ─────────────────────────────────────────────────────────────

/// Inclusive bounds on how many ticks a run may last before timing out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DurationRange {
    pub min: u64,
    pub max: u64,
}

impl DurationRange {
    pub const DEFAULT_TICKS: u64 = 60;

    pub fn new(min: u64, max: u64) -> BehaviorResult<Self> {
        if min > max {
            return Err(BehaviorError::InvalidDuration { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn fixed(ticks: u64) -> Self {
        Self { min: ticks, max: ticks }
    }

    /// Uniform draw from `[min, max]`.
    pub fn sample(self, rng: &mut EntityRng) -> u64 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        Self::fixed(Self::DEFAULT_TICKS)
    }
}

// ── Behavior hooks ────────────────────────────────────────────────────────────

/// Hooks of a timed behavior.  Every method has a default, so a behavior
/// that only overrides `check_extra_start_conditions` and `can_still_use`
/// is complete.
///
/// Fields set in `on_start`/`on_tick` (a chosen target, a path) must be
/// reset in `on_stop`: the same instance is reused for the next run.
pub trait Behavior<W> {
    /// Extra start test run after the entry condition passed.
    fn check_extra_start_conditions(&mut self, _ctx: &mut BehaviorContext<'_, W>) -> bool {
        true
    }

    fn on_start(&mut self, _ctx: &mut BehaviorContext<'_, W>) {}

    /// Continuation test evaluated every tick while running.  A key this
    /// behavior relies on having vanished from memory is a normal reason to
    /// answer `false`.
    fn can_still_use(&mut self, _ctx: &mut BehaviorContext<'_, W>) -> bool {
        true
    }

    fn on_tick(&mut self, _ctx: &mut BehaviorContext<'_, W>) {}

    /// Release memory keys and reset per-run fields.
    fn on_stop(&mut self, _ctx: &mut BehaviorContext<'_, W>) {}

    /// Override to return `false` for behaviors that run for as long as
    /// `can_still_use` holds.
    fn timed_out(&self, now: Tick, end_timestamp: Tick) -> bool {
        now > end_timestamp
    }

    fn label(&self) -> String {
        short_type_name::<Self>()
    }
}

// ── Timed ─────────────────────────────────────────────────────────────────────

/// A [`Behavior`] plus the bookkeeping that turns it into a
/// [`BehaviorControl`] node.
///
/// ```rust,ignore
/// let walk = Timed::new(WalkHome::default())
///     .with_entry_condition(EntryCondition::new().present(HOME).absent(WALK_TARGET))
///     .with_duration(60, 110);
/// ```
pub struct Timed<B> {
    hooks:           B,
    status:          Status,
    duration:        DurationRange,
    end_timestamp:   Tick,
    entry_condition: EntryCondition,
}

impl<B> Timed<B> {
    /// Wrap `hooks` with no entry condition and the default 60-tick duration.
    pub fn new(hooks: B) -> Self {
        Self {
            hooks,
            status:          Status::Stopped,
            duration:        DurationRange::default(),
            end_timestamp:   Tick::ZERO,
            entry_condition: EntryCondition::new(),
        }
    }

    pub fn with_entry_condition(mut self, condition: EntryCondition) -> Self {
        self.entry_condition = condition;
        self
    }

    /// Set the duration bounds.
    ///
    /// # Panics
    /// Panics if `min > max`.
    pub fn with_duration(self, min: u64, max: u64) -> Self {
        match self.try_with_duration(min, max) {
            Ok(timed) => timed,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_with_duration(mut self, min: u64, max: u64) -> BehaviorResult<Self> {
        self.duration = DurationRange::new(min, max)?;
        Ok(self)
    }

    pub fn with_fixed_duration(mut self, ticks: u64) -> Self {
        self.duration = DurationRange::fixed(ticks);
        self
    }

    /// # Panics
    /// Panics if `duration.min > duration.max`.
    pub fn with_duration_range(self, duration: DurationRange) -> Self {
        match self.try_with_duration_range(duration) {
            Ok(timed) => timed,
            Err(e) => panic!("{e}"),
        }
    }

    /// Checks ranges built field-by-field or read from a config file.
    pub fn try_with_duration_range(self, duration: DurationRange) -> BehaviorResult<Self> {
        self.try_with_duration(duration.min, duration.max)
    }

    #[inline]
    pub fn hooks(&self) -> &B {
        &self.hooks
    }

    #[inline]
    pub fn hooks_mut(&mut self) -> &mut B {
        &mut self.hooks
    }

    /// Tick after which the current run times out.  Stale while stopped.
    #[inline]
    pub fn end_timestamp(&self) -> Tick {
        self.end_timestamp
    }

    #[inline]
    pub fn duration(&self) -> DurationRange {
        self.duration
    }

    #[inline]
    pub fn entry_condition(&self) -> &EntryCondition {
        &self.entry_condition
    }

    fn stop<W>(&mut self, ctx: &mut BehaviorContext<'_, W>, reason: &'static str)
    where
        B: Behavior<W>,
    {
        self.status = Status::Stopped;
        self.hooks.on_stop(ctx);
        trace!(
            entity = %ctx.entity,
            tick = ctx.now.0,
            behavior = %self.hooks.label(),
            reason,
            "behavior stopped"
        );
    }
}

impl<W, B: Behavior<W>> BehaviorControl<W> for Timed<B> {
    #[inline]
    fn status(&self) -> Status {
        self.status
    }

    fn try_start(&mut self, ctx: &mut BehaviorContext<'_, W>) -> bool {
        if self.status.is_running() {
            return false;
        }
        if !self.entry_condition.is_satisfied_by(ctx.memory)
            || !self.hooks.check_extra_start_conditions(ctx)
        {
            return false;
        }
        self.status = Status::Running;
        self.end_timestamp = ctx.now + self.duration.sample(ctx.rng);
        self.hooks.on_start(ctx);
        trace!(
            entity = %ctx.entity,
            tick = ctx.now.0,
            behavior = %self.hooks.label(),
            end = self.end_timestamp.0,
            "behavior started"
        );
        true
    }

    fn tick_or_stop(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        if !self.status.is_running() {
            return;
        }
        if self.hooks.timed_out(ctx.now, self.end_timestamp) {
            self.stop(ctx, "timed out");
        } else if !self.hooks.can_still_use(ctx) {
            self.stop(ctx, "cannot continue");
        } else {
            self.hooks.on_tick(ctx);
        }
    }

    fn force_stop(&mut self, ctx: &mut BehaviorContext<'_, W>) {
        if self.status.is_running() {
            self.stop(ctx, "forced");
        }
    }

    fn debug_label(&self) -> String {
        self.hooks.label()
    }
}
