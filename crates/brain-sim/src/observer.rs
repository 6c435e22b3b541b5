//! Observer trait for progress reporting and behavior tracing.

use brain_core::{EntityId, Tick};

/// Callbacks invoked by [`Brain::tick`][crate::Brain::tick] and
/// [`Population`][crate::Population] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: start counter
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct StartCounter(FxHashMap<String, usize>);
///
/// impl BrainObserver for StartCounter {
///     fn on_behavior_started(&mut self, _entity: EntityId, _tick: Tick, label: &str) {
///         *self.0.entry(label.to_string()).or_default() += 1;
///     }
/// }
/// ```
pub trait BrainObserver {
    /// Called at the very start of each population tick.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each population tick.
    ///
    /// `thought` is the number of brains that ran their start phase.
    fn on_tick_end(&mut self, _tick: Tick, _thought: usize) {}

    /// A top-level behavior accepted `try_start`.
    fn on_behavior_started(&mut self, _entity: EntityId, _tick: Tick, _label: &str) {}

    /// A top-level behavior went from running to stopped during its tick.
    fn on_behavior_stopped(&mut self, _entity: EntityId, _tick: Tick, _label: &str) {}

    /// Called once after the final tick of [`Population::run`][crate::Population::run].
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`BrainObserver`] that does nothing.
pub struct NoopObserver;

impl BrainObserver for NoopObserver {}
