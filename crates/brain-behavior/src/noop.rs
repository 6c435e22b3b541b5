//! A behavior that only waits.

use crate::{Behavior, Timed};

/// Idle for a random number of ticks.
///
/// Placed at low priority in an idle gate so an entity sometimes stands
/// still instead of always picking the next wander target.
pub struct DoNothing;

impl DoNothing {
    /// # Panics
    /// Panics if `min > max`.
    pub fn timed(min: u64, max: u64) -> Timed<DoNothing> {
        Timed::new(DoNothing).with_duration(min, max)
    }
}

impl<W> Behavior<W> for DoNothing {}
