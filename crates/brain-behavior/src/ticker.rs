//! `IntervalTicker`: fires once every randomly sampled number of ticks.

use brain_core::EntityRng;

use crate::{BehaviorError, BehaviorResult};

/// Inclusive integer range `[min, max]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniformInterval {
    pub min: u64,
    pub max: u64,
}

impl UniformInterval {
    pub fn new(min: u64, max: u64) -> BehaviorResult<Self> {
        if min > max {
            return Err(BehaviorError::Config(format!(
                "interval lower bound {min} exceeds upper bound {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn sample(self, rng: &mut EntityRng) -> u64 {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

/// Countdown that reports `true` on the last tick of each sampled interval.
///
/// The first call after construction (or [`reset`][Self::reset]) only
/// samples an interval and reports `false`; thereafter `true` comes once
/// every `interval` calls.
#[derive(Clone, Debug)]
pub struct IntervalTicker {
    interval:        UniformInterval,
    ticks_remaining: u64,
}

impl IntervalTicker {
    /// # Panics
    /// Panics if `interval.min <= 1` or `interval.min > interval.max`.
    pub fn new(interval: UniformInterval) -> Self {
        match Self::try_new(interval) {
            Ok(ticker) => ticker,
            Err(e) => panic!("{e}"),
        }
    }

    /// Rejects lower bounds of 0 or 1, which would make the countdown fire
    /// on every call or never re-arm, and inverted bounds (the fields are
    /// public and deserializable, so `UniformInterval::new` may have been
    /// skipped).
    pub fn try_new(interval: UniformInterval) -> BehaviorResult<Self> {
        if interval.min <= 1 {
            return Err(BehaviorError::IntervalTooShort(interval.min));
        }
        let interval = UniformInterval::new(interval.min, interval.max)?;
        Ok(Self { interval, ticks_remaining: 0 })
    }

    pub fn tick_down_and_check(&mut self, rng: &mut EntityRng) -> bool {
        if self.ticks_remaining == 0 {
            self.ticks_remaining = self.interval.sample(rng) - 1;
            return false;
        }
        self.ticks_remaining -= 1;
        self.ticks_remaining == 0
    }

    /// Disarm; the next call re-samples.
    pub fn reset(&mut self) {
        self.ticks_remaining = 0;
    }

    pub fn interval(&self) -> UniformInterval {
        self.interval
    }
}
