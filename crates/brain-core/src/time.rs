//! Game time.
//!
//! Everything a brain schedules (behavior end stamps, memory expiry, retry
//! delays, think cadence) is counted in whole `Tick`s, so comparisons are
//! exact and runs replay bit-for-bit.

use std::fmt;
use std::ops::{Add, Sub};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute game tick.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn offset(self, ticks: u64) -> Tick {
        Tick(self.0.saturating_add(ticks))
    }

    /// Ticks from `earlier` up to `self`; 0 when `earlier` is in the future.
    #[inline]
    pub fn saturating_since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<u64> for Tick {
    type Output = Tick;

    #[inline]
    fn add(self, ticks: u64) -> Tick {
        self.offset(ticks)
    }
}

impl Sub for Tick {
    type Output = u64;

    #[inline]
    fn sub(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The population's notion of "now"; advanced once after every brain has
/// been ticked.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    now: Tick,
}

impl SimClock {
    pub fn starting_at(start: Tick) -> Self {
        Self { now: start }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.now = self.now + 1;
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.now
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.now.fmt(f)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run length and seed, usually read from the application's config file.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    pub start_tick:  u64,
    pub total_ticks: u64,
    /// Every brain seeds its generator from this; same seed, same run.
    pub seed:        u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { start_tick: 0, total_ticks: 1_200, seed: 0 }
    }
}

impl SimConfig {
    /// First tick *not* simulated.
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.start_tick + self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::starting_at(Tick(self.start_tick))
    }
}
