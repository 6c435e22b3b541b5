//! Think cadence.

use brain_core::{EntityId, Tick};

/// How often a brain *thinks*, i.e. tries to start stopped behaviors.
///
/// Running behaviors are ticked every tick regardless; only the start phase
/// is thinned out.  With `think_every_ticks = 20` and a per-entity offset, a
/// large population spreads its start checks evenly over 20 ticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrainConfig {
    pub think_every_ticks:  u32,
    pub think_offset_ticks: u32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self { think_every_ticks: 1, think_offset_ticks: 0 }
    }
}

impl BrainConfig {
    /// Cadence of `think_every_ticks` with an offset derived from the entity
    /// id, so neighbouring ids think on different ticks.
    pub fn deterministic(entity: EntityId, think_every_ticks: u32) -> Self {
        let every = think_every_ticks.max(1);
        Self {
            think_every_ticks:  every,
            think_offset_ticks: entity.0 % every,
        }
    }

    pub fn should_think(&self, tick: Tick) -> bool {
        let every = self.think_every_ticks.max(1) as u64;
        (tick.0 + self.think_offset_ticks as u64).is_multiple_of(every)
    }
}
