//! `brain-sim`: per-entity brains and the population tick loop.
//!
//! # Per-entity tick
//!
//! ```text
//! for tick in start..end:
//!   for brain in brains (ascending EntityId):
//!     ① Forget  expired memories are dropped.
//!     ② Start   on think ticks (BrainConfig cadence), every stopped
//!                 behavior of a core or the current activity gets
//!                 try_start, lowest priority value first.
//!     ③ Update  every running behavior gets tick_or_stop.
//! ```
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`brain`]       | `Brain`: memory, RNG, activities, prioritized slots   |
//! | [`builder`]     | `BrainBuilder`: validated construction                |
//! | [`config`]      | `BrainConfig`: think cadence                          |
//! | [`population`]  | `Population`: world + brains + clock                  |
//! | [`observer`]    | `BrainObserver`, `NoopObserver`                       |
//! | [`error`]       | `SimError`, `SimResult`                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use brain_core::{EntityId, SimConfig};
//! use brain_memory::MemoryBuilder;
//! use brain_sim::{BrainBuilder, NoopObserver, Population};
//!
//! let mut population = Population::new(SimConfig::default(), World::default());
//! let brain = BrainBuilder::new(EntityId(0), 42, MemoryBuilder::new().register(HOME))
//!     .add_activity(IDLE, vec![(0, Box::new(DoNothing::timed(30, 60)) as BoxedBehavior<World>)])
//!     .default_activity(IDLE)
//!     .build()?;
//! population.insert(brain)?;
//! population.run(&mut NoopObserver);
//! ```

pub mod brain;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod population;

#[cfg(test)]
mod tests;

pub use brain::Brain;
pub use builder::BrainBuilder;
pub use config::BrainConfig;
pub use error::{SimError, SimResult};
pub use observer::{BrainObserver, NoopObserver};
pub use population::Population;
