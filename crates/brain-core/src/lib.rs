//! `brain-core`: ids, positions, game time and randomness shared by the
//! memory, behavior and simulation crates.
//!
//! Nothing in here knows about behaviors.  The only external dependencies
//! are `rand` and `thiserror` (and `serde` behind a feature).
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `ActivityId`                              |
//! | [`pos`]         | `BlockPos`: integer world coordinate used as a key   |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `EntityRng`: per-entity deterministic generator       |
//! | [`error`]       | `BrainError`, `BrainResult`                           |
//!
//! Enable the `serde` feature to derive `Serialize`/`Deserialize` on the
//! plain-data types (ids, positions, ticks, `SimConfig`).

pub mod error;
pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BrainError, BrainResult};
pub use ids::{ActivityId, EntityId};
pub use pos::BlockPos;
pub use rng::EntityRng;
pub use time::{SimClock, SimConfig, Tick};
