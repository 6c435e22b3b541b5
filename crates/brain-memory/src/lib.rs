//! `brain-memory`: the per-entity fact store behaviors read and write.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`key`]       | `MemoryKey<T>` (typed), `MemoryKeyId` (erased), `MemoryStatus` |
//! | [`slot`]      | Type-erased value slots with optional time-to-live          |
//! | [`store`]     | `Memory`: has / get / set / set_with_expiry / erase / tick |
//! | [`condition`] | `EntryCondition`: ordered key → required-status map        |
//! | [`builder`]   | `MemoryBuilder` (fluent key registration)                   |
//! | [`error`]     | `MemoryError`, `MemoryResult<T>`                            |
//!
//! # Presence model
//!
//! Only registered keys are legal slots for an entity.  A registered slot is
//! either holding a value ("present") or empty ("absent").  Asking for a key
//! that was never registered is not a runtime fault: `has` answers `false`
//! for every status and `set` is ignored, so a behavior written for a
//! richer entity type simply never starts on a poorer one.

pub mod builder;
pub mod condition;
pub mod error;
pub mod key;
pub mod slot;
pub mod store;


pub use builder::MemoryBuilder;
pub use condition::EntryCondition;
pub use error::{MemoryError, MemoryResult};
pub use key::{MemoryKey, MemoryKeyId, MemoryStatus};
pub use store::Memory;
