//! Errors shared across the `brain-*` crates.

use thiserror::Error;

use crate::EntityId;

#[derive(Debug, Error)]
pub enum BrainError {
    /// A lookup named an entity that has no brain.
    #[error("no brain registered for {0}")]
    EntityNotFound(EntityId),
}

pub type BrainResult<T> = Result<T, BrainError>;
