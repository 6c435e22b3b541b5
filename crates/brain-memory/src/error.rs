use thiserror::Error;

use crate::MemoryKeyId;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("memory `{name}` ({id}) is not registered for this entity")]
    Unregistered { id: MemoryKeyId, name: &'static str },

    #[error("memory `{name}` holds {stored}, requested as {requested}")]
    TypeMismatch {
        name:      &'static str,
        stored:    &'static str,
        requested: &'static str,
    },

    #[error("memory {id} registered as both {first} and {second}")]
    TypeConflict {
        id:     MemoryKeyId,
        first:  &'static str,
        second: &'static str,
    },
}

pub type MemoryResult<T> = Result<T, MemoryError>;
