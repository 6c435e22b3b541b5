use brain_core::{ActivityId, BrainError, EntityId};
use brain_memory::MemoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("brain configuration error: {0}")]
    Config(String),

    #[error("activity {0} registered twice")]
    DuplicateActivity(ActivityId),

    #[error("{what} refers to unregistered activity {activity}")]
    UnknownActivity {
        activity: ActivityId,
        what:     &'static str,
    },

    #[error("entity {0} already has a brain in this population")]
    DuplicateEntity(EntityId),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Core(#[from] BrainError),
}

pub type SimResult<T> = Result<T, SimError>;
