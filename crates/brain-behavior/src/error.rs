use thiserror::Error;

/// Construction-time misconfiguration of a behavior template.
///
/// These values are fixed per behavior type, never per tick, so the
/// panicking constructors (`Timed::with_duration`, `IntervalTicker::new`, …)
/// are the usual entry points; the `try_*` variants exist for templates
/// loaded from configuration files.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("minimum duration {min} exceeds maximum duration {max}")]
    InvalidDuration { min: u64, max: u64 },

    #[error("interval lower bound must be greater than 1, got {0}")]
    IntervalTooShort(u64),

    #[error("selector weights must be positive")]
    ZeroWeight,
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
