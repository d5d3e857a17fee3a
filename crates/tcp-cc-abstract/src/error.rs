use thiserror::Error;

/// Failures of the simulation core.
///
/// Congestion signals are not errors; they are reported as
/// [`crate::Outcome`] values. Everything here is a configuration or
/// capacity defect.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("round count must be positive, got {0}")]
    InvalidRoundCount(usize),

    #[error("segment batch is full ({capacity} slots)")]
    BatchFull { capacity: usize },

    #[error("receiver reorder buffer is full ({capacity} segments)")]
    ReorderBufferFull { capacity: usize },
}
