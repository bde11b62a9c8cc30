use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid {kind} id: {input:?}")]
    InvalidId { kind: &'static str, input: String },

    #[error("{kind} id must be positive")]
    ZeroId { kind: &'static str },

    #[error("no {kind} id left after {max}")]
    IdsExhausted { kind: &'static str, max: u64 },
}
