//! Error types for program construction.

use thiserror::Error;

/// Error raised while building a [`BinaryProgram`](crate::BinaryProgram).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A variable id that does not belong to the program
    #[error("Unknown variable index {0}")]
    UnknownVariable(usize),

    /// A coefficient or right-hand side that is NaN or infinite
    #[error("Non-finite value in {0}")]
    NonFinite(String),
}
