//! Error types emitted by attention implementations.

use thiserror::Error;

/// Attention-specific error category.
#[derive(Debug, Error)]
pub enum AttentionError {
    /// The input sequence contains no rows.
    #[error("input sequence is empty")]
    EmptyInput,
    /// The supplied tensor shapes do not align with the documented contract.
    #[error("shape mismatch: {context}")]
    ShapeMismatch { context: String },
    /// A tensor-backend failure propagated to the caller.
    #[error(transparent)]
    Backend(#[from] candle_core::Error),
}
