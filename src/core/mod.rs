//! Core trait and types shared across attention implementations.
//!
//! Implementations operate on rank-2 tensors with layout
//! `(seq_len, model_dim)`. The output tensor mirrors the input layout, and
//! every transform is deterministic and free of side effects on its inputs.

pub mod config;
pub mod errors;

use candle_core::Tensor;

pub use config::ScoreScaling;
pub use errors::AttentionError;

/// Unified interface for self-attention transforms.
///
/// * `x` has layout `(seq_len, model_dim)` with `seq_len >= 1`.
/// * The returned tensor has the same shape and dtype as `x`.
/// * Permuting the rows of `x` permutes the rows of the output identically.
pub trait SelfAttention {
    /// Compute self-attention over the full sequence.
    fn forward(&self, x: &Tensor) -> Result<Tensor, AttentionError>;
}
