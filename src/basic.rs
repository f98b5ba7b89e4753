//! Parameter-free self-attention.
//!
//! Scores are raw dot products between input rows, so each output row is a
//! softmax-weighted average of the input rows that favours similar vectors.
//! There is nothing to configure and nothing to train.

use candle_core::Tensor;

use crate::checks;
use crate::core::{AttentionError, SelfAttention};
use crate::softmax::softmax_rows;

/// Self-attention without learned projections: `Y = softmax(X·Xᵀ)·X`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAttention;

impl BasicAttention {
    pub fn new() -> Self {
        Self
    }

    /// Row-stochastic attention weights for `x`, shape `(seq_len, seq_len)`.
    ///
    /// Entry `(i, j)` is how much position `i` attends to position `j`.
    pub fn weights(&self, x: &Tensor) -> Result<Tensor, AttentionError> {
        checks::expect_sequence("x", x)?;
        let scores = x.matmul(&x.t()?)?;
        softmax_rows(&scores)
    }
}

impl SelfAttention for BasicAttention {
    fn forward(&self, x: &Tensor) -> Result<Tensor, AttentionError> {
        let weights = self.weights(x)?;
        Ok(weights.matmul(x)?)
    }
}
