//! Numerically stable row-wise softmax.
//!
//! Attention scores can have large magnitude, so the per-row maximum is
//! subtracted before exponentiating. Shifting a row by a constant leaves the
//! softmax unchanged but keeps every exponent at or below zero, which cannot
//! overflow.

use candle_core::{Tensor, D};

use crate::checks;
use crate::core::AttentionError;

/// Applies softmax independently to each row of a rank-2 score matrix.
///
/// Every row of the result is non-negative and sums to one within floating
/// point tolerance.
pub fn softmax_rows(scores: &Tensor) -> Result<Tensor, AttentionError> {
    checks::expect_sequence("scores", scores)?;
    let row_max = scores.max_keepdim(D::Minus1)?;
    let shifted = scores.broadcast_sub(&row_max)?;
    let exp = shifted.exp()?;
    let row_sum = exp.sum_keepdim(D::Minus1)?;
    Ok(exp.broadcast_div(&row_sum)?)
}
