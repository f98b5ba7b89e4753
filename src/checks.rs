//! Lightweight shape-validation helpers shared across attention components.
//!
//! These routines return [`AttentionError`] so call sites can propagate
//! failures with `?` instead of panicking.

use candle_core::Tensor;

use crate::core::AttentionError;

/// Validates a `(seq_len, model_dim)` sequence matrix and returns its
/// dimensions. An empty sequence is reported as [`AttentionError::EmptyInput`].
pub fn expect_sequence(name: &str, tensor: &Tensor) -> Result<(usize, usize), AttentionError> {
    match tensor.dims() {
        [rows, cols] => {
            if *rows == 0 {
                return Err(AttentionError::EmptyInput);
            }
            if *cols == 0 {
                return Err(AttentionError::ShapeMismatch {
                    context: format!("{name} must have at least one column"),
                });
            }
            Ok((*rows, *cols))
        }
        dims => Err(AttentionError::ShapeMismatch {
            context: format!("{name} must be a (seq_len, model_dim) matrix, got shape {dims:?}"),
        }),
    }
}

/// Validates a square `(dim, dim)` projection matrix and returns `dim`.
pub fn expect_projection(name: &str, tensor: &Tensor) -> Result<usize, AttentionError> {
    match tensor.dims() {
        [rows, cols] if rows == cols && *rows > 0 => Ok(*rows),
        dims => Err(AttentionError::ShapeMismatch {
            context: format!("{name} must be a square non-empty matrix, got shape {dims:?}"),
        }),
    }
}

/// Validates that a projection matches an already established dimension.
pub fn expect_projection_dim(
    name: &str,
    tensor: &Tensor,
    dim: usize,
) -> Result<(), AttentionError> {
    let actual = expect_projection(name, tensor)?;
    if actual == dim {
        Ok(())
    } else {
        Err(AttentionError::ShapeMismatch {
            context: format!("{name} is {actual}x{actual} but {dim}x{dim} was expected"),
        })
    }
}
