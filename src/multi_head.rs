//! Multi-head attention composed from independent QKV heads.
//!
//! Each head runs the full QKV attention algorithm with its own projections.
//! The per-position head outputs are concatenated into a vector of dimension
//! `n_heads * model_dim` and a final output projection maps that back down to
//! `model_dim`. Heads never communicate, so the only join point is the
//! concatenation.

use std::sync::OnceLock;

use candle_core::{Device, Tensor};

use crate::core::{AttentionError, SelfAttention};
use crate::init::xavier_normal;
use crate::qkv::QkvAttention;

/// Several independent attention heads plus an output projection of shape
/// `(model_dim, n_heads * model_dim)`.
#[derive(Debug)]
pub struct MultiHeadAttention {
    heads: Vec<QkvAttention>,
    w_out: Tensor,
    model_dim: usize,
    first_call: OnceLock<()>,
}

impl MultiHeadAttention {
    /// Assembles heads behind a shared output projection.
    ///
    /// All heads must agree on `model_dim` and `w_out` must have shape
    /// `(model_dim, n_heads * model_dim)`.
    pub fn new(heads: Vec<QkvAttention>, w_out: Tensor) -> Result<Self, AttentionError> {
        let model_dim = match heads.first() {
            Some(head) => head.model_dim(),
            None => {
                return Err(AttentionError::ShapeMismatch {
                    context: "multi-head attention requires at least one head".to_string(),
                })
            }
        };
        for (index, head) in heads.iter().enumerate() {
            if head.model_dim() != model_dim {
                return Err(AttentionError::ShapeMismatch {
                    context: format!(
                        "head {index} has model_dim {} but head 0 has {model_dim}",
                        head.model_dim()
                    ),
                });
            }
        }
        let expected = [model_dim, heads.len() * model_dim];
        if w_out.dims() != expected {
            return Err(AttentionError::ShapeMismatch {
                context: format!(
                    "w_out must have shape {expected:?}, got {:?}",
                    w_out.dims()
                ),
            });
        }
        Ok(Self {
            heads,
            w_out,
            model_dim,
            first_call: OnceLock::new(),
        })
    }

    /// Builds `n_heads` untrained heads and a random output projection.
    pub fn random(
        n_heads: usize,
        model_dim: usize,
        device: &Device,
    ) -> Result<Self, AttentionError> {
        let heads = (0..n_heads)
            .map(|_| QkvAttention::random(model_dim, device))
            .collect::<Result<Vec<_>, _>>()?;
        let w_out = xavier_normal(model_dim, n_heads * model_dim, device)?;
        Self::new(heads, w_out)
    }

    pub fn n_heads(&self) -> usize {
        self.heads.len()
    }

    pub fn model_dim(&self) -> usize {
        self.model_dim
    }
}

impl SelfAttention for MultiHeadAttention {
    fn forward(&self, x: &Tensor) -> Result<Tensor, AttentionError> {
        if self.first_call.set(()).is_ok() {
            log::info!(
                "multi_head init n_heads={} model_dim={}",
                self.heads.len(),
                self.model_dim
            );
        }
        let mut outputs = Vec::with_capacity(self.heads.len());
        for head in &self.heads {
            outputs.push(head.forward(x)?);
        }
        // (t, n_heads * d) after concatenating along the feature axis.
        let concat = Tensor::cat(&outputs, 1)?;
        Ok(concat.matmul(&self.w_out.t()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device, Tensor};

    #[test]
    fn output_shape_matches_input() -> Result<(), AttentionError> {
        let device = Device::Cpu;
        let x = Tensor::from_vec(
            vec![0.1f32, 0.9, -0.4, 0.7, 1.2, -0.2, 0.3, 0.5],
            (4, 2),
            &device,
        )?;
        let attention = MultiHeadAttention::random(3, 2, &device)?;
        let y = attention.forward(&x)?;
        assert_eq!(y.dims(), &[4, 2]);
        assert_eq!(attention.n_heads(), 3);
        assert_eq!(attention.model_dim(), 2);
        Ok(())
    }

    #[test]
    fn single_head_with_identity_projection_matches_head() -> Result<(), AttentionError> {
        let device = Device::Cpu;
        let x = Tensor::from_vec(vec![0.3f32, -0.8, 1.1, 0.6], (2, 2), &device)?;
        let head = QkvAttention::random(2, &device)?;
        let expected = head.forward(&x)?;
        let identity = Tensor::eye(2, DType::F32, &device)?;
        let attention = MultiHeadAttention::new(vec![head], identity)?;
        let actual = attention.forward(&x)?;
        let max = actual
            .sub(&expected)?
            .abs()?
            .max_all()?
            .to_vec0::<f32>()?;
        assert!(max < 1e-6);
        Ok(())
    }

    #[test]
    fn empty_head_list_is_rejected() {
        let device = Device::Cpu;
        let w_out = Tensor::zeros((2, 2), DType::F32, &device).unwrap();
        let err = MultiHeadAttention::new(Vec::new(), w_out).unwrap_err();
        assert!(matches!(err, AttentionError::ShapeMismatch { .. }));
    }

    #[test]
    fn wrong_output_projection_shape_is_rejected() -> Result<(), AttentionError> {
        let device = Device::Cpu;
        let heads = vec![
            QkvAttention::random(2, &device)?,
            QkvAttention::random(2, &device)?,
        ];
        // Two heads of dim 2 need a (2, 4) projection.
        let w_out = Tensor::zeros((2, 2), DType::F32, &device)?;
        let err = MultiHeadAttention::new(heads, w_out).unwrap_err();
        assert!(matches!(err, AttentionError::ShapeMismatch { .. }));
        Ok(())
    }

    #[test]
    fn heads_must_share_model_dim() -> Result<(), AttentionError> {
        let device = Device::Cpu;
        let heads = vec![
            QkvAttention::random(2, &device)?,
            QkvAttention::random(3, &device)?,
        ];
        let w_out = Tensor::zeros((2, 4), DType::F32, &device)?;
        let err = MultiHeadAttention::new(heads, w_out).unwrap_err();
        assert!(matches!(err, AttentionError::ShapeMismatch { .. }));
        Ok(())
    }
}
