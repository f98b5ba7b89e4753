//! Query/key/value attention with explicit projection matrices.
//!
//! Each position is projected three ways: a query used to probe the other
//! positions, a key probed against, and a value contributed to the weighted
//! combination. The projections are plain `(d, d)` matrices owned by the
//! attention value; this crate never trains them, so `random` constructors
//! produce untrained Xavier-normal weights for demonstration purposes.

use candle_core::{Device, Tensor};

use crate::checks;
use crate::core::{AttentionError, ScoreScaling, SelfAttention};
use crate::init::xavier_normal;
use crate::softmax::softmax_rows;

/// Scaled dot-product attention: `Y = softmax(Q·Kᵀ / sqrt(d))·V` with
/// `Q = X·Wq`, `K = X·Wk`, `V = X·Wv`.
#[derive(Debug, Clone)]
pub struct QkvAttention {
    wq: Tensor,
    wk: Tensor,
    wv: Tensor,
    scaling: ScoreScaling,
    model_dim: usize,
}

impl QkvAttention {
    /// Builds an attention head with `1/sqrt(d)` score scaling.
    ///
    /// Each projection must be a square `(d, d)` matrix and all three must
    /// agree on `d`. The matrices are cloned handles; the head never mutates
    /// them.
    pub fn new(wq: Tensor, wk: Tensor, wv: Tensor) -> Result<Self, AttentionError> {
        Self::with_scaling(wq, wk, wv, ScoreScaling::default())
    }

    /// Builds an attention head with an explicit scaling policy.
    pub fn with_scaling(
        wq: Tensor,
        wk: Tensor,
        wv: Tensor,
        scaling: ScoreScaling,
    ) -> Result<Self, AttentionError> {
        let model_dim = checks::expect_projection("wq", &wq)?;
        checks::expect_projection_dim("wk", &wk, model_dim)?;
        checks::expect_projection_dim("wv", &wv, model_dim)?;
        log::debug!("qkv head init model_dim={model_dim} scaling={scaling:?}");
        Ok(Self {
            wq,
            wk,
            wv,
            scaling,
            model_dim,
        })
    }

    /// Builds a head with untrained Xavier-normal projections.
    pub fn random(model_dim: usize, device: &Device) -> Result<Self, AttentionError> {
        let wq = xavier_normal(model_dim, model_dim, device)?;
        let wk = xavier_normal(model_dim, model_dim, device)?;
        let wv = xavier_normal(model_dim, model_dim, device)?;
        Self::new(wq, wk, wv)
    }

    /// The shared dimension `d` of the projection matrices.
    pub fn model_dim(&self) -> usize {
        self.model_dim
    }

    /// Row-stochastic attention weights for `x`, shape `(seq_len, seq_len)`.
    pub fn weights(&self, x: &Tensor) -> Result<Tensor, AttentionError> {
        let (_, dim) = checks::expect_sequence("x", x)?;
        if dim != self.model_dim {
            return Err(AttentionError::ShapeMismatch {
                context: format!(
                    "x has {dim} columns but the projections expect {}",
                    self.model_dim
                ),
            });
        }
        let queries = x.matmul(&self.wq)?;
        let keys = x.matmul(&self.wk)?;
        let mut scores = queries.matmul(&keys.t()?)?;
        if self.scaling == ScoreScaling::InverseSqrtDim {
            scores = scores.affine(1.0 / (self.model_dim as f64).sqrt(), 0.0)?;
        }
        softmax_rows(&scores)
    }
}

impl SelfAttention for QkvAttention {
    fn forward(&self, x: &Tensor) -> Result<Tensor, AttentionError> {
        let weights = self.weights(x)?;
        let values = x.matmul(&self.wv)?;
        Ok(weights.matmul(&values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device, Tensor};

    fn sample_input(device: &Device) -> Result<Tensor, AttentionError> {
        Ok(Tensor::from_vec(
            vec![0.2f32, -1.1, 0.8, 0.4, -0.3, 1.6, 2.0, -0.5],
            (4, 2),
            device,
        )?)
    }

    #[test]
    fn output_shape_matches_input() -> Result<(), AttentionError> {
        let device = Device::Cpu;
        let x = sample_input(&device)?;
        let head = QkvAttention::random(2, &device)?;
        let y = head.forward(&x)?;
        assert_eq!(y.dims(), x.dims());
        Ok(())
    }

    #[test]
    fn weights_are_row_stochastic() -> Result<(), AttentionError> {
        let device = Device::Cpu;
        let x = sample_input(&device)?;
        let head = QkvAttention::random(2, &device)?;
        for row in head.weights(&x)?.to_vec2::<f32>()? {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
            assert!(row.iter().all(|w| *w >= 0.0));
        }
        Ok(())
    }

    #[test]
    fn mismatched_projections_are_rejected() {
        let device = Device::Cpu;
        let wq = Tensor::zeros((2, 2), DType::F32, &device).unwrap();
        let wk = Tensor::zeros((3, 3), DType::F32, &device).unwrap();
        let wv = Tensor::zeros((2, 2), DType::F32, &device).unwrap();
        let err = QkvAttention::new(wq, wk, wv).unwrap_err();
        assert!(matches!(err, AttentionError::ShapeMismatch { .. }));
    }

    #[test]
    fn input_dim_must_match_projections() -> Result<(), AttentionError> {
        let device = Device::Cpu;
        let head = QkvAttention::random(3, &device)?;
        let x = sample_input(&device)?;
        let err = head.forward(&x).unwrap_err();
        assert!(matches!(err, AttentionError::ShapeMismatch { .. }));
        Ok(())
    }
}
