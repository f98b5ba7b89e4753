//! Random initialisation for untrained projection matrices.

use candle_core::{Device, Result, Tensor};

/// Samples a `(rows, cols)` matrix from the Xavier/Glorot normal
/// distribution, `N(0, 2 / (rows + cols))`.
pub fn xavier_normal(rows: usize, cols: usize, device: &Device) -> Result<Tensor> {
    let std = (2.0f64 / (rows as f64 + cols as f64)).sqrt();
    Tensor::randn(0f32, std as f32, (rows, cols), device)
}
