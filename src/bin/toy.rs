//! Toy walkthrough: four random vectors of dimension two pushed through each
//! attention variant, printing the attention weights and outputs.
//!
//! Run with: `cargo run --bin toy`

use anyhow::Result;
use attention_primer::basic::BasicAttention;
use attention_primer::multi_head::MultiHeadAttention;
use attention_primer::qkv::QkvAttention;
use attention_primer::SelfAttention;
use candle_core::{Device, Tensor};

fn print_matrix(label: &str, matrix: &Tensor) -> Result<()> {
    println!("{label}:");
    for row in matrix.to_vec2::<f32>()? {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>8.4}")).collect();
        println!("  [{}]", cells.join(", "));
    }
    Ok(())
}

fn main() -> Result<()> {
    let device = Device::Cpu;
    let x = Tensor::randn(0f32, 1.0, (4, 2), &device)?;
    print_matrix("input x (4 vectors of dim 2)", &x)?;

    let basic = BasicAttention::new();
    print_matrix("basic attention weights", &basic.weights(&x)?)?;
    print_matrix("basic attention output", &basic.forward(&x)?)?;

    let head = QkvAttention::random(2, &device)?;
    print_matrix("qkv attention weights (scaled by 1/sqrt(2))", &head.weights(&x)?)?;
    print_matrix("qkv attention output", &head.forward(&x)?)?;

    let multi = MultiHeadAttention::random(2, 2, &device)?;
    print_matrix("2-head attention output", &multi.forward(&x)?)?;

    Ok(())
}
