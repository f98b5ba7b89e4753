//! Exact reference implementations of dot-product attention.
//!
//! The crate operates on row-major sequence matrices of shape
//! `(seq_len, model_dim)`: row `i` is the vector for position `i`. Three
//! self-attention transforms are provided, each mapping a `(t, d)` input to a
//! `(t, d)` output:
//!
//! * [`basic::BasicAttention`] — parameter-free attention where scores are
//!   raw dot products between input rows.
//! * [`qkv::QkvAttention`] — attention through explicit query, key, and value
//!   projection matrices, with `1/sqrt(d)` score scaling by default.
//! * [`multi_head::MultiHeadAttention`] — several independent QKV heads whose
//!   outputs are concatenated and projected back to `model_dim`.
//!
//! Scores are normalized with a numerically stable row-wise softmax
//! ([`softmax::softmax_rows`]), so the attention weights for every position
//! are non-negative and sum to one even when raw scores have large magnitude.
//!
//! All transforms are pure: inputs and projection matrices are never mutated,
//! and repeated calls with the same tensors produce identical outputs.

pub mod basic;
pub mod core;
pub mod init;
pub mod multi_head;
pub mod qkv;
pub mod softmax;

mod checks;

pub use crate::core::{AttentionError, ScoreScaling, SelfAttention};
