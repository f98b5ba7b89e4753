//! Configuration options shared by all attention implementations.

/// How raw attention scores are scaled before the softmax.
///
/// Dividing by `sqrt(model_dim)` keeps the score magnitude roughly constant
/// as the dimension grows, which prevents the softmax from saturating.
/// Scaling changes only the sharpness of the resulting weights, never their
/// per-row ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreScaling {
    /// Divide scores by `sqrt(model_dim)`. This is the reference behaviour.
    #[default]
    InverseSqrtDim,
    /// Leave scores unscaled. Useful for contrasting against the scaled
    /// variant and for reducing QKV attention to the basic form.
    None,
}
