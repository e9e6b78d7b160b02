/// Errors raised while building or reading a pairwise array.
///
/// Failures produced by user supplied access callables travel through
/// [`PairwiseError::Operand`] untouched; nothing here retries or logs them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PairwiseError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("index {coord:?} is outside of {bounds}")]
    IndexOutOfBounds { coord: Vec<i32>, bounds: String },

    #[error("rank mismatch: expected {expected} components, found {found}")]
    RankMismatch { expected: usize, found: usize },

    #[error("operand error: {0}")]
    Operand(String),
}

impl PairwiseError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        PairwiseError::Configuration(message.into())
    }

    /// Build an out of bounds error from any coordinate-like slice and
    /// a printable description of the bounds it missed.
    pub fn out_of_bounds<B: std::fmt::Display>(coord: &[i32], bounds: &B) -> Self {
        PairwiseError::IndexOutOfBounds {
            coord: coord.to_vec(),
            bounds: bounds.to_string(),
        }
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, PairwiseError::IndexOutOfBounds { .. })
    }
}

/// Convenience alias for `Result<T, PairwiseError>`.
pub type Result<T> = std::result::Result<T, PairwiseError>;
