use thiserror::Error;

/// Errors produced by the tree generation pipeline.
#[derive(Debug, Error)]
pub enum TreeError {
    /// A `]` arrived with no matching `[` left to unwind.
    #[error("unbalanced ']' at symbol index {index}: no matching '['")]
    UnbalancedBracket { index: usize },

    /// The configured iteration count is outside the supported range.
    #[error("iteration count {got} exceeds the supported maximum of {max}")]
    Configuration { got: u32, max: u32 },

    /// The external render backend failed while instantiating, placing, or
    /// destroying a branch.
    #[error("render backend error: {0}")]
    RenderBackend(String),
}
