use thiserror::Error;

/// Errors that can occur while building Kiritsuke core components.
///
/// Prettifying itself never fails: malformed names degrade to
/// [`ShapeCategory::Unclassified`](crate::types::ShapeCategory::Unclassified).
/// Only construction of the pattern tables can error out.
#[derive(Debug, Error)]
pub enum KiritsukeError {
    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for Kiritsuke operations.
pub type Result<T> = std::result::Result<T, KiritsukeError>;
