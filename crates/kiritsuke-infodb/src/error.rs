use thiserror::Error;

/// Errors that can occur while loading or saving the info db.
#[derive(Debug, Error)]
pub enum InfoDbError {
    /// Reading or writing the store file failed.
    #[error("info db I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store file is not valid JSON for the expected layout.
    #[error("info db JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The platform reports no per-user data directory.
    #[error("no user data directory available")]
    NoDataDir,
}

/// Result type alias for info db operations.
pub type Result<T> = std::result::Result<T, InfoDbError>;
