use thiserror::Error;

/// Errors raised while preparing a test environment.
#[derive(Error, Debug)]
pub enum TestError {
    /// In-memory database could not be opened.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// Local socket operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Response body could not be collected.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Response body was not valid JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
