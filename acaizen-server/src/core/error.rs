use thiserror::Error;

/// Errors raised while bootstrapping or running the server
///
/// Request-level failures use [`shared::error::AppError`]; this type only
/// covers startup and shutdown.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
