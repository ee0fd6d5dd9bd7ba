//! Runner error type.

use std::path::PathBuf;

use thiserror::Error;

use multilat_core::MlatError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Sim(#[from] MlatError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid argument: {0}")]
    Args(String),

    #[error("invalid scenario: {0}")]
    Scenario(String),

    #[error("simulation thread: {0}")]
    Thread(String),
}

pub type AppResult<T> = Result<T, AppError>;
