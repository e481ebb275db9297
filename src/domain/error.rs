use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;

use super::model::Category;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{category} download failed: {source}")]
    DownloadFailed {
        category: Category,
        #[source]
        source: ApiError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to write log file {}: {source}", path.display())]
    LogWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
