use std::io::Error as IoError;

use thiserror::Error;

use crate::config::ConfigError;
use crate::database::StoreError;

/// Failures that end the process with a non-zero exit code
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("could not build the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("{0:#}")]
    Io(#[from] IoError),
}
