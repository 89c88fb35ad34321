use thiserror::Error;

/// Everything that can fail outside the search boundary
///
/// Search failures never show up here: they travel as
/// `SearchOutcome::Failed` so the UI can show them as a banner.
#[derive(Error, Debug)]
pub enum Error {
    #[error("API client error: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
