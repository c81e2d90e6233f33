//! Voice resolution error types

use thiserror::Error;

/// Voice resolution errors
#[derive(Error, Debug)]
pub enum VoiceError {
    /// Voice not found in any data directory or in the catalog
    #[error("Voice not found: {0}")]
    VoiceNotFound(String),

    /// No data directories supplied to a verification call
    #[error("No data directories supplied")]
    NoDataDirs,

    /// Embedded default catalog failed to parse
    #[error("Embedded voice catalog is invalid: {0}")]
    EmbeddedCatalog(String),

    /// Download directory could not be determined
    #[error("Failed to determine download directory: {0}")]
    DownloadDirectoryError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Catalog parse error
    #[error("Catalog parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
