//! Error types for codemerge

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using codemerge's Error
pub type Result<T> = std::result::Result<T, Error>;

/// codemerge error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("No files to include (check your path or filters)")]
    NoFilesToInclude,

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("No file blocks found in the input document")]
    NoFilesInDocument,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Ignore rule error: {0}")]
    Ignore(#[from] ignore::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
