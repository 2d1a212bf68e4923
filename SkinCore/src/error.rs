//! Error types for `SkinCore`

use thiserror::Error;

/// The error type for `SkinCore` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Descriptor Errors ====================
    /// Material text could not be parsed by any structured tier.
    ///
    /// Never fatal: template normalization copies the text through and
    /// specialization falls back to textual rewrites.
    #[error("could not parse material JSON (strict: {strict}; lenient: {lenient})")]
    ParseFailure {
        /// Error reported by the strict parse.
        strict: String,
        /// Error reported after comment and trailing-comma stripping.
        lenient: String,
    },

    /// Text fallback specialization could not find some of its expected
    /// patterns. The file has been written in its partially rewritten state.
    #[error("{file}: no match for {rules}")]
    PartialFieldFailure {
        /// The file that was only partially specialized.
        file: String,
        /// Comma-separated names of the rules that matched nothing.
        rules: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// A specialized Result type for `SkinCore` operations.
pub type Result<T> = std::result::Result<T, Error>;
