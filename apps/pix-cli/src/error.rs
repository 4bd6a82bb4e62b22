//! # CLI Error Type
//!
//! Unified error type for `pix` commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  PayloadError / DecodeError (pix-core)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PixError ──┐                                                           │
//! │             │                                                           │
//! │  io / toml ─┼──► CliError (this module) ──► tracing::error! + exit 1   │
//! │             │                                                           │
//! │  serde_json ┘                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use pix_core::{PayloadError, PixError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Everything that can make a `pix` invocation fail.
#[derive(Debug, Error)]
pub enum CliError {
    /// Encoding or decoding failed.
    #[error(transparent)]
    Pix(#[from] PixError),

    /// The merchant profile exists but could not be read.
    #[error("Failed to read config {}: {}", .path.display(), .source)]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The merchant profile is not valid TOML for `PixConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// JSON output could not be produced.
    #[error("Failed to serialize output: {0}")]
    Output(#[from] serde_json::Error),
}

impl From<PayloadError> for CliError {
    fn from(err: PayloadError) -> Self {
        CliError::Pix(err.into())
    }
}
