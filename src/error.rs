//! Error types for media-dl
//!
//! Errors are grouped by pipeline step:
//! - [`ValidationError`] — the request was rejected before any I/O
//! - [`TransportError`] — the HTTP fetch failed
//! - [`ConversionError`] — the external audio extraction failed
//!
//! The pipeline catches every step error at the step boundary and maps it to
//! a `Failed` state plus a user-facing message; errors never escape a run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for media-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for media-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Request rejected before any I/O was performed
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP fetch failed
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Audio extraction failed
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Disk I/O error while writing the downloaded stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Share requested but the pipeline holds no artifact
    #[error("nothing to share: no artifact has been produced")]
    NothingToShare,
}

/// Request validation errors — reported to the user, the pipeline stays Idle
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The URL field was empty
    #[error("URL is empty")]
    EmptyUrl,

    /// The URL's host is on the blocklist
    #[error("host {host} is blocked")]
    BlockedHost {
        /// The lowercased host that matched the blocklist
        host: String,
    },
}

/// HTTP transport errors — the pipeline transitions to Failed
#[derive(Debug, Error)]
pub enum TransportError {
    /// Server answered with a non-2xx status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The HTTP status code returned by the server
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// Connection or body-stream failure from the HTTP client
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// External conversion errors — the pipeline transitions to Failed
///
/// The pipeline reports these generically ("conversion failed") to the user;
/// the underlying detail is only logged.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// The conversion process exited with a non-success status
    #[error("conversion process exited with status {code:?}")]
    ExitStatus {
        /// Exit code reported by the process (None if killed by a signal)
        code: Option<i32>,
    },

    /// The conversion process could not be started
    #[error("failed to start conversion process: {reason}")]
    Spawn {
        /// Why the process could not be spawned
        reason: String,
    },

    /// No conversion capability is available
    #[error("not supported: {0}")]
    NotSupported(String),

    /// The input artifact path cannot be turned into an output path
    #[error("invalid input path {path}")]
    InvalidPath {
        /// The artifact path that could not be processed
        path: PathBuf,
    },
}
