//! Core types and events for media-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single user-initiated download request
///
/// Constructed once per user action and never mutated. The pipeline
/// re-validates the URL from scratch on every request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// The media URL to fetch
    pub url: String,

    /// Whether to extract an audio-only mp3 from the download
    #[serde(default)]
    pub want_audio_only: bool,
}

impl DownloadRequest {
    /// Create a request for the raw download
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            want_audio_only: false,
        }
    }

    /// Create a request that extracts audio after downloading
    pub fn audio_only(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            want_audio_only: true,
        }
    }
}

/// Allowed/Blocked classification of a URL's host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostVerdict {
    /// Host is not on the blocklist
    Allowed,
    /// Host is on the blocklist; no network call may be issued
    Blocked,
}

/// A snapshot of download progress
///
/// Emitted after each chunk is written, but only when the server declared a
/// total content length. Transient — never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Bytes written so far
    pub bytes_read: u64,

    /// Total bytes declared by the server (-1 if unknown)
    pub total_bytes: i64,

    /// Completion percentage, clamped to 0..=100 (0 when total is unknown)
    pub percent: u8,
}

/// A file produced by the pipeline (raw download or transcoded derivative)
///
/// Owned exclusively by the pipeline until shared. At most one live artifact
/// is tracked at a time; producing a new one supersedes — but does not
/// delete — the previous file on disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Absolute path of the file on local storage
    pub path: PathBuf,

    /// File extension without the leading dot (e.g. "mp4", "mp3")
    pub extension: String,
}

impl Artifact {
    /// Create an artifact from a path and extension
    pub fn new(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// The filename without any extension, if the path has one
    pub fn base_name(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }
}

/// Pipeline state — exactly one instance per in-flight request
///
/// Reset when a new request starts. `Completed` always wraps the *last*
/// produced artifact: the transcoded file if audio extraction was requested,
/// otherwise the raw download.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PipelineState {
    /// No request in flight
    Idle,

    /// Streaming the HTTP body to disk
    Downloading,

    /// Running the external audio extraction
    Converting,

    /// Request finished; the wrapped artifact is available for sharing
    Completed {
        /// The last produced artifact
        artifact: Artifact,
    },

    /// Request failed with a user-facing reason
    Failed {
        /// Why the request failed
        reason: String,
    },
}

impl PipelineState {
    /// Whether a new request may be started from this state
    ///
    /// The UI is expected to disable its trigger while this is false.
    pub fn can_start(&self) -> bool {
        !matches!(self, PipelineState::Downloading | PipelineState::Converting)
    }
}

/// Event emitted during a pipeline run
///
/// Consumers subscribe via [`MediaPipeline::subscribe`](crate::MediaPipeline::subscribe);
/// the pipeline calls into subscribers, never the reverse.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Download progress update
    Progress {
        /// The progress snapshot
        progress: ProgressEvent,
    },

    /// The pipeline moved to a new state
    StateChanged {
        /// The state that was entered
        state: PipelineState,
    },

    /// Transient user-facing text (status line, toast)
    Message {
        /// The text to display
        text: String,
    },
}
