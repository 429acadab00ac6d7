//! # media-dl
//!
//! Backend library for media download applications: fetch a URL over HTTP
//! with progress reporting, optionally extract an audio-only mp3 via an
//! external ffmpeg binary, and hand the result to a sharing collaborator.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Event-driven** - Consumers subscribe to events, no polling required
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Single-run** - One request at a time, no queue, no retries
//!
//! ## Quick Start
//!
//! ```no_run
//! use media_dl::{Config, DownloadRequest, MediaPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut pipeline = MediaPipeline::new(Config::default())?;
//!
//!     // Subscribe to events
//!     let mut events = pipeline.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let state = pipeline
//!         .start(&DownloadRequest::audio_only("https://example.com/video.mp4"))
//!         .await;
//!     println!("Final state: {:?}", state);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Streamed HTTP download
pub mod download;
/// Error types
pub mod error;
/// Content-type to extension inference
pub mod format;
/// Pipeline controller and state machine
pub mod pipeline;
/// Host blocklist enforcement
pub mod policy;
/// Audio extraction via external capability
pub mod transcode;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, ToolsConfig};
pub use download::StreamDownloader;
pub use error::{ConversionError, Error, Result, TransportError, ValidationError};
pub use pipeline::{MediaPipeline, ShareSink};
pub use transcode::{AudioExtractor, FfmpegAudioExtractor, NoOpAudioExtractor};
pub use types::{
    Artifact, DownloadRequest, Event, HostVerdict, PipelineState, ProgressEvent,
};
