//! Streamed HTTP download with progress reporting
//!
//! Performs a single non-resumable GET, writes the body chunk-by-chunk to a
//! timestamped file in the output directory, and reports progress through a
//! caller-supplied sink after every chunk when the server declared a total
//! content length. No range requests, no retries, no resumption.

use crate::error::{Result, TransportError};
use crate::format;
use crate::types::{Artifact, ProgressEvent};
use futures::StreamExt;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Content type assumed when the response carries no Content-Type header
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Timestamp format for output filenames (`LD_<yyyyMMdd_HHmmss>.<ext>`)
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Streamed HTTP downloader writing into a fixed output directory
///
/// Cloning is cheap — the underlying `reqwest::Client` is reference-counted.
#[derive(Clone)]
pub struct StreamDownloader {
    client: reqwest::Client,
    output_dir: PathBuf,
}

impl StreamDownloader {
    /// Create a downloader writing into `output_dir`
    ///
    /// The directory is created on first use. Connect/read timeouts are
    /// whatever the supplied client defaults to — no additional timeout
    /// layer is imposed here.
    pub fn new(client: reqwest::Client, output_dir: PathBuf) -> Self {
        Self { client, output_dir }
    }

    /// Fetch `url` and stream the body to a new file
    ///
    /// The output filename is `LD_<timestamp>.<ext>` where the extension is
    /// inferred from the response's Content-Type header. After each chunk,
    /// if the server declared a content length, a [`ProgressEvent`] with a
    /// percentage clamped to 0..=100 is passed to `on_progress`; with an
    /// unknown length no progress events fire but the download still
    /// completes.
    ///
    /// # Errors
    ///
    /// - [`TransportError::HttpStatus`] on a non-2xx response
    /// - [`TransportError::Network`] on connection or body-stream failure
    /// - `Error::Io` on disk write failure
    ///
    /// On failure the partially written file is left on disk; the file
    /// handle itself is closed on every exit path.
    pub async fn download<F>(&self, url: &str, mut on_progress: F) -> Result<Artifact>
    where
        F: FnMut(ProgressEvent),
    {
        debug!(url, "starting download");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(TransportError::Network)?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "server returned non-2xx");
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE);
        let extension = format::resolve_extension(content_type);
        let total_bytes = response.content_length();

        let stamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let path = self.output_dir.join(format!("LD_{stamp}.{extension}"));

        tokio::fs::create_dir_all(&self.output_dir).await?;
        let mut file = tokio::fs::File::create(&path).await?;

        debug!(?path, content_type, ?total_bytes, "writing response body");

        let mut bytes_read: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(TransportError::Network)?;
            file.write_all(&chunk).await?;
            bytes_read += chunk.len() as u64;

            if let Some(event) = progress_after_chunk(bytes_read, total_bytes) {
                on_progress(event);
            }
        }
        file.flush().await?;

        info!(?path, bytes_read, "download complete");
        Ok(Artifact::new(path, extension))
    }
}

/// Compute the progress event to emit after a chunk, if any
///
/// Returns `None` when the total length is unknown or zero — progress simply
/// never updates in that case (documented gap, preserved from the original
/// behavior). The percentage is clamped to 0..=100.
fn progress_after_chunk(bytes_read: u64, total_bytes: Option<u64>) -> Option<ProgressEvent> {
    match total_bytes {
        Some(total) if total > 0 => {
            let percent = (bytes_read.saturating_mul(100) / total).min(100) as u8;
            Some(ProgressEvent {
                bytes_read,
                total_bytes: total as i64,
                percent,
            })
        }
        _ => None,
    }
}
