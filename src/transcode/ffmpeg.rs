//! ffmpeg-based audio extractor using an external binary

use super::traits::AudioExtractor;
use super::{AUDIO_EXTENSION, derive_output_path};
use crate::error::{ConversionError, Result};
use crate::types::Artifact;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Default ffmpeg VBR audio quality (`-q:a`), roughly 170-210 kbps for mp3
const DEFAULT_AUDIO_QUALITY: u8 = 2;

/// Audio extractor driving an external ffmpeg binary
///
/// Invokes ffmpeg with `-y` (overwrite existing output), `-vn` (drop video
/// streams), and a fixed `-q:a` VBR quality. Success or failure is judged
/// solely by the process exit status; stdout/stderr are only logged.
pub struct FfmpegAudioExtractor {
    binary_path: PathBuf,
    audio_quality: u8,
}

impl FfmpegAudioExtractor {
    /// Create an extractor with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self {
            binary_path,
            audio_quality: DEFAULT_AUDIO_QUALITY,
        }
    }

    /// Attempt to find ffmpeg in PATH
    ///
    /// Uses the `which` crate to search the system PATH.
    ///
    /// # Returns
    ///
    /// `Some(FfmpegAudioExtractor)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("ffmpeg").ok().map(Self::new)
    }

    /// Override the `-q:a` VBR quality setting
    pub fn with_audio_quality(mut self, audio_quality: u8) -> Self {
        self.audio_quality = audio_quality;
        self
    }
}

#[async_trait]
impl AudioExtractor for FfmpegAudioExtractor {
    async fn extract_audio(&self, input: &Artifact) -> Result<Artifact> {
        let output_path = derive_output_path(input)?;

        debug!(
            input = ?input.path,
            output = ?output_path,
            quality = self.audio_quality,
            "starting ffmpeg audio extraction"
        );

        let output = Command::new(&self.binary_path)
            .arg("-y") // overwrite existing output
            .arg("-i")
            .arg(&input.path)
            .arg("-vn") // drop video streams
            .arg("-q:a")
            .arg(self.audio_quality.to_string())
            .arg(&output_path)
            .output()
            .await
            .map_err(|e| ConversionError::Spawn {
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            warn!(
                input = ?input.path,
                code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr),
                "ffmpeg reported failure"
            );
            return Err(ConversionError::ExitStatus {
                code: output.status.code(),
            }
            .into());
        }

        info!(output = ?output_path, "audio extraction complete");
        Ok(Artifact::new(output_path, AUDIO_EXTENSION))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "cli-ffmpeg"
    }
}
