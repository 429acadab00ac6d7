//! Trait defining the audio extraction capability

use crate::error::Result;
use crate::types::Artifact;
use async_trait::async_trait;

/// Capability interface for extracting audio from a downloaded file
///
/// Implementations invoke whatever engine actually performs the codec work
/// (an external binary, a linked library, a test stub). The contract is
/// pass/fail only: success yields the derived artifact, any non-success
/// from the engine is a [`ConversionError`](crate::error::ConversionError).
/// No retries, no partial-output inspection.
///
/// # Examples
///
/// ```no_run
/// use media_dl::transcode::{AudioExtractor, FfmpegAudioExtractor};
/// use media_dl::Artifact;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let extractor = FfmpegAudioExtractor::from_path()
///     .expect("ffmpeg not found in PATH");
///
/// let input = Artifact::new("/downloads/LD_20250101_120000.mp4", "mp4");
/// let audio = extractor.extract_audio(&input).await?;
/// assert_eq!(audio.extension, "mp3");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait AudioExtractor: Send + Sync {
    /// Extract an audio-only mp3 from `input`
    ///
    /// The output lands next to the input with the same base name and an
    /// mp3 extension, overwriting any existing file at that path.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`](crate::error::ConversionError) when the
    /// engine cannot be started, reports a non-success status, or the
    /// operation is not supported by this implementation.
    async fn extract_audio(&self, input: &Artifact) -> Result<Artifact>;

    /// Whether this implementation can actually perform extractions
    ///
    /// Lets the embedding UI decide whether to offer the audio-only option.
    fn is_available(&self) -> bool;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
