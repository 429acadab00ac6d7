//! No-op audio extractor for graceful degradation

use super::traits::AudioExtractor;
use crate::error::{ConversionError, Result};
use crate::types::Artifact;
use async_trait::async_trait;

/// No-op extractor used when no ffmpeg binary is available
///
/// Lets the pipeline construct and serve plain downloads even when audio
/// extraction is impossible; any audio-only request then fails with a
/// `NotSupported` conversion error instead of a crash.
///
/// # Examples
///
/// ```
/// use media_dl::transcode::{AudioExtractor, NoOpAudioExtractor};
/// use media_dl::Artifact;
///
/// # #[tokio::main]
/// # async fn main() {
/// let extractor = NoOpAudioExtractor;
/// assert!(!extractor.is_available());
///
/// let input = Artifact::new("/downloads/LD_20250101_120000.mp4", "mp4");
/// assert!(extractor.extract_audio(&input).await.is_err());
/// # }
/// ```
pub struct NoOpAudioExtractor;

#[async_trait]
impl AudioExtractor for NoOpAudioExtractor {
    async fn extract_audio(&self, _input: &Artifact) -> Result<Artifact> {
        Err(ConversionError::NotSupported(
            "audio extraction requires an external ffmpeg binary. \
             Configure ffmpeg_path in config or ensure ffmpeg is in PATH."
                .into(),
        )
        .into())
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
