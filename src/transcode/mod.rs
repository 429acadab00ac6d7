//! Audio extraction via an external conversion capability
//!
//! The codec work happens outside this crate: [`AudioExtractor`] defines the
//! invocation contract and pass/fail interpretation, [`FfmpegAudioExtractor`]
//! drives an external ffmpeg binary, and [`NoOpAudioExtractor`] degrades
//! gracefully when no binary is available.

mod ffmpeg;
mod noop;
mod traits;

pub use ffmpeg::FfmpegAudioExtractor;
pub use noop::NoOpAudioExtractor;
pub use traits::AudioExtractor;

use crate::error::ConversionError;
use crate::types::Artifact;
use std::path::PathBuf;

/// Extension of extracted audio files
pub const AUDIO_EXTENSION: &str = "mp3";

/// Derive the output path for an extraction: same directory, same base
/// name, extension replaced with mp3
///
/// Fails when the input path has no file name to derive from.
pub(crate) fn derive_output_path(input: &Artifact) -> Result<PathBuf, ConversionError> {
    if input.path.file_name().is_none() {
        return Err(ConversionError::InvalidPath {
            path: input.path.clone(),
        });
    }
    Ok(input.path.with_extension(AUDIO_EXTENSION))
}
