//! Configuration types for media-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External tool paths (ffmpeg) and discovery behavior
///
/// Groups settings for the external conversion binary.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to ffmpeg executable (auto-detected if None)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for ffmpeg if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            search_path: true,
        }
    }
}

/// Main configuration for [`MediaPipeline`](crate::MediaPipeline)
///
/// All fields have sensible defaults; `Config::default()` works out of the
/// box. The tools sub-config is flattened for serialization, so the
/// JSON/TOML format stays flat (no nesting).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Directory where downloads and transcoded files are written
    /// (default: "./downloads"). Created on demand.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// External tool paths and discovery behavior
    #[serde(flatten)]
    pub tools: ToolsConfig,

    /// ffmpeg VBR audio quality for extraction, passed as `-q:a` (default: 2)
    ///
    /// Lower is higher quality; 2 is roughly 170-210 kbps for mp3.
    #[serde(default = "default_audio_quality")]
    pub audio_quality: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            tools: ToolsConfig::default(),
            audio_quality: default_audio_quality(),
        }
    }
}

impl Config {
    /// Output directory for downloads and derivatives
    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./downloads")
}

fn default_audio_quality() -> u8 {
    2
}

fn default_true() -> bool {
    true
}
