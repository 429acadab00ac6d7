//! Content-type to file-extension inference
//!
//! Maps a response's declared Content-Type to the output file extension via
//! a priority-ordered substring table. The audio rules are checked before
//! the bare `mp4` substring: every string containing `audio/mp4` also
//! contains `mp4`, so reversing the order would misroute containerized
//! audio to the video extension.

/// Priority-ordered (substring, extension) table — first match wins
const EXTENSION_RULES: &[(&str, &str)] = &[
    ("audio/mpeg", "mp3"),
    ("audio/mp4", "m4a"),
    ("mp4", "mp4"),
    ("webm", "webm"),
];

/// Fallback extension for unrecognized or missing content types
pub const FALLBACK_EXTENSION: &str = "bin";

/// Resolve a Content-Type header value to a file extension
///
/// Total over all inputs: every string maps to exactly one of
/// {mp4, webm, mp3, m4a, bin}. Matching is case-insensitive.
///
/// # Examples
///
/// ```
/// use media_dl::format::resolve_extension;
///
/// assert_eq!(resolve_extension("video/mp4"), "mp4");
/// assert_eq!(resolve_extension("audio/mp4"), "m4a");
/// assert_eq!(resolve_extension("application/octet-stream"), "bin");
/// ```
pub fn resolve_extension(content_type: &str) -> &'static str {
    let normalized = content_type.to_lowercase();
    EXTENSION_RULES
        .iter()
        .find(|(needle, _)| normalized.contains(needle))
        .map(|(_, ext)| *ext)
        .unwrap_or(FALLBACK_EXTENSION)
}
