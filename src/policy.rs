//! Host blocklist enforcement
//!
//! Classifies a URL's host as allowed or blocked before any network call is
//! issued. The blocklist covers YouTube's known domain variants exactly,
//! plus any host under the `.youtube.com` suffix. Pure and deterministic —
//! no I/O, no state.

use crate::types::HostVerdict;

/// Exact-match blocked hostnames (compared lowercased)
const BLOCKED_HOSTS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
    "youtu.be",
    "www.youtu.be",
    "youtube-nocookie.com",
    "www.youtube-nocookie.com",
];

/// Reserved subdomain suffix — blocks any host under youtube.com
const BLOCKED_SUFFIX: &str = ".youtube.com";

/// Classify a URL's host against the blocklist
///
/// The host is lowercased before matching. If the URL fails to parse or has
/// no host component, the host is treated as the empty string, which never
/// matches the blocklist — malformed URLs classify as `Allowed` and fail
/// later at the transport layer instead.
///
/// # Examples
///
/// ```
/// use media_dl::policy::classify;
/// use media_dl::HostVerdict;
///
/// assert_eq!(classify("https://m.youtube.com/watch?v=x"), HostVerdict::Blocked);
/// assert_eq!(classify("https://example.com/video.mp4"), HostVerdict::Allowed);
/// ```
pub fn classify(url: &str) -> HostVerdict {
    let host = host_of(url);
    if BLOCKED_HOSTS.contains(&host.as_str()) || host.ends_with(BLOCKED_SUFFIX) {
        HostVerdict::Blocked
    } else {
        HostVerdict::Allowed
    }
}

/// Extract a URL's host, lowercased
///
/// Parse failure or a missing host component yields the empty string. This
/// is the host [`classify`] matches against, and what a blocked-host
/// rejection reports back to the caller.
pub fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_lowercase))
        .unwrap_or_default()
}
