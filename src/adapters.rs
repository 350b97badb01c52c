//! Utility functions for TransAssist.

use url::Url;

/// Hostname of a page URL, or the argument itself when it is already a
/// bare hostname. Always lowercase.
pub(crate) fn hostname_of(input: &str) -> String {
    let input = input.trim();
    match Url::parse(input) {
        Ok(url) if url.has_host() => url.host_str().unwrap_or_default().to_ascii_lowercase(),
        _ => input
            .split(['/', ':'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase(),
    }
}
