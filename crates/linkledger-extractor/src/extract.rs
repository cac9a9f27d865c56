//! Link and profile-handle extraction

use regex::Regex;
use std::sync::LazyLock;

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"{}|\\^`\[\]]+"#).unwrap());
static RE_PROFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/@([A-Za-z0-9_.]+)").unwrap());

/// One link occurrence in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLink {
    /// The link substring, verbatim
    pub url: String,

    /// Embedded profile handle with its leading `@`, if the link has a
    /// `/@handle` path segment
    pub profile: Option<String>,
}

/// Extract every link from `text`, in order of occurrence.
///
/// Duplicates are kept; the profile handle is resolved independently per
/// link, first `/@handle` segment wins.
pub fn extract(text: &str) -> Vec<ExtractedLink> {
    RE_URL
        .find_iter(text)
        .map(|m| {
            let url = m.as_str().to_string();
            let profile = extract_profile(&url);
            ExtractedLink { url, profile }
        })
        .collect()
}

/// Pull the `/@handle` segment out of a single URL.
fn extract_profile(url: &str) -> Option<String> {
    RE_PROFILE
        .captures(url)
        .map(|caps| format!("@{}", &caps[1]))
}
