//! Entry module - the unit of tracked content

use serde::{Deserialize, Serialize};

/// Sentinel profile value for links that embed no profile handle.
///
/// Filled in once at ingestion time; stored entries always carry a concrete
/// profile string.
pub const UNKNOWN_PROFILE: &str = "unknown";

/// One tracked link in the pending queue.
///
/// `owner` is the submitter's display identity, resolved once when the link
/// is ingested and never re-resolved afterwards. This struct is also the
/// persisted queue record: all three fields are required on disk, and a
/// record missing any of them fails schema validation on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// The link itself, exactly as it appeared in the submitted text
    pub url: String,

    /// Embedded profile handle (with leading `@`), or [`UNKNOWN_PROFILE`]
    pub profile: String,

    /// Display identity of the submitter
    pub owner: String,
}

impl LinkEntry {
    /// Create an entry, defaulting an absent profile to [`UNKNOWN_PROFILE`].
    pub fn new(url: impl Into<String>, profile: Option<String>, owner: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            profile: profile.unwrap_or_else(|| UNKNOWN_PROFILE.to_string()),
            owner: owner.into(),
        }
    }
}
