//! Inbound event model
//!
//! The gateway normalizes platform updates into these types before handing
//! them to the service. Identities are display identities (handle, or
//! fallback display name), resolved by the gateway once per event.

/// A plain text message posted in the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMessage {
    /// Raw message text
    pub text: String,

    /// Display identity of the sender
    pub sender: String,

    /// Text of the message this one replies to, if any
    pub replied_to_text: Option<String>,

    /// Display identity of the replied-to message's author, if any
    pub replied_to_author: Option<String>,
}

/// Author of a replied-to message, as a certificate target.
///
/// Carries both identity keys: the handle (primary counter key) and the
/// full display name (certificate face name and fallback counter key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepliedAuthor {
    /// Full display name
    pub display_name: String,

    /// Platform handle, when the author has one
    pub username: Option<String>,
}

/// A recognized slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandName {
    /// Greeting and command overview
    Start,
    /// Statistics and leaderboard
    Stats,
    /// Remove the sender's most recent pending link
    Remove,
    /// Export the pending queue as a file and clear it
    Get,
    /// Current pending queue length
    Total,
    /// Award a certificate to the replied-to user
    Certificate,
}

/// A command event from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Which command was issued
    pub name: CommandName,

    /// Display identity of the issuer
    pub sender: String,

    /// Author of the message the command replies to, if any
    pub replied_to: Option<RepliedAuthor>,
}

/// One inbound event from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A group text message
    Message(TextMessage),

    /// A slash command
    Command(Command),
}

/// Keywords that turn a reply into a delete request.
const DELETE_KEYWORDS: &[&str] = &["delete", "remove", "del", "rm"];

/// Whether a message text is a delete keyword (case-insensitive, trimmed).
pub(crate) fn is_delete_keyword(text: &str) -> bool {
    let normalized = text.trim().to_lowercase();
    DELETE_KEYWORDS.contains(&normalized.as_str())
}
