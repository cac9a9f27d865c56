//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the ledger core and the
//! infrastructure it is embedded in. Implementations live with the chat
//! transport, not in this workspace.

use async_trait::async_trait;

/// Outbound side of the chat gateway.
///
/// The gateway owns the connection to the chat platform; the core only
/// requests deliveries through it. All sends happen outside the ledger
/// transaction lock.
#[async_trait]
pub trait Gateway {
    /// Error type for delivery failures
    type Error;

    /// Send a plain text reply into the conversation.
    async fn send_reply(&self, text: &str) -> Result<(), Self::Error>;

    /// Send a document with a filename and caption.
    async fn send_document(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), Self::Error>;

    /// Signal receipt of a submission (e.g. an emoji reaction).
    ///
    /// Callers treat this as best effort: a failure is logged and swallowed,
    /// never surfaced to the submitter.
    async fn acknowledge(&self) -> Result<(), Self::Error>;
}

/// Renders an achievement certificate document.
///
/// The core supplies only the recipient name and their lifetime count; how
/// the document looks is entirely the renderer's concern.
pub trait CertificateRenderer {
    /// Error type for rendering failures
    type Error;

    /// Render a certificate for `name` crediting `count` contributions.
    fn render(&self, name: &str, count: u64) -> Result<Vec<u8>, Self::Error>;
}
