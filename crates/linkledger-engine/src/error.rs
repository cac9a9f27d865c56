//! Error types for ledger operations

use linkledger_store::StoreError;
use thiserror::Error;

/// Errors surfaced by the ledger operations.
///
/// The first five variants are expected, user-facing outcomes that the
/// gateway layer renders as plain messages. Only [`EngineError::Store`]
/// is fatal to the request.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The replied-to message contains no link
    #[error("the target message contains no link")]
    NoLinkInTarget,

    /// The replied-to message was authored by someone else
    #[error("only the original submitter may delete a link")]
    NotOwner,

    /// No pending entry matches the link and owner
    #[error("no matching entry in the pending queue")]
    EntryNotFound,

    /// The requester owns no pending entries
    #[error("no pending entries owned by the requester")]
    NothingToRemove,

    /// The pending queue is empty
    #[error("the pending queue is empty")]
    NothingToExport,

    /// Persistence failed; the operation did not commit
    #[error(transparent)]
    Store(#[from] StoreError),
}
