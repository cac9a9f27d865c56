//! Report types returned by ledger operations

use linkledger_domain::LinkEntry;

/// Result of ingesting one message's links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    /// Number of entries appended
    pub added: usize,

    /// Queue length after the append
    pub pending: usize,

    /// Set when this ingestion crossed a progress milestone, carrying the
    /// post-append queue length. At most one per ingestion, no matter how
    /// many milestone multiples the batch crossed.
    pub milestone: Option<usize>,
}

/// Result of a successful removal (either policy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    /// The entry that was removed
    pub removed: LinkEntry,

    /// Queue length after the removal
    pub pending: usize,
}

/// Result of a batch export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Newline-delimited URLs, in queue order
    pub artifact: Vec<u8>,

    /// Queue length before the clear; used for artifact naming/captioning
    pub count: usize,
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardRow {
    /// Contributor display identity
    pub owner: String,

    /// Lifetime contribution count
    pub count: u64,
}

/// Read-only statistics over the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    /// Sum of all lifetime counters
    pub total: u64,

    /// Current queue length
    pub pending: usize,

    /// Number of distinct contributors
    pub contributors: usize,

    /// Top contributors by lifetime count, descending, ties in
    /// first-contribution order
    pub leaderboard: Vec<LeaderboardRow>,
}
