//! Ledger operations: ingestion, removal, export, statistics

use crate::error::EngineError;
use crate::types::{ExportReport, IngestReport, LeaderboardRow, RemovalReport, StatsReport};
use linkledger_domain::{milestone_crossed, LinkEntry};
use linkledger_extractor::extract;
use linkledger_store::LedgerStore;
use tracing::info;

/// Operations layer over a [`LedgerStore`].
///
/// One instance per store; each operation runs a single serialized store
/// transaction (or a snapshot read for the read-only queries).
pub struct LedgerEngine {
    store: LedgerStore,
    milestone_interval: usize,
}

impl LedgerEngine {
    /// Create an engine over `store`, firing progress notifications each
    /// time the pending queue length crosses a multiple of
    /// `milestone_interval`.
    pub fn new(store: LedgerStore, milestone_interval: usize) -> Self {
        Self {
            store,
            milestone_interval,
        }
    }

    /// Ingest every link found in `text`, attributed to `submitter`.
    ///
    /// Returns `Ok(None)` without touching the store when the text contains
    /// no links. Otherwise appends one entry per link in extraction order,
    /// credits the submitter's lifetime counter by the batch size, and
    /// reports whether a progress milestone was crossed.
    pub async fn ingest(
        &self,
        text: &str,
        submitter: &str,
    ) -> Result<Option<IngestReport>, EngineError> {
        let links = extract(text);
        if links.is_empty() {
            return Ok(None);
        }

        let entries: Vec<LinkEntry> = links
            .into_iter()
            .map(|link| LinkEntry::new(link.url, link.profile, submitter))
            .collect();
        let interval = self.milestone_interval;

        let report = self
            .store
            .transact(move |ledger| {
                let before = ledger.pending_len();
                ledger.append(entries);
                let after = ledger.pending_len();
                Ok::<_, EngineError>(IngestReport {
                    added: after - before,
                    pending: after,
                    milestone: milestone_crossed(before, after, interval),
                })
            })
            .await?;

        info!(
            owner = submitter,
            added = report.added,
            pending = report.pending,
            "links ingested"
        );
        Ok(Some(report))
    }

    /// Reply-delete policy: remove the first pending entry matching the
    /// first link in the replied-to message, provided the deleter authored
    /// that message.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoLinkInTarget`] when `replied_text` has no link
    /// - [`EngineError::NotOwner`] when `replied_author != requester`
    /// - [`EngineError::EntryNotFound`] when no pending entry carries that
    ///   exact link for the requester
    pub async fn remove_replied(
        &self,
        replied_text: &str,
        replied_author: &str,
        requester: &str,
    ) -> Result<RemovalReport, EngineError> {
        let first = extract(replied_text)
            .into_iter()
            .next()
            .ok_or(EngineError::NoLinkInTarget)?;
        if replied_author != requester {
            return Err(EngineError::NotOwner);
        }

        let requester = requester.to_string();
        let report = self
            .store
            .transact(move |ledger| {
                let removed = ledger
                    .remove_matching(&first.url, &requester)
                    .ok_or(EngineError::EntryNotFound)?;
                Ok::<_, EngineError>(RemovalReport {
                    removed,
                    pending: ledger.pending_len(),
                })
            })
            .await?;

        info!(
            owner = %report.removed.owner,
            pending = report.pending,
            "entry removed via reply-delete"
        );
        Ok(report)
    }

    /// Latest-removal policy: remove the requester's newest pending entry.
    ///
    /// # Errors
    ///
    /// [`EngineError::NothingToRemove`] when the requester owns no pending
    /// entries.
    pub async fn remove_latest(&self, requester: &str) -> Result<RemovalReport, EngineError> {
        let requester = requester.to_string();
        let report = self
            .store
            .transact(move |ledger| {
                let removed = ledger
                    .remove_latest(&requester)
                    .ok_or(EngineError::NothingToRemove)?;
                Ok::<_, EngineError>(RemovalReport {
                    removed,
                    pending: ledger.pending_len(),
                })
            })
            .await?;

        info!(
            owner = %report.removed.owner,
            pending = report.pending,
            "latest entry removed"
        );
        Ok(report)
    }

    /// Export the whole pending queue as a newline-delimited URL artifact
    /// and clear it. Lifetime counters are untouched.
    ///
    /// # Errors
    ///
    /// [`EngineError::NothingToExport`] when the queue is empty.
    pub async fn export(&self) -> Result<ExportReport, EngineError> {
        let report = self
            .store
            .transact(|ledger| {
                if ledger.pending_len() == 0 {
                    return Err(EngineError::NothingToExport);
                }
                let drained = ledger.drain_queue();
                let mut artifact = String::new();
                for entry in &drained {
                    artifact.push_str(&entry.url);
                    artifact.push('\n');
                }
                Ok(ExportReport {
                    artifact: artifact.into_bytes(),
                    count: drained.len(),
                })
            })
            .await?;

        info!(count = report.count, "queue exported and cleared");
        Ok(report)
    }

    /// Compute totals, contributor count and the top-`top` leaderboard from
    /// one consistent snapshot.
    pub async fn stats(&self, top: usize) -> Result<StatsReport, EngineError> {
        let ledger = self.store.snapshot().await?;

        let total = ledger.counters().values().sum();
        let mut leaderboard: Vec<LeaderboardRow> = ledger
            .counters()
            .iter()
            .map(|(owner, count)| LeaderboardRow {
                owner: owner.clone(),
                count: *count,
            })
            .collect();
        // Stable sort: ties keep first-contribution order
        leaderboard.sort_by(|a, b| b.count.cmp(&a.count));
        leaderboard.truncate(top);

        Ok(StatsReport {
            total,
            pending: ledger.pending_len(),
            contributors: ledger.counters().len(),
            leaderboard,
        })
    }

    /// Current pending queue length.
    pub async fn pending_len(&self) -> Result<usize, EngineError> {
        Ok(self.store.snapshot().await?.pending_len())
    }

    /// Lifetime contribution count for a certificate recipient.
    ///
    /// Looks up `primary` first, falling back to `fallback` when the
    /// primary key yields zero. An identity with no counter reads as zero.
    pub async fn contribution_count(
        &self,
        primary: &str,
        fallback: &str,
    ) -> Result<u64, EngineError> {
        let ledger = self.store.snapshot().await?;
        let counters = ledger.counters();
        let mut count = counters.get(primary).copied().unwrap_or(0);
        if count == 0 {
            count = counters.get(fallback).copied().unwrap_or(0);
        }
        Ok(count)
    }
}
