//! Ledger module - the paired (pending queue, contributor counters) state
//!
//! The queue and the counters are one unit of state: every mutation goes
//! through this type so the two structures cannot drift apart. Counters are
//! lifetime counters - a queue export drains the queue but leaves them
//! untouched, so after an export `counters[owner]` intentionally exceeds the
//! number of currently-pending entries for that owner.

use crate::entry::LinkEntry;
use indexmap::IndexMap;

/// In-memory ledger state: the pending queue plus the contributor counters.
///
/// Invariants upheld by every operation:
/// - counter values never go below zero; a debit with no balance is a no-op
/// - the queue is oldest-first; appends go to the tail
/// - duplicates in the queue are permitted (no uniqueness on `url`)
///
/// Removal scans are linear over the in-memory queue. Expected batch sizes
/// are tens of entries, so no index structure is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    queue: Vec<LinkEntry>,
    counters: IndexMap<String, u64>,
}

impl Ledger {
    /// Reassemble a ledger from its two persisted halves.
    pub fn from_parts(queue: Vec<LinkEntry>, counters: IndexMap<String, u64>) -> Self {
        Self { queue, counters }
    }

    /// Split the ledger into its two persisted halves.
    pub fn into_parts(self) -> (Vec<LinkEntry>, IndexMap<String, u64>) {
        (self.queue, self.counters)
    }

    /// Current pending entries, oldest first.
    pub fn entries(&self) -> &[LinkEntry] {
        &self.queue
    }

    /// Number of pending entries.
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Lifetime contribution counters, in first-contribution order.
    pub fn counters(&self) -> &IndexMap<String, u64> {
        &self.counters
    }

    /// Append entries to the queue tail, in order, crediting each entry's
    /// owner by one. New owners start at zero before the credit.
    pub fn append(&mut self, entries: Vec<LinkEntry>) {
        for entry in entries {
            *self.counters.entry(entry.owner.clone()).or_insert(0) += 1;
            self.queue.push(entry);
        }
    }

    /// Remove the first entry (head-to-tail) whose `url` exactly equals
    /// `url` and whose `owner` equals `owner`, debiting that owner.
    ///
    /// Returns the removed entry, or `None` when no entry matches.
    pub fn remove_matching(&mut self, url: &str, owner: &str) -> Option<LinkEntry> {
        let idx = self
            .queue
            .iter()
            .position(|e| e.url == url && e.owner == owner)?;
        let removed = self.queue.remove(idx);
        self.debit(owner);
        Some(removed)
    }

    /// Remove the newest entry (tail-to-head) owned by `owner`, debiting
    /// that owner.
    ///
    /// Returns the removed entry, or `None` when the owner has no pending
    /// entries.
    pub fn remove_latest(&mut self, owner: &str) -> Option<LinkEntry> {
        let idx = self.queue.iter().rposition(|e| e.owner == owner)?;
        let removed = self.queue.remove(idx);
        self.debit(owner);
        Some(removed)
    }

    /// Take the entire queue, leaving it empty. Counters are untouched:
    /// they track lifetime contribution, not the current batch.
    pub fn drain_queue(&mut self) -> Vec<LinkEntry> {
        std::mem::take(&mut self.queue)
    }

    /// Decrement an owner's counter by one, refusing to go below zero.
    /// Never creates a counter entry.
    fn debit(&mut self, owner: &str) {
        if let Some(count) = self.counters.get_mut(owner) {
            if *count > 0 {
                *count -= 1;
            }
        }
    }
}
