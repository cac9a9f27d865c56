//! Linkledger Engine
//!
//! The operations layer over the durable ledger: ingestion, the two removal
//! policies, batch export, and read-only statistics.
//!
//! # Overview
//!
//! Every mutating operation runs as exactly one store transaction, so its
//! decisions (milestone math, ownership checks, removal scans) are always
//! based on the state it commits against. Expected user-facing outcomes
//! (nothing to remove, nothing to export, ...) are values of
//! [`EngineError`], not log-and-ignore side effects.
//!
//! # Example
//!
//! ```no_run
//! use linkledger_engine::LedgerEngine;
//! use linkledger_store::LedgerStore;
//!
//! # async fn example() -> Result<(), linkledger_engine::EngineError> {
//! let store = LedgerStore::new("pending_urls.json", "url_counts.json");
//! let engine = LedgerEngine::new(store, 10);
//!
//! if let Some(report) = engine.ingest("https://x.test/@a/v", "bob").await? {
//!     println!("pending: {}", report.pending);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod engine;
mod error;
mod types;

pub use engine::LedgerEngine;
pub use error::EngineError;
pub use types::{ExportReport, IngestReport, LeaderboardRow, RemovalReport, StatsReport};
