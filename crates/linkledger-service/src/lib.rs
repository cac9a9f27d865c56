//! Linkledger Service
//!
//! The gateway-facing layer: turns inbound chat events into ledger
//! operations and outbound gateway actions. All deterministic reply and
//! caption formatting lives here; the chat transport itself is an external
//! collaborator reached through the [`Gateway`] trait.
//!
//! # Event flow
//!
//! ```text
//! chat transport -> InboundEvent -> Service::handle_event
//!                                     |-> LedgerEngine (one transaction)
//!                                     '-> Gateway (replies, documents, ack)
//! ```
//!
//! Expected outcomes (nothing to remove, foreign delete attempt, ...) are
//! rendered as plain replies. Anything unexpected is caught at the event
//! boundary, logged, and answered with a generic failure reply; a handler
//! error never takes the process down.
//!
//! [`Gateway`]: linkledger_domain::traits::Gateway

#![warn(missing_docs)]

pub mod config;
mod event;
mod replies;
mod service;

pub use config::{Config, ConfigError, TOKEN_ENV};
pub use event::{Command, CommandName, InboundEvent, RepliedAuthor, TextMessage};
pub use service::{Service, ServiceError};
