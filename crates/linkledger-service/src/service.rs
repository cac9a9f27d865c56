//! Event dispatch over the ledger operations

use crate::config::Config;
use crate::event::{is_delete_keyword, Command, CommandName, InboundEvent, TextMessage};
use crate::replies;
use linkledger_domain::traits::{CertificateRenderer, Gateway};
use linkledger_engine::{EngineError, LedgerEngine};
use linkledger_store::LedgerStore;
use std::fmt::Display;
use thiserror::Error;
use tracing::{error, warn};

/// Errors that escape a handler and reach the event boundary.
///
/// Expected ledger outcomes never surface here; they are rendered as plain
/// replies inside the handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A ledger operation failed to commit
    #[error("ledger operation failed: {0}")]
    Engine(#[from] EngineError),

    /// The gateway could not deliver an outbound action
    #[error("gateway delivery failed: {0}")]
    Gateway(String),
}

/// Gateway-facing service: one instance per group the process serves.
///
/// Generic over the outbound [`Gateway`] and the [`CertificateRenderer`] so
/// the transport and the document drawing stay out of this workspace.
pub struct Service<G, R> {
    engine: LedgerEngine,
    gateway: G,
    renderer: R,
    batch_size: usize,
    leaderboard_size: usize,
}

impl<G, R> Service<G, R>
where
    G: Gateway + Sync,
    G::Error: Display,
    R: CertificateRenderer + Sync,
    R::Error: Display,
{
    /// Create a service over an already-built engine.
    pub fn new(engine: LedgerEngine, gateway: G, renderer: R, config: &Config) -> Self {
        Self {
            engine,
            gateway,
            renderer,
            batch_size: config.batch_size,
            leaderboard_size: config.leaderboard_size,
        }
    }

    /// Create a service, wiring the store and engine from `config`.
    pub fn from_config(config: &Config, gateway: G, renderer: R) -> Self {
        let store = LedgerStore::new(&config.queue_path, &config.counters_path);
        let engine = LedgerEngine::new(store, config.milestone_interval);
        Self::new(engine, gateway, renderer, config)
    }

    /// Handle one inbound event.
    ///
    /// This is the error boundary: anything unexpected is logged and
    /// answered with a generic failure reply, and the error stops here.
    pub async fn handle_event(&self, event: InboundEvent) {
        if let Err(err) = self.dispatch(event).await {
            error!(%err, "event handling failed");
            if let Err(send_err) = self.gateway.send_reply(replies::GENERIC_FAILURE).await {
                warn!(err = %send_err, "could not deliver failure reply");
            }
        }
    }

    async fn dispatch(&self, event: InboundEvent) -> Result<(), ServiceError> {
        match event {
            InboundEvent::Message(message) => self.handle_message(message).await,
            InboundEvent::Command(command) => self.handle_command(command).await,
        }
    }

    async fn handle_message(&self, message: TextMessage) -> Result<(), ServiceError> {
        if is_delete_keyword(&message.text) {
            // A delete keyword only means something as a reply
            if let (Some(text), Some(author)) =
                (&message.replied_to_text, &message.replied_to_author)
            {
                return self.reply_delete(text, author, &message.sender).await;
            }
            return Ok(());
        }

        let Some(report) = self.engine.ingest(&message.text, &message.sender).await? else {
            return Ok(());
        };

        // Best effort; the submitter never sees a failed acknowledgement
        if let Err(err) = self.gateway.acknowledge().await {
            warn!(err = %err, "could not acknowledge submission");
        }

        if let Some(pending) = report.milestone {
            self.send_reply(&replies::milestone(pending)).await?;
        }
        Ok(())
    }

    async fn reply_delete(
        &self,
        replied_text: &str,
        replied_author: &str,
        sender: &str,
    ) -> Result<(), ServiceError> {
        match self
            .engine
            .remove_replied(replied_text, replied_author, sender)
            .await
        {
            Ok(report) => {
                self.send_reply(&replies::reply_delete_success(&report, self.batch_size))
                    .await
            }
            Err(err) => self.reply_expected_or_fail(err).await,
        }
    }

    async fn handle_command(&self, command: Command) -> Result<(), ServiceError> {
        match command.name {
            CommandName::Start => {
                let pending = self.engine.pending_len().await?;
                self.send_reply(&replies::greeting(pending, self.batch_size))
                    .await
            }
            CommandName::Stats => {
                let report = self.engine.stats(self.leaderboard_size).await?;
                self.send_reply(&replies::stats(&report, self.batch_size))
                    .await
            }
            CommandName::Remove => match self.engine.remove_latest(&command.sender).await {
                Ok(report) => {
                    self.send_reply(&replies::remove_latest_success(&report, self.batch_size))
                        .await
                }
                Err(err) => self.reply_expected_or_fail(err).await,
            },
            CommandName::Get => match self.engine.export().await {
                Ok(report) => {
                    let filename = replies::export_filename(report.count);
                    let caption = replies::export_caption(report.count);
                    self.send_document(report.artifact, &filename, &caption)
                        .await
                }
                Err(err) => self.reply_expected_or_fail(err).await,
            },
            CommandName::Total => {
                let pending = self.engine.pending_len().await?;
                self.send_reply(&replies::total(pending)).await
            }
            CommandName::Certificate => self.award_certificate(&command).await,
        }
    }

    async fn award_certificate(&self, command: &Command) -> Result<(), ServiceError> {
        let Some(target) = &command.replied_to else {
            return self.send_reply(replies::CERTIFICATE_USAGE).await;
        };

        let primary = target
            .username
            .as_deref()
            .unwrap_or(&target.display_name);
        let count = self
            .engine
            .contribution_count(primary, &target.display_name)
            .await?;

        match self.renderer.render(&target.display_name, count) {
            Ok(document) => {
                let filename = replies::certificate_filename(&target.display_name);
                let caption = replies::certificate_caption(&target.display_name);
                self.send_document(document, &filename, &caption).await
            }
            Err(err) => {
                error!(err = %err, "certificate rendering failed");
                self.send_reply(replies::CERTIFICATE_FAILURE).await
            }
        }
    }

    /// Render an expected ledger outcome as a reply; let anything else
    /// escape to the event boundary.
    async fn reply_expected_or_fail(&self, err: EngineError) -> Result<(), ServiceError> {
        match replies::expected_outcome_reply(&err) {
            Some(text) => self.send_reply(text).await,
            None => Err(err.into()),
        }
    }

    async fn send_reply(&self, text: &str) -> Result<(), ServiceError> {
        self.gateway
            .send_reply(text)
            .await
            .map_err(|err| ServiceError::Gateway(err.to_string()))
    }

    async fn send_document(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), ServiceError> {
        self.gateway
            .send_document(bytes, filename, caption)
            .await
            .map_err(|err| ServiceError::Gateway(err.to_string()))
    }
}
