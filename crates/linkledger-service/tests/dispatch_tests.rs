//! Integration tests for event dispatch
//!
//! Drives the service through a mock gateway and renderer, asserting on the
//! outbound actions the way the chat transport would observe them.

use async_trait::async_trait;
use linkledger_domain::traits::{CertificateRenderer, Gateway};
use linkledger_service::{
    Command, CommandName, Config, InboundEvent, RepliedAuthor, Service, TextMessage,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Outbound {
    Reply(String),
    Document {
        filename: String,
        caption: String,
        bytes: Vec<u8>,
    },
}

#[derive(Default)]
struct MockState {
    outbound: Mutex<Vec<Outbound>>,
    acks: AtomicUsize,
    fail_ack: AtomicBool,
}

#[derive(Default, Clone)]
struct MockGateway {
    state: Arc<MockState>,
}

impl MockGateway {
    fn outbound(&self) -> Vec<Outbound> {
        self.state.outbound.lock().unwrap().clone()
    }

    fn acks(&self) -> usize {
        self.state.acks.load(Ordering::SeqCst)
    }

    fn fail_acknowledgements(&self) {
        self.state.fail_ack.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Gateway for MockGateway {
    type Error = String;

    async fn send_reply(&self, text: &str) -> Result<(), Self::Error> {
        self.state
            .outbound
            .lock()
            .unwrap()
            .push(Outbound::Reply(text.to_string()));
        Ok(())
    }

    async fn send_document(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), Self::Error> {
        self.state.outbound.lock().unwrap().push(Outbound::Document {
            filename: filename.to_string(),
            caption: caption.to_string(),
            bytes,
        });
        Ok(())
    }

    async fn acknowledge(&self) -> Result<(), Self::Error> {
        if self.state.fail_ack.load(Ordering::SeqCst) {
            return Err("reaction refused".to_string());
        }
        self.state.acks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Clone)]
struct MockRenderer {
    fail: bool,
}

impl CertificateRenderer for MockRenderer {
    type Error = String;

    fn render(&self, name: &str, count: u64) -> Result<Vec<u8>, Self::Error> {
        if self.fail {
            return Err("render failed".to_string());
        }
        Ok(format!("CERT {name} {count}").into_bytes())
    }
}

fn service_in(dir: &TempDir) -> (Service<MockGateway, MockRenderer>, MockGateway) {
    service_with_renderer(dir, MockRenderer { fail: false })
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn service_with_renderer(
    dir: &TempDir,
    renderer: MockRenderer,
) -> (Service<MockGateway, MockRenderer>, MockGateway) {
    let config = Config {
        queue_path: dir.path().join("pending_urls.json"),
        counters_path: dir.path().join("url_counts.json"),
        ..Config::default()
    };
    let gateway = MockGateway::default();
    let service = Service::from_config(&config, gateway.clone(), renderer);
    (service, gateway)
}

fn message(text: &str, sender: &str) -> InboundEvent {
    InboundEvent::Message(TextMessage {
        text: text.to_string(),
        sender: sender.to_string(),
        replied_to_text: None,
        replied_to_author: None,
    })
}

fn reply_message(text: &str, sender: &str, replied_text: &str, replied_author: &str) -> InboundEvent {
    InboundEvent::Message(TextMessage {
        text: text.to_string(),
        sender: sender.to_string(),
        replied_to_text: Some(replied_text.to_string()),
        replied_to_author: Some(replied_author.to_string()),
    })
}

fn command(name: CommandName, sender: &str) -> InboundEvent {
    InboundEvent::Command(Command {
        name,
        sender: sender.to_string(),
        replied_to: None,
    })
}

fn links(n: usize) -> String {
    (0..n)
        .map(|i| format!("https://bulk.test/v{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::test]
async fn test_link_submission_acknowledged_silently() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service
        .handle_event(message("look https://x.test/@a/v", "bob"))
        .await;

    assert_eq!(gateway.acks(), 1);
    // Below the first milestone: no reply
    assert!(gateway.outbound().is_empty());
}

#[tokio::test]
async fn test_plain_text_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service.handle_event(message("good morning all", "bob")).await;

    assert_eq!(gateway.acks(), 0);
    assert!(gateway.outbound().is_empty());
    assert!(!dir.path().join("pending_urls.json").exists());
}

#[tokio::test]
async fn test_failed_acknowledgement_is_swallowed() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);
    gateway.fail_acknowledgements();

    service
        .handle_event(message("https://x.test/v", "bob"))
        .await;

    // The submission still went through and no error reached the group
    assert!(gateway.outbound().is_empty());
    service.handle_event(command(CommandName::Total, "bob")).await;
    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply("Total URLs: 1".to_string())]
    );
}

#[tokio::test]
async fn test_milestone_reply_fires_once() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service.handle_event(message(&links(10), "bob")).await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply("Progress: 10 URLs".to_string())]
    );
}

#[tokio::test]
async fn test_reply_delete_flow() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service
        .handle_event(message("https://x.test/@a/v", "bob"))
        .await;
    service
        .handle_event(reply_message("delete", "bob", "https://x.test/@a/v", "bob"))
        .await;

    let replies = gateway.outbound();
    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0],
        Outbound::Reply("URL removed!\nProfile: @a\nProgress: 0/30 URLs".to_string())
    );
}

#[tokio::test]
async fn test_delete_keyword_without_reply_target_is_ignored() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service
        .handle_event(message("https://x.test/v", "bob"))
        .await;
    service.handle_event(message("delete", "bob")).await;

    assert!(gateway.outbound().is_empty());
    service.handle_event(command(CommandName::Total, "bob")).await;
    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply("Total URLs: 1".to_string())]
    );
}

#[tokio::test]
async fn test_foreign_delete_attempt_is_refused() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service
        .handle_event(message("https://x.test/v", "alice"))
        .await;
    service
        .handle_event(reply_message("delete", "bob", "https://x.test/v", "alice"))
        .await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply(
            "You can only delete your own URLs!".to_string()
        )]
    );
}

#[tokio::test]
async fn test_delete_of_linkless_message_is_refused() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service
        .handle_event(reply_message("delete", "bob", "no links here", "bob"))
        .await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply(
            "That message doesn't contain a URL!".to_string()
        )]
    );
}

#[tokio::test]
async fn test_remove_command_with_nothing_owned() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service.handle_event(command(CommandName::Remove, "bob")).await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply("You have no URLs to remove!".to_string())]
    );
}

#[tokio::test]
async fn test_remove_command_takes_own_latest() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service
        .handle_event(message("https://x.test/@a/1", "bob"))
        .await;
    service
        .handle_event(message("https://x.test/@b/2", "bob"))
        .await;
    service.handle_event(command(CommandName::Remove, "bob")).await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply(
            "Removed your URL!\nProfile: @b\nProgress: 1/30 URLs".to_string()
        )]
    );
}

#[tokio::test]
async fn test_export_sends_document_and_clears_queue() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service.handle_event(message(&links(3), "bob")).await;
    service.handle_event(command(CommandName::Get, "bob")).await;

    let outbound = gateway.outbound();
    assert_eq!(
        outbound[0],
        Outbound::Document {
            filename: "3link.txt".to_string(),
            caption: "3 URLs collected! Thank you contributors!".to_string(),
            bytes: b"https://bulk.test/v0\nhttps://bulk.test/v1\nhttps://bulk.test/v2\n".to_vec(),
        }
    );

    // Second export finds an empty queue
    service.handle_event(command(CommandName::Get, "bob")).await;
    assert_eq!(
        gateway.outbound()[1],
        Outbound::Reply("No URLs collected yet!".to_string())
    );
}

#[tokio::test]
async fn test_stats_before_any_submission() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service.handle_event(command(CommandName::Stats, "bob")).await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply("No URLs yet!\nPending: 0/30".to_string())]
    );
}

#[tokio::test]
async fn test_stats_with_contributors() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service.handle_event(message(&links(2), "carol")).await;
    service
        .handle_event(message("https://x.test/v", "bob"))
        .await;
    service.handle_event(command(CommandName::Stats, "bob")).await;

    let Outbound::Reply(text) = gateway.outbound().pop().unwrap() else {
        panic!("expected a reply");
    };
    assert!(text.contains("Total URLs: 3"));
    assert!(text.contains("Pending: 3/30"));
    assert!(text.contains("Contributors: 2"));
    assert!(text.contains("  @carol: 2\n  @bob: 1"));
}

#[tokio::test]
async fn test_start_greeting_shows_progress() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service
        .handle_event(message("https://x.test/v", "bob"))
        .await;
    service.handle_event(command(CommandName::Start, "bob")).await;

    let Outbound::Reply(text) = gateway.outbound().pop().unwrap() else {
        panic!("expected a reply");
    };
    assert!(text.contains("Progress: 1/30"));
    assert!(text.contains("/get - Download all URLs as file"));
}

#[tokio::test]
async fn test_certificate_requires_reply_target() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    service
        .handle_event(command(CommandName::Certificate, "bob"))
        .await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply(
            "Reply to a user's message with /cer to give them a certificate!".to_string()
        )]
    );
}

#[tokio::test]
async fn test_certificate_counts_via_fallback_identity() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_in(&dir);

    // Contributions were attributed to the display name, not a handle
    service
        .handle_event(message("https://x.test/v", "Alice Wong"))
        .await;

    service
        .handle_event(InboundEvent::Command(Command {
            name: CommandName::Certificate,
            sender: "bob".to_string(),
            replied_to: Some(RepliedAuthor {
                display_name: "Alice Wong".to_string(),
                username: Some("awong".to_string()),
            }),
        }))
        .await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Document {
            filename: "Certificate_Alice Wong.pdf".to_string(),
            caption: "\u{1F3C6} Certificate of Achievement for Alice Wong!\n\n\
                      Congratulations on your hard work! \u{1F389}"
                .to_string(),
            bytes: b"CERT Alice Wong 1".to_vec(),
        }]
    );
}

#[tokio::test]
async fn test_certificate_renderer_failure_reported_gently() {
    let dir = TempDir::new().unwrap();
    let (service, gateway) = service_with_renderer(&dir, MockRenderer { fail: true });

    service
        .handle_event(InboundEvent::Command(Command {
            name: CommandName::Certificate,
            sender: "bob".to_string(),
            replied_to: Some(RepliedAuthor {
                display_name: "Alice".to_string(),
                username: None,
            }),
        }))
        .await;

    assert_eq!(
        gateway.outbound(),
        vec![Outbound::Reply(
            "Error generating certificate. Please try again.".to_string()
        )]
    );
}
