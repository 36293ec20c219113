//! Shared helpers for integration tests
//!
//! Builds timelines wired to a wiremock server and the JSON bodies the
//! messaging API returns.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::MockServer;

use mindwell_messaging::client::api::MessagingApi;
use mindwell_messaging::client::config::ClientConfig;
use mindwell_messaging::client::timeline::{LocalUser, MessageTimeline, TimelineConfig};
use mindwell_messaging::shared::config::AppConfig;
use mindwell_messaging::shared::messaging::ConversationKind;

pub const TEST_TOKEN: &str = "test-bearer-token";

/// Route crate logs through the test harness; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Client config pointing at the mock server, already authenticated
pub fn config_for(server: &MockServer) -> ClientConfig {
    let mut config =
        ClientConfig::with_builder(AppConfig::builder().server_url(server.uri())).unwrap();
    config.set_token(Some(TEST_TOKEN.to_string()));
    config
}

/// A timeline for conversation 42, driven by user `u1`
pub fn timeline_for(server: &MockServer, kind: ConversationKind) -> Arc<MessageTimeline> {
    timeline_with_user(server, kind, LocalUser::new("u1", "Dana"))
}

pub fn timeline_with_user(
    server: &MockServer,
    kind: ConversationKind,
    local_user: LocalUser,
) -> Arc<MessageTimeline> {
    let api = Arc::new(MessagingApi::new(config_for(server)));
    Arc::new(MessageTimeline::new(
        api,
        TimelineConfig {
            kind,
            conversation_id: "42".to_string(),
            local_user,
        },
    ))
}

/// A persisted message as the server serializes it
pub fn message_json(id: u64, sender_id: &str, display_name: &str, content: &str) -> Value {
    json!({
        "id": id,
        "conversation": "42",
        "sender": {"id": sender_id, "display_name": display_name},
        "content": content,
        "message_type": "text",
        "timestamp": "2026-03-01T10:15:00Z"
    })
}

/// A `{count, next, previous, results}` page envelope
pub fn envelope(results: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "count": results.len(),
        "next": next,
        "previous": null,
        "results": results
    })
}
