//! Chat Message Data Structures
//!
//! Represents a message in a conversation timeline, together with the
//! request/response payloads the messaging API exchanges for it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::messaging::conversation::ConversationKind;

/// Prefix for client-generated placeholder identifiers.
const TEMP_ID_PREFIX: &str = "temp-";

/// Session-wide counter so two sends landing on the same millisecond still
/// get distinct temporary ids.
static TEMP_ID_SEQ: AtomicU64 = AtomicU64::new(0);

/// Identifier for a message.
///
/// Persisted messages carry a server-assigned id. The API is inconsistent
/// about the JSON type (some endpoints emit numbers, others strings), so
/// deserialization accepts both and normalizes to a string. Between send and
/// server acknowledgment a message carries a client-generated temporary id of
/// the form `temp-<millis>-<seq>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MessageId(String);

impl MessageId {
    /// Wrap a server-assigned identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh temporary id for an optimistic insert
    pub fn temp() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let seq = TEMP_ID_SEQ.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}{}-{}", TEMP_ID_PREFIX, millis, seq))
    }

    /// Whether this id is a client-side placeholder awaiting server ack
    pub fn is_temp(&self) -> bool {
        self.0.starts_with(TEMP_ID_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => MessageId(s),
            Raw::Number(n) => MessageId(n.to_string()),
        })
    }
}

/// Who sent a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sender {
    /// User id as the server reports it
    pub id: String,
    /// Name shown next to the message bubble
    #[serde(default)]
    pub display_name: String,
}

impl Sender {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Type of message content
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Plain text message
    #[default]
    Text,
    /// Server-generated notice (e.g. "session scheduled")
    System,
}

/// Delivery state of a message.
///
/// `Sending` and `Failed` only ever exist locally; `Delivered` and `Read`
/// arrive verbatim from the server and are never produced by the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Optimistically inserted, request still outstanding
    Sending,
    /// Acknowledged by the server
    Sent,
    Delivered,
    Read,
    /// Send failed; eligible for retry
    Failed,
}

impl MessageStatus {
    /// Payloads without an explicit status are persisted records
    pub(crate) fn persisted() -> Self {
        MessageStatus::Sent
    }
}

impl Default for MessageStatus {
    fn default() -> Self {
        Self::persisted()
    }
}

/// A single message in a conversation timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    /// Conversation this message belongs to
    #[serde(default)]
    pub conversation: String,
    pub sender: Sender,
    pub content: String,
    #[serde(default)]
    pub message_type: MessageType,
    /// RFC3339 string; used for display and day grouping, never for ordering
    pub timestamp: String,
    #[serde(default = "MessageStatus::persisted")]
    pub status: MessageStatus,
}

impl Message {
    /// Create the optimistic local entry for an outgoing send
    pub fn outgoing(
        conversation_id: impl Into<String>,
        sender: Sender,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: MessageId::temp(),
            conversation: conversation_id.into(),
            sender,
            content: content.into(),
            message_type: MessageType::Text,
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: MessageStatus::Sending,
        }
    }

    /// First `max_len` characters of the content, ellipsized
    pub fn preview(&self, max_len: usize) -> String {
        if self.content.chars().count() <= max_len {
            self.content.clone()
        } else {
            let mut preview: String = self
                .content
                .chars()
                .take(max_len.saturating_sub(3))
                .collect();
            preview.push_str("...");
            preview
        }
    }

    /// Calendar day this message lands in, for day-separator rendering.
    /// Returns `None` when the timestamp is not parseable.
    pub fn day_bucket(&self) -> Option<NaiveDate> {
        chrono::DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

/// Validate outgoing content against the conversation-kind limit.
///
/// Runs before any network call: empty-after-trim and over-limit content are
/// rejected locally.
pub fn validate_content(content: &str, kind: ConversationKind) -> Result<(), SharedError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(SharedError::EmptyContent);
    }
    let length = trimmed.chars().count();
    let limit = kind.max_message_len();
    if length > limit {
        return Err(SharedError::ContentTooLong { limit, length });
    }
    Ok(())
}

/// Body for `POST /messaging/{kind}/messages/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    pub conversation: String,
    pub message_type: MessageType,
}

/// Body for `PATCH /messaging/{kind}/messages/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditMessageRequest {
    pub content: String,
}

/// Body for `PATCH /messaging/{kind}/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadRequest {
    pub read: bool,
}
