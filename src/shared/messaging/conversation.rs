//! Conversation Data Structures
//!
//! Conversation kinds (which drive endpoint paths and message length limits)
//! and the summary record shown in conversation lists.

use serde::{Deserialize, Serialize};

use super::message::Message;

/// Kind of conversation.
///
/// The kind selects the endpoint path segment and the maximum message length
/// the client enforces before issuing a send.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ConversationKind {
    /// Patient/therapist direct conversation
    OneToOne,
    /// Group session conversation
    Group,
    /// AI companion conversation
    Chatbot,
}

impl ConversationKind {
    /// Path segment used in `/messaging/{kind}/...` URLs
    pub fn path_segment(&self) -> &'static str {
        match self {
            ConversationKind::OneToOne => "one-to-one",
            ConversationKind::Group => "group",
            ConversationKind::Chatbot => "chatbot",
        }
    }

    /// Maximum accepted message length, in characters
    pub fn max_message_len(&self) -> usize {
        match self {
            ConversationKind::OneToOne => 1000,
            ConversationKind::Group => 5000,
            ConversationKind::Chatbot => 2000,
        }
    }
}

/// Summary of a conversation, as shown in conversation lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Conversation {
    /// Server-assigned conversation id
    pub id: String,
    pub kind: ConversationKind,
    /// Display title (other participant's name, group name, or bot name)
    #[serde(default)]
    pub title: String,
    /// Participant user ids
    #[serde(default)]
    pub participants: Vec<String>,
    /// Number of unread messages
    #[serde(default)]
    pub unread_count: u32,
    /// Preview text of the last message
    #[serde(default)]
    pub last_message_preview: String,
    /// Timestamp of the last message (RFC3339 string)
    #[serde(default)]
    pub last_message_time: Option<String>,
}

impl Conversation {
    pub fn new(id: impl Into<String>, kind: ConversationKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            participants: Vec::new(),
            unread_count: 0,
            last_message_preview: String::new(),
            last_message_time: None,
        }
    }

    /// Refresh the list-view preview from a newly arrived message
    pub fn update_last_message(&mut self, message: &Message, preview_len: usize) {
        self.last_message_preview = message.preview(preview_len);
        self.last_message_time = Some(message.timestamp.clone());
    }

    /// Check if a user participates in this conversation
    pub fn has_participant(&self, user_id: &str) -> bool {
        self.participants.iter().any(|id| id == user_id)
    }
}
