//! Message Timeline Controller
//!
//! Owns the visible, ordered set of messages for one conversation and drives
//! the optimistic-send / retry / paginate protocol against the messaging API.
//! One controller serves every conversation kind; endpoint paths and length
//! limits come from the kind in [`TimelineConfig`].
//!
//! The list is newest-first: optimistic inserts go at the head, older pages
//! append at the tail. Ordering is insertion order only; timestamps are for
//! display. Several sends may be in flight at once — completions reconcile by
//! temporary id, so out-of-order arrival is handled per-message.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::client::api::{ApiError, MessagingApi};
use crate::client::timeline::cancel::CancelToken;
use crate::shared::error::SharedError;
use crate::shared::messaging::{
    validate_content, ConversationKind, Message, MessageId, MessageStatus, MessageType,
    SendMessageRequest, Sender,
};

/// The user driving this timeline
#[derive(Debug, Clone)]
pub struct LocalUser {
    pub id: String,
    pub display_name: String,
    /// Moderator role in group conversations; gates delete client-side.
    /// A UX guard only — the server makes the real authorization call.
    pub is_moderator: bool,
}

impl LocalUser {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            is_moderator: false,
        }
    }

    pub fn moderator(mut self) -> Self {
        self.is_moderator = true;
        self
    }
}

/// Per-conversation configuration for a timeline
#[derive(Debug, Clone)]
pub struct TimelineConfig {
    pub kind: ConversationKind,
    pub conversation_id: String,
    pub local_user: LocalUser,
}

/// Mutable timeline state, everything the UI renders from
#[derive(Debug, Default)]
struct TimelineState {
    /// Newest first
    messages: Vec<Message>,
    /// Last successfully loaded page, 0 before the first load
    page: u32,
    has_more: bool,
    /// User-facing error string from the last failed load
    load_error: Option<String>,
}

/// Timeline operation errors
#[derive(Debug, Error)]
pub enum TimelineError {
    /// Content rejected before any network call
    #[error(transparent)]
    Invalid(#[from] SharedError),

    #[error("no message with id {0}")]
    UnknownMessage(MessageId),

    /// Retry and discard only apply to failed sends
    #[error("message {0} is not in a failed state")]
    NotFailed(MessageId),

    /// Client-side delete gate for group conversations
    #[error("only the sender or a moderator can delete this message")]
    NotPermitted,

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The owning screen unmounted; the result was discarded unapplied
    #[error("operation cancelled")]
    Cancelled,
}

/// Controller for one conversation's message timeline
pub struct MessageTimeline {
    api: Arc<MessagingApi>,
    config: TimelineConfig,
    state: RwLock<TimelineState>,
    cancel: CancelToken,
}

impl MessageTimeline {
    pub fn new(api: Arc<MessagingApi>, config: TimelineConfig) -> Self {
        Self {
            api,
            config,
            state: RwLock::new(TimelineState::default()),
            cancel: CancelToken::new(),
        }
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Token to cancel on screen unmount
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Stop applying results from any in-flight operation
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    // --- pagination ---------------------------------------------------

    /// Load one page. Page 1 (or a refresh) replaces the list; later pages
    /// append, preserving the order of entries already present.
    pub async fn load_page(&self, page: u32, is_refresh: bool) -> Result<(), TimelineError> {
        let result = self
            .api
            .list_messages(self.config.kind, &self.config.conversation_id, page)
            .await;
        if self.cancel.is_cancelled() {
            return Err(TimelineError::Cancelled);
        }

        let mut state = self.state.write().await;
        match result {
            Ok(fetched) => {
                if page == 1 || is_refresh {
                    state.messages = fetched.items;
                } else {
                    state.messages.extend(fetched.items);
                }
                state.page = page;
                state.has_more = fetched.has_more;
                state.load_error = None;
                Ok(())
            }
            // Paging past the end is exhaustion, not an error
            Err(ApiError::PageExhausted) => {
                state.has_more = false;
                state.load_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::error!(page, error = %err, "failed to load messages");
                state.load_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Fetch the next page if the server advertised one. Returns `false`
    /// without touching the network once pagination is exhausted.
    pub async fn load_more(&self) -> Result<bool, TimelineError> {
        let next = {
            let state = self.state.read().await;
            if !state.has_more {
                return Ok(false);
            }
            state.page + 1
        };
        self.load_page(next, false).await?;
        Ok(true)
    }

    /// Pull-to-refresh: reload from page 1 and reset pagination
    pub async fn refresh(&self) -> Result<(), TimelineError> {
        self.load_page(1, true).await
    }

    // --- sending ------------------------------------------------------

    /// Send a message.
    ///
    /// Rejects empty or over-limit content before any network call. Otherwise
    /// inserts an optimistic `sending` entry at the head of the list before
    /// the request is issued; on ack the entry is swapped for the server
    /// record, on failure it flips to `failed` in place for per-message retry.
    pub async fn send(&self, content: &str) -> Result<MessageId, TimelineError> {
        validate_content(content, self.config.kind)?;
        let content = content.trim();

        let sender = Sender::new(
            self.config.local_user.id.clone(),
            self.config.local_user.display_name.clone(),
        );
        let optimistic = Message::outgoing(self.config.conversation_id.clone(), sender, content);
        let temp_id = optimistic.id.clone();
        self.state.write().await.messages.insert(0, optimistic);

        let request = SendMessageRequest {
            content: content.to_string(),
            conversation: self.config.conversation_id.clone(),
            message_type: MessageType::Text,
        };
        let result = self.api.send_message(self.config.kind, &request).await;
        if self.cancel.is_cancelled() {
            return Err(TimelineError::Cancelled);
        }

        let mut state = self.state.write().await;
        let position = state.messages.iter().position(|m| m.id == temp_id);
        match result {
            Ok(mut confirmed) => {
                confirmed.status = MessageStatus::Sent;
                let id = confirmed.id.clone();
                match position {
                    // Replace the placeholder with the server record
                    Some(pos) => state.messages[pos] = confirmed,
                    // Entry discarded while in flight (refresh raced the ack)
                    None => tracing::debug!(%temp_id, "ack arrived for a discarded placeholder"),
                }
                Ok(id)
            }
            Err(err) => {
                if let Some(pos) = position {
                    state.messages[pos].status = MessageStatus::Failed;
                }
                tracing::debug!(%temp_id, error = %err, "send failed");
                Err(err.into())
            }
        }
    }

    /// Retry a failed send by resubmitting its content.
    ///
    /// The failed entry is removed and the content re-enters [`send`] as a new
    /// logical attempt with a fresh temporary id. Delivery is therefore
    /// at-least-once: a request that reached the server but whose response was
    /// lost can duplicate.
    pub async fn retry(&self, id: &MessageId) -> Result<MessageId, TimelineError> {
        let content = self.take_failed(id).await?;
        self.send(&content).await
    }

    /// Abandon a failed send, removing it from the list
    pub async fn discard_failed(&self, id: &MessageId) -> Result<(), TimelineError> {
        self.take_failed(id).await.map(|_| ())
    }

    async fn take_failed(&self, id: &MessageId) -> Result<String, TimelineError> {
        let mut state = self.state.write().await;
        let pos = state
            .messages
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| TimelineError::UnknownMessage(id.clone()))?;
        if state.messages[pos].status != MessageStatus::Failed {
            return Err(TimelineError::NotFailed(id.clone()));
        }
        Ok(state.messages.remove(pos).content)
    }

    // --- read receipts ------------------------------------------------

    /// Best-effort read receipt, sent when the conversation is opened with at
    /// least one message. Failures are logged and swallowed.
    pub async fn mark_read(&self) {
        if self.state.read().await.messages.is_empty() {
            return;
        }
        if let Err(err) = self
            .api
            .mark_read(self.config.kind, &self.config.conversation_id)
            .await
        {
            tracing::warn!(error = %err, "failed to mark conversation read");
        }
    }

    // --- edit / delete ------------------------------------------------

    /// Edit a message. Unlike send, the local list only changes after the
    /// server confirms.
    pub async fn edit_message(
        &self,
        id: &MessageId,
        content: &str,
    ) -> Result<(), TimelineError> {
        validate_content(content, self.config.kind)?;
        let updated = self
            .api
            .edit_message(self.config.kind, id, content.trim())
            .await?;
        if self.cancel.is_cancelled() {
            return Err(TimelineError::Cancelled);
        }

        let mut state = self.state.write().await;
        if let Some(pos) = state.messages.iter().position(|m| &m.id == id) {
            state.messages[pos] = updated;
        }
        Ok(())
    }

    /// Delete a message. In group conversations only the sender or a
    /// moderator may issue the request at all; the server still has the final
    /// say. The local list only changes after the server confirms.
    pub async fn delete_message(&self, id: &MessageId) -> Result<(), TimelineError> {
        {
            let state = self.state.read().await;
            let message = state
                .messages
                .iter()
                .find(|m| &m.id == id)
                .ok_or_else(|| TimelineError::UnknownMessage(id.clone()))?;
            if self.config.kind == ConversationKind::Group {
                let user = &self.config.local_user;
                if message.sender.id != user.id && !user.is_moderator {
                    return Err(TimelineError::NotPermitted);
                }
            }
        }

        self.api.delete_message(self.config.kind, id).await?;
        if self.cancel.is_cancelled() {
            return Err(TimelineError::Cancelled);
        }

        self.state.write().await.messages.retain(|m| &m.id != id);
        Ok(())
    }

    // --- search -------------------------------------------------------

    /// Server-side search; results do not touch timeline state
    pub async fn search(&self, query: &str) -> Result<Vec<Message>, TimelineError> {
        Ok(self
            .api
            .search_messages(self.config.kind, &self.config.conversation_id, query)
            .await?)
    }

    /// Case-insensitive match over the loaded messages
    pub async fn local_matches(&self, needle: &str) -> Vec<Message> {
        let needle = needle.to_lowercase();
        self.state
            .read()
            .await
            .messages
            .iter()
            .filter(|m| m.content.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    // --- views --------------------------------------------------------

    /// Cloned view of the list for rendering, newest first
    pub async fn snapshot(&self) -> Vec<Message> {
        self.state.read().await.messages.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.messages.is_empty()
    }

    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more
    }

    /// Error string from the last failed load, for the retry banner
    pub async fn load_error(&self) -> Option<String> {
        self.state.read().await.load_error.clone()
    }
}
