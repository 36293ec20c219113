//! Messaging API Client
//!
//! Async functions for the REST messaging endpoints, parameterized by
//! conversation kind. This is the only module that talks HTTP; everything
//! above it works with normalized [`Page`]s and typed errors.

use reqwest::Client;
use thiserror::Error;

use crate::client::config::ClientConfig;
use crate::client::retry::RetryPolicy;
use crate::shared::messaging::{
    parse_page, ConversationKind, EditMessageRequest, MarkReadRequest, Message, MessageId, Page,
    SendMessageRequest,
};

/// Errors from the messaging API
#[derive(Debug, Error)]
pub enum ApiError {
    /// No bearer token is configured
    #[error("not authenticated")]
    NotAuthenticated,

    /// Connection, DNS, or timeout failure
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx HTTP response
    #[error("request failed ({status}): {detail}")]
    Http {
        status: u16,
        /// Server-provided `detail` when present, else `"Error <status>"`
        detail: String,
    },

    /// The 404 the list endpoint returns past the last page. Callers treat
    /// this as normal end-of-pagination, not as a user-facing error.
    #[error("no such page")]
    PageExhausted,

    /// Response body did not match the expected shape
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Async client for the messaging endpoints
pub struct MessagingApi {
    http: Client,
    config: ClientConfig,
    retry: RetryPolicy,
}

impl MessagingApi {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_retry(config, RetryPolicy::default())
    }

    pub fn with_retry(config: ClientConfig, retry: RetryPolicy) -> Self {
        Self {
            http: Client::new(),
            config,
            retry,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// List one page of a conversation's messages
    pub async fn list_messages(
        &self,
        kind: ConversationKind,
        conversation_id: &str,
        page: u32,
    ) -> Result<Page<Message>, ApiError> {
        let url = self.config.api_url(&format!(
            "/messaging/{}/{}/messages/?page={}",
            kind.path_segment(),
            conversation_id,
            page
        ));
        let response = self.execute(self.http.get(&url)).await?;
        let body = Self::success_body(response).await?;
        parse_page(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a message to a conversation
    pub async fn send_message(
        &self,
        kind: ConversationKind,
        request: &SendMessageRequest,
    ) -> Result<Message, ApiError> {
        let url = self
            .config
            .api_url(&format!("/messaging/{}/messages/", kind.path_segment()));
        let response = self.execute(self.http.post(&url).json(request)).await?;
        let body = Self::success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Edit a message's content
    pub async fn edit_message(
        &self,
        kind: ConversationKind,
        message_id: &MessageId,
        content: &str,
    ) -> Result<Message, ApiError> {
        let url = self.config.api_url(&format!(
            "/messaging/{}/messages/{}/",
            kind.path_segment(),
            message_id
        ));
        let request = EditMessageRequest {
            content: content.to_string(),
        };
        let response = self.execute(self.http.patch(&url).json(&request)).await?;
        let body = Self::success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Delete a message
    pub async fn delete_message(
        &self,
        kind: ConversationKind,
        message_id: &MessageId,
    ) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!(
            "/messaging/{}/messages/{}/",
            kind.path_segment(),
            message_id
        ));
        let response = self.execute(self.http.delete(&url)).await?;
        Self::success_body(response).await?;
        Ok(())
    }

    /// Mark a conversation as read
    pub async fn mark_read(
        &self,
        kind: ConversationKind,
        conversation_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.config.api_url(&format!(
            "/messaging/{}/{}/",
            kind.path_segment(),
            conversation_id
        ));
        let request = MarkReadRequest { read: true };
        let response = self.execute(self.http.patch(&url).json(&request)).await?;
        Self::success_body(response).await?;
        Ok(())
    }

    /// Search a conversation's messages server-side
    pub async fn search_messages(
        &self,
        kind: ConversationKind,
        conversation_id: &str,
        query: &str,
    ) -> Result<Vec<Message>, ApiError> {
        let url = self.config.api_url(&format!(
            "/messaging/{}/{}/search/?q={}",
            kind.path_segment(),
            conversation_id,
            urlencode(query)
        ));
        let response = self.execute(self.http.get(&url)).await?;
        let body = Self::success_body(response).await?;
        let page: Page<Message> = parse_page(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(page.items)
    }

    /// Attach auth and send, retrying transport failures per the policy.
    ///
    /// Only transport failures retry; an HTTP error response is an answer,
    /// not an outage, and surfaces immediately.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let token = self.config.token().ok_or(ApiError::NotAuthenticated)?;
        let request = request.header("Authorization", format!("Bearer {}", token));

        let mut attempt: u32 = 1;
        loop {
            let Some(builder) = request.try_clone() else {
                // Streaming bodies cannot be replayed; single shot.
                return Ok(request.send().await?);
            };
            match builder.send().await {
                Ok(response) => return Ok(response),
                Err(err) if self.retry.automatic && attempt < self.retry.max_attempts => {
                    let delay = self.retry.backoff.delay_for(attempt);
                    tracing::debug!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transport failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(ApiError::Transport(err)),
            }
        }
    }

    /// Return the body of a successful response, or map the error shape
    async fn success_body(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            return Ok(body);
        }

        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or_else(|| format!("Error {}", status.as_u16()));

        // The list endpoint reports over-pagination as a 404 with an
        // "Invalid page" detail; callers treat that as end-of-data.
        if status.as_u16() == 404 && detail.to_ascii_lowercase().contains("invalid page") {
            tracing::debug!("list endpoint reports invalid page, treating as exhausted");
            return Err(ApiError::PageExhausted);
        }

        tracing::debug!(status = status.as_u16(), detail = %detail, "request failed");
        Err(ApiError::Http {
            status: status.as_u16(),
            detail,
        })
    }
}

/// Percent-encode a query value
fn urlencode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}
