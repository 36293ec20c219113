//! Mindwell Messaging - Client Core
//!
//! Client-side messaging core for the Mindwell platform. This library owns
//! conversation timelines and the HTTP plumbing beneath them; rendering and
//! navigation belong to the embedding application, and authentication is a
//! collaborator that hands over a bearer token.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and platform-agnostic pieces
//!   - Message and conversation structures, paginated list normalization
//!   - Content validation and shared error types
//!   - Configuration (TOML file + environment)
//!
//! - **`client`** - The runtime
//!   - `config`: base URL and bearer token handling
//!   - `api`: async REST client for the messaging endpoints
//!   - `retry`: explicit transport retry policy with backoff
//!   - `timeline`: the per-conversation controller (optimistic send,
//!     pagination, per-message retry, read receipts, edit/delete, search)
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mindwell_messaging::client::api::MessagingApi;
//! use mindwell_messaging::client::config::ClientConfig;
//! use mindwell_messaging::client::timeline::{LocalUser, MessageTimeline, TimelineConfig};
//! use mindwell_messaging::shared::messaging::ConversationKind;
//!
//! # async fn example() -> Result<(), mindwell_messaging::client::timeline::TimelineError> {
//! let mut config = ClientConfig::new();
//! config.set_token(Some("bearer-token".to_string()));
//!
//! let timeline = MessageTimeline::new(
//!     Arc::new(MessagingApi::new(config)),
//!     TimelineConfig {
//!         kind: ConversationKind::OneToOne,
//!         conversation_id: "42".to_string(),
//!         local_user: LocalUser::new("u1", "Dana"),
//!     },
//! );
//!
//! timeline.refresh().await?;
//! timeline.mark_read().await;
//! timeline.send("Hello").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Timeline state sits behind a `tokio::sync::RwLock`; methods take `&self`
//! and the controller is shared via `Arc`. Several sends may be in flight at
//! once — reconciliation matches by temporary id, so completions may be
//! applied in any order. Operations check a [`client::timeline::CancelToken`]
//! after every await, so a screen that unmounts stops state mutation by
//! cancelling the token.
//!
//! # Error Handling
//!
//! Fallible operations return `Result` with typed errors (`shared::error`,
//! `client::api`, `client::timeline`). Nothing is fatal: load failures feed a
//! retry banner, send failures mark the message for per-message retry, and
//! read receipts are best-effort.

/// Shared types and data structures
pub mod shared;

/// Client runtime: API access and timeline control
pub mod client;
