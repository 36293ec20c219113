//! Conversation timeline: controller, cancellation scoping.

pub mod cancel;
pub mod controller;

pub use cancel::CancelToken;
pub use controller::{LocalUser, MessageTimeline, TimelineConfig, TimelineError};
