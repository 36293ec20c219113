//! Cancellation Scoping
//!
//! Every timeline operation checks its token after each await, before
//! applying results to state. A screen cancels the token on unmount so a
//! late-arriving completion never mutates state that nothing renders.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation token tied to the owning screen's lifetime
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel all operations holding this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
