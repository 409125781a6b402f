//! Explicit cancellation token for in-flight validation attempts.
//!
//! Built on a `tokio::sync::watch` flag so any number of waiters can observe
//! the transition from running to cancelled. Cloned tokens share state.

use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct CancelToken {
    flag: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (flag, _rx) = watch::channel(false);
        Self {
            flag: Arc::new(flag),
        }
    }

    /// Cancel the token. Calling this more than once has no further effect.
    pub fn cancel(&self) {
        self.flag.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.flag.borrow()
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.flag.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}
