use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::validator::{RemoteFailure, RemoteValidator};
use crate::cancel::CancelToken;

/// Scripted reply for one call to [`InMemoryValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedReply {
    /// Echo the text back.
    Accept,
    /// Reply with this text instead of the input.
    Replace(String),
    /// Reject with the given message.
    Reject(String),
    /// Fail at the transport level.
    Transport,
    /// Fail with an unclassified error carrying this description.
    Other(String),
}

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    reply: ScriptedReply,
}

/// In-memory implementation of RemoteValidator for testing.
///
/// Replies are consumed in order; once the script runs out every call is
/// accepted immediately. Calls are counted so tests can prove the remote
/// side was never reached.
pub struct InMemoryValidator {
    script: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
    received: Mutex<Vec<String>>,
    honor_cancel: bool,
}

impl Default for InMemoryValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryValidator {
    /// Create a validator that accepts everything without delay.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
            honor_cancel: true,
        }
    }

    /// Queue a reply delivered after `delay`.
    pub fn then(self, delay: Duration, reply: ScriptedReply) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Scripted { delay, reply });
        self
    }

    /// Keep running after cancellation, the way a backend that ignores its
    /// token would. Used to exercise stale-result handling upstream.
    pub fn ignoring_cancellation(mut self) -> Self {
        self.honor_cancel = false;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts received so far, in call order.
    pub fn received(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn next(&self) -> Scripted {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(Scripted {
                delay: Duration::ZERO,
                reply: ScriptedReply::Accept,
            })
    }
}

#[async_trait]
impl RemoteValidator for InMemoryValidator {
    async fn validate(&self, text: &str, cancel: &CancelToken) -> Result<String, RemoteFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(text.to_string());

        let Scripted { delay, reply } = self.next();

        if self.honor_cancel {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RemoteFailure::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        } else {
            tokio::time::sleep(delay).await;
        }

        match reply {
            ScriptedReply::Accept => Ok(text.to_string()),
            ScriptedReply::Replace(text) => Ok(text),
            ScriptedReply::Reject(message) => Err(RemoteFailure::Rejected { message }),
            ScriptedReply::Transport => Err(RemoteFailure::Transport(io::Error::new(
                io::ErrorKind::TimedOut,
                "scripted transport failure",
            ))),
            ScriptedReply::Other(detail) => Err(RemoteFailure::Other(anyhow::anyhow!(detail))),
        }
    }
}
