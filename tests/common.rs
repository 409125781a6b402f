//! Common test helpers for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use textecho::analytics::RecordingAnalytics;
use textecho::config::SessionConfig;
use textecho::domain::RuleEngine;
use textecho::mapper::ResultMapper;
use textecho::orchestrator::TextValidator;
use textecho::remote::InMemoryValidator;
use textecho::session::{Phase, SessionHandle, SessionState};

/// A running session wired to a scripted remote and a recording sink.
pub struct TestSession {
    pub handle: SessionHandle,
    pub remote: Arc<InMemoryValidator>,
    pub analytics: Arc<RecordingAnalytics>,
    pub task: JoinHandle<()>,
}

pub fn spawn_session(remote: InMemoryValidator) -> TestSession {
    spawn_session_with(remote, SessionConfig::default())
}

pub fn spawn_session_with(remote: InMemoryValidator, policy: SessionConfig) -> TestSession {
    let remote = Arc::new(remote);
    let analytics = Arc::new(RecordingAnalytics::new());
    let validator = TextValidator::new(RuleEngine::default(), remote.clone(), ResultMapper::new());
    let (handle, task) = SessionHandle::spawn(validator, analytics.clone(), policy);

    TestSession {
        handle,
        remote,
        analytics,
        task,
    }
}

impl TestSession {
    /// Edit then submit, the way a user types and presses the button.
    pub fn type_and_submit(&self, text: &str) {
        self.handle.on_text_changed(text).expect("session closed");
        self.handle.on_submit().expect("session closed");
    }

    /// Wait until every command is handled and nothing is in flight.
    pub async fn settle(&self) -> SessionState {
        tokio::time::timeout(Duration::from_secs(60), self.handle.settle())
            .await
            .expect("session did not settle")
            .expect("session closed");
        self.handle.state()
    }

    pub async fn wait_for_phase(&self, phase: Phase) -> SessionState {
        wait_for(&self.handle, |s| s.phase == phase).await
    }
}

/// Wait for a published state matching `predicate`.
pub async fn wait_for(
    handle: &SessionHandle,
    predicate: impl FnMut(&SessionState) -> bool,
) -> SessionState {
    let mut states = handle.subscribe();
    let state = tokio::time::timeout(Duration::from_secs(60), states.wait_for(predicate))
        .await
        .expect("timed out waiting for state")
        .expect("session closed");
    state.clone()
}

/// The state `Clear` must always produce.
pub fn cleared() -> SessionState {
    SessionState::default()
}
