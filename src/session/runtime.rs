//! Running session: owns the state machine and carries out its effects.
//!
//! ```text
//!  SessionHandle ──commands──▶ ┌──────────────────────┐ ──watch──▶ observers
//!                              │ session task         │
//!  validation tasks ─results─▶ │ SessionMachine       │
//!                              └──────────────────────┘
//!                                 │ spawn / cancel
//!                                 ▼
//!                              TextValidator::validate
//! ```
//!
//! A single task owns [`SessionMachine`] and is the only writer of
//! [`SessionState`]. Commands and validation results both arrive over
//! channels, so text edits are handled immediately even while a validation
//! is in flight. Every published state goes out on a `watch` channel.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::analytics::{self, events, AnalyticsSink};
use crate::cancel::CancelToken;
use crate::config::SessionConfig;
use crate::domain::{ValidationError, ValidationOutcome};
use crate::mapper::Cancelled;
use crate::orchestrator::TextValidator;

use super::machine::{AttemptId, Effect, SessionEvent, SessionMachine};
use super::state::SessionState;

/// The session task has stopped; no further commands are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session is closed")]
pub struct SessionClosed;

#[derive(Debug)]
enum Command {
    TextChanged(String),
    Submit,
    Clear,
    Reset,
    Sync(oneshot::Sender<()>),
    Shutdown,
}

#[derive(Debug)]
struct Completion {
    attempt: AttemptId,
    outcome: ValidationOutcome,
}

struct InFlight {
    attempt: AttemptId,
    token: CancelToken,
    task: JoinHandle<()>,
    started: Instant,
    text_length: usize,
}

/// Command entry points and state observation for a running session.
///
/// Cheap to clone. The session stops when [`SessionHandle::shutdown`] is
/// called on any clone or once every clone is dropped.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Start a session on the current tokio runtime.
    pub fn spawn(
        validator: TextValidator,
        analytics: Arc<dyn AnalyticsSink>,
        policy: SessionConfig,
    ) -> (Self, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionState::default());

        let driver = SessionDriver {
            machine: SessionMachine::new(policy),
            validator: Arc::new(validator),
            analytics,
            state_tx,
            completions_tx,
            in_flight: None,
        };
        let task = tokio::spawn(driver.run(commands_rx, completions_rx));

        (
            Self {
                commands: commands_tx,
                state: state_rx,
            },
            task,
        )
    }

    pub fn on_text_changed(&self, text: impl Into<String>) -> Result<(), SessionClosed> {
        self.send(Command::TextChanged(text.into()))
    }

    pub fn on_submit(&self) -> Result<(), SessionClosed> {
        self.send(Command::Submit)
    }

    pub fn on_clear(&self) -> Result<(), SessionClosed> {
        self.send(Command::Clear)
    }

    pub fn on_reset(&self) -> Result<(), SessionClosed> {
        self.send(Command::Reset)
    }

    /// Snapshot of the latest published state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that yields every published state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Wait until every command sent so far has been handled and no
    /// validation is in flight.
    pub async fn settle(&self) -> Result<(), SessionClosed> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Sync(tx))?;
        rx.await.map_err(|_| SessionClosed)?;

        let mut state = self.state.clone();
        state
            .wait_for(|s| !s.is_loading)
            .await
            .map(|_| ())
            .map_err(|_| SessionClosed)
    }

    /// Stop the session, cancelling any in-flight validation.
    pub fn shutdown(self) {
        let _ = self.send(Command::Shutdown);
    }

    fn send(&self, command: Command) -> Result<(), SessionClosed> {
        self.commands.send(command).map_err(|_| SessionClosed)
    }
}

struct SessionDriver {
    machine: SessionMachine,
    validator: Arc<TextValidator>,
    analytics: Arc<dyn AnalyticsSink>,
    state_tx: watch::Sender<SessionState>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    in_flight: Option<InFlight>,
}

impl SessionDriver {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut completions: mpsc::UnboundedReceiver<Completion>,
    ) {
        tracing::debug!("session started");

        loop {
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => self.handle_command(command),
                },
                Some(completion) = completions.recv() => self.handle_completion(completion),
            }
        }

        if let Some(in_flight) = self.in_flight.take() {
            cancel(in_flight);
        }
        tracing::debug!("session stopped");
    }

    fn handle_command(&mut self, command: Command) {
        let text_length = self.machine.state().input_text.chars().count();

        let event = match command {
            Command::TextChanged(text) => {
                let length = text.chars().count();
                if length == 0 {
                    self.emit(events::INPUT_CLEARED, analytics::Properties::new());
                } else {
                    self.emit(
                        events::TEXT_INPUT_CHANGED,
                        analytics::properties([(events::PROP_TEXT_LENGTH, length)]),
                    );
                }
                SessionEvent::TextChanged(text)
            }
            Command::Submit => {
                if self.machine.accepts(&SessionEvent::Submit) {
                    self.emit(
                        events::SUBMIT_CLICKED,
                        analytics::properties([(events::PROP_TEXT_LENGTH, text_length)]),
                    );
                }
                SessionEvent::Submit
            }
            Command::Clear => {
                self.emit(
                    events::CLEAR_CLICKED,
                    analytics::properties([(events::PROP_TEXT_LENGTH, text_length)]),
                );
                SessionEvent::Clear
            }
            Command::Reset => {
                if self.machine.accepts(&SessionEvent::Reset) {
                    self.emit(events::STATE_RESET, analytics::Properties::new());
                }
                SessionEvent::Reset
            }
            Command::Sync(done) => {
                let _ = done.send(());
                return;
            }
            Command::Shutdown => return,
        };

        self.dispatch(event);
    }

    fn handle_completion(&mut self, completion: Completion) {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.attempt == completion.attempt);
        if !is_current {
            tracing::trace!(attempt = completion.attempt, "dropping stale result");
            return;
        }

        if let Some(in_flight) = self.in_flight.take() {
            let elapsed_ms = in_flight.started.elapsed().as_millis() as u64;
            match &completion.outcome {
                ValidationOutcome::Success { validated_text } => {
                    tracing::debug!(attempt = completion.attempt, elapsed_ms, "validation succeeded");
                    self.emit(
                        events::VALIDATION_SUCCESS,
                        analytics::properties([
                            (events::PROP_TEXT_LENGTH, in_flight.text_length as u64),
                            (
                                events::PROP_OUTPUT_LENGTH,
                                validated_text.chars().count() as u64,
                            ),
                            (events::PROP_VALIDATION_TIME, elapsed_ms),
                        ]),
                    );
                }
                ValidationOutcome::Error { error } => {
                    tracing::debug!(
                        attempt = completion.attempt,
                        elapsed_ms,
                        error_type = error.kind(),
                        "validation failed"
                    );
                    let mut props = analytics::properties([
                        (events::PROP_TEXT_LENGTH, in_flight.text_length as u64),
                        (events::PROP_VALIDATION_TIME, elapsed_ms),
                    ]);
                    props.insert(
                        events::PROP_ERROR_TYPE.to_string(),
                        analytics::error_type(error).into(),
                    );
                    self.emit(events::VALIDATION_ERROR, props);
                }
            }
        }

        self.dispatch(SessionEvent::Completed {
            attempt: completion.attempt,
            outcome: completion.outcome,
        });
    }

    fn dispatch(&mut self, event: SessionEvent) {
        let transition = self.machine.apply(event);

        for effect in transition.effects {
            match effect {
                Effect::CancelValidation { attempt } => {
                    if let Some(in_flight) = self.in_flight.take() {
                        if in_flight.attempt == attempt {
                            tracing::debug!(attempt, "superseding in-flight validation");
                            cancel(in_flight);
                        } else {
                            self.in_flight = Some(in_flight);
                        }
                    }
                }
                Effect::StartValidation { attempt, text } => self.start(attempt, text),
            }
        }

        if transition.changed {
            let state = self.machine.state().clone();
            tracing::trace!(phase = %state.phase, "publishing session state");
            self.state_tx.send_replace(state);
        }
    }

    fn start(&mut self, attempt: AttemptId, text: String) {
        let token = CancelToken::new();
        let validator = Arc::clone(&self.validator);
        let results = self.completions_tx.clone();
        let task_token = token.clone();
        let text_length = text.chars().count();

        tracing::debug!(attempt, text_length, "starting validation");

        let task = tokio::spawn(async move {
            let outcome = match validator.validate(&text, &task_token).await {
                Ok(outcome) => outcome,
                Err(Cancelled) if task_token.is_cancelled() => return,
                // The backend gave up on its own; the attempt still needs an outcome
                Err(Cancelled) => {
                    tracing::debug!(attempt, "remote abandoned validation");
                    ValidationError::Unknown {
                        detail: "remote validator abandoned the request".to_string(),
                    }
                    .into()
                }
            };
            if !task_token.is_cancelled() {
                let _ = results.send(Completion { attempt, outcome });
            }
        });

        self.in_flight = Some(InFlight {
            attempt,
            token,
            task,
            started: Instant::now(),
            text_length,
        });
    }

    fn emit(&self, event: &str, properties: analytics::Properties) {
        self.analytics.emit(event, properties);
    }
}

fn cancel(in_flight: InFlight) {
    in_flight.token.cancel();
    in_flight.task.abort();
}
