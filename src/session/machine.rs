//! State machine for session transitions.
//!
//! Pure and synchronous: every event updates [`SessionState`] and returns the
//! side effects the caller must perform (start or cancel a validation). Each
//! submit gets a fresh [`AttemptId`]; a completion is applied only when it
//! carries the id of the attempt currently in flight, so results from a
//! superseded or cancelled attempt can never overwrite newer state.

use crate::config::SessionConfig;
use crate::domain::ValidationOutcome;

use super::state::{Phase, SessionState};

/// Identifies one validation attempt within a session. Strictly increasing.
pub type AttemptId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user edited the input.
    TextChanged(String),
    /// The user asked for the current input to be validated.
    Submit,
    /// The user cleared everything.
    Clear,
    /// The user dismissed the current result.
    Reset,
    /// A validation attempt finished.
    Completed {
        attempt: AttemptId,
        outcome: ValidationOutcome,
    },
}

/// Work the owner of the machine has to carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start validating `text` as attempt `attempt`.
    StartValidation { attempt: AttemptId, text: String },
    /// Abandon attempt `attempt`; its result must never be applied.
    CancelValidation { attempt: AttemptId },
}

/// What a single event did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// Whether the observable state changed.
    pub changed: bool,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionMachine {
    state: SessionState,
    in_flight: Option<AttemptId>,
    last_attempt: AttemptId,
    policy: SessionConfig,
}

impl SessionMachine {
    pub fn new(policy: SessionConfig) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The attempt whose result would currently be applied, if any.
    pub fn in_flight(&self) -> Option<AttemptId> {
        self.in_flight
    }

    /// Whether `event` would be acted on in the current state. Submit needs
    /// input and Reset is ignored while loading; everything else always
    /// applies.
    pub fn accepts(&self, event: &SessionEvent) -> bool {
        match event {
            SessionEvent::Submit => self.state.can_submit(),
            SessionEvent::Reset => self.state.phase != Phase::Loading,
            _ => true,
        }
    }

    /// Apply `event` and report what changed.
    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        let before = self.state.clone();
        let effects = match event {
            SessionEvent::TextChanged(text) => {
                self.text_changed(text);
                Vec::new()
            }
            SessionEvent::Submit => self.submit(),
            SessionEvent::Clear => self.clear(),
            SessionEvent::Reset => {
                self.reset();
                Vec::new()
            }
            SessionEvent::Completed { attempt, outcome } => {
                self.completed(attempt, outcome);
                Vec::new()
            }
        };

        Transition {
            changed: self.state != before,
            effects,
        }
    }

    fn text_changed(&mut self, text: String) {
        self.state.input_text = text;
        self.state.error = None;

        if self.state.phase == Phase::Error {
            self.state.phase = Phase::Idle;
        }

        if self.policy.clear_output_on_edit {
            self.state.output_text.clear();
            if self.state.phase == Phase::Success {
                self.state.phase = Phase::Idle;
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        if !self.accepts(&SessionEvent::Submit) {
            return Vec::new();
        }

        let mut effects = Vec::with_capacity(2);
        if let Some(previous) = self.in_flight.take() {
            effects.push(Effect::CancelValidation { attempt: previous });
        }

        self.last_attempt += 1;
        let attempt = self.last_attempt;
        self.in_flight = Some(attempt);

        self.state.is_loading = true;
        self.state.error = None;
        self.state.phase = Phase::Loading;

        effects.push(Effect::StartValidation {
            attempt,
            text: self.state.input_text.clone(),
        });
        effects
    }

    fn clear(&mut self) -> Vec<Effect> {
        let effects = self
            .in_flight
            .take()
            .map(|attempt| vec![Effect::CancelValidation { attempt }])
            .unwrap_or_default();

        self.state = SessionState::default();
        effects
    }

    fn reset(&mut self) {
        // Only a finished result can be dismissed
        if !self.accepts(&SessionEvent::Reset) {
            return;
        }
        self.state.error = None;
        self.state.phase = Phase::Idle;
    }

    fn completed(&mut self, attempt: AttemptId, outcome: ValidationOutcome) {
        if self.in_flight != Some(attempt) {
            return;
        }
        self.in_flight = None;
        self.state.is_loading = false;

        match outcome {
            ValidationOutcome::Success { validated_text } => {
                self.state.output_text = validated_text;
                self.state.error = None;
                self.state.phase = Phase::Success;
            }
            ValidationOutcome::Error { error } => {
                self.state.error = Some(error);
                self.state.phase = Phase::Error;
            }
        }
    }
}
