//! Observable session state.

use serde::Serialize;
use std::fmt;

use crate::domain::ValidationError;

/// Display phase of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing to report; initial state and the target of clear/reset.
    #[default]
    Idle,
    /// A validation attempt is in flight.
    Loading,
    /// The last attempt succeeded; its text is in `output_text`.
    Success,
    /// The last attempt failed; the reason is in `error`.
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "idle"),
            Phase::Loading => write!(f, "loading"),
            Phase::Success => write!(f, "success"),
            Phase::Error => write!(f, "error"),
        }
    }
}

/// Everything a UI needs to render a session.
///
/// Only the session state machine mutates this. `is_loading` is true exactly
/// when `phase` is `Loading`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Raw, unvalidated input as last edited.
    pub input_text: String,
    /// Text from the last successful validation.
    pub output_text: String,
    pub is_loading: bool,
    pub error: Option<ValidationError>,
    pub phase: Phase,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the state holds only defaults.
    pub fn is_pristine(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a submit would do anything right now.
    pub fn can_submit(&self) -> bool {
        !self.input_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SessionState::new();
        assert_eq!(state.input_text, "");
        assert_eq!(state.output_text, "");
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.is_pristine());
        assert!(!state.can_submit());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Idle.to_string(), "idle");
        assert_eq!(Phase::Loading.to_string(), "loading");
        assert_eq!(Phase::Success.to_string(), "success");
        assert_eq!(Phase::Error.to_string(), "error");
    }
}
