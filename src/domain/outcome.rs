//! Canonical validation outcome and error taxonomy.

use serde::Serialize;

/// Result of attempting to validate a piece of text.
///
/// Exactly one variant is populated. A `Success` always carries non-empty,
/// already-normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Success { validated_text: String },
    Error { error: ValidationError },
}

impl ValidationOutcome {
    /// Build a success outcome, refusing empty text.
    pub fn success(validated_text: impl Into<String>) -> Option<Self> {
        let validated_text = validated_text.into();
        if validated_text.is_empty() {
            None
        } else {
            Some(Self::Success { validated_text })
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The validated text, if this outcome is a success.
    pub fn validated_text(&self) -> Option<&str> {
        match self {
            Self::Success { validated_text } => Some(validated_text),
            Self::Error { .. } => None,
        }
    }

    /// The error, if this outcome is a failure.
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Success { .. } => None,
            Self::Error { error } => Some(error),
        }
    }
}

impl From<ValidationError> for ValidationOutcome {
    fn from(error: ValidationError) -> Self {
        Self::Error { error }
    }
}

/// Every way a validation attempt can fail.
///
/// `EmptyInput` and `TooShort` come from the local rule engine; the rest are
/// produced by the result mapper from remote failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("input is empty")]
    EmptyInput,
    #[error("input must be at least {min_length} characters long")]
    TooShort { min_length: usize },
    #[error("network error")]
    NetworkError,
    #[error("server rejected input: {message}")]
    ServerError { message: String },
    #[error("unclassified failure: {detail}")]
    Unknown { detail: String },
}

impl ValidationError {
    /// Stable, machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::EmptyInput => "empty_input",
            ValidationError::TooShort { .. } => "too_short",
            ValidationError::NetworkError => "network_error",
            ValidationError::ServerError { .. } => "server_error",
            ValidationError::Unknown { .. } => "unknown",
        }
    }

    /// True for errors resolved locally, before any remote call.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            ValidationError::EmptyInput | ValidationError::TooShort { .. }
        )
    }
}
