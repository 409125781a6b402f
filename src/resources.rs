//! Human-facing copy.
//!
//! The core only deals in canonical outcomes; turning them into text goes
//! through a [`TextResources`] provider so wording and language live outside
//! the validation logic.

use crate::domain::{ValidationError, ValidationOutcome};

/// Every piece of copy the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    EmptyInput,
    TooShort,
    NetworkError,
    ServerError,
    UnknownError,
    SuccessTitle,
    ErrorTitle,
    Validating,
    EchoedTextLabel,
    InputHint,
}

pub trait TextResources: Send + Sync {
    /// Resolve `key`, substituting `{0}`, `{1}`, ... with `args`.
    fn resolve(&self, key: MessageKey, args: &[&str]) -> String;
}

/// Built-in English catalog.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishResources;

impl EnglishResources {
    fn template(key: MessageKey) -> &'static str {
        match key {
            MessageKey::EmptyInput => "Please enter some text",
            MessageKey::TooShort => "Text must be at least {0} characters long",
            MessageKey::NetworkError => "Network error. Please check your connection and try again",
            MessageKey::ServerError => "Validation failed: {0}",
            MessageKey::UnknownError => "An error occurred: {0}",
            MessageKey::SuccessTitle => "Success",
            MessageKey::ErrorTitle => "Error",
            MessageKey::Validating => "Validating...",
            MessageKey::EchoedTextLabel => "Echoed text",
            MessageKey::InputHint => "Minimum {0} characters",
        }
    }
}

impl TextResources for EnglishResources {
    fn resolve(&self, key: MessageKey, args: &[&str]) -> String {
        fill(Self::template(key), args)
    }
}

/// Substitute positional `{n}` placeholders in a single pass. Substituted
/// text is never scanned again; placeholders without an argument are kept.
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            after[..close]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .map(|arg| (close, *arg))
        });
        match arg {
            Some((close, arg)) => {
                out.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Message key for an error variant.
pub fn error_key(error: &ValidationError) -> MessageKey {
    match error {
        ValidationError::EmptyInput => MessageKey::EmptyInput,
        ValidationError::TooShort { .. } => MessageKey::TooShort,
        ValidationError::NetworkError => MessageKey::NetworkError,
        ValidationError::ServerError { .. } => MessageKey::ServerError,
        ValidationError::Unknown { .. } => MessageKey::UnknownError,
    }
}

/// Render an error as user-facing copy.
pub fn error_message(error: &ValidationError, resources: &dyn TextResources) -> String {
    let key = error_key(error);
    match error {
        ValidationError::EmptyInput | ValidationError::NetworkError => resources.resolve(key, &[]),
        ValidationError::TooShort { min_length } => {
            resources.resolve(key, &[min_length.to_string().as_str()])
        }
        ValidationError::ServerError { message } => resources.resolve(key, &[message.as_str()]),
        ValidationError::Unknown { detail } => resources.resolve(key, &[detail.as_str()]),
    }
}

/// Render a whole outcome as a title and a body line.
pub fn outcome_message(
    outcome: &ValidationOutcome,
    resources: &dyn TextResources,
) -> (String, String) {
    match outcome {
        ValidationOutcome::Success { validated_text } => (
            resources.resolve(MessageKey::SuccessTitle, &[]),
            format!(
                "{}: {}",
                resources.resolve(MessageKey::EchoedTextLabel, &[]),
                validated_text
            ),
        ),
        ValidationOutcome::Error { error } => (
            resources.resolve(MessageKey::ErrorTitle, &[]),
            error_message(error, resources),
        ),
    }
}
