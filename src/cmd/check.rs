//! Check command: run a single validation and report the outcome

use anyhow::Result;

use textecho::cancel::CancelToken;
use textecho::config::Config;
use textecho::orchestrator::TextValidator;
use textecho::resources::{EnglishResources, MessageKey, TextResources};

use crate::cmd::ui::Output;

/// Forced verdict for the simulated remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject,
}

/// Apply command-line overrides to the remote section.
pub fn apply_overrides(config: &mut Config, seed: Option<u64>, verdict: Option<Verdict>) {
    if let Some(seed) = seed {
        config.remote.seed = Some(seed);
    }
    match verdict {
        Some(Verdict::Accept) => {
            config.remote.rejection_probability = 0.0;
            config.remote.transport_failure_probability = 0.0;
        }
        Some(Verdict::Reject) => {
            config.remote.rejection_probability = 1.0;
            config.remote.transport_failure_probability = 0.0;
        }
        None => {}
    }
}

/// Validate `text` once. Returns whether the outcome was a success.
///
/// Ctrl-C cancels the in-flight call; a cancelled check reports no outcome.
pub async fn cmd_check(config: &Config, text: &str, out: &Output) -> Result<bool> {
    let validator = TextValidator::from_config(config);
    let res = EnglishResources;
    let token = CancelToken::new();

    out.step(&res.resolve(MessageKey::Validating, &[]));

    let result = tokio::select! {
        result = validator.validate(text, &token) => result,
        _ = tokio::signal::ctrl_c() => {
            token.cancel();
            tracing::debug!("check interrupted");
            out.error("Cancelled");
            return Ok(false);
        }
    };

    match result {
        Ok(outcome) => {
            out.outcome(text, &outcome, &res);
            Ok(outcome.is_success())
        }
        Err(cancelled) => {
            out.error(&cancelled.to_string());
            Ok(false)
        }
    }
}
