//! Single validation entry point for UI-facing code.
//!
//! Runs the local rules first and only reaches the remote validator for
//! input that passes them. Remote failures are classified by the result
//! mapper; cancellation is handed back to the caller untouched.

use std::sync::Arc;

use crate::cancel::CancelToken;
use crate::config::Config;
use crate::domain::{RuleEngine, ValidationError, ValidationOutcome};
use crate::mapper::{Cancelled, ResultMapper};
use crate::remote::{RemoteValidator, SimulatedValidator};

#[derive(Clone)]
pub struct TextValidator {
    rules: RuleEngine,
    remote: Arc<dyn RemoteValidator>,
    mapper: ResultMapper,
}

impl TextValidator {
    pub fn new(rules: RuleEngine, remote: Arc<dyn RemoteValidator>, mapper: ResultMapper) -> Self {
        Self {
            rules,
            remote,
            mapper,
        }
    }

    /// Validator backed by the simulated remote, configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            RuleEngine::new(config.rules.min_length),
            Arc::new(SimulatedValidator::new(config.remote.clone())),
            ResultMapper::new(),
        )
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    /// Validate `raw` text.
    ///
    /// # Returns
    /// * `Ok(outcome)` - a terminal outcome, success or one error variant
    /// * `Err(Cancelled)` - `cancel` fired first, or the remote reported a
    ///   cancellation of its own; no outcome exists
    pub async fn validate(
        &self,
        raw: &str,
        cancel: &CancelToken,
    ) -> Result<ValidationOutcome, Cancelled> {
        let trimmed = match self.rules.check(raw) {
            Ok(trimmed) => trimmed,
            Err(error) => {
                tracing::debug!(error_type = error.kind(), "input failed local rules");
                return Ok(error.into());
            }
        };

        if cancel.is_cancelled() {
            return Err(Cancelled);
        }

        match self.remote.validate(trimmed, cancel).await {
            Ok(text) => Ok(ValidationOutcome::success(text).unwrap_or_else(|| {
                ValidationError::Unknown {
                    detail: "remote validator returned empty text".to_string(),
                }
                .into()
            })),
            Err(failure) => self.mapper.map(failure).map(ValidationOutcome::from),
        }
    }
}
