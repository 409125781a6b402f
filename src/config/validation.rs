//! Validation logic for configuration values.

use anyhow::Result;

use super::defaults::{RemoteConfig, RulesConfig};
use super::Config;

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        self.remote.validate()
    }
}

impl RulesConfig {
    /// Validate rules configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_length == 0 {
            anyhow::bail!("rules.min_length must be at least 1");
        }

        Ok(())
    }
}

impl RemoteConfig {
    /// Validate remote configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_delay_ms > self.max_delay_ms {
            anyhow::bail!(
                "remote.min_delay_ms ({}) must not exceed remote.max_delay_ms ({})",
                self.min_delay_ms,
                self.max_delay_ms
            );
        }

        check_probability("remote.rejection_probability", self.rejection_probability)?;
        check_probability(
            "remote.transport_failure_probability",
            self.transport_failure_probability,
        )?;

        let total = self.rejection_probability + self.transport_failure_probability;
        if total > 1.0 {
            anyhow::bail!(
                "remote.rejection_probability + remote.transport_failure_probability must be <= 1.0, got {}",
                total
            );
        }

        if self.rejection_messages.is_empty() {
            anyhow::bail!("remote.rejection_messages must contain at least one message");
        }

        Ok(())
    }
}

fn check_probability(key: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        anyhow::bail!("{} must be between 0.0 and 1.0, got {}", key, value);
    }
    Ok(())
}
