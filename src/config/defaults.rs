//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_min_length, usize, crate::domain::MIN_LENGTH);
default_fn!(default_min_delay_ms, u64, 500);
default_fn!(default_max_delay_ms, u64, 1500);
default_fn!(default_rejection_probability, f64, 0.2);
default_fn!(default_transport_failure_probability, f64, 0.0);
default_fn!(
    default_rejection_messages,
    Vec<String>,
    vec!["Invalid input detected".to_string()]
);
default_fn!(default_true, bool, true);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Local business rules applied before the remote call
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Minimum trimmed input length in characters (default: 3)
    #[serde(default = "default_min_length")]
    pub min_length: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
        }
    }
}

/// Behavior of the simulated remote validation service
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RemoteConfig {
    /// Lower bound of simulated latency (default: 500)
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound of simulated latency, inclusive (default: 1500)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Chance that the service rejects the input (default: 0.2)
    #[serde(default = "default_rejection_probability")]
    pub rejection_probability: f64,
    /// Chance that the call fails at the transport level (default: 0.0)
    #[serde(default = "default_transport_failure_probability")]
    pub transport_failure_probability: f64,
    /// Messages a rejection is drawn from
    #[serde(default = "default_rejection_messages")]
    pub rejection_messages: Vec<String>,
    /// Fixed seed for reproducible runs; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            rejection_probability: default_rejection_probability(),
            transport_failure_probability: default_transport_failure_probability(),
            rejection_messages: default_rejection_messages(),
            seed: None,
        }
    }
}

/// Session state machine policy
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Clear the displayed output whenever the input is edited
    #[serde(default)]
    pub clear_output_on_edit: bool,
}

/// Analytics sink selection
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalyticsConfig {
    /// Emit analytics events to the log (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}
