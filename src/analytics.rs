//! Fire-and-forget analytics.
//!
//! Sinks receive an event name and a property map. They must return quickly,
//! never panic into the caller, and never feed anything back into session
//! state; failures stay inside the sink.

use std::sync::Mutex;

use serde_json::{Map, Value};

use crate::domain::ValidationError;

/// Event and property names.
pub mod events {
    pub const TEXT_INPUT_CHANGED: &str = "text_input_changed";
    pub const INPUT_CLEARED: &str = "input_cleared";
    pub const SUBMIT_CLICKED: &str = "submit_clicked";
    pub const CLEAR_CLICKED: &str = "clear_clicked";
    pub const STATE_RESET: &str = "state_reset";
    pub const VALIDATION_SUCCESS: &str = "validation_success";
    pub const VALIDATION_ERROR: &str = "validation_error";

    pub const PROP_TEXT_LENGTH: &str = "text_length";
    pub const PROP_OUTPUT_LENGTH: &str = "output_length";
    pub const PROP_ERROR_TYPE: &str = "error_type";
    pub const PROP_VALIDATION_TIME: &str = "validation_time_ms";
}

pub type Properties = Map<String, Value>;

pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: &str, properties: Properties);
}

/// Analytics `error_type` for an error. Covers every variant.
pub fn error_type(error: &ValidationError) -> &'static str {
    error.kind()
}

/// Logs events through `tracing` under the `textecho::analytics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn emit(&self, event: &str, properties: Properties) {
        let properties = Value::Object(properties);
        tracing::debug!(
            target: "textecho::analytics",
            event,
            properties = %properties,
            "analytics event"
        );
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalytics;

impl AnalyticsSink for NoopAnalytics {
    fn emit(&self, _event: &str, _properties: Properties) {}
}

/// A captured analytics event.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub name: String,
    pub properties: Properties,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

impl RecordedEvent {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Keeps every event in memory, for tests and diagnostics.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Names of recorded events, in emission order.
    pub fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|e| e.name == name)
            .count()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn emit(&self, event: &str, properties: Properties) {
        let recorded = RecordedEvent {
            name: event.to_string(),
            properties,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        };
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(recorded);
    }
}

/// Build a property map from key/value pairs.
pub fn properties<I, V>(pairs: I) -> Properties
where
    I: IntoIterator<Item = (&'static str, V)>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.into()))
        .collect()
}
