//! Structured output for the textecho CLI.
//!
//! Provides a unified interface for outputting messages in different modes:
//! - Human: Colored, icon-prefixed output for terminal display
//! - Json: One JSON object per line for programmatic consumption
//! - Quiet: Only errors are emitted
//!
//! The Output struct auto-detects TTY for color support and can be injected
//! with a custom writer for test capture.

use colored::Colorize;
use serde_json::json;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use textecho::domain::ValidationOutcome;
use textecho::resources::{self, MessageKey, TextResources};
use textecho::session::{Phase, SessionState};
use textecho::ui;

/// Output mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    /// Silent mode - only errors
    Quiet,
}

impl OutputMode {
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if json {
            OutputMode::Json
        } else if quiet || ui::is_quiet() {
            OutputMode::Quiet
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Clone)]
pub struct Output {
    mode: OutputMode,
    writer: Arc<Mutex<Box<dyn Write + Send>>>,
    is_tty: bool,
}

impl Output {
    /// Create a new Output writing to stdout
    pub fn new(mode: OutputMode) -> Self {
        let is_tty = atty::is(atty::Stream::Stdout);
        Self {
            mode,
            writer: Arc::new(Mutex::new(Box::new(io::stdout()))),
            is_tty,
        }
    }

    /// Create an Output with a custom writer (for testing)
    pub fn with_writer(mode: OutputMode, writer: Box<dyn Write + Send>) -> Self {
        Self {
            mode,
            writer: Arc::new(Mutex::new(writer)),
            is_tty: false,
        }
    }

    /// Output a step message: "→ {msg}"
    pub fn step(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                let prefix = self.paint("→", |s| s.cyan().to_string());
                self.write_line(&format!("{} {}", prefix, msg));
            }
            OutputMode::Json => self.write_json("step", msg),
            OutputMode::Quiet => {}
        }
    }

    /// Output an error message: "✗ {msg}". Shown in every mode.
    pub fn error(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => {
                let prefix = self.paint("✗", |s| s.red().to_string());
                self.write_line(&format!("{} {}", prefix, msg));
            }
            OutputMode::Json => self.write_json("error", msg),
            OutputMode::Quiet => self.write_line(&format!("✗ {}", msg)),
        }
    }

    /// Output plain info text (no prefix)
    pub fn info(&self, msg: &str) {
        match self.mode {
            OutputMode::Human => self.write_line(msg),
            OutputMode::Json => self.write_json("info", msg),
            OutputMode::Quiet => {}
        }
    }

    /// Report the outcome of a single validation.
    ///
    /// Quiet mode prints the echoed text alone on success, so the command
    /// stays usable in pipelines.
    pub fn outcome(&self, input: &str, outcome: &ValidationOutcome, res: &dyn TextResources) {
        match self.mode {
            OutputMode::Human => {
                let (title, body) = resources::outcome_message(outcome, res);
                let icon = self.paint_with(ui::outcome_icon(outcome));
                self.write_line(&format!("{} {}", icon, title));
                self.write_line(&format!("  {}", body));
            }
            OutputMode::Json => {
                self.json(&json!({ "input": input, "outcome": outcome }));
            }
            OutputMode::Quiet => match outcome {
                ValidationOutcome::Success { validated_text } => self.write_line(validated_text),
                ValidationOutcome::Error { error } => {
                    self.error(&resources::error_message(error, res))
                }
            },
        }
    }

    /// Report a published session state.
    pub fn state(&self, state: &SessionState, res: &dyn TextResources) {
        match self.mode {
            OutputMode::Human => {
                let icon = self.paint_with(ui::phase_icon(state.phase));
                let detail = match state.phase {
                    Phase::Idle => ui::format::truncate(&state.input_text, 60),
                    Phase::Loading => res.resolve(MessageKey::Validating, &[]),
                    Phase::Success => format!(
                        "{}: {}",
                        res.resolve(MessageKey::EchoedTextLabel, &[]),
                        state.output_text
                    ),
                    Phase::Error => state
                        .error
                        .as_ref()
                        .map(|e| resources::error_message(e, res))
                        .unwrap_or_default(),
                };
                self.write_line(&format!("{} {:<8} {}", icon, state.phase.to_string(), detail));
            }
            OutputMode::Json => match serde_json::to_value(state) {
                Ok(value) => self.json(&json!({ "state": value })),
                Err(e) => self.error(&format!("Failed to serialize state: {}", e)),
            },
            OutputMode::Quiet => {
                if let (Phase::Error, Some(error)) = (state.phase, &state.error) {
                    self.error(&resources::error_message(error, res));
                }
            }
        }
    }

    /// Output text as-is in every mode, for documents the user asked for.
    pub fn raw(&self, text: &str) {
        self.write_line(text.trim_end());
    }

    /// Output a structured JSON value
    pub fn json(&self, value: &serde_json::Value) {
        self.write_line(&value.to_string());
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.is_tty {
            style(text)
        } else {
            text.to_string()
        }
    }

    fn paint_with(&self, colored: colored::ColoredString) -> String {
        if self.is_tty {
            colored.to_string()
        } else {
            colored.clear().to_string()
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }

    fn write_json(&self, level: &str, msg: &str) {
        self.json(&json!({ "level": level, "msg": msg }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textecho::domain::ValidationError;
    use textecho::resources::EnglishResources;

    struct TestWriter {
        buffer: Arc<Mutex<Vec<u8>>>,
    }

    impl TestWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buffer = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    buffer: buffer.clone(),
                },
                buffer,
            )
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.buffer.lock().unwrap().flush()
        }
    }

    fn capture(mode: OutputMode, f: impl FnOnce(&Output)) -> String {
        let (writer, buffer) = TestWriter::new();
        let output = Output::with_writer(mode, Box::new(writer));
        f(&output);
        let data = buffer.lock().unwrap();
        String::from_utf8(data.clone()).unwrap()
    }

    #[test]
    fn test_human_outcome() {
        let result = capture(OutputMode::Human, |out| {
            out.step("Validating...");
            out.outcome(
                "Hello",
                &ValidationOutcome::success("Hello").unwrap(),
                &EnglishResources,
            );
        });
        assert!(result.contains("→ Validating..."));
        assert!(result.contains("✓ Success"));
        assert!(result.contains("  Echoed text: Hello"));
    }

    #[test]
    fn test_json_outcome() {
        let result = capture(OutputMode::Json, |out| {
            out.outcome(
                "ab",
                &ValidationError::TooShort { min_length: 3 }.into(),
                &EnglishResources,
            );
        });
        let value: serde_json::Value = serde_json::from_str(result.trim()).unwrap();
        assert_eq!(value["input"], "ab");
        assert_eq!(value["outcome"]["status"], "error");
        assert_eq!(value["outcome"]["error"]["kind"], "too_short");
        assert_eq!(value["outcome"]["error"]["min_length"], 3);
    }

    #[test]
    fn test_quiet_mode_prints_text_and_errors_only() {
        let result = capture(OutputMode::Quiet, |out| {
            out.step("Starting");
            out.info("Info");
            out.outcome(
                "Hello",
                &ValidationOutcome::success("Hello").unwrap(),
                &EnglishResources,
            );
            out.outcome("", &ValidationError::EmptyInput.into(), &EnglishResources);
        });
        assert_eq!(result, "Hello\n✗ Please enter some text\n");
    }

    #[test]
    fn test_human_state_lines() {
        let loading = SessionState {
            input_text: "Hello".into(),
            is_loading: true,
            phase: Phase::Loading,
            ..SessionState::default()
        };
        let failed = SessionState {
            input_text: "Hello".into(),
            error: Some(ValidationError::NetworkError),
            phase: Phase::Error,
            ..SessionState::default()
        };
        let result = capture(OutputMode::Human, |out| {
            out.state(&loading, &EnglishResources);
            out.state(&failed, &EnglishResources);
        });
        let lines: Vec<&str> = result.lines().collect();
        assert!(lines[0].starts_with("◐ loading"));
        assert!(lines[0].ends_with("Validating..."));
        assert!(lines[1].starts_with("✗ error"));
        assert!(lines[1].contains("Network error"));
    }

    #[test]
    fn test_json_state() {
        let result = capture(OutputMode::Json, |out| {
            out.state(&SessionState::default(), &EnglishResources);
        });
        let value: serde_json::Value = serde_json::from_str(result.trim()).unwrap();
        assert_eq!(value["state"]["phase"], "idle");
        assert_eq!(value["state"]["is_loading"], false);
        assert!(value["state"]["error"].is_null());
    }

    #[test]
    fn test_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Json);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Quiet);
    }
}
