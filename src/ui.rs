//! Terminal icons and formatting helpers shared by the CLI.

use colored::{ColoredString, Colorize};

use crate::domain::ValidationOutcome;
use crate::session::Phase;

/// Check if quiet mode is enabled via environment variable
pub fn is_quiet() -> bool {
    std::env::var("TEXTECHO_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Returns a colored icon for a session phase.
///
/// Icons:
/// - Idle: ○ (white)
/// - Loading: ◐ (yellow)
/// - Success: ● (green)
/// - Error: ✗ (red)
pub fn phase_icon(phase: Phase) -> ColoredString {
    match phase {
        Phase::Idle => "○".white(),
        Phase::Loading => "◐".yellow(),
        Phase::Success => "●".green(),
        Phase::Error => "✗".red(),
    }
}

pub fn outcome_icon(outcome: &ValidationOutcome) -> ColoredString {
    match outcome {
        ValidationOutcome::Success { .. } => "✓".green(),
        ValidationOutcome::Error { .. } => "✗".red(),
    }
}

/// Common text formatting patterns
pub mod format {
    /// Shorten text to at most `max_chars` characters, ending in "..."
    pub fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{}...", kept)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;

    #[test]
    fn test_phase_icon_all_phases() {
        phase_icon(Phase::Idle);
        phase_icon(Phase::Loading);
        phase_icon(Phase::Success);
        phase_icon(Phase::Error);
    }

    #[test]
    fn test_outcome_icon() {
        let failed = outcome_icon(&ValidationOutcome::from(ValidationError::NetworkError));
        assert!(failed.to_string().contains('✗'));
        let passed = outcome_icon(&ValidationOutcome::success("abc").unwrap());
        assert!(passed.to_string().contains('✓'));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(format::truncate("short", 10), "short");
        assert_eq!(format::truncate("exactly ten", 11), "exactly ten");
        assert_eq!(format::truncate("this is a very long text", 10), "this is...");
        assert_eq!(format::truncate("héllo wörld", 8), "héllo...");
    }
}
