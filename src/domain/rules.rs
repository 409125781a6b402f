//! Local business rules applied before any remote call.

use super::outcome::ValidationError;

/// Default minimum length of trimmed input, in characters.
pub const MIN_LENGTH: usize = 3;

/// Pure, synchronous pre-validation of raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEngine {
    min_length: usize,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(MIN_LENGTH)
    }
}

impl RuleEngine {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Check `raw` against the rules.
    ///
    /// On success returns the trimmed slice the length rule was applied to;
    /// callers forward exactly this value downstream.
    ///
    /// # Rules
    /// 1. Whitespace-only input → `EmptyInput`
    /// 2. Fewer than `min_length` characters after trimming → `TooShort`
    pub fn check<'a>(&self, raw: &'a str) -> Result<&'a str, ValidationError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        if trimmed.chars().count() < self.min_length {
            return Err(ValidationError::TooShort {
                min_length: self.min_length,
            });
        }

        Ok(trimmed)
    }
}

/// Check `raw` with the default policy.
pub fn check_rules(raw: &str) -> Result<&str, ValidationError> {
    RuleEngine::default().check(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(check_rules(""), Err(ValidationError::EmptyInput));
        assert_eq!(check_rules("   "), Err(ValidationError::EmptyInput));
        assert_eq!(check_rules("\t\n "), Err(ValidationError::EmptyInput));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            check_rules("Hi"),
            Err(ValidationError::TooShort { min_length: 3 })
        );
        // Surrounding whitespace does not count toward the length
        assert_eq!(
            check_rules("  Hi  "),
            Err(ValidationError::TooShort { min_length: 3 })
        );
    }

    #[test]
    fn test_exactly_min_length_passes() {
        assert_eq!(check_rules("abc"), Ok("abc"));
    }

    #[test]
    fn test_returns_trimmed_text() {
        assert_eq!(check_rules("  Hello World \n"), Ok("Hello World"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Three characters, nine bytes
        assert_eq!(check_rules("日本語"), Ok("日本語"));
        assert_eq!(
            check_rules("日本"),
            Err(ValidationError::TooShort { min_length: 3 })
        );
    }

    #[test]
    fn test_custom_min_length() {
        let engine = RuleEngine::new(6);
        assert_eq!(engine.min_length(), 6);
        assert_eq!(
            engine.check("Hello"),
            Err(ValidationError::TooShort { min_length: 6 })
        );
        assert_eq!(engine.check("Hello!"), Ok("Hello!"));
    }

    proptest! {
        #[test]
        fn prop_whitespace_only_is_empty(s in "[ \t\r\n]{0,16}") {
            prop_assert_eq!(check_rules(&s), Err(ValidationError::EmptyInput));
        }

        #[test]
        fn prop_short_core_is_too_short(core in "[a-zA-Z0-9]{1,2}", pad in "[ \t]{0,4}") {
            let input = format!("{pad}{core}{pad}");
            prop_assert_eq!(
                check_rules(&input),
                Err(ValidationError::TooShort { min_length: MIN_LENGTH })
            );
        }

        #[test]
        fn prop_valid_core_is_returned_trimmed(
            core in "[a-zA-Z0-9][a-zA-Z0-9 ]{1,30}[a-zA-Z0-9]",
            left in "[ \t\n]{0,4}",
            right in "[ \t\n]{0,4}",
        ) {
            let input = format!("{left}{core}{right}");
            prop_assert_eq!(check_rules(&input), Ok(core.as_str()));
        }

        #[test]
        fn prop_check_is_idempotent(s in ".{0,24}") {
            prop_assert_eq!(check_rules(&s), check_rules(&s));
        }
    }
}
