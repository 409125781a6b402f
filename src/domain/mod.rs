//! Domain logic module containing the pure parts of validation.
//!
//! Nothing in here performs I/O or suspends; it is the first layer tested.

pub mod outcome;
pub mod rules;

pub use outcome::{ValidationError, ValidationOutcome};
pub use rules::{check_rules, RuleEngine, MIN_LENGTH};
