//! # Textecho - validated text echo
//!
//! Textecho takes free-form text, checks it against local rules, sends it to
//! a (simulated) remote validator and echoes the validated text back. An
//! interactive session tracks input, output, loading and error state, and
//! makes sure only the latest submission can ever update what is shown.
//!
//! ## Modules
//!
//! - [`domain`] - Outcomes, error variants and local validation rules
//! - [`remote`] - Remote validator trait, simulated and scripted backends
//! - [`mapper`] - Classification of remote failures into error variants
//! - [`orchestrator`] - The single `validate` entry point
//! - [`session`] - Session state machine and its async runtime
//! - [`analytics`] - Fire-and-forget analytics sinks
//! - [`resources`] - User-facing copy for outcomes and errors
//! - [`config`] - YAML configuration with global and project layers
//!
//! ## Example
//!
//! ```no_run
//! use textecho::cancel::CancelToken;
//! use textecho::config::Config;
//! use textecho::orchestrator::TextValidator;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let validator = TextValidator::from_config(&config);
//!
//! if let Ok(outcome) = validator.validate("Hello World", &CancelToken::new()).await {
//!     println!("{:?}", outcome);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod cancel;
pub mod config;
pub mod domain;
pub mod mapper;
pub mod orchestrator;
pub mod remote;
pub mod resources;
pub mod session;
pub mod ui;
