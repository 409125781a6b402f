//! Command handlers for the textecho CLI

use anyhow::Result;
use std::path::Path;

use textecho::config::Config;

pub mod check;
pub mod config;
pub mod session;
pub mod ui;

/// Load configuration: an explicit `--config` file bypasses the global and
/// project layers.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
