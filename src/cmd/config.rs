//! Config command for showing the effective textecho configuration

use anyhow::Result;

use textecho::config::Config;

use crate::cmd::ui::{Output, OutputMode};

/// Print the effective configuration.
pub fn cmd_config(config: &Config, out: &Output) -> Result<()> {
    match out.mode() {
        OutputMode::Json => out.json(&serde_json::to_value(config)?),
        OutputMode::Human | OutputMode::Quiet => out.raw(&config.to_yaml()?),
    }
    Ok(())
}
