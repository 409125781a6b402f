//! Configuration management for textecho.
//!
//! Configuration is plain YAML. Every section is optional and falls back to
//! defaults, so an empty file (or no file at all) is a valid configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;
pub mod validation;

pub use defaults::*;

/// Project config location, relative to the working directory
pub const PROJECT_CONFIG_PATH: &str = ".textecho/config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/textecho/config.yaml)
    /// 2. Project config (.textecho/config.yaml)
    pub fn load() -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Path::new(PROJECT_CONFIG_PATH),
        )
    }

    /// Load a single config file without merging.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content).context("Failed to parse config")?
        };

        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from the given global and project paths.
    /// Either file may be missing; project values override global values.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = Some(project_path)
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.validate()?;

        Ok(config)
    }

    /// Render the effective configuration as YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

/// Returns the path to the global config file at ~/.config/textecho/config.yaml
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/textecho/config.yaml"))
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub rules: Option<PartialRulesConfig>,
    pub remote: Option<PartialRemoteConfig>,
    pub session: Option<SessionConfig>,
    pub analytics: Option<AnalyticsConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialRulesConfig {
    pub min_length: Option<usize>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialRemoteConfig {
    pub min_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub rejection_probability: Option<f64>,
    pub transport_failure_probability: Option<f64>,
    pub rejection_messages: Option<Vec<String>>,
    pub seed: Option<u64>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Failed to parse config")
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_rules = self.rules.unwrap_or_default();
        let project_rules = project.rules.unwrap_or_default();
        let global_remote = self.remote.unwrap_or_default();
        let project_remote = project.remote.unwrap_or_default();

        Config {
            rules: RulesConfig {
                // Project value > global value > default
                min_length: project_rules
                    .min_length
                    .or(global_rules.min_length)
                    .unwrap_or_else(defaults::default_min_length),
            },
            remote: RemoteConfig {
                min_delay_ms: project_remote
                    .min_delay_ms
                    .or(global_remote.min_delay_ms)
                    .unwrap_or_else(defaults::default_min_delay_ms),
                max_delay_ms: project_remote
                    .max_delay_ms
                    .or(global_remote.max_delay_ms)
                    .unwrap_or_else(defaults::default_max_delay_ms),
                rejection_probability: project_remote
                    .rejection_probability
                    .or(global_remote.rejection_probability)
                    .unwrap_or_else(defaults::default_rejection_probability),
                transport_failure_probability: project_remote
                    .transport_failure_probability
                    .or(global_remote.transport_failure_probability)
                    .unwrap_or_else(defaults::default_transport_failure_probability),
                rejection_messages: project_remote
                    .rejection_messages
                    .or(global_remote.rejection_messages)
                    .unwrap_or_else(defaults::default_rejection_messages),
                seed: project_remote.seed.or(global_remote.seed),
            },
            // Session config: project overrides global, or use default
            session: project.session.or(self.session).unwrap_or_default(),
            // Analytics config: project overrides global, or use default
            analytics: project.analytics.or(self.analytics).unwrap_or_default(),
        }
    }
}
