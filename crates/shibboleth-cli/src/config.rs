//! Configuration management for the Shibboleth CLI.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use shibboleth_engine::prelude::{Protocol, SamplingPolicy, SessionConfig};

/// Shibboleth project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub judge: JudgeConfig,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct JudgeConfig {
    /// How challenge word sets are sampled: "dense" or "random".
    #[serde(default)]
    pub policy: SamplingPolicy,
    /// How verdicts are surfaced: "immediate" or "batched".
    #[serde(default)]
    pub protocol: Protocol,
}

impl Config {
    /// Load config from shibboleth.toml in the current or parent
    /// directories, falling back to defaults.
    pub fn load() -> Result<Self> {
        if let Some(path) = find_config_file() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            policy: self.judge.policy,
            protocol: self.judge.protocol,
        }
    }
}

/// Find shibboleth.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join("shibboleth.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Get the Shibboleth data directory (.shibboleth/).
pub fn data_dir() -> Result<PathBuf> {
    let dir = std::env::current_dir()?.join(".shibboleth");
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.judge.policy, SamplingPolicy::Dense);
        assert_eq!(config.judge.protocol, Protocol::Immediate);
    }

    #[test]
    fn judge_section_parses_lowercase_names() {
        let config: Config = toml::from_str(
            "[judge]\npolicy = \"random\"\nprotocol = \"batched\"\n",
        )
        .unwrap();
        assert_eq!(config.judge.policy, SamplingPolicy::Random);
        assert_eq!(config.judge.protocol, Protocol::Batched);
    }

    #[test]
    fn default_config_roundtrips_through_toml() {
        let rendered = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.judge.policy, Config::default().judge.policy);
        assert_eq!(parsed.judge.protocol, Config::default().judge.protocol);
    }
}
