//! gen-speech configuration management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use speech_client::ProviderConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenSpeechConfig {
    /// FFmpeg binary to merge with. None means search PATH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ffmpeg: Option<PathBuf>,

    /// Leave temporary segments on disk when a run aborts
    #[serde(default)]
    pub keep_partial: bool,

    /// Speech provider credentials and endpoint
    #[serde(default)]
    pub provider: ProviderConfig,
}

impl GenSpeechConfig {
    /// Get the config file path: ~/.config/cli-programs/gen-speech.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home
            .join(".config")
            .join("cli-programs")
            .join("gen-speech.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: GenSpeechConfig =
            toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}
