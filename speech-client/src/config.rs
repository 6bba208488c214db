use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SpeechError};

/// Model used for every synthesis request
pub const DEFAULT_MODEL: &str = "tts-1";

/// Voice used for every synthesis request
pub const DEFAULT_VOICE: &str = "nova";

/// Default API endpoint for the OpenAI provider
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Audio container returned by the speech endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
}

impl AudioFormat {
    /// Name used in the `response_format` request field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
        }
    }

    /// File extension for artifacts in this format
    pub fn extension(&self) -> &'static str {
        // The service returns opus in an ogg container
        match self {
            Self::Opus => "ogg",
            other => other.as_str(),
        }
    }

    /// Parse a format name
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "opus" => Ok(Self::Opus),
            "aac" => Ok(Self::Aac),
            "flac" => Ok(Self::Flac),
            "wav" => Ok(Self::Wav),
            _ => Err(SpeechError::ConfigError(format!("Unknown audio format: {}", s))),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed model/voice/format triple a run synthesizes with.
///
/// Built once at startup and shared read-only by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSettings {
    pub model: String,
    pub voice: String,
    pub format: AudioFormat,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            format: AudioFormat::Aac,
        }
    }
}

/// Provider-specific configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (optional, can use env var instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Custom base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Base URL to use, falling back to the public endpoint
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}
