use async_trait::async_trait;

use crate::config::{AudioFormat, SpeechSettings};
use crate::error::Result;

/// Request to send to a speech provider
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub model: String,
    pub voice: String,
    pub input: String,
    pub format: AudioFormat,
}

impl SpeechRequest {
    /// Build a request for `input` using the given settings
    pub fn new(settings: &SpeechSettings, input: impl Into<String>) -> Self {
        Self {
            model: settings.model.clone(),
            voice: settings.voice.clone(),
            input: input.into(),
            format: settings.format,
        }
    }
}

/// Trait for text-to-speech providers
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize the request's input, returning the raw audio bytes
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>>;

    /// Get the provider name for display
    fn name(&self) -> &'static str;

    /// Check if the provider is available (API key set, etc.)
    fn is_available(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_settings() {
        let settings = SpeechSettings::default();
        let request = SpeechRequest::new(&settings, "Hello world. ");
        assert_eq!(request.model, "tts-1");
        assert_eq!(request.voice, "nova");
        assert_eq!(request.format, AudioFormat::Aac);
        assert_eq!(request.input, "Hello world. ");
    }
}
