//! Synthesizer: one long-lived speech provider plus the run's fixed settings.

use speech_client::{AudioFormat, SpeechError, SpeechProvider, SpeechRequest, SpeechSettings};
use std::sync::Arc;

/// Sends chunks to the speech provider, one request at a time.
pub struct Synthesizer {
    provider: Arc<dyn SpeechProvider>,
    settings: SpeechSettings,
}

impl Synthesizer {
    /// Create a synthesizer around an already-constructed provider.
    pub fn new(provider: Arc<dyn SpeechProvider>, settings: SpeechSettings) -> Self {
        Self { provider, settings }
    }

    /// Audio format every segment is returned in.
    pub fn format(&self) -> AudioFormat {
        self.settings.format
    }

    /// Provider name for display.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Check the provider can be used before any text is sent.
    pub fn check(&self) -> Result<(), SpeechError> {
        self.provider.is_available()
    }

    /// Synthesize one chunk of text into raw audio bytes.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let request = SpeechRequest::new(&self.settings, text);
        self.provider.synthesize(&request).await
    }
}
