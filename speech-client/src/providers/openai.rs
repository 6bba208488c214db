//! OpenAI speech provider
//!
//! Direct HTTP implementation for the OpenAI `/audio/speech` endpoint.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use reqwest::header::RETRY_AFTER;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpeechError};
use crate::provider::{SpeechProvider, SpeechRequest};

/// Provider for the OpenAI text-to-speech API
pub struct OpenAiSpeechProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl OpenAiSpeechProvider {
    /// Create a new provider talking to `base_url`
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        let client = Client::new();

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.base_url)
    }
}

// OpenAI API request/response types

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

impl<'a> From<&'a SpeechRequest> for SpeechBody<'a> {
    fn from(request: &'a SpeechRequest) -> Self {
        Self {
            model: &request.model,
            input: &request.input,
            voice: &request.voice,
            response_format: request.format.as_str(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Extract a readable message from an error body
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl SpeechProvider for OpenAiSpeechProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        let body = SpeechBody::from(request);
        let url = self.speech_url();

        debug!(
            "POST {} ({} characters, model {}, voice {})",
            url,
            request.input.chars().count(),
            request.model,
            request.voice
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SpeechError::ApiError {
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse().ok());
                return Err(SpeechError::RateLimited { retry_after });
            }

            let error_text = response.text().await.unwrap_or_default();
            return Err(SpeechError::ApiError {
                message: error_message(&error_text),
                status_code: Some(status.as_u16()),
            });
        }

        let audio = response.bytes().await.map_err(|e| SpeechError::ApiError {
            message: format!("Failed to read audio response: {}", e),
            status_code: None,
        })?;

        Ok(audio.to_vec())
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn is_available(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SpeechError::MissingApiKey {
                provider: "OpenAI".to_string(),
                env_var: "OPENAI_API_KEY".to_string(),
            });
        }
        Ok(())
    }
}
