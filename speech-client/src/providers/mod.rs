//! Speech provider implementations

pub mod mock;
mod openai;

pub use mock::MockProvider;
pub use openai::OpenAiSpeechProvider;

use crate::config::ProviderConfig;
use crate::error::{Result, SpeechError};
use crate::provider::SpeechProvider;

/// Environment variable holding the OpenAI API key
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Create the speech provider described by `config`
pub fn get_provider(config: &ProviderConfig) -> Result<Box<dyn SpeechProvider>> {
    let api_key = get_api_key(Some(config), OPENAI_API_KEY_ENV, "OpenAI")?;
    Ok(Box::new(OpenAiSpeechProvider::new(config.base_url(), api_key)?))
}

/// Get API key from config or environment variable
fn get_api_key(
    config: Option<&ProviderConfig>,
    env_var: &str,
    provider_name: &str,
) -> Result<String> {
    // Check config first
    if let Some(key) = config.and_then(|c| c.api_key.clone()) {
        return Ok(key);
    }

    // Fall back to environment variable
    std::env::var(env_var).map_err(|_| SpeechError::MissingApiKey {
        provider: provider_name.to_string(),
        env_var: env_var.to_string(),
    })
}
