use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error(
        "API key not found for {provider}. Set {env_var} environment variable or add to config."
    )]
    MissingApiKey { provider: String, env_var: String },

    #[error("Rate limit exceeded{}", .retry_after.map(|s| format!(". Retry after {} seconds", s)).unwrap_or_default())]
    RateLimited { retry_after: Option<u64> },

    #[error("API error{}: {message}", status_code.map(|c| format!(" (HTTP {})", c)).unwrap_or_default())]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, SpeechError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = SpeechError::ApiError {
            message: "Invalid voice".to_string(),
            status_code: Some(400),
        };
        assert_eq!(err.to_string(), "API error (HTTP 400): Invalid voice");

        let err = SpeechError::ApiError {
            message: "connection refused".to_string(),
            status_code: None,
        };
        assert_eq!(err.to_string(), "API error: connection refused");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = SpeechError::RateLimited {
            retry_after: Some(20),
        };
        assert_eq!(err.to_string(), "Rate limit exceeded. Retry after 20 seconds");

        let err = SpeechError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }
}
