//! Shared text-to-speech client library for the gen-speech workspace
//!
//! Provides a provider trait for remote speech synthesis plus:
//! - OpenAI `/audio/speech` (direct HTTP)
//! - A recording mock for tests

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;

pub use config::{AudioFormat, ProviderConfig, SpeechSettings};
pub use error::{Result, SpeechError};
pub use provider::{SpeechProvider, SpeechRequest};
pub use providers::{MockProvider, OpenAiSpeechProvider, get_provider};
