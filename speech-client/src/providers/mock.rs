//! Mock speech provider for testing
//!
//! Records every request it receives and can be told to fail on a given call,
//! so callers can check ordering and fail-fast behavior without a network.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, SpeechError};
use crate::provider::{SpeechProvider, SpeechRequest};

/// A mock provider for testing synthesis pipelines
pub struct MockProvider {
    /// Zero-based call index to fail on (None = always succeed)
    fail_on: Option<usize>,
    /// Current call count
    call_count: AtomicUsize,
    /// Error to return on the failing call
    fail_with: Mutex<Option<SpeechError>>,
    /// Audio bytes to return on success
    audio: Vec<u8>,
    /// Every request received, in order
    requests: Mutex<Vec<SpeechRequest>>,
}

impl MockProvider {
    /// Create a provider that always returns `audio`
    pub fn always_succeeds(audio: &[u8]) -> Self {
        Self {
            fail_on: None,
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(None),
            audio: audio.to_vec(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that fails with `error` on call `n` (zero-based)
    /// and returns `audio` on every other call
    pub fn fails_on_call(n: usize, error: SpeechError, audio: &[u8]) -> Self {
        Self {
            fail_on: Some(n),
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(Some(error)),
            audio: audio.to_vec(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Get the number of times synthesize() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Inputs of every request received so far, in call order
    pub fn inputs(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.iter().map(|r| r.input.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SpeechProvider for MockProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        let call_num = self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        if self.fail_on == Some(call_num) {
            let error = self.fail_with.lock().ok().and_then(|mut e| e.take());
            return Err(error.unwrap_or_else(|| SpeechError::ApiError {
                message: "mock failure".to_string(),
                status_code: None,
            }));
        }

        Ok(self.audio.clone())
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> Result<()> {
        Ok(())
    }
}
