//! Failures that abort a conversion run.

use crate::audio::MergeError;
use speech_client::SpeechError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{} does not exist", path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input contains no text to synthesize")]
    EmptyInput,

    #[error("Synthesis failed for chunk #{index}: {source}")]
    Synthesis {
        index: usize,
        #[source]
        source: SpeechError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Merge(#[from] MergeError),
}
