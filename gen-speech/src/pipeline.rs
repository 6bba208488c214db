//! Text-to-audio pipeline: load, chunk, synthesize, assemble.

use crate::audio::{Assembler, AudioMerger};
use crate::error::PipelineError;
use crate::text::{self, INPUT_LIMIT, TextChunk};
use crate::tts::Synthesizer;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

/// Progress after each synthesized chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Chunks synthesized so far
    pub completed: usize,
    pub total_chunks: usize,
    /// Characters sent so far, separators included
    pub chars_sent: usize,
    /// Characters in the input document
    pub total_chars: usize,
}

/// How a document will be split, without synthesizing anything.
#[derive(Debug, Clone)]
pub struct Plan {
    pub sentences: usize,
    pub chunks: Vec<TextChunk>,
    pub total_chars: usize,
}

/// Linear conversion pipeline.
pub struct Pipeline {
    synthesizer: Synthesizer,
    merger: Arc<dyn AudioMerger>,
    dir: PathBuf,
    keep_partial: bool,
}

impl Pipeline {
    /// Create a pipeline writing temporaries and output into `dir`.
    pub fn new(
        synthesizer: Synthesizer,
        merger: Arc<dyn AudioMerger>,
        dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            synthesizer,
            merger,
            dir: dir.into(),
            keep_partial: false,
        }
    }

    /// Leave temporary segments on disk when a run aborts.
    pub fn keep_partial(mut self, keep: bool) -> Self {
        self.keep_partial = keep;
        self
    }

    /// Split `text` into chunks.
    pub fn plan(text: &str) -> Plan {
        Plan {
            sentences: text::split_sentences(text).len(),
            chunks: text::process_text(text, INPUT_LIMIT),
            total_chars: text.chars().count(),
        }
    }

    /// Convert loaded text into the final audio file.
    pub async fn convert<F>(&self, text: &str, on_progress: F) -> Result<PathBuf, PipelineError>
    where
        F: FnMut(&Progress),
    {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        self.run(Self::plan(text), on_progress).await
    }

    async fn run<F>(&self, plan: Plan, mut on_progress: F) -> Result<PathBuf, PipelineError>
    where
        F: FnMut(&Progress),
    {
        info!(
            "full input has {} sentences and will be sent in {} chunks",
            plan.sentences,
            plan.chunks.len()
        );

        // A multi-chunk run ends in a merge; fail before spending any quota.
        if plan.chunks.len() > 1 {
            self.merger.is_available()?;
        }

        let mut assembler =
            Assembler::new(&self.dir, self.synthesizer.format(), self.keep_partial);
        let total_chunks = plan.chunks.len();
        let mut chars_sent = 0;

        for chunk in &plan.chunks {
            let len = chunk.char_len();
            chars_sent += len;
            info!(
                "sending chunk #{} with {} characters ({} of {} total characters done)",
                chunk.index, len, chars_sent, plan.total_chars
            );

            let audio = self
                .synthesizer
                .synthesize(&chunk.text)
                .await
                .map_err(|source| PipelineError::Synthesis {
                    index: chunk.index,
                    source,
                })?;

            let path = assembler.add_segment(chunk.index, &audio)?;
            debug!(
                "audio #{} created ({} bytes) at {}",
                chunk.index,
                audio.len(),
                path.display()
            );

            on_progress(&Progress {
                completed: chunk.index + 1,
                total_chunks,
                chars_sent,
                total_chars: plan.total_chars,
            });
        }

        assembler.finish(self.merger.as_ref())
    }
}
