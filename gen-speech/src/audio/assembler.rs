//! Per-chunk audio segments and their assembly into the final file.

use super::merger::{AudioMerger, MergeError};
use crate::error::PipelineError;
use log::{debug, info, warn};
use speech_client::AudioFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// Lifecycle of an assembly, strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    Empty,
    Collecting,
    Merging,
    Done,
}

/// Owns the temporary segment files of one run.
///
/// Dropping an assembler that never reached [`AssemblyState::Done`] removes the
/// segments it wrote, unless it was created with `keep_partial`.
pub struct Assembler {
    dir: PathBuf,
    format: AudioFormat,
    keep_partial: bool,
    segments: Vec<PathBuf>,
    state: AssemblyState,
}

impl Assembler {
    pub fn new(dir: impl Into<PathBuf>, format: AudioFormat, keep_partial: bool) -> Self {
        Self {
            dir: dir.into(),
            format,
            keep_partial,
            segments: Vec::new(),
            state: AssemblyState::Empty,
        }
    }

    /// Path of the temporary artifact for chunk `index`.
    pub fn segment_path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("tmp_output_{}.{}", index, self.format.extension()))
    }

    /// Path of the final artifact.
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(format!("output.{}", self.format.extension()))
    }

    /// Persist the audio for chunk `index`.
    pub fn add_segment(&mut self, index: usize, audio: &[u8]) -> Result<PathBuf, PipelineError> {
        debug_assert!(matches!(
            self.state,
            AssemblyState::Empty | AssemblyState::Collecting
        ));

        let path = self.segment_path(index);
        fs::write(&path, audio).map_err(|source| PipelineError::Artifact {
            path: path.clone(),
            source,
        })?;

        self.segments.push(path.clone());
        self.state = AssemblyState::Collecting;
        Ok(path)
    }

    /// Produce the final artifact from the collected segments.
    ///
    /// A single segment is renamed into place. Several are concatenated with
    /// `merger`, checked, and then deleted.
    pub fn finish(mut self, merger: &dyn AudioMerger) -> Result<PathBuf, PipelineError> {
        let output = self.output_path();
        self.state = AssemblyState::Merging;

        match self.segments.len() {
            0 => return Err(MergeError::NoSegments.into()),
            1 => {
                fs::rename(&self.segments[0], &output).map_err(|source| {
                    PipelineError::Artifact {
                        path: output.clone(),
                        source,
                    }
                })?;
            }
            n => {
                // Only a file written by this merge may count as its result.
                remove_stale(&output)?;

                info!("concatenating {} files", n);
                if let Err(e) = merge_checked(merger, &self.segments, &output) {
                    let _ = fs::remove_file(&output);
                    return Err(e.into());
                }
                remove_files(&self.segments);
            }
        }

        self.segments.clear();
        self.state = AssemblyState::Done;
        Ok(output)
    }
}

/// Run the merge and verify that it left a usable file behind.
fn merge_checked(
    merger: &dyn AudioMerger,
    inputs: &[PathBuf],
    output: &Path,
) -> Result<(), MergeError> {
    merger.concat(inputs, output)?;

    let produced = fs::metadata(output).map(|m| m.len() > 0).unwrap_or(false);
    if !produced {
        return Err(MergeError::EmptyOutput {
            path: output.to_path_buf(),
        });
    }
    Ok(())
}

fn remove_stale(output: &Path) -> Result<(), PipelineError> {
    match fs::remove_file(output) {
        Ok(()) => {
            debug!("removed previous {}", output.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PipelineError::Artifact {
            path: output.to_path_buf(),
            source,
        }),
    }
}

fn remove_files(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove {}: {}", path.display(), e);
        }
    }
}

impl Drop for Assembler {
    fn drop(&mut self) {
        if self.state == AssemblyState::Done || self.segments.is_empty() {
            return;
        }

        if self.keep_partial {
            info!(
                "keeping {} partial segment(s) in {}",
                self.segments.len(),
                self.dir.display()
            );
        } else {
            debug!("removing {} partial segment(s)", self.segments.len());
            remove_files(&self.segments);
        }
    }
}
