//! Input document loading.

use crate::error::PipelineError;
use std::fs;
use std::path::Path;

/// Default input file, relative to the working directory.
pub const DEFAULT_INPUT: &str = "input.txt";

/// Read the whole input document into memory.
pub fn load_input(path: &Path) -> Result<String, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingInput {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(|source| PipelineError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}
