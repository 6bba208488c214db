//! Audio assembly: per-chunk segments merged into one output file.

pub mod assembler;
pub mod merger;

pub use assembler::Assembler;
pub use merger::{AudioMerger, FfmpegMerger, MergeError};
