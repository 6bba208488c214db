//! Lossless audio concatenation using FFmpeg.

use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use thiserror::Error;

/// Why a merge did not produce the final artifact.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("No audio segments to merge")]
    NoSegments,

    #[error("{tool} not found: {detail}")]
    NotFound { tool: String, detail: String },

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} exited with {}: {stderr}", code.map(|c| format!("status {}", c)).unwrap_or_else(|| "a signal".to_string()))]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{} was not produced or is empty", path.display())]
    EmptyOutput { path: PathBuf },

    #[error("Failed to prepare merge: {0}")]
    Io(#[from] io::Error),
}

/// Joins audio segments, in order, into one file without re-encoding.
pub trait AudioMerger: Send + Sync {
    /// Concatenate `inputs` into `output`.
    fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<(), MergeError>;

    /// Check that the merge tool can be run.
    fn is_available(&self) -> Result<(), MergeError>;
}

/// Merger backed by FFmpeg's concat demuxer with stream copy.
pub struct FfmpegMerger {
    /// Explicit binary path; `None` searches `PATH`.
    binary: Option<PathBuf>,
}

impl FfmpegMerger {
    pub fn new(binary: Option<PathBuf>) -> Self {
        Self { binary }
    }

    /// Resolve the FFmpeg executable, preferring the configured path.
    fn executable(&self) -> Result<PathBuf, MergeError> {
        match &self.binary {
            Some(path) if path.exists() => Ok(path.clone()),
            Some(path) => Err(MergeError::NotFound {
                tool: "ffmpeg".to_string(),
                detail: format!("{} does not exist", path.display()),
            }),
            None => which::which("ffmpeg").map_err(|e| MergeError::NotFound {
                tool: "ffmpeg".to_string(),
                detail: e.to_string(),
            }),
        }
    }

    /// Get the FFmpeg command for the resolved executable.
    fn ffmpeg_command(&self) -> Result<Command, MergeError> {
        Ok(Command::new(self.executable()?))
    }
}

/// Run a tool to completion, mapping each failure mode to its own error.
fn run_tool(tool: &str, cmd: &mut Command) -> Result<(), MergeError> {
    let output = cmd.output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            MergeError::NotFound {
                tool: tool.to_string(),
                detail: e.to_string(),
            }
        } else {
            MergeError::Spawn {
                tool: tool.to_string(),
                source: e,
            }
        }
    })?;

    if !output.status.success() {
        return Err(MergeError::Failed {
            tool: tool.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

/// Build the concat demuxer list for `inputs`.
fn concat_list(inputs: &[PathBuf]) -> Result<String, MergeError> {
    let mut list_content = String::new();
    for path in inputs {
        // The demuxer resolves relative entries against the list file.
        let absolute = std::path::absolute(path)?;
        let path_str = absolute.to_string_lossy().replace('\'', "'\\''");
        list_content.push_str(&format!("file '{}'\n", path_str));
    }
    Ok(list_content)
}

impl AudioMerger for FfmpegMerger {
    fn concat(&self, inputs: &[PathBuf], output: &Path) -> Result<(), MergeError> {
        if inputs.is_empty() {
            return Err(MergeError::NoSegments);
        }

        let temp_dir = TempDir::new()?;
        let list_file = temp_dir.path().join("concat_list.txt");
        std::fs::write(&list_file, concat_list(inputs)?)?;

        debug!(
            "ffmpeg concat of {} segments into {}",
            inputs.len(),
            output.display()
        );

        let mut cmd = self.ffmpeg_command()?;
        cmd.args(["-y", "-f", "concat", "-safe", "0", "-i"])
            .arg(&list_file)
            .args(["-c", "copy"])
            .arg(output);
        run_tool("ffmpeg", &mut cmd)
    }

    fn is_available(&self) -> Result<(), MergeError> {
        let mut cmd = self.ffmpeg_command()?;
        cmd.arg("-version");
        run_tool("ffmpeg", &mut cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_list_escapes_quotes() {
        let inputs = vec![
            PathBuf::from("/tmp/tmp_output_0.aac"),
            PathBuf::from("/tmp/it's/tmp_output_1.aac"),
        ];
        let list = concat_list(&inputs).unwrap();
        assert_eq!(
            list,
            "file '/tmp/tmp_output_0.aac'\nfile '/tmp/it'\\''s/tmp_output_1.aac'\n"
        );
    }

    #[test]
    fn test_concat_list_makes_paths_absolute() {
        let list = concat_list(&[PathBuf::from("tmp_output_0.aac")]).unwrap();
        let entry = list.trim_start_matches("file '").trim_end_matches("'\n");
        assert!(Path::new(entry).is_absolute());
        assert!(entry.ends_with("tmp_output_0.aac"));
    }

    #[test]
    fn test_missing_configured_binary() {
        let merger = FfmpegMerger::new(Some(PathBuf::from("/nonexistent/bin/ffmpeg")));
        let err = merger.is_available().unwrap_err();
        assert!(matches!(err, MergeError::NotFound { .. }));

        let err = merger
            .concat(
                &[PathBuf::from("/tmp/a.aac"), PathBuf::from("/tmp/b.aac")],
                Path::new("/tmp/out.aac"),
            )
            .unwrap_err();
        assert!(matches!(err, MergeError::NotFound { .. }));
    }

    #[test]
    fn test_concat_requires_inputs() {
        let merger = FfmpegMerger::new(None);
        let err = merger.concat(&[], Path::new("/tmp/out.aac")).unwrap_err();
        assert!(matches!(err, MergeError::NoSegments));
    }

    #[test]
    fn test_failed_display() {
        let err = MergeError::Failed {
            tool: "ffmpeg".to_string(),
            code: Some(1),
            stderr: "Invalid data found when processing input".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ffmpeg exited with status 1: Invalid data found when processing input"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_reported() {
        // `false` ignores its arguments and exits with status 1.
        let Ok(false_bin) = which::which("false") else {
            return;
        };
        let merger = FfmpegMerger::new(Some(false_bin));
        let err = merger.is_available().unwrap_err();
        assert!(matches!(err, MergeError::Failed { code: Some(1), .. }));
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_concat_command_line() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dir = temp_dir.path();
        // Records each argument, the list file ($7) and writes the output (${10}).
        let script = write_script(
            dir,
            "fake-ffmpeg",
            &format!(
                "for arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{args}'; done\n\
                 cp \"$7\" '{list}'\n\
                 printf merged > \"${{10}}\"\n",
                args = dir.join("args.txt").display(),
                list = dir.join("list.txt").display(),
            ),
        );

        let inputs: Vec<PathBuf> = (0..3)
            .map(|i| dir.join(format!("tmp_output_{}.aac", i)))
            .collect();
        let output = dir.join("output.aac");

        let merger = FfmpegMerger::new(Some(script));
        merger.concat(&inputs, &output).unwrap();

        let args = std::fs::read_to_string(dir.join("args.txt")).unwrap();
        let args: Vec<&str> = args.lines().collect();
        assert_eq!(args.len(), 10);
        assert_eq!(&args[..6], ["-y", "-f", "concat", "-safe", "0", "-i"]);
        assert!(args[6].ends_with("concat_list.txt"));
        assert_eq!(&args[7..9], ["-c", "copy"]);
        assert_eq!(args[9], output.to_str().unwrap());

        let list = std::fs::read_to_string(dir.join("list.txt")).unwrap();
        let expected: String = inputs
            .iter()
            .map(|p| format!("file '{}'\n", p.display()))
            .collect();
        assert_eq!(list, expected);
        assert_eq!(std::fs::read(&output).unwrap(), b"merged");
    }

    #[cfg(unix)]
    #[test]
    fn test_concat_failure_is_reported() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dir = temp_dir.path();
        let script = write_script(dir, "failing-ffmpeg", "echo 'concat failed' >&2\nexit 1\n");

        let merger = FfmpegMerger::new(Some(script));
        let err = merger
            .concat(
                &[dir.join("tmp_output_0.aac"), dir.join("tmp_output_1.aac")],
                &dir.join("output.aac"),
            )
            .unwrap_err();

        match err {
            MergeError::Failed { tool, code, stderr } => {
                assert_eq!(tool, "ffmpeg");
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "concat failed");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }
}
