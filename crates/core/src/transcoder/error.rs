//! Error types for the transcoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while transcoding.
#[derive(Debug, Error)]
pub enum TranscoderError {
    /// The external tool is not installed or not on the search path.
    #[error("Transcoder not found at path: {path}")]
    MissingTranscoder { path: PathBuf },

    /// The tool ran but reported failure.
    #[error("Transcode failed: {reason}")]
    Failed {
        reason: String,
        stderr: Option<String>,
    },

    /// The tool exited successfully without writing the output.
    #[error("Transcoder produced no output at {path}")]
    OutputMissing { path: PathBuf },

    /// The tool did not finish in time and was killed.
    #[error("Transcode timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error while running the tool.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscoderError {
    /// Creates a failure error with optional stderr output.
    pub fn failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Whether the tool itself is unavailable, as opposed to one file failing.
    pub fn is_missing_tool(&self) -> bool {
        matches!(self, Self::MissingTranscoder { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TranscoderError::failed("exit code 1", Some("Invalid data".to_string()));
        assert_eq!(err.to_string(), "Transcode failed: exit code 1");

        let err = TranscoderError::MissingTranscoder {
            path: PathBuf::from("ffmpeg"),
        };
        assert!(err.to_string().contains("ffmpeg"));
        assert!(err.is_missing_tool());
        assert!(!TranscoderError::Timeout { timeout_secs: 5 }.is_missing_tool());
    }
}
