//! Types for the transcoder module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::format::AudioFormat;

/// A single file to transcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeJob {
    /// Source audio file.
    pub input_path: PathBuf,
    /// Destination path, already carrying the target extension.
    pub output_path: PathBuf,
    /// Requested output format.
    pub target: AudioFormat,
}

/// Result of a successful transcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeResult {
    /// Path of the produced file.
    pub output_path: PathBuf,
    /// Size of the produced file in bytes.
    pub output_size_bytes: u64,
    /// Wall time spent in the tool.
    pub duration_ms: u64,
}
