//! Types for the walker module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::format::AudioFormat;

/// One directory level's worth of work.
///
/// Child requests differ from their parent only in the two roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub target_format: AudioFormat,
    pub recurse: bool,
    pub dry_run: bool,
    pub compare: bool,
}

impl ConversionRequest {
    /// Creates a top-level request with all flags off.
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        target_format: AudioFormat,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            target_format,
            recurse: false,
            dry_run: false,
            compare: false,
        }
    }

    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = compare;
        self
    }

    /// Derives the request for a subdirectory named `name`.
    pub fn child(&self, input_dir: &Path, name: &std::ffi::OsStr) -> Self {
        Self {
            input_root: input_dir.to_path_buf(),
            output_root: self.output_root.join(name),
            ..self.clone()
        }
    }
}

/// A mutating step. Real runs perform it, dry runs only describe it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannedAction {
    CreateDirectory { path: PathBuf },
    Transcode { input: PathBuf, output: PathBuf },
    Copy { source: PathBuf, destination: PathBuf },
}

impl fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateDirectory { path } => write!(f, "create directory {}", path.display()),
            Self::Transcode { input, output } => {
                write!(f, "transcode {} -> {}", input.display(), output.display())
            }
            Self::Copy {
                source,
                destination,
            } => write!(f, "copy {} -> {}", source.display(), destination.display()),
        }
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    Converted { output: PathBuf, size_bytes: u64 },
    Copied { output: PathBuf, size_bytes: u64 },
    AlreadyExists { output: PathBuf },
    Planned { action: PlannedAction },
    Failed { input: PathBuf, reason: String },
}

/// A file or directory that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub path: PathBuf,
    pub reason: String,
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub converted: usize,
    pub copied: usize,
    pub skipped: usize,
    pub planned: usize,
    pub directories_processed: usize,
    /// Files that failed.
    pub failures: Vec<Failure>,
    /// Directories whose subtree was abandoned.
    pub failed_directories: Vec<Failure>,
}

impl RunSummary {
    /// Folds one file outcome into the totals.
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Converted { .. } => self.converted += 1,
            FileOutcome::Copied { .. } => self.copied += 1,
            FileOutcome::AlreadyExists { .. } => self.skipped += 1,
            FileOutcome::Planned { .. } => self.planned += 1,
            FileOutcome::Failed { input, reason } => self.failures.push(Failure {
                path: input.clone(),
                reason: reason.clone(),
            }),
        }
    }

    /// Whether nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.failed_directories.is_empty()
    }

    /// Number of files that were transcoded or copied.
    pub fn written(&self) -> usize {
        self.converted + self.copied
    }
}
