//! Depth-first tree conversion.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, warn};

use super::error::WalkError;
use super::types::{ConversionRequest, Failure, FileOutcome, PlannedAction, RunSummary};
use crate::copier::FsCopier;
use crate::format::FileClass;
use crate::transcoder::{TranscodeJob, Transcoder};

/// Pending work on the traversal stack.
enum Work {
    /// Process a directory level.
    Level(ConversionRequest),
    /// A level and all of its subdirectories are done.
    Finished(PathBuf),
}

/// Direct entries of one input directory, sorted by name.
#[derive(Default)]
struct Listing {
    files: Vec<(PathBuf, OsString)>,
    dirs: Vec<(PathBuf, OsString)>,
    unreadable: Vec<(PathBuf, std::io::Error)>,
}

/// Walks an input tree and mirrors it into an output tree.
///
/// Work is strictly sequential: one level, one file, one transcoder
/// process at a time.
pub struct TreeConverter<T: Transcoder> {
    transcoder: T,
    copier: FsCopier,
}

impl<T: Transcoder> TreeConverter<T> {
    /// Creates a new tree converter.
    pub fn new(transcoder: T, copier: FsCopier) -> Self {
        Self { transcoder, copier }
    }

    /// Returns the transcoder in use.
    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    /// Runs a request and, if `recurse` is set, every subdirectory below it.
    ///
    /// Per-file failures are recorded and the walk goes on. A level whose
    /// output root cannot be created, or whose input cannot be listed, is
    /// abandoned together with its subtree.
    pub async fn run(&self, request: ConversionRequest) -> RunSummary {
        let mut summary = RunSummary::default();
        let top_output = request.output_root.clone();
        let mut pending = vec![Work::Level(request)];

        while let Some(work) = pending.pop() {
            match work {
                Work::Level(level) => {
                    match self.process_level(&level, &top_output, &mut summary).await {
                        Ok(children) => {
                            pending.push(Work::Finished(level.input_root));
                            // Reversed so the first child is popped first.
                            pending.extend(children.into_iter().rev().map(Work::Level));
                        }
                        Err(e) => {
                            error!(
                                "Abandoning {} and its subdirectories: {}",
                                level.input_root.display(),
                                e
                            );
                            summary.failed_directories.push(Failure {
                                path: level.input_root,
                                reason: e.to_string(),
                            });
                        }
                    }
                }
                Work::Finished(input_root) => {
                    summary.directories_processed += 1;
                    info!("Successfully processed {}", input_root.display());
                }
            }
        }

        summary
    }

    /// Processes the direct files of one level and returns its child requests.
    async fn process_level(
        &self,
        request: &ConversionRequest,
        top_output: &Path,
        summary: &mut RunSummary,
    ) -> Result<Vec<ConversionRequest>, WalkError> {
        self.ensure_output_root(request).await?;

        let listing = Self::list(&request.input_root).await?;

        for (path, source) in listing.unreadable {
            let reason = WalkError::Metadata {
                path: path.clone(),
                source,
            }
            .to_string();
            error!("{}", reason);
            summary.record(&FileOutcome::Failed {
                input: path,
                reason,
            });
        }

        // Outputs planned or written so far at this level. Two inputs can
        // map to the same output (`a.flac` and `a.wav`), and a dry run must
        // skip the second one just like a real run does.
        let mut claimed = HashSet::new();
        for (path, name) in &listing.files {
            let outcome = self.process_file(request, path, name, &mut claimed).await;
            summary.record(&outcome);
        }

        if !request.recurse {
            return Ok(Vec::new());
        }

        // Never descend into our own output when it sits inside the input.
        let excluded = fs::canonicalize(top_output).await.ok();
        let mut children = Vec::with_capacity(listing.dirs.len());
        for (path, name) in listing.dirs {
            if let Some(ref excluded) = excluded {
                if fs::canonicalize(&path).await.ok().as_ref() == Some(excluded) {
                    debug!("Skipping output directory {}", path.display());
                    continue;
                }
            }
            children.push(request.child(&path, &name));
        }
        Ok(children)
    }

    /// Creates the level's output root unless it is already a directory.
    async fn ensure_output_root(&self, request: &ConversionRequest) -> Result<(), WalkError> {
        let is_dir = fs::metadata(&request.output_root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if is_dir {
            return Ok(());
        }

        let action = PlannedAction::CreateDirectory {
            path: request.output_root.clone(),
        };
        if request.dry_run {
            info!("[dry-run] Would {}", action);
            return Ok(());
        }

        info!("Will {}", action);
        fs::create_dir_all(&request.output_root)
            .await
            .map_err(|source| WalkError::OutputRoot {
                path: request.output_root.clone(),
                source,
            })
    }

    /// Splits a directory's entries into files and subdirectories.
    ///
    /// Symlinks are followed.
    async fn list(dir: &Path) -> Result<Listing, WalkError> {
        let read_dir_error = |source| WalkError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir).await.map_err(read_dir_error)?;
        let mut listing = Listing::default();

        while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
            let path = entry.path();
            match fs::metadata(&path).await {
                Ok(meta) if meta.is_dir() => listing.dirs.push((path, entry.file_name())),
                Ok(meta) if meta.is_file() => listing.files.push((path, entry.file_name())),
                Ok(_) => debug!("Ignoring special file {}", path.display()),
                Err(e) => listing.unreadable.push((path, e)),
            }
        }

        listing.files.sort_by(|a, b| a.1.cmp(&b.1));
        listing.dirs.sort_by(|a, b| a.1.cmp(&b.1));
        listing.unreadable.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(listing)
    }

    /// Handles one file, turning any error into a `Failed` outcome.
    async fn process_file(
        &self,
        request: &ConversionRequest,
        input: &Path,
        name: &OsStr,
        claimed: &mut HashSet<PathBuf>,
    ) -> FileOutcome {
        match self.try_process_file(request, input, name, claimed).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Failed to process {}: {}", input.display(), e);
                FileOutcome::Failed {
                    input: input.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_process_file(
        &self,
        request: &ConversionRequest,
        input: &Path,
        name: &OsStr,
        claimed: &mut HashSet<PathBuf>,
    ) -> Result<FileOutcome, WalkError> {
        let candidate = request.output_root.join(name);
        let class = FileClass::of(input, request.target_format);

        let (action, output) = match class {
            FileClass::ConvertibleAudio(_) => {
                let output = request
                    .output_root
                    .join(request.target_format.rename(&name.to_string_lossy()));
                let action = PlannedAction::Transcode {
                    input: input.to_path_buf(),
                    output: output.clone(),
                };
                (action, output)
            }
            FileClass::AlreadyTargetFormat | FileClass::Opaque => {
                if class == FileClass::AlreadyTargetFormat {
                    debug!("{} is already {}", input.display(), request.target_format);
                }
                let action = PlannedAction::Copy {
                    source: input.to_path_buf(),
                    destination: candidate.clone(),
                };
                (action, candidate)
            }
        };

        if claimed.contains(&output) {
            warn!(
                "{} is already produced from another file, skipping {}",
                output.display(),
                input.display()
            );
            return Ok(FileOutcome::AlreadyExists { output });
        }
        if output.exists() {
            warn!("{} already exists, skipping", output.display());
            return Ok(FileOutcome::AlreadyExists { output });
        }

        if request.dry_run {
            info!("[dry-run] Would {}", action);
            claimed.insert(output);
            return Ok(FileOutcome::Planned { action });
        }

        info!("Will {}", action);
        let written = if class.needs_transcode() {
            self.transcoder
                .transcode(TranscodeJob {
                    input_path: input.to_path_buf(),
                    output_path: output.clone(),
                    target: request.target_format,
                })
                .await
                .map(|result| FileOutcome::Converted {
                    output: result.output_path,
                    size_bytes: result.output_size_bytes,
                })
                .map_err(WalkError::from)
        } else {
            self.copier
                .copy_file(input, &output)
                .await
                .map(|size_bytes| FileOutcome::Copied {
                    output: output.clone(),
                    size_bytes,
                })
                .map_err(WalkError::from)
        };

        match written {
            Ok(outcome) => {
                claimed.insert(output);
                Ok(outcome)
            }
            Err(e) => {
                // The output did not exist before this call, so anything
                // there now is a partial write.
                Self::discard_partial(&output).await;
                Err(e)
            }
        }
    }

    /// Removes a partially written output so the next run retries it.
    async fn discard_partial(output: &Path) {
        if fs::symlink_metadata(output).await.is_err() {
            return;
        }
        match fs::remove_file(output).await {
            Ok(()) => debug!("Removed partial output {}", output.display()),
            Err(e) => warn!(
                "Failed to remove partial output {}: {}",
                output.display(),
                e
            ),
        }
    }
}
