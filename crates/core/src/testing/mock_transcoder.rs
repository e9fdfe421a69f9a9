//! Mock transcoder for testing.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::transcoder::{TranscodeJob, TranscodeResult, Transcoder, TranscoderError};

/// A recorded transcode job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranscode {
    /// The job that was submitted.
    pub job: TranscodeJob,
    /// Whether the transcode succeeded.
    pub success: bool,
}

/// Mock implementation of the Transcoder trait.
///
/// Successful jobs write a small marker file at the output path, so the
/// walker sees real output on disk. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTranscoder {
    /// Recorded jobs.
    transcodes: Arc<RwLock<Vec<RecordedTranscode>>>,
    /// Input file names that always fail.
    failing_names: Arc<RwLock<HashSet<String>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<TranscoderError>>>,
    /// Whether to behave like an uninstalled tool.
    missing: Arc<RwLock<bool>>,
    /// Whether failed jobs leave a truncated output behind.
    partial_on_failure: Arc<RwLock<bool>>,
}

impl MockTranscoder {
    /// Create a new mock transcoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded jobs.
    pub async fn recorded_transcodes(&self) -> Vec<RecordedTranscode> {
        self.transcodes.read().await.clone()
    }

    /// Get the number of jobs submitted.
    pub async fn transcode_count(&self) -> usize {
        self.transcodes.read().await.len()
    }

    /// Clear recorded jobs.
    pub async fn clear_recorded(&self) {
        self.transcodes.write().await.clear();
    }

    /// Make every job whose input file is named `name` fail.
    pub async fn fail_on(&self, name: impl Into<String>) {
        self.failing_names.write().await.insert(name.into());
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: TranscoderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Pretend the tool is not installed.
    pub async fn set_missing(&self, missing: bool) {
        *self.missing.write().await = missing;
    }

    /// Write a few bytes to the output before failing, like a killed
    /// ffmpeg process does.
    pub async fn leave_partial_on_failure(&self, partial: bool) {
        *self.partial_on_failure.write().await = partial;
    }

    async fn fail(
        &self,
        job: TranscodeJob,
        err: TranscoderError,
    ) -> Result<TranscodeResult, TranscoderError> {
        if *self.partial_on_failure.read().await {
            tokio::fs::write(&job.output_path, b"ID3").await?;
        }
        self.record(job, false).await;
        Err(err)
    }

    async fn take_error(&self) -> Option<TranscoderError> {
        if *self.missing.read().await {
            return Some(TranscoderError::MissingTranscoder {
                path: "mock-ffmpeg".into(),
            });
        }
        self.next_error.write().await.take()
    }

    async fn should_fail(&self, job: &TranscodeJob) -> bool {
        let name = job
            .input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.failing_names.read().await.contains(&name)
    }

    async fn record(&self, job: TranscodeJob, success: bool) {
        self.transcodes
            .write()
            .await
            .push(RecordedTranscode { job, success });
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscoderError> {
        if let Some(err) = self.take_error().await {
            return self.fail(job, err).await;
        }

        if self.should_fail(&job).await {
            let err = TranscoderError::failed(
                "FFmpeg exited with code: Some(1)",
                Some("Invalid data found when processing input".to_string()),
            );
            return self.fail(job, err).await;
        }

        let marker = format!("{} from {}", job.target, job.input_path.display());
        tokio::fs::write(&job.output_path, marker.as_bytes()).await?;
        self.record(job.clone(), true).await;

        Ok(TranscodeResult {
            output_path: job.output_path,
            output_size_bytes: marker.len() as u64,
            duration_ms: 0,
        })
    }

    async fn validate(&self) -> Result<(), TranscoderError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(())
    }

    async fn help(&self) -> Result<String, TranscoderError> {
        Ok("usage: mock [options] -i input output".to_string())
    }
}
