//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::TranscoderConfig;
use super::error::TranscoderError;
use super::traits::Transcoder;
use super::types::{TranscodeJob, TranscodeResult};

/// Transcoder that shells out to `ffmpeg -i <input> <output>`.
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    /// Creates a new FFmpeg transcoder with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }

    /// Builds the ffmpeg argument list for a job.
    fn build_args(&self, job: &TranscodeJob) -> Vec<OsString> {
        let mut args = vec![OsString::from("-i"), job.input_path.clone().into_os_string()];
        args.extend(self.config.extra_args.iter().map(OsString::from));
        args.push(job.output_path.clone().into_os_string());
        args
    }

    /// Maps a spawn failure, turning `NotFound` into a missing-tool error.
    fn spawn_error(&self, e: std::io::Error) -> TranscoderError {
        if e.kind() == std::io::ErrorKind::NotFound {
            TranscoderError::MissingTranscoder {
                path: self.config.ffmpeg_path.clone(),
            }
        } else {
            TranscoderError::Io(e)
        }
    }

    /// Keeps only the stderr lines that mention an error.
    fn error_lines(stderr: &[u8]) -> Option<String> {
        let text = String::from_utf8_lossy(stderr);
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| line.contains("Error") || line.contains("error"))
            .collect();
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscoderError> {
        let start = Instant::now();
        let args = self.build_args(&job);
        debug!("Running {:?} {:?}", self.config.ffmpeg_path, args);

        // Dropping the child on timeout kills it.
        let child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let output = match timeout(timeout_duration, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(TranscoderError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                })
            }
        };

        if !output.status.success() {
            return Err(TranscoderError::failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                Self::error_lines(&output.stderr),
            ));
        }

        // Verify output exists and get size
        let output_meta = tokio::fs::metadata(&job.output_path).await.map_err(|_| {
            TranscoderError::OutputMissing {
                path: job.output_path.clone(),
            }
        })?;

        Ok(TranscodeResult {
            output_path: job.output_path,
            output_size_bytes: output_meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), TranscoderError> {
        let output = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(TranscoderError::failed(
                "ffmpeg -version returned a failure status",
                Self::error_lines(&output.stderr),
            ));
        }
        Ok(())
    }

    async fn help(&self) -> Result<String, TranscoderError> {
        let output = Command::new(&self.config.ffmpeg_path)
            .args(["-hide_banner", "-h"])
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::AudioFormat;
    use std::path::{Path, PathBuf};

    fn job(input: &str, output: &str) -> TranscodeJob {
        TranscodeJob {
            input_path: PathBuf::from(input),
            output_path: PathBuf::from(output),
            target: AudioFormat::Mp3,
        }
    }

    #[test]
    fn test_build_args_plain() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let args = transcoder.build_args(&job("/in/song.flac", "/out/song.mp3"));
        assert_eq!(
            args,
            vec![
                OsString::from("-i"),
                OsString::from("/in/song.flac"),
                OsString::from("/out/song.mp3"),
            ]
        );
    }

    #[test]
    fn test_build_args_extra_before_output() {
        let config = TranscoderConfig::default()
            .with_extra_args(vec!["-b:a".to_string(), "320k".to_string()]);
        let transcoder = FfmpegTranscoder::new(config);
        let args = transcoder.build_args(&job("/in/song.wav", "/out/song.mp3"));
        assert_eq!(args.len(), 5);
        assert_eq!(args[2], OsString::from("-b:a"));
        assert_eq!(args[4], OsString::from("/out/song.mp3"));
    }

    #[test]
    fn test_error_lines_filter() {
        let stderr = b"Input #0, flac\nsong.flac: Invalid data found when processing input\nError opening input files\n";
        let lines = FfmpegTranscoder::error_lines(stderr).unwrap();
        assert_eq!(lines, "Error opening input files");
        assert!(FfmpegTranscoder::error_lines(b"all good\n").is_none());
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let transcoder = FfmpegTranscoder::new(TranscoderConfig::with_path(PathBuf::from(
            "/nonexistent/bin/ffmpeg-for-tests",
        )));

        let err = transcoder.validate().await.unwrap_err();
        assert!(err.is_missing_tool());

        let err = transcoder
            .transcode(job("/in/a.flac", "/out/a.mp3"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TranscoderError::MissingTranscoder { ref path } if path == Path::new("/nonexistent/bin/ffmpeg-for-tests")
        ));
    }
}
