//! Trait definitions for the transcoder module.

use async_trait::async_trait;

use super::error::TranscoderError;
use super::types::{TranscodeJob, TranscodeResult};

/// An external tool that can transcode a single audio file.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Transcodes one file.
    ///
    /// Succeeds only if the tool exits cleanly and the output file exists.
    async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscoderError>;

    /// Checks that the tool is installed and runnable.
    async fn validate(&self) -> Result<(), TranscoderError>;

    /// Returns the tool's own usage text.
    async fn help(&self) -> Result<String, TranscoderError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::AudioFormat;
    use std::path::PathBuf;

    struct EchoTranscoder;

    #[async_trait]
    impl Transcoder for EchoTranscoder {
        fn name(&self) -> &str {
            "echo"
        }

        async fn transcode(&self, job: TranscodeJob) -> Result<TranscodeResult, TranscoderError> {
            Ok(TranscodeResult {
                output_path: job.output_path,
                output_size_bytes: 512,
                duration_ms: 1,
            })
        }

        async fn validate(&self) -> Result<(), TranscoderError> {
            Ok(())
        }

        async fn help(&self) -> Result<String, TranscoderError> {
            Ok("usage: echo".to_string())
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let transcoder: Box<dyn Transcoder> = Box::new(EchoTranscoder);
        let job = TranscodeJob {
            input_path: PathBuf::from("/in/a.flac"),
            output_path: PathBuf::from("/out/a.mp3"),
            target: AudioFormat::Mp3,
        };
        let result = transcoder.transcode(job).await.unwrap();
        assert_eq!(result.output_path, PathBuf::from("/out/a.mp3"));
        assert_eq!(transcoder.name(), "echo");
        assert!(transcoder.help().await.unwrap().contains("usage"));
    }
}
