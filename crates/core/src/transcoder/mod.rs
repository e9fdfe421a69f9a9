//! Transcoder module for converting audio files through an external tool.
//!
//! This module provides the `Transcoder` trait and an FFmpeg implementation.
//! The tool is treated as an opaque process: it gets an input path and an
//! output path, and either produces the output file or fails.
//!
//! # Example
//!
//! ```ignore
//! use audiomirror_core::transcoder::{FfmpegTranscoder, Transcoder, TranscodeJob};
//! use audiomirror_core::AudioFormat;
//!
//! let transcoder = FfmpegTranscoder::with_defaults();
//!
//! // Make sure ffmpeg is installed
//! transcoder.validate().await?;
//!
//! let job = TranscodeJob {
//!     input_path: PathBuf::from("/music/song.flac"),
//!     output_path: PathBuf::from("/output/song.mp3"),
//!     target: AudioFormat::Mp3,
//! };
//!
//! let result = transcoder.transcode(job).await?;
//! println!("Wrote {} bytes in {} ms", result.output_size_bytes, result.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::TranscoderConfig;
pub use error::TranscoderError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
pub use types::{TranscodeJob, TranscodeResult};
