//! Testing utilities and mock implementations.
//!
//! Lets the walker run against real temporary directories without ffmpeg
//! being installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use audiomirror_core::testing::MockTranscoder;
//!
//! let transcoder = MockTranscoder::new();
//! transcoder.fail_on("broken.wav").await;
//!
//! let walker = TreeConverter::new(transcoder.clone(), FsCopier::with_defaults());
//! walker.run(request).await;
//!
//! assert_eq!(transcoder.transcode_count().await, 3);
//! ```

mod mock_transcoder;

pub use mock_transcoder::{MockTranscoder, RecordedTranscode};
