//! Walker module: mirrors an input tree into an output tree.
//!
//! Every regular file under the input root ends up as exactly one artifact
//! under the output root. Audio in a supported format other than the target
//! is transcoded and gets the target extension. Everything else is copied
//! unchanged. Existing outputs are never overwritten, so reruns only skip.
//!
//! # Example
//!
//! ```ignore
//! use audiomirror_core::{AudioFormat, ConversionRequest, FfmpegTranscoder, FsCopier, TreeConverter};
//!
//! let walker = TreeConverter::new(FfmpegTranscoder::with_defaults(), FsCopier::with_defaults());
//! let request = ConversionRequest::new("music", "output", AudioFormat::Mp3).with_recurse(true);
//!
//! let summary = walker.run(request).await;
//! println!("{} converted, {} copied, {} skipped", summary.converted, summary.copied, summary.skipped);
//! ```

mod error;
mod tree;
mod types;

pub use error::WalkError;
pub use tree::TreeConverter;
pub use types::{ConversionRequest, Failure, FileOutcome, PlannedAction, RunSummary};
