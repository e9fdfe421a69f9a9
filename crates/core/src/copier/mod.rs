//! Copier module for mirroring opaque files into the output tree.
//!
//! Files the walker does not transcode (covers, cue sheets, audio already in
//! the target format) are copied byte-for-byte through a buffered loop.

mod config;
mod error;
mod fs_copier;

pub use config::CopierConfig;
pub use error::CopyError;
pub use fs_copier::FsCopier;
