//! Error types for the walker module.

use std::path::PathBuf;
use thiserror::Error;

use crate::copier::CopyError;
use crate::transcoder::TranscoderError;

/// Errors raised while walking a tree.
///
/// `OutputRoot` and `ReadDir` abandon the whole subtree of the level that
/// raised them. The rest only fail a single file.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The level's output directory could not be created.
    #[error("Failed to create output directory {path}: {source}")]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The level's input directory could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry could not be inspected.
    #[error("Failed to read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Transcode(#[from] TranscoderError),

    #[error(transparent)]
    Copy(#[from] CopyError),
}
