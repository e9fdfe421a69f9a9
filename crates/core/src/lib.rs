pub mod config;
pub mod copier;
pub mod format;
pub mod size_report;
pub mod testing;
pub mod transcoder;
pub mod walker;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
};
pub use copier::{CopierConfig, CopyError, FsCopier};
pub use format::{AudioFormat, FileClass, FormatParseError};
pub use size_report::SizeReport;
pub use transcoder::{FfmpegTranscoder, Transcoder, TranscoderConfig, TranscoderError};
pub use walker::{ConversionRequest, FileOutcome, RunSummary, TreeConverter, WalkError};
