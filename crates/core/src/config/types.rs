use serde::{Deserialize, Serialize};

use crate::copier::CopierConfig;
use crate::transcoder::TranscoderConfig;

/// Root configuration
///
/// Every section is optional; a missing file yields the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub transcoder: TranscoderConfig,
    #[serde(default)]
    pub copier: CopierConfig,
}
