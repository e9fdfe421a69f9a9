//! Configuration for the copier module.

use serde::{Deserialize, Serialize};

/// Configuration for the file system copier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopierConfig {
    /// Buffer size for file copies in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_buffer_size() -> usize {
    8 * 1024 * 1024 // 8 MB
}

impl Default for CopierConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

impl CopierConfig {
    /// Sets the buffer size.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}
