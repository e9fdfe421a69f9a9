//! Input vs. output size comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Aggregate sizes of an input tree and its mirrored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeReport {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl SizeReport {
    /// Measures both trees.
    ///
    /// Returns `None` when either total is zero. When `output_root` lies
    /// inside `input_root` it is left out of the input total.
    pub fn compare(input_root: &Path, output_root: &Path) -> Option<Self> {
        let excluded = std::fs::canonicalize(output_root).ok();
        let input_bytes = tree_size(input_root, excluded.as_deref());
        let output_bytes = tree_size(output_root, None);
        Self::from_totals(input_bytes, output_bytes)
    }

    /// Builds a report from precomputed totals, rejecting zero sizes.
    pub fn from_totals(input_bytes: u64, output_bytes: u64) -> Option<Self> {
        if input_bytes == 0 || output_bytes == 0 {
            return None;
        }
        Some(Self {
            input_bytes,
            output_bytes,
        })
    }

    /// Output size as a percentage of input size.
    pub fn ratio_percent(&self) -> f64 {
        self.output_bytes as f64 / self.input_bytes as f64 * 100.0
    }
}

impl fmt::Display for SizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Input size: {}, output size: {} ({:.2}% of input)",
            format_size(self.input_bytes),
            format_size(self.output_bytes),
            self.ratio_percent()
        )
    }
}

/// Sums the sizes of regular files under `root`, following symlinks.
///
/// Unreadable entries are skipped. A missing root counts as zero.
pub fn tree_size(root: &Path, excluded: Option<&Path>) -> u64 {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| match excluded {
            Some(excluded) if entry.file_type().is_dir() => {
                canonical(entry.path()).as_deref() != Some(excluded)
            }
            _ => true,
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}

fn canonical(path: &Path) -> Option<PathBuf> {
    std::fs::canonicalize(path).ok()
}

/// Formats a byte count with a binary unit, e.g. `1.50 MB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}
