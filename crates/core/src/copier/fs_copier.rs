//! File system copier implementation.

use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};

use super::config::CopierConfig;
use super::error::CopyError;

/// Copies files through a fixed-size buffer.
#[derive(Debug, Clone)]
pub struct FsCopier {
    config: CopierConfig,
}

impl FsCopier {
    /// Creates a new copier with the given configuration.
    pub fn new(config: CopierConfig) -> Self {
        Self { config }
    }

    /// Creates a copier with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(CopierConfig::default())
    }

    /// Copies `source` to `destination`, returning the number of bytes written.
    ///
    /// The destination's parent directory must already exist. An existing
    /// destination is truncated; callers check for it first.
    pub async fn copy_file(&self, source: &Path, destination: &Path) -> Result<u64, CopyError> {
        let source_file = File::open(source).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CopyError::SourceNotFound {
                    path: source.to_path_buf(),
                }
            } else {
                CopyError::Io(e)
            }
        })?;

        let dest_file = File::create(destination).await.map_err(|e| {
            CopyError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        let buffer_size = self.config.buffer_size.max(1);
        let mut reader = BufReader::with_capacity(buffer_size, source_file);
        let mut writer = BufWriter::with_capacity(buffer_size, dest_file);

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; buffer_size];

        loop {
            let bytes_read = reader.read(&mut buffer).await.map_err(|e| {
                CopyError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            if bytes_read == 0 {
                break;
            }

            writer.write_all(&buffer[..bytes_read]).await.map_err(|e| {
                CopyError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
            })?;

            total_bytes += bytes_read as u64;
        }

        writer.flush().await.map_err(|e| {
            CopyError::copy_failed(source.to_path_buf(), destination.to_path_buf(), e)
        })?;

        Ok(total_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    #[tokio::test]
    async fn test_copy_preserves_bytes() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("cover.jpg");
        let dest = temp.path().join("copy.jpg");
        let content: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        fs::write(&source, &content).await.unwrap();

        // Small buffer forces several loop iterations.
        let copier = FsCopier::new(CopierConfig::default().with_buffer_size(1024));
        let bytes = copier.copy_file(&source, &dest).await.unwrap();

        assert_eq!(bytes, 10_000);
        assert_eq!(fs::read(&dest).await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_copy_empty_file() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("empty.txt");
        let dest = temp.path().join("out.txt");
        fs::write(&source, b"").await.unwrap();

        let bytes = FsCopier::with_defaults()
            .copy_file(&source, &dest)
            .await
            .unwrap();
        assert_eq!(bytes, 0);
        assert!(dest.exists());
    }

    #[tokio::test]
    async fn test_missing_source() {
        let temp = TempDir::new().unwrap();
        let result = FsCopier::with_defaults()
            .copy_file(&temp.path().join("nope"), &temp.path().join("out"))
            .await;
        assert!(matches!(result, Err(CopyError::SourceNotFound { .. })));
    }

    #[tokio::test]
    async fn test_missing_destination_dir() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        fs::write(&source, b"abc").await.unwrap();

        let result = FsCopier::with_defaults()
            .copy_file(&source, &temp.path().join("no/such/dir/a.txt"))
            .await;
        assert!(matches!(result, Err(CopyError::CopyFailed { .. })));
    }
}
