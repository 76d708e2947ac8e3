//! Snapshot configuration types

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Compression methods for snapshot files
#[derive(Debug, Clone, Copy)]
pub enum SnapshotCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced (default)
    DeflateBalanced,
}

/// Configuration for snapshot capture
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Compression method to use
    pub compression: SnapshotCompression,
    /// Directory snapshot files are written into
    pub output_dir: PathBuf,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            compression: SnapshotCompression::DeflateBalanced,
            output_dir: PathBuf::from("."),
        }
    }
}

impl SnapshotConfig {
    pub fn builder() -> SnapshotConfigBuilder {
        SnapshotConfigBuilder::default()
    }
}

/// Builder for SnapshotConfig
#[derive(Default)]
pub struct SnapshotConfigBuilder {
    compression: Option<SnapshotCompression>,
    output_dir: Option<PathBuf>,
}

impl SnapshotConfigBuilder {
    pub fn compression(mut self, compression: SnapshotCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> SnapshotConfig {
        let default = SnapshotConfig::default();
        SnapshotConfig {
            compression: self.compression.unwrap_or(default.compression),
            output_dir: self.output_dir.unwrap_or(default.output_dir),
        }
    }
}

/// Derives a snapshot path from the current Unix time.
pub fn timestamped_path(dir: &Path) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    dir.join(format!("thermal_{secs}.tiff"))
}
