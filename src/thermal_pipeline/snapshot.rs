//! Snapshot encoding module
//!
//! This module provides lossless snapshot capture of rendered frames with
//! various compression options.

mod tiff_writer;
pub mod types;
mod writer;

pub use tiff_writer::TiffSnapshotWriter;
pub use types::{SnapshotCompression, SnapshotConfig, SnapshotConfigBuilder, timestamped_path};
pub use writer::SnapshotWriter;
