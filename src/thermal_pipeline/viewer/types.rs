//! Presentation loop configuration types

use crate::thermal_pipeline::enhance::types::{CLAHE_TILE_SIZE, CLIP_LIMIT_DEFAULT};
use crate::thermal_pipeline::render::types::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::thermal_pipeline::snapshot::types::SnapshotConfig;

/// A user command, polled once per frame cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Snapshot,
    CycleColormap,
    IncreaseContrast,
    DecreaseContrast,
}

/// Configuration for a viewing session
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Output frame width in pixels
    pub display_width: usize,
    /// Output frame height in pixels
    pub display_height: usize,
    /// CLAHE tile edge length in pixels
    pub tile_size: usize,
    /// Initial CLAHE clip limit
    pub clip_limit: u32,
    /// Snapshot encoding and destination settings
    pub snapshot: SnapshotConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            tile_size: CLAHE_TILE_SIZE,
            clip_limit: CLIP_LIMIT_DEFAULT,
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::default()
    }
}

/// Builder for ViewerConfig
#[derive(Default)]
pub struct ViewerConfigBuilder {
    display_width: Option<usize>,
    display_height: Option<usize>,
    tile_size: Option<usize>,
    clip_limit: Option<u32>,
    snapshot: Option<SnapshotConfig>,
}

impl ViewerConfigBuilder {
    pub fn display_size(mut self, width: usize, height: usize) -> Self {
        self.display_width = Some(width);
        self.display_height = Some(height);
        self
    }

    pub fn tile_size(mut self, tile_size: usize) -> Self {
        self.tile_size = Some(tile_size);
        self
    }

    pub fn clip_limit(mut self, clip_limit: u32) -> Self {
        self.clip_limit = Some(clip_limit);
        self
    }

    pub fn snapshot(mut self, snapshot: SnapshotConfig) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn build(self) -> ViewerConfig {
        let default = ViewerConfig::default();
        ViewerConfig {
            display_width: self.display_width.unwrap_or(default.display_width),
            display_height: self.display_height.unwrap_or(default.display_height),
            tile_size: self.tile_size.unwrap_or(default.tile_size),
            clip_limit: self.clip_limit.unwrap_or(default.clip_limit),
            snapshot: self.snapshot.unwrap_or(default.snapshot),
        }
    }
}
