//! Thermal frame-processing pipeline
//!
//! This module provides a structured approach to turning raw thermal sensor
//! frames into displayable false-color output, with separate modules for
//! device capture, normalization, enhancement, extremum tracking, rendering,
//! snapshot encoding, and the presentation loop that drives them.

pub mod capture;
pub mod common;
pub mod enhance;
pub mod normalize;
pub mod render;
pub mod snapshot;
pub mod track;
pub mod viewer;

pub use common::{Result, ThermalError};

pub use capture::{
    FrameSource,
    RawFrame,
    RecoveringSource,
    V4l2ThermalSource,
};

pub use normalize::{NormalizedField, normalize};

pub use enhance::{EnhancementState, enhance};

pub use track::{ExtremumKind, TrackedExtremum, track};

pub use render::{Colormap, OutputFrame, render};

pub use snapshot::{
    SnapshotCompression,
    SnapshotConfig,
    SnapshotConfigBuilder,
    SnapshotWriter,
    TiffSnapshotWriter,
};

pub use viewer::{
    Command,
    FrameSink,
    ViewerConfig,
    ViewerConfigBuilder,
    ViewerPipeline,
};
