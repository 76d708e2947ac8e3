//! Frame capture module
//!
//! This module provides the device side of the pipeline: locating the
//! thermal camera on USB, reading raw radiometric frames from it, and
//! recovering from transient device faults via a bounded reset-and-retry
//! cycle.

mod recovery;
mod source;
pub mod types;
mod v4l2_source;

pub use recovery::{ConnectionState, MAX_RESET_ATTEMPTS, READS_PER_RESET, RecoveringSource};
pub use source::FrameSource;
pub use types::{RawFrame, SENSOR_HEIGHT, SENSOR_WIDTH};
pub use v4l2_source::V4l2ThermalSource;
