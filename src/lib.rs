//! Live viewer pipeline for a USB thermal-imaging camera.
//!
//! The crate turns raw radiometric frames from a 256×192 thermal sensor into
//! a false-color video stream: per-frame contrast normalization, CLAHE-style
//! local enhancement with temporal smoothing, hot/cold spot tracking, and
//! colormapped rendering with overlays. Device loss is handled by a bounded
//! USB reset-and-retry cycle so the stream survives transient faults.

pub mod logger;
pub mod thermal_pipeline;
