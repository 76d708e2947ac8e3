use crate::thermal_pipeline::capture::types::RawFrame;
use crate::thermal_pipeline::common::error::Result;

/// A source of raw thermal frames.
///
/// Implemented by the real V4L2 device and by fakes in tests. Recovery
/// policy lives in [`RecoveringSource`](super::RecoveringSource), not in
/// implementations; `reset_and_reopen` only performs a single reset cycle.
pub trait FrameSource {
    /// Read the next frame. May block up to the device's own cadence.
    fn read_frame(&mut self) -> Result<RawFrame>;

    /// Reset the physical device and re-establish the capture stream.
    ///
    /// Disruptive: the device disconnects entirely for a moment and the
    /// call may take seconds.
    fn reset_and_reopen(&mut self) -> Result<()>;

    /// Human-readable description of the source, for logging.
    fn describe(&self) -> String;
}
