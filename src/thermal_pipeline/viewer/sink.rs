use crate::thermal_pipeline::common::error::Result;
use crate::thermal_pipeline::render::types::OutputFrame;
use crate::thermal_pipeline::viewer::types::Command;

/// The display/input boundary of the presentation loop.
///
/// A real implementation backs this with a window (see the binary); tests
/// use scripted fakes. `poll_command` must never block; it is called once
/// per frame cycle between presents.
pub trait FrameSink {
    /// Show the composed frame to the user.
    fn present(&mut self, frame: &OutputFrame) -> Result<()>;

    /// Poll for a pending user command, non-blocking.
    fn poll_command(&mut self) -> Option<Command>;
}
