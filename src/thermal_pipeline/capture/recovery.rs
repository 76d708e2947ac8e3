//! Bounded reset-and-retry recovery.
//!
//! Wraps any [`FrameSource`] in an explicit state machine so the retry
//! bound is auditable and testable without real hardware. A recovery
//! episode is: read failed → up to [`MAX_RESET_ATTEMPTS`] USB resets, each
//! followed by up to [`READS_PER_RESET`] read attempts (the device streams
//! garbage for a frame or two right after re-enumeration). Any delivered
//! frame ends the episode and clears the counters.

use tracing::{info, warn};

use crate::thermal_pipeline::capture::source::FrameSource;
use crate::thermal_pipeline::capture::types::RawFrame;
use crate::thermal_pipeline::common::error::{Result, ThermalError};

/// Maximum number of USB resets per recovery episode.
pub const MAX_RESET_ATTEMPTS: u32 = 3;

/// Read attempts allowed after each reset before resetting again.
pub const READS_PER_RESET: u32 = 3;

/// Connection state of a recovering source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Frames are flowing.
    Connected,
    /// A recovery episode is in progress; holds the current reset attempt.
    Reconnecting(u32),
    /// The retry budget is exhausted; the source is dead.
    Failed,
}

/// A [`FrameSource`] that transparently recovers from transient faults.
pub struct RecoveringSource<S: FrameSource> {
    inner: S,
    state: ConnectionState,
}

impl<S: FrameSource> RecoveringSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            state: ConnectionState::Connected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FrameSource> FrameSource for RecoveringSource<S> {
    fn read_frame(&mut self) -> Result<RawFrame> {
        match self.inner.read_frame() {
            Ok(frame) => {
                self.state = ConnectionState::Connected;
                return Ok(frame);
            }
            Err(err) => {
                warn!("frame read failed: {err}");
            }
        }

        for attempt in 1..=MAX_RESET_ATTEMPTS {
            self.state = ConnectionState::Reconnecting(attempt);
            info!("resetting device, attempt {attempt}/{MAX_RESET_ATTEMPTS}");

            if let Err(err) = self.inner.reset_and_reopen() {
                warn!("reset attempt {attempt} failed: {err}");
                continue;
            }

            for _ in 0..READS_PER_RESET {
                match self.inner.read_frame() {
                    Ok(frame) => {
                        info!("device recovered after {attempt} reset(s)");
                        self.state = ConnectionState::Connected;
                        return Ok(frame);
                    }
                    Err(err) => warn!("post-reset read failed: {err}"),
                }
            }
        }

        self.state = ConnectionState::Failed;
        Err(ThermalError::Unrecoverable(MAX_RESET_ATTEMPTS))
    }

    fn reset_and_reopen(&mut self) -> Result<()> {
        self.inner.reset_and_reopen()
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}
