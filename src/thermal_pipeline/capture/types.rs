//! Raw frame data types

use crate::thermal_pipeline::common::error::{Result, ThermalError};

/// Native sensor width of the supported camera module, in pixels.
pub const SENSOR_WIDTH: usize = 256;
/// Native sensor height of the supported camera module, in pixels.
pub const SENSOR_HEIGHT: usize = 192;

/// A single raw frame as delivered by the sensor.
///
/// Samples are radiometric counts, not temperatures; the pipeline never
/// interprets them in absolute units. Immutable once captured.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Row-major radiometric samples, one `u16` per pixel
    pub data: Vec<u16>,
}

impl RawFrame {
    /// Reconstructs a frame from the camera's raw byte stream.
    ///
    /// The sensor delivers pseudo-16-bit samples as two bytes per pixel,
    /// low byte first. Fails with `ReadFailed` when the buffer is shorter
    /// than a full frame (truncated capture).
    pub fn from_interleaved_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let expected = width * height * 2;
        if bytes.len() < expected {
            return Err(ThermalError::ReadFailed(format!(
                "short frame: got {} bytes, expected {}",
                bytes.len(),
                expected
            )));
        }

        let data = bytes[..expected]
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        Ok(Self {
            width,
            height,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstructs_little_endian_samples() {
        let bytes = [0x34, 0x12, 0xff, 0x0f];
        let frame = RawFrame::from_interleaved_bytes(2, 1, &bytes).unwrap();
        assert_eq!(frame.data, vec![0x1234, 0x0fff]);
    }

    #[test]
    fn trailing_padding_is_ignored() {
        let bytes = [1, 0, 2, 0, 0xaa, 0xbb];
        let frame = RawFrame::from_interleaved_bytes(2, 1, &bytes).unwrap();
        assert_eq!(frame.data, vec![1, 2]);
    }

    #[test]
    fn short_buffer_is_a_read_failure() {
        let result = RawFrame::from_interleaved_bytes(SENSOR_WIDTH, SENSOR_HEIGHT, &[0u8; 16]);
        assert!(matches!(result, Err(ThermalError::ReadFailed(_))));
    }
}
