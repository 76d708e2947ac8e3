//! Frame normalization.
//!
//! Maps raw radiometric samples into the bounded 0–255 intensity domain
//! using a per-frame min/max stretch: the visual range always spans the
//! current scene's actual temperature spread, at the cost of absolute
//! comparability across frames.

use crate::thermal_pipeline::capture::types::RawFrame;

/// Intensity emitted for a degenerate (uniform-temperature) frame.
pub const DEGENERATE_MID: u8 = 128;

/// A frame mapped into the bounded intensity domain. Same shape as the
/// raw frame it was derived from; no identity beyond one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedField {
    pub width: usize,
    pub height: usize,
    /// Row-major intensities in 0–255
    pub data: Vec<u8>,
}

impl NormalizedField {
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "field data length must match dimensions"
        );
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }
}

/// Stretches a raw frame linearly so its min maps to 0 and its max to 255.
///
/// A uniform frame (min == max) maps to a constant [`DEGENERATE_MID`]
/// instead of dividing by zero.
pub fn normalize(raw: &RawFrame) -> NormalizedField {
    assert_eq!(
        raw.data.len(),
        raw.width * raw.height,
        "raw frame shape mismatch"
    );

    let mut min = u16::MAX;
    let mut max = u16::MIN;
    for &sample in &raw.data {
        min = min.min(sample);
        max = max.max(sample);
    }

    if raw.data.is_empty() || min == max {
        return NormalizedField {
            width: raw.width,
            height: raw.height,
            data: vec![DEGENERATE_MID; raw.data.len()],
        };
    }

    let range = f32::from(max - min);
    let data = raw
        .data
        .iter()
        .map(|&sample| (f32::from(sample - min) * 255.0 / range).round() as u8)
        .collect();

    NormalizedField {
        width: raw.width,
        height: raw.height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thermal_pipeline::capture::types::{SENSOR_HEIGHT, SENSOR_WIDTH};

    fn frame(width: usize, height: usize, data: Vec<u16>) -> RawFrame {
        RawFrame {
            width,
            height,
            data,
        }
    }

    #[test]
    fn output_spans_full_range() {
        let field = normalize(&frame(4, 1, vec![10, 20, 30, 40]));
        assert_eq!(field.data[0], 0);
        assert_eq!(field.data[3], 255);
        assert!(field.data.iter().all(|&v| v <= 255));
    }

    #[test]
    fn uniform_frame_maps_to_mid_value() {
        let field = normalize(&frame(8, 4, vec![777; 32]));
        assert!(field.data.iter().all(|&v| v == DEGENERATE_MID));
    }

    #[test]
    fn stretch_is_monotonic() {
        let field = normalize(&frame(5, 1, vec![100, 200, 300, 400, 500]));
        for pair in field.data.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn hot_and_cold_outliers_hit_the_extremes() {
        // Scene at a uniform 100 counts with one hot and one cold pixel.
        let mut data = vec![100u16; SENSOR_WIDTH * SENSOR_HEIGHT];
        data[10 * SENSOR_WIDTH + 20] = 4095;
        data[50 * SENSOR_WIDTH + 100] = 0;

        let field = normalize(&frame(SENSOR_WIDTH, SENSOR_HEIGHT, data));
        assert_eq!(field.get(20, 10), 255);
        assert_eq!(field.get(100, 50), 0);
        // The background sits near the bottom of the stretched range.
        assert_eq!(field.get(0, 0), 6);
    }
}
