//! Temporal smoothing against a running average.

use crate::thermal_pipeline::normalize::NormalizedField;

use super::types::{EnhancementState, SMOOTHING_ALPHA};

impl EnhancementState {
    /// Blends the enhanced field into the running average and emits the
    /// smoothed result.
    ///
    /// `state = α·current + (1−α)·state`; the first frame of a session
    /// seeds the state and passes through unblended.
    ///
    /// Panics on a shape change mid-session: the sensor resolution is fixed,
    /// so a mismatch means a broken pipeline invariant, not bad input.
    pub(super) fn blend(&mut self, field: &NormalizedField) -> NormalizedField {
        let Some(accumulator) = self.accumulator.as_mut() else {
            self.accumulator = Some(field.data.iter().map(|&v| f32::from(v)).collect());
            self.width = field.width;
            self.height = field.height;
            return field.clone();
        };

        assert_eq!(
            (self.width, self.height),
            (field.width, field.height),
            "field shape changed mid-session"
        );

        let mut out = vec![0u8; field.data.len()];
        for ((acc, &cur), dst) in accumulator.iter_mut().zip(&field.data).zip(&mut out) {
            *acc = SMOOTHING_ALPHA * f32::from(cur) + (1.0 - SMOOTHING_ALPHA) * *acc;
            *dst = acc.round().clamp(0.0, 255.0) as u8;
        }

        NormalizedField::from_vec(field.width, field.height, out)
    }
}
