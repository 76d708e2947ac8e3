//! Hot/cold extremum tracking.
//!
//! Each frame is scanned for its global maximum and minimum intensity.
//! Ties break toward the first occurrence in row-major order so marker
//! placement is deterministic. Positions are reported in display
//! coordinates; no cross-frame identity or positional smoothing is kept,
//! so the drawn marker always sits on the pixel that produced the value.

use crate::thermal_pipeline::normalize::NormalizedField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Hot,
    Cold,
}

/// One tracked extremum, positioned in upscaled display space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedExtremum {
    pub x: usize,
    pub y: usize,
    pub value: u8,
    pub kind: ExtremumKind,
}

/// Locates the hottest and coldest pixel of the field and scales their
/// positions to the given display resolution.
///
/// Panics on an empty field; by the time tracking runs, an empty frame is
/// a broken pipeline invariant.
pub fn track(
    field: &NormalizedField,
    display_width: usize,
    display_height: usize,
) -> (TrackedExtremum, TrackedExtremum) {
    assert!(
        field.width > 0 && field.height > 0,
        "cannot track extrema of an empty field"
    );

    let mut hot_idx = 0usize;
    let mut cold_idx = 0usize;
    for (idx, &value) in field.data.iter().enumerate() {
        if value > field.data[hot_idx] {
            hot_idx = idx;
        }
        if value < field.data[cold_idx] {
            cold_idx = idx;
        }
    }

    let to_display = |idx: usize, kind: ExtremumKind| TrackedExtremum {
        x: (idx % field.width) * display_width / field.width,
        y: (idx / field.width) * display_height / field.height,
        value: field.data[idx],
        kind,
    };

    (
        to_display(hot_idx, ExtremumKind::Hot),
        to_display(cold_idx, ExtremumKind::Cold),
    )
}
