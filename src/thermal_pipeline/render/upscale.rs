//! Bilinear upscaling to display resolution.

use crate::thermal_pipeline::normalize::NormalizedField;

/// Upscales a field with bilinear interpolation.
///
/// Source coordinates are `dst * src_size / dst_size`, so for integer scale
/// factors every source pixel survives exactly at its scaled position; the
/// extremum tracker relies on this when it maps native coordinates to
/// display coordinates.
pub fn upscale_bilinear(field: &NormalizedField, dst_width: usize, dst_height: usize) -> NormalizedField {
    assert!(
        dst_width >= field.width && dst_height >= field.height,
        "upscale target smaller than source"
    );

    let sx = field.width as f32 / dst_width as f32;
    let sy = field.height as f32 / dst_height as f32;

    let mut out = vec![0u8; dst_width * dst_height];
    for y in 0..dst_height {
        let src_y = y as f32 * sy;
        let y0 = src_y.floor() as usize;
        let y1 = (y0 + 1).min(field.height - 1);
        let fy = src_y - y0 as f32;

        for x in 0..dst_width {
            let src_x = x as f32 * sx;
            let x0 = src_x.floor() as usize;
            let x1 = (x0 + 1).min(field.width - 1);
            let fx = src_x - x0 as f32;

            let v00 = f32::from(field.get(x0, y0));
            let v10 = f32::from(field.get(x1, y0));
            let v01 = f32::from(field.get(x0, y1));
            let v11 = f32::from(field.get(x1, y1));

            let top = v00 + (v10 - v00) * fx;
            let bottom = v01 + (v11 - v01) * fx;
            out[y * dst_width + x] = (top + (bottom - top) * fy).round() as u8;
        }
    }

    NormalizedField::from_vec(dst_width, dst_height, out)
}
