//! Contrast-limited adaptive histogram equalization.
//!
//! The field is divided into square tiles; each tile gets its own 256-bin
//! histogram, clipped at `clip_limit × (tile pixels / 256)` with the excess
//! redistributed evenly, and a CDF lookup table built from the result.
//! Every pixel is then remapped by bilinearly interpolating between the
//! LUTs of the four nearest tile centers, which hides the tile seams.
//!
//! Reference: Zuiderveld (1994), Graphics Gems IV.

use crate::thermal_pipeline::normalize::NormalizedField;

const BINS: usize = 256;

/// Applies CLAHE to a normalized field.
///
/// `clip_limit` is a multiplier on the uniform bin count; higher values
/// allow more local contrast (and more noise amplification).
pub fn apply_clahe(field: &NormalizedField, tile_size: usize, clip_limit: u32) -> NormalizedField {
    assert!(tile_size > 0, "tile size must be nonzero");
    let (w, h) = (field.width, field.height);
    if w == 0 || h == 0 {
        return field.clone();
    }

    let tiles_x = w.div_ceil(tile_size);
    let tiles_y = h.div_ceil(tile_size);

    // Per-tile remap tables.
    let mut luts = vec![[0u8; BINS]; tiles_x * tiles_y];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let x0 = tx * tile_size;
            let y0 = ty * tile_size;
            let x1 = (x0 + tile_size).min(w);
            let y1 = (y0 + tile_size).min(h);

            let mut hist = [0u32; BINS];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[field.get(x, y) as usize] += 1;
                }
            }

            let tile_pixels = (x1 - x0) * (y1 - y0);
            clip_and_redistribute(&mut hist, tile_pixels, clip_limit);
            luts[ty * tiles_x + tx] = cdf_lut(&hist, tile_pixels);
        }
    }

    // Remap through the four surrounding tile LUTs.
    let center = |t: usize| (t as f32 + 0.5) * tile_size as f32;
    let mut out = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            let fx = x as f32 / tile_size as f32 - 0.5;
            let fy = y as f32 / tile_size as f32 - 0.5;
            let tx0 = (fx.floor().max(0.0)) as usize;
            let ty0 = (fy.floor().max(0.0)) as usize;
            let tx1 = (tx0 + 1).min(tiles_x - 1);
            let ty1 = (ty0 + 1).min(tiles_y - 1);

            let wx = if tx0 == tx1 {
                0.0
            } else {
                ((x as f32 - center(tx0)) / (center(tx1) - center(tx0))).clamp(0.0, 1.0)
            };
            let wy = if ty0 == ty1 {
                0.0
            } else {
                ((y as f32 - center(ty0)) / (center(ty1) - center(ty0))).clamp(0.0, 1.0)
            };

            let bin = field.get(x, y) as usize;
            let v00 = f32::from(luts[ty0 * tiles_x + tx0][bin]);
            let v10 = f32::from(luts[ty0 * tiles_x + tx1][bin]);
            let v01 = f32::from(luts[ty1 * tiles_x + tx0][bin]);
            let v11 = f32::from(luts[ty1 * tiles_x + tx1][bin]);

            let top = v00 + (v10 - v00) * wx;
            let bottom = v01 + (v11 - v01) * wx;
            out[y * w + x] = (top + (bottom - top) * wy).round().clamp(0.0, 255.0) as u8;
        }
    }

    NormalizedField::from_vec(w, h, out)
}

/// Clips histogram bins at the limit and spreads the excess evenly.
fn clip_and_redistribute(hist: &mut [u32; BINS], tile_pixels: usize, clip_limit: u32) {
    let uniform = tile_pixels as f32 / BINS as f32;
    let ceiling = (uniform * clip_limit as f32).ceil().max(1.0) as u32;

    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > ceiling {
            excess += *bin - ceiling;
            *bin = ceiling;
        }
    }

    let share = excess / BINS as u32;
    let leftover = (excess % BINS as u32) as usize;
    for (i, bin) in hist.iter_mut().enumerate() {
        *bin += share + u32::from(i < leftover);
    }
}

/// Builds the equalization LUT from a (clipped) histogram.
fn cdf_lut(hist: &[u32; BINS], total: usize) -> [u8; BINS] {
    let mut cdf = [0u32; BINS];
    let mut running = 0u32;
    for (i, &count) in hist.iter().enumerate() {
        running += count;
        cdf[i] = running;
    }

    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);
    let denom = total as f32 - cdf_min as f32;

    let mut lut = [0u8; BINS];
    if denom <= 0.0 {
        // Every pixel in the tile has the same value; remap as identity so a
        // uniform region keeps its intensity instead of collapsing to black.
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    }
    for i in 0..BINS {
        let v = (cdf[i] as f32 - cdf_min as f32) / denom * 255.0;
        lut[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    lut
}
