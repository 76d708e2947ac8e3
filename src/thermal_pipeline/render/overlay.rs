//! Overlay composition: extremum markers, center cross, scale bar.

use crate::thermal_pipeline::render::colormap::Colormap;
use crate::thermal_pipeline::render::types::OutputFrame;
use crate::thermal_pipeline::track::TrackedExtremum;

const WHITE: [u8; 3] = [255, 255, 255];
const COLD_MARKER: [u8; 3] = [0, 200, 255];
const CENTER_GRAY: [u8; 3] = [200, 200, 200];
const BAR_BORDER: [u8; 3] = [180, 180, 180];

/// Broken-crosshair geometry for the hot marker.
const CROSS_INNER: isize = 4;
const CROSS_OUTER: isize = 12;
const CIRCLE_RADIUS: isize = 14;

/// Cold marker triangle: apex at the extremum, base above it.
const TRIANGLE_HEIGHT: isize = 8;
const TRIANGLE_HALF_BASE: isize = 5;

const CENTER_CROSS_ARM: isize = 5;

const BAR_WIDTH: usize = 24;
const BAR_MARGIN: usize = 8;
const BAR_TICKS: usize = 7;

/// Draws all overlays onto the colormapped frame.
pub fn compose(frame: &mut OutputFrame, hot: &TrackedExtremum, cold: &TrackedExtremum, colormap: Colormap) {
    draw_hot_marker(frame, hot.x as isize, hot.y as isize);
    draw_cold_marker(frame, cold.x as isize, cold.y as isize);
    draw_center_cross(frame);
    draw_scale_bar(frame, colormap);
}

/// White crosshair with a gap around the point, inside a thin circle.
fn draw_hot_marker(frame: &mut OutputFrame, cx: isize, cy: isize) {
    for d in CROSS_INNER..=CROSS_OUTER {
        frame.put_pixel(cx - d, cy, WHITE);
        frame.put_pixel(cx + d, cy, WHITE);
        frame.put_pixel(cx, cy - d, WHITE);
        frame.put_pixel(cx, cy + d, WHITE);
    }
    draw_circle(frame, cx, cy, CIRCLE_RADIUS, WHITE);
}

/// Filled inverted triangle pointing at the cold spot.
fn draw_cold_marker(frame: &mut OutputFrame, cx: isize, cy: isize) {
    for dy in 0..TRIANGLE_HEIGHT {
        let half = (TRIANGLE_HEIGHT - 1 - dy) * TRIANGLE_HALF_BASE / TRIANGLE_HEIGHT;
        let y = cy - TRIANGLE_HEIGHT + 1 + dy;
        for dx in -half..=half {
            frame.put_pixel(cx + dx, y, COLD_MARKER);
        }
    }
}

fn draw_center_cross(frame: &mut OutputFrame) {
    let cx = frame.width as isize / 2;
    let cy = frame.height as isize / 2;
    for d in -CENTER_CROSS_ARM..=CENTER_CROSS_ARM {
        frame.put_pixel(cx + d, cy, CENTER_GRAY);
        frame.put_pixel(cx, cy + d, CENTER_GRAY);
    }
}

/// Midpoint circle.
fn draw_circle(frame: &mut OutputFrame, cx: isize, cy: isize, radius: isize, rgb: [u8; 3]) {
    let mut x = radius;
    let mut y = 0isize;
    let mut err = 1 - radius;

    while x >= y {
        for (px, py) in [
            (cx + x, cy + y),
            (cx - x, cy + y),
            (cx + x, cy - y),
            (cx - x, cy - y),
            (cx + y, cy + x),
            (cx - y, cy + x),
            (cx + y, cy - x),
            (cx - y, cy - x),
        ] {
            frame.put_pixel(px, py, rgb);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Vertical gradient swatch through the active palette at the right edge,
/// hot at the top. Relative intensity only, no unit labels.
fn draw_scale_bar(frame: &mut OutputFrame, colormap: Colormap) {
    let lut = colormap.lut();
    let h = frame.height;
    let x0 = frame.width.saturating_sub(BAR_MARGIN + BAR_WIDTH);
    let x1 = x0 + BAR_WIDTH - 1;

    for y in 0..h {
        let t = 1.0 - y as f32 / (h - 1) as f32;
        let color = lut[(t * 255.0).round() as usize];
        for x in x0..=x1 {
            frame.put_pixel(x as isize, y as isize, color);
        }
    }

    // Border and tick marks.
    for y in 0..h {
        frame.put_pixel(x0 as isize, y as isize, BAR_BORDER);
        frame.put_pixel(x1 as isize, y as isize, BAR_BORDER);
    }
    for x in x0..=x1 {
        frame.put_pixel(x as isize, 0, BAR_BORDER);
        frame.put_pixel(x as isize, h as isize - 1, BAR_BORDER);
    }
    for tick in 0..BAR_TICKS {
        let y = (h - 1) * tick / (BAR_TICKS - 1);
        for x in (x1 - 3)..=x1 {
            frame.put_pixel(x as isize, y as isize, WHITE);
        }
    }
}
