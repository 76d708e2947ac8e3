use tracing::debug;

use crate::thermal_pipeline::normalize::NormalizedField;
use crate::thermal_pipeline::render::colormap::Colormap;
use crate::thermal_pipeline::render::overlay;
use crate::thermal_pipeline::render::types::OutputFrame;
use crate::thermal_pipeline::render::upscale::upscale_bilinear;
use crate::thermal_pipeline::track::TrackedExtremum;

/// Maps a field through the palette LUT, one color per intensity.
pub fn apply_colormap(field: &NormalizedField, colormap: Colormap) -> OutputFrame {
    let lut = colormap.lut();
    let mut frame = OutputFrame::new(field.width, field.height);
    for (dst, &v) in frame.data.chunks_exact_mut(3).zip(&field.data) {
        dst.copy_from_slice(&lut[v as usize]);
    }
    frame
}

/// Full render: bilinear upscale to display resolution, false-color lookup,
/// then overlay composition (extremum markers, center cross, scale bar).
pub fn render(
    field: &NormalizedField,
    extrema: (&TrackedExtremum, &TrackedExtremum),
    colormap: Colormap,
    display_width: usize,
    display_height: usize,
) -> OutputFrame {
    debug!(
        colormap = colormap.name(),
        "rendering {}x{} -> {display_width}x{display_height}",
        field.width,
        field.height
    );

    let upscaled = upscale_bilinear(field, display_width, display_height);
    let mut frame = apply_colormap(&upscaled, colormap);

    let (hot, cold) = extrema;
    overlay::compose(&mut frame, hot, cold, colormap);
    frame
}
