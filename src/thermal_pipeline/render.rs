//! Colormap rendering module
//!
//! Upscales the enhanced field to display resolution, maps it through the
//! selected false-color palette, and composites the overlay (extremum
//! markers, center cross, relative-intensity scale bar).

pub mod colormap;
mod overlay;
mod renderer;
pub mod types;
mod upscale;

pub use colormap::Colormap;
pub use renderer::{apply_colormap, render};
pub use types::{DISPLAY_HEIGHT, DISPLAY_WIDTH, OutputFrame};
pub use upscale::upscale_bilinear;
