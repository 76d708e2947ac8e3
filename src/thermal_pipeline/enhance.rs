//! Enhancement stage
//!
//! Localized (tile-based) contrast enhancement with a user-adjustable clip
//! limit, followed by temporal smoothing against a running average so the
//! stream does not flicker with sensor noise.

mod clahe;
mod stage;
mod temporal;
pub mod types;

pub use clahe::apply_clahe;
pub use stage::enhance;
pub use types::{
    CLAHE_TILE_SIZE,
    CLIP_LIMIT_DEFAULT,
    CLIP_LIMIT_MAX,
    CLIP_LIMIT_MIN,
    EnhancementState,
    SMOOTHING_ALPHA,
};
