use tracing::debug;

use crate::thermal_pipeline::normalize::NormalizedField;

use super::clahe::apply_clahe;
use super::types::EnhancementState;

/// Runs the full enhancement stage: CLAHE with the state's current clip
/// limit, then temporal smoothing against the running average.
pub fn enhance(field: &NormalizedField, state: &mut EnhancementState) -> NormalizedField {
    debug!(
        clip_limit = state.clip_limit(),
        "enhancing {}x{} field",
        field.width,
        field.height
    );
    let contrasted = apply_clahe(field, state.tile_size(), state.clip_limit());
    state.blend(&contrasted)
}
