//! Enhancement state and tuning constants

/// Weight of the current frame in the temporal blend; the remainder comes
/// from the running average.
pub const SMOOTHING_ALPHA: f32 = 0.3;

/// Default CLAHE clip limit, as a multiplier on the uniform bin count.
pub const CLIP_LIMIT_DEFAULT: u32 = 3;

/// Lower bound of the user-adjustable clip limit.
pub const CLIP_LIMIT_MIN: u32 = 1;

/// Upper bound of the user-adjustable clip limit.
pub const CLIP_LIMIT_MAX: u32 = 40;

/// CLAHE tile edge length in pixels.
pub const CLAHE_TILE_SIZE: usize = 8;

/// Per-session state owned by the enhancement stage.
///
/// Holds the exponentially-weighted running average of enhanced fields and
/// the user-adjustable contrast (clip limit) parameter. Seeded by the first
/// frame; persists until the stream is restarted.
#[derive(Debug, Clone)]
pub struct EnhancementState {
    pub(super) accumulator: Option<Vec<f32>>,
    pub(super) width: usize,
    pub(super) height: usize,
    clip_limit: u32,
    tile_size: usize,
}

impl EnhancementState {
    pub fn new(clip_limit: u32, tile_size: usize) -> Self {
        Self {
            accumulator: None,
            width: 0,
            height: 0,
            clip_limit: clip_limit.clamp(CLIP_LIMIT_MIN, CLIP_LIMIT_MAX),
            tile_size,
        }
    }

    pub fn clip_limit(&self) -> u32 {
        self.clip_limit
    }

    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Steps the clip limit up, saturating at [`CLIP_LIMIT_MAX`].
    pub fn increase_contrast(&mut self) -> u32 {
        self.clip_limit = (self.clip_limit + 1).min(CLIP_LIMIT_MAX);
        self.clip_limit
    }

    /// Steps the clip limit down, saturating at [`CLIP_LIMIT_MIN`].
    pub fn decrease_contrast(&mut self) -> u32 {
        self.clip_limit = self.clip_limit.saturating_sub(1).max(CLIP_LIMIT_MIN);
        self.clip_limit
    }

    /// Discards the smoothing history. Called on stream restart.
    pub fn reset(&mut self) {
        self.accumulator = None;
        self.width = 0;
        self.height = 0;
    }
}

impl Default for EnhancementState {
    fn default() -> Self {
        Self::new(CLIP_LIMIT_DEFAULT, CLAHE_TILE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contrast_saturates_at_the_maximum() {
        let mut state = EnhancementState::new(CLIP_LIMIT_MAX, CLAHE_TILE_SIZE);
        for _ in 0..10 {
            assert_eq!(state.increase_contrast(), CLIP_LIMIT_MAX);
        }
    }

    #[test]
    fn contrast_saturates_at_the_minimum() {
        let mut state = EnhancementState::new(CLIP_LIMIT_MIN, CLAHE_TILE_SIZE);
        for _ in 0..10 {
            assert_eq!(state.decrease_contrast(), CLIP_LIMIT_MIN);
        }
    }

    #[test]
    fn out_of_range_initial_value_is_clamped() {
        assert_eq!(
            EnhancementState::new(1000, CLAHE_TILE_SIZE).clip_limit(),
            CLIP_LIMIT_MAX
        );
        assert_eq!(
            EnhancementState::new(0, CLAHE_TILE_SIZE).clip_limit(),
            CLIP_LIMIT_MIN
        );
    }

    #[test]
    fn steps_move_within_the_range() {
        let mut state = EnhancementState::default();
        let before = state.clip_limit();
        assert_eq!(state.increase_contrast(), before + 1);
        assert_eq!(state.decrease_contrast(), before);
    }
}
