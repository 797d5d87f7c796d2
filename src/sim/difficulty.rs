//! Level difficulty derived from jump physics
//!
//! Gaps are sized from how far the world scrolls during one full jump arc, so
//! the widest level-1 gap is exactly one jump long.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Scroll speed increase per level above 1
pub const SPEED_STEP: f32 = 0.2;
/// Max gap increase per level above 1
pub const GAP_STEP: f32 = 0.1;
/// Minimum gap as a fraction of the maximum
pub const MIN_GAP_RATIO: f32 = 0.7;

/// Per-level platform generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    /// Pixels the world moves left per tick
    pub scroll_speed: f32,
    pub min_gap: f32,
    pub max_gap: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyModel {
    base_speed: f32,
    max_jump_distance: f32,
}

impl Default for DifficultyModel {
    fn default() -> Self {
        Self::new(&Tuning::default())
    }
}

impl DifficultyModel {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            base_speed: tuning.base_speed,
            max_jump_distance: tuning.max_jump_distance(),
        }
    }

    pub fn max_jump_distance(&self) -> f32 {
        self.max_jump_distance
    }

    /// Settings for `level` (levels below 1 are treated as 1)
    pub fn settings_for_level(&self, level: u32) -> LevelSettings {
        let steps = level.max(1) - 1;
        let speed_multiplier = 1.0 + steps as f32 * SPEED_STEP;
        let gap_multiplier = 1.0 + steps as f32 * GAP_STEP;

        let max_gap = self.max_jump_distance * gap_multiplier;
        LevelSettings {
            scroll_speed: self.base_speed * speed_multiplier,
            min_gap: max_gap * MIN_GAP_RATIO,
            max_gap,
        }
    }
}

/// Settings for `level` under the default physics
pub fn settings_for_level(level: u32) -> LevelSettings {
    DifficultyModel::default().settings_for_level(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_matches_jump_arc() {
        let s = settings_for_level(1);
        assert_eq!(s.scroll_speed, 2.0);
        assert!((s.max_gap - 75.0).abs() < 1e-4);
        assert!((s.min_gap - 52.5).abs() < 1e-4);
    }

    #[test]
    fn test_level_three() {
        let s = settings_for_level(3);
        assert!((s.scroll_speed - 2.8).abs() < 1e-5);
        assert!((s.max_gap - 90.0).abs() < 1e-4);
        assert!((s.min_gap - 63.0).abs() < 1e-4);
    }

    #[test]
    fn test_level_zero_is_level_one() {
        assert_eq!(settings_for_level(0), settings_for_level(1));
    }

    #[test]
    fn test_custom_tuning() {
        let tuning = Tuning {
            gravity: 1.0,
            jump_impulse: -10.0,
            base_speed: 3.0,
            ..Tuning::default()
        };
        let model = DifficultyModel::new(&tuning);
        assert!((model.max_jump_distance() - 60.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_min_gap_never_exceeds_max(level in 1u32..10_000) {
            let s = settings_for_level(level);
            prop_assert!(s.min_gap <= s.max_gap);
            prop_assert!(s.scroll_speed > 0.0);
        }

        #[test]
        fn prop_monotonic_in_level(level in 1u32..10_000) {
            let a = settings_for_level(level);
            let b = settings_for_level(level + 1);
            prop_assert!(b.scroll_speed >= a.scroll_speed);
            prop_assert!(b.min_gap >= a.min_gap);
            prop_assert!(b.max_gap >= a.max_gap);
        }

        #[test]
        fn prop_deterministic(level in 1u32..10_000) {
            prop_assert_eq!(settings_for_level(level), settings_for_level(level));
        }
    }
}
