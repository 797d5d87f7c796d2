//! Data-driven game balance
//!
//! Every physics and generation constant the simulation reads lives here, so a
//! run can be re-balanced from a JSON file without recompiling. Missing fields
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};

/// Relative odds of each collectible kind (sampled cumulatively in
/// stone, ice, energy order)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectibleWeights {
    pub stone: f32,
    pub ice: f32,
    pub energy: f32,
}

impl Default for CollectibleWeights {
    fn default() -> Self {
        Self {
            stone: STONE_WEIGHT,
            ice: ICE_WEIGHT,
            energy: ENERGY_WEIGHT,
        }
    }
}

/// Balance constants for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub window_width: f32,
    pub window_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_x: f32,
    /// Per-tick acceleration (positive = downward)
    pub gravity: f32,
    /// Initial jump velocity (negative = upward)
    pub jump_impulse: f32,
    /// Seconds after the first jump in which a double jump is accepted
    pub double_jump_window: f64,
    pub double_jump_multiplier: f32,
    pub double_jump_boost: f32,

    // === Platforms ===
    pub base_speed: f32,
    pub platform_width: f32,
    pub platform_height: f32,
    pub platform_y_min: f32,
    pub platform_y_max: f32,
    pub first_platform_y: f32,
    pub min_live_platforms: usize,

    // === Collectibles ===
    pub collectible_size: f32,
    pub collectible_lift: f32,
    pub collectible_chance: f32,
    pub collectible_weights: CollectibleWeights,
    pub collection_score: u64,

    // === Run rules ===
    pub start_lives: u32,
    pub platforms_per_level: u32,
    pub countdown_secs: f64,
    pub level_complete_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_x: PLAYER_X,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            double_jump_window: DOUBLE_JUMP_WINDOW,
            double_jump_multiplier: DOUBLE_JUMP_MULTIPLIER,
            double_jump_boost: DOUBLE_JUMP_BOOST,

            base_speed: BASE_PLATFORM_SPEED,
            platform_width: PLATFORM_WIDTH,
            platform_height: PLATFORM_HEIGHT,
            platform_y_min: PLATFORM_Y_MIN,
            platform_y_max: PLATFORM_Y_MAX,
            first_platform_y: FIRST_PLATFORM_Y,
            min_live_platforms: MIN_LIVE_PLATFORMS,

            collectible_size: COLLECTIBLE_SIZE,
            collectible_lift: COLLECTIBLE_LIFT,
            collectible_chance: COLLECTIBLE_CHANCE,
            collectible_weights: CollectibleWeights::default(),
            collection_score: COLLECTION_SCORE,

            start_lives: START_LIVES,
            platforms_per_level: PLATFORMS_PER_LEVEL,
            countdown_secs: COUNTDOWN_SECS,
            level_complete_secs: LEVEL_COMPLETE_SECS,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (useful as a starting template)
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn check(ok: bool, msg: &str) -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(Error::InvalidTuning(msg.to_string()))
            }
        }

        check(self.gravity > 0.0, "gravity must be positive")?;
        check(self.jump_impulse < 0.0, "jump_impulse must be negative (upward)")?;
        check(self.base_speed > 0.0, "base_speed must be positive")?;
        check(
            self.window_width > 0.0 && self.window_height > 0.0,
            "window dimensions must be positive",
        )?;
        check(
            self.player_width > 0.0 && self.player_height > 0.0,
            "player dimensions must be positive",
        )?;
        check(
            self.platform_width > 0.0 && self.platform_height > 0.0,
            "platform dimensions must be positive",
        )?;
        check(self.collectible_size > 0.0, "collectible_size must be positive")?;
        check(
            self.platform_y_min <= self.platform_y_max,
            "platform_y_min must not exceed platform_y_max",
        )?;
        check(
            (0.0..=1.0).contains(&self.collectible_chance),
            "collectible_chance must be within [0, 1]",
        )?;
        let w = self.collectible_weights;
        check(
            w.stone >= 0.0 && w.ice >= 0.0 && w.energy >= 0.0,
            "collectible weights must be non-negative",
        )?;
        check(self.min_live_platforms >= 1, "min_live_platforms must be at least 1")?;
        check(self.platforms_per_level >= 1, "platforms_per_level must be at least 1")?;
        check(self.start_lives >= 1, "start_lives must be at least 1")?;
        check(
            self.double_jump_window >= 0.0
                && self.countdown_secs >= 0.0
                && self.level_complete_secs >= 0.0,
            "durations must be non-negative",
        )?;
        Ok(())
    }

    /// Horizontal distance covered during one full jump arc at base speed
    ///
    /// Time to peak is `|impulse| / gravity` ticks; the arc lasts twice that.
    pub fn max_jump_distance(&self) -> f32 {
        let time_to_peak = self.jump_impulse.abs() / self.gravity;
        self.base_speed * time_to_peak * 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert!((tuning.max_jump_distance() - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 1.0, "start_lives": 5 }"#).unwrap();
        assert_eq!(tuning.gravity, 1.0);
        assert_eq!(tuning.start_lives, 5);
        assert_eq!(tuning.platform_width, PLATFORM_WIDTH);
        assert_eq!(tuning.collectible_weights, CollectibleWeights::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut tuning = Tuning::default();
        tuning.platform_y_min = 450.0;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let err = Tuning::from_json(r#"{ "gravity": -0.8 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_inverted_band() {
        let err = Tuning::from_json(r#"{ "platform_y_min": 500, "platform_y_max": 400 }"#)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/nonexistent/mars-runner-tuning.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
