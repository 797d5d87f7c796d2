//! Mars Runner - deterministic core of a scrolling platform runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, platform generation, run state machine)
//! - `tuning`: Data-driven game balance
//! - `highscores`: In-memory leaderboard of finished runs
//! - `error`: Error type for the fallible edges (config loading, resource spending)

pub mod error;
pub mod highscores;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use highscores::{HighScores, RunRecord};
pub use tuning::Tuning;

/// Game configuration constants
///
/// All distances are screen pixels with y growing downward; speeds and
/// accelerations are per simulation tick.
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f64 = 1.0 / SIM_HZ as f64;

    /// Screen dimensions
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Player body and fixed horizontal position
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_X: f32 = 100.0;

    /// Jump physics (negative impulse = upward)
    pub const JUMP_IMPULSE: f32 = -15.0;
    pub const GRAVITY: f32 = 0.8;
    /// Seconds after the first jump in which a second press still counts
    pub const DOUBLE_JUMP_WINDOW: f64 = 0.3;
    pub const DOUBLE_JUMP_MULTIPLIER: f32 = 1.5;
    /// Instant horizontal nudge applied by a double jump
    pub const DOUBLE_JUMP_BOOST: f32 = 20.0;

    /// Scroll speed at level 1
    pub const BASE_PLATFORM_SPEED: f32 = 2.0;
    pub const PLATFORM_WIDTH: f32 = 200.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    /// Vertical band for generated platforms (top edge)
    pub const PLATFORM_Y_MIN: f32 = WINDOW_HEIGHT - 200.0;
    pub const PLATFORM_Y_MAX: f32 = WINDOW_HEIGHT - 100.0;
    /// The start platform always sits at the bottom of the band
    pub const FIRST_PLATFORM_Y: f32 = WINDOW_HEIGHT - 100.0;
    pub const MIN_LIVE_PLATFORMS: usize = 5;

    /// Collectibles
    pub const COLLECTIBLE_SIZE: f32 = 20.0;
    /// Gap between a collectible's bottom edge and its platform's top
    pub const COLLECTIBLE_LIFT: f32 = 5.0;
    pub const COLLECTIBLE_CHANCE: f32 = 0.7;
    pub const STONE_WEIGHT: f32 = 0.4;
    pub const ICE_WEIGHT: f32 = 0.3;
    pub const ENERGY_WEIGHT: f32 = 0.3;
    pub const COLLECTIBLE_VALUE: u32 = 1;
    pub const COLLECTION_SCORE: u64 = 10;

    /// Run rules
    pub const START_LIVES: u32 = 3;
    pub const PLATFORMS_PER_LEVEL: u32 = 30;
    pub const COUNTDOWN_SECS: f64 = 3.0;
    pub const LEVEL_COMPLETE_SECS: f64 = 2.0;
}
