//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, time supplied by the caller
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod platforms;
pub mod player;
pub mod session;
pub mod state;

pub use autopilot::Autopilot;
pub use clock::{Clock, FixedStepClock, SystemClock, Timestamp};
pub use collision::Rect;
pub use difficulty::{DifficultyModel, LevelSettings, settings_for_level};
pub use platforms::PlatformField;
pub use player::{JumpKind, Player, PlayerController, UpdateOutcome};
pub use session::RunSession;
pub use state::{
    Collectible, Cost, Entity, EntityId, Phase, Platform, ResourceKind, ResourceLedger,
    RunSummary, Snapshot,
};
