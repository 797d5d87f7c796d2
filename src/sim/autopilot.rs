//! Demo-mode bot
//!
//! Reads a snapshot and decides whether to press jump. It only ever takes
//! single jumps off the trailing edge of its platform, which is enough to
//! clear every gap generated from the jump arc.

use super::state::{Phase, Snapshot};

#[derive(Debug, Clone, Copy)]
pub struct Autopilot {
    /// How many ticks before the platform edge passes the player to jump
    pub lead_ticks: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { lead_ticks: 3.0 }
    }
}

impl Autopilot {
    /// Whether to request a jump before the next tick
    pub fn decide(&self, snapshot: &Snapshot) -> bool {
        if snapshot.phase != Phase::Running {
            return false;
        }
        let Some(support) = snapshot.support_platform() else {
            return false;
        };
        let runway = support.rect.right() - snapshot.player.left();
        runway <= snapshot.scroll_speed * self.lead_ticks
    }
}
