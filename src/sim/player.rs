//! Player kinematics and platform collision
//!
//! The player never moves horizontally on its own; the world scrolls past it.
//! Only vertical motion is simulated, in per-tick units.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::Timestamp;
use super::collision::Rect;
use super::state::{EntityId, Platform};
use crate::tuning::Tuning;

/// Result of one physics update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    None,
    /// Landed on a platform other than the previous one
    NewPlatform(EntityId),
    /// Dropped below the bottom of the screen
    Fell,
}

/// Which jump a request turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    First,
    Double,
}

/// Player body and vertical state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity, positive = falling
    pub velocity: f32,
    pub jumping: bool,
    pub grounded: bool,
    pub last_platform: Option<EntityId>,
    pub start_platform: Option<EntityId>,
    pub double_jump_available: bool,
    pub last_jump_at: Option<Timestamp>,
}

pub struct PlayerController {
    tuning: Tuning,
    player: Player,
}

impl PlayerController {
    /// Place the player standing on `start`
    pub fn new(tuning: Tuning, start: &Platform) -> Self {
        let rect = Rect::new(
            tuning.player_x,
            start.rect.top() - tuning.player_height,
            tuning.player_width,
            tuning.player_height,
        );
        Self {
            tuning,
            player: Player {
                rect,
                velocity: 0.0,
                jumping: false,
                grounded: true,
                last_platform: Some(start.id),
                start_platform: Some(start.id),
                double_jump_available: false,
                last_jump_at: None,
            },
        }
    }

    /// Current player state
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Player bounding box
    pub fn rect(&self) -> Rect {
        self.player.rect
    }

    #[cfg(test)]
    pub(crate) fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Advance one tick against `platforms`
    ///
    /// While the run is not live the player is pinned to its start platform.
    pub fn update(&mut self, platforms: &[Platform], running: bool) -> UpdateOutcome {
        let p = &mut self.player;

        if !running {
            if let Some(start) = p
                .start_platform
                .and_then(|id| platforms.iter().find(|pl| pl.id == id))
            {
                p.rect.set_bottom(start.rect.top());
                p.velocity = 0.0;
                p.jumping = false;
                p.grounded = true;
                p.last_platform = Some(start.id);
                p.double_jump_available = false;
            }
            return UpdateOutcome::None;
        }

        p.velocity += self.tuning.gravity;
        p.rect.pos.y += p.velocity;
        p.grounded = false;

        for platform in platforms {
            if !p.rect.overlaps(&platform.rect) {
                continue;
            }
            if p.velocity > 0.0 {
                p.rect.set_bottom(platform.rect.top());
                p.velocity = 0.0;
                p.jumping = false;
                p.grounded = true;
                p.double_jump_available = false;
                if p.last_platform != Some(platform.id) {
                    p.last_platform = Some(platform.id);
                    return UpdateOutcome::NewPlatform(platform.id);
                }
            } else if p.velocity < 0.0 {
                // Head bump
                p.rect.set_top(platform.rect.bottom());
                p.velocity = 0.0;
            }
        }

        if p.rect.top() > self.tuning.window_height {
            return UpdateOutcome::Fell;
        }
        UpdateOutcome::None
    }

    /// Try to jump at time `now`; impossible requests are ignored
    pub fn request_jump(&mut self, now: Timestamp) -> Option<JumpKind> {
        let t = &self.tuning;
        let p = &mut self.player;

        if !p.jumping && p.grounded {
            p.velocity = t.jump_impulse;
            p.jumping = true;
            p.last_jump_at = Some(now);
            p.double_jump_available = true;
            return Some(JumpKind::First);
        }

        let in_window = p
            .last_jump_at
            .is_some_and(|at| now.since(at) < t.double_jump_window);
        if p.double_jump_available && in_window {
            p.velocity = t.jump_impulse * t.double_jump_multiplier;
            p.double_jump_available = false;
            p.rect.translate(Vec2::new(t.double_jump_boost, 0.0));
            return Some(JumpKind::Double);
        }

        None
    }
}
