//! Entities, resources and run-level types shared by the simulation
//!
//! Platforms and collectibles are plain data owned by the field; the ledger is
//! the only state that outlives a single run (it is handed back on abandon).

use std::fmt;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::error::{Error, Result};

/// Stable entity identifier, allocated in spawn order
pub type EntityId = u32;

/// Resource types a collectible can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Stone,
    Ice,
    Energy,
}

impl ResourceKind {
    /// Sampling order for weighted picks
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Stone, ResourceKind::Ice, ResourceKind::Energy];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Stone => "stone",
            ResourceKind::Ice => "ice",
            ResourceKind::Energy => "energy",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A platform the player can land on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: EntityId,
    pub rect: Rect,
    /// Kind of collectible spawned above this platform, if any
    pub collectible: Option<ResourceKind>,
}

impl Platform {
    pub fn has_collectible(&self) -> bool {
        self.collectible.is_some()
    }
}

/// A resource pickup. Scrolls on its own once spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: EntityId,
    pub rect: Rect,
    pub kind: ResourceKind,
    pub value: u32,
}

/// Closed set of scrolling entities, for typed traversal of the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entity<'a> {
    Platform(&'a Platform),
    Collectible(&'a Collectible),
}

impl Entity<'_> {
    pub fn id(&self) -> EntityId {
        match self {
            Entity::Platform(p) => p.id,
            Entity::Collectible(c) => c.id,
        }
    }

    pub fn rect(&self) -> Rect {
        match self {
            Entity::Platform(p) => p.rect,
            Entity::Collectible(c) => c.rect,
        }
    }
}

/// A price in resources
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub stone: u32,
    pub ice: u32,
    pub energy: u32,
}

impl Cost {
    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Stone => self.stone,
            ResourceKind::Ice => self.ice,
            ResourceKind::Energy => self.energy,
        }
    }
}

/// Collected resource counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLedger {
    pub stone: u32,
    pub ice: u32,
    pub energy: u32,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Stone => self.stone,
            ResourceKind::Ice => self.ice,
            ResourceKind::Energy => self.energy,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        match kind {
            ResourceKind::Stone => &mut self.stone,
            ResourceKind::Ice => &mut self.ice,
            ResourceKind::Energy => &mut self.energy,
        }
    }

    pub fn credit(&mut self, kind: ResourceKind, amount: u32) {
        let slot = self.slot_mut(kind);
        *slot = slot.saturating_add(amount);
    }

    /// Sum of all counters, saturating like `credit`
    pub fn total(&self) -> u32 {
        self.stone.saturating_add(self.ice).saturating_add(self.energy)
    }

    pub fn can_afford(&self, cost: &Cost) -> bool {
        ResourceKind::ALL
            .iter()
            .all(|&kind| self.get(kind) >= cost.get(kind))
    }

    /// Deduct `cost`; leaves the ledger untouched if any resource is short
    pub fn spend(&mut self, cost: &Cost) -> Result<()> {
        if let Some(&kind) = ResourceKind::ALL
            .iter()
            .find(|&&kind| self.get(kind) < cost.get(kind))
        {
            return Err(Error::InsufficientResources {
                kind,
                needed: cost.get(kind),
                available: self.get(kind),
            });
        }
        for kind in ResourceKind::ALL {
            *self.slot_mut(kind) -= cost.get(kind);
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Run state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Pre-run timer; player held on the start platform
    Countdown,
    /// Active gameplay
    Running,
    /// Frozen overlay before the next level starts
    LevelComplete,
    /// Frozen overlay after a fall with lives to spare
    LifeLost,
    /// Run ended
    GameOver,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub level: u32,
    pub lives: u32,
    pub platforms_jumped: u32,
    pub score: u64,
    pub time_ticks: u64,
    /// Pixels per tick the world scrolls at the current level
    pub scroll_speed: f32,
    pub player: Rect,
    pub player_grounded: bool,
    /// Platforms in spawn (left-to-right) order
    pub platforms: Vec<Platform>,
    pub collectibles: Vec<Collectible>,
    /// Seconds left on the countdown (0 outside `Countdown`)
    pub countdown_remaining: f64,
    pub ledger: ResourceLedger,
}

impl Snapshot {
    /// Countdown as the whole-second number shown on screen (3, 2, 1, then 0)
    pub fn countdown_display(&self) -> u32 {
        self.countdown_remaining.ceil().max(0.0) as u32
    }

    /// Platforms first, then collectibles
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.platforms
            .iter()
            .map(Entity::Platform)
            .chain(self.collectibles.iter().map(Entity::Collectible))
    }

    /// The platform the player is standing on, if grounded
    pub fn support_platform(&self) -> Option<&Platform> {
        if !self.player_grounded {
            return None;
        }
        self.platforms.iter().find(|p| {
            p.rect.left() < self.player.right()
                && p.rect.right() > self.player.left()
                && (p.rect.top() - self.player.bottom()).abs() < 1e-3
        })
    }
}

/// What a finished or abandoned run hands back to the outer navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub level: u32,
    pub score: u64,
    pub platforms_jumped: u32,
    pub ledger: ResourceLedger,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_credit_and_total() {
        let mut ledger = ResourceLedger::new();
        ledger.credit(ResourceKind::Stone, 2);
        ledger.credit(ResourceKind::Energy, 1);
        assert_eq!(ledger.get(ResourceKind::Stone), 2);
        assert_eq!(ledger.get(ResourceKind::Ice), 0);
        assert_eq!(ledger.total(), 3);
    }

    #[test]
    fn test_total_saturates_at_max() {
        let mut ledger = ResourceLedger::new();
        ledger.credit(ResourceKind::Stone, u32::MAX);
        ledger.credit(ResourceKind::Ice, 1);
        ledger.credit(ResourceKind::Stone, 5);
        assert_eq!(ledger.stone, u32::MAX);
        assert_eq!(ledger.total(), u32::MAX);
    }

    #[test]
    fn test_spend_success() {
        let mut ledger = ResourceLedger { stone: 6, ice: 1, energy: 0 };
        let farm = Cost { stone: 5, ..Default::default() };
        assert!(ledger.can_afford(&farm));
        ledger.spend(&farm).unwrap();
        assert_eq!(ledger.stone, 1);
        assert_eq!(ledger.ice, 1);
    }

    #[test]
    fn test_spend_failure_leaves_ledger_intact() {
        let mut ledger = ResourceLedger { stone: 10, ice: 2, energy: 0 };
        let cost = Cost { stone: 5, ice: 5, energy: 0 };
        assert!(!ledger.can_afford(&cost));
        let err = ledger.spend(&cost).unwrap_err();
        match err {
            Error::InsufficientResources { kind, needed, available } => {
                assert_eq!(kind, ResourceKind::Ice);
                assert_eq!(needed, 5);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(ledger, ResourceLedger { stone: 10, ice: 2, energy: 0 });
    }

    #[test]
    fn test_countdown_display() {
        let mut snap = Snapshot {
            phase: Phase::Countdown,
            level: 1,
            lives: 3,
            platforms_jumped: 0,
            score: 0,
            time_ticks: 0,
            scroll_speed: 2.0,
            player: Rect::new(100.0, 440.0, 40.0, 60.0),
            player_grounded: true,
            platforms: Vec::new(),
            collectibles: Vec::new(),
            countdown_remaining: 3.0,
            ledger: ResourceLedger::default(),
        };
        assert_eq!(snap.countdown_display(), 3);
        snap.countdown_remaining = 2.2;
        assert_eq!(snap.countdown_display(), 3);
        snap.countdown_remaining = 0.5;
        assert_eq!(snap.countdown_display(), 1);
        snap.countdown_remaining = 0.0;
        assert_eq!(snap.countdown_display(), 0);
    }

    #[test]
    fn test_entities_order() {
        let platform = Platform {
            id: 1,
            rect: Rect::new(0.0, 500.0, 200.0, 20.0),
            collectible: Some(ResourceKind::Ice),
        };
        let collectible = Collectible {
            id: 2,
            rect: Rect::new(100.0, 475.0, 20.0, 20.0),
            kind: ResourceKind::Ice,
            value: 1,
        };
        let snap = Snapshot {
            phase: Phase::Running,
            level: 1,
            lives: 3,
            platforms_jumped: 0,
            score: 0,
            time_ticks: 0,
            scroll_speed: 2.0,
            player: Rect::new(100.0, 440.0, 40.0, 60.0),
            player_grounded: true,
            platforms: vec![platform],
            collectibles: vec![collectible],
            countdown_remaining: 0.0,
            ledger: ResourceLedger::default(),
        };
        let ids: Vec<_> = snap.entities().map(|e| e.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(snap.support_platform().map(|p| p.id), Some(1));
    }
}
