//! Procedural platform field
//!
//! Platforms spawn only at the right edge and all scroll at the same speed, so
//! the vector stays in left-to-right order and the last entry is always the
//! rightmost platform.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::difficulty::DifficultyModel;
use super::state::{Collectible, Entity, EntityId, Platform, ResourceKind};
use crate::error::Result;
use crate::tuning::Tuning;

pub struct PlatformField {
    tuning: Tuning,
    difficulty: DifficultyModel,
    rng: Pcg32,
    platforms: Vec<Platform>,
    collectibles: Vec<Collectible>,
    next_id: EntityId,
}

impl PlatformField {
    /// Empty field seeded from `seed`; rejects tuning it could not spawn from
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self> {
        tuning.validate()?;
        Ok(Self {
            difficulty: DifficultyModel::new(&tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            platforms: Vec::new(),
            collectibles: Vec::new(),
            next_id: 1,
        })
    }

    /// Live platforms, left to right
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Live collectibles in spawn order
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }

    pub fn platform(&self, id: EntityId) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Number of live platforms
    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    /// Check if no platforms are live
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Platforms then collectibles
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.platforms
            .iter()
            .map(Entity::Platform)
            .chain(self.collectibles.iter().map(Entity::Collectible))
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset the field for a fresh attempt at `level`
    ///
    /// The start platform sits centred under the player and never carries a
    /// collectible; the rest of the initial run is generated normally.
    /// Returns a copy of the start platform.
    pub fn spawn_initial(&mut self, level: u32) -> Platform {
        self.platforms.clear();
        self.collectibles.clear();

        let id = self.next_entity_id();
        let t = &self.tuning;
        let start = Platform {
            id,
            rect: Rect::new(
                t.player_x - t.platform_width / 2.0,
                t.first_platform_y,
                t.platform_width,
                t.platform_height,
            ),
            collectible: None,
        };
        self.platforms.push(start.clone());

        while self.platforms.len() < self.tuning.min_live_platforms {
            self.spawn_next(level);
        }

        log::debug!(
            "Spawned initial field for level {}: {} platforms, {} collectibles",
            level,
            self.platforms.len(),
            self.collectibles.len()
        );
        start
    }

    /// Append one platform beyond the current rightmost one
    pub fn spawn_next(&mut self, level: u32) -> EntityId {
        let settings = self.difficulty.settings_for_level(level);

        let x = match self.platforms.last() {
            Some(last) => last.rect.right() + self.rng.random_range(settings.min_gap..=settings.max_gap),
            None => self.tuning.window_width,
        };
        let y = self
            .rng
            .random_range(self.tuning.platform_y_min..=self.tuning.platform_y_max);

        let collectible = if self.rng.random::<f32>() < self.tuning.collectible_chance {
            Some(self.choose_collectible_kind())
        } else {
            None
        };

        let id = self.next_entity_id();
        let rect = Rect::new(x, y, self.tuning.platform_width, self.tuning.platform_height);
        self.platforms.push(Platform { id, rect, collectible });

        if let Some(kind) = collectible {
            let size = self.tuning.collectible_size;
            let collectible_id = self.next_entity_id();
            self.collectibles.push(Collectible {
                id: collectible_id,
                rect: Rect::new(
                    x + self.tuning.platform_width / 2.0,
                    y - size - self.tuning.collectible_lift,
                    size,
                    size,
                ),
                kind,
                value: crate::consts::COLLECTIBLE_VALUE,
            });
        }

        id
    }

    /// Cumulative weighted pick; floating-point leftovers fall back to stone
    fn choose_collectible_kind(&mut self) -> ResourceKind {
        let w = self.tuning.collectible_weights;
        let roll: f32 = self.rng.random();
        let mut cumulative = 0.0;
        for (kind, weight) in ResourceKind::ALL.into_iter().zip([w.stone, w.ice, w.energy]) {
            cumulative += weight;
            if roll <= cumulative {
                return kind;
            }
        }
        ResourceKind::Stone
    }

    /// Move everything left by `speed` and drop whatever left the screen
    pub fn scroll(&mut self, speed: f32) {
        for platform in &mut self.platforms {
            platform.rect.pos.x -= speed;
        }
        for collectible in &mut self.collectibles {
            collectible.rect.pos.x -= speed;
        }
        self.platforms.retain(|p| p.rect.right() >= 0.0);
        self.collectibles.retain(|c| c.rect.right() >= 0.0);
    }

    /// Top up to the minimum live platform count using `level`'s gaps
    pub fn ensure_minimum(&mut self, level: u32) {
        while self.platforms.len() < self.tuning.min_live_platforms {
            let id = self.spawn_next(level);
            log::debug!("Spawned platform {} for level {}", id, level);
        }
    }

    /// Remove and return every collectible overlapping `player`
    pub fn collect(&mut self, player: &Rect) -> Vec<Collectible> {
        let mut collected = Vec::new();
        self.collectibles.retain(|c| {
            if c.rect.overlaps(player) {
                collected.push(c.clone());
                false
            } else {
                true
            }
        });
        collected
    }

    #[cfg(test)]
    pub(crate) fn truncate_front(&mut self, n: usize) {
        let n = n.min(self.platforms.len());
        self.platforms.drain(..n);
    }

    #[cfg(test)]
    pub(crate) fn platforms_mut(&mut self) -> &mut Vec<Platform> {
        &mut self.platforms
    }

    #[cfg(test)]
    pub(crate) fn collectibles_mut(&mut self) -> &mut Vec<Collectible> {
        &mut self.collectibles
    }
}
