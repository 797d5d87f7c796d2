//! Run state machine
//!
//! `RunSession` owns every piece of mutable run state. The outside world only
//! calls [`RunSession::advance`] once per tick, queues jumps and reads
//! snapshots; countdown and overlays are phases, never blocking waits.

use super::clock::Timestamp;
use super::difficulty::{DifficultyModel, LevelSettings};
use super::platforms::PlatformField;
use super::player::{PlayerController, UpdateOutcome};
use super::state::{Phase, ResourceLedger, RunSummary, Snapshot};
use crate::error::Result;
use crate::tuning::Tuning;

pub struct RunSession {
    tuning: Tuning,
    difficulty: DifficultyModel,
    field: PlatformField,
    player: PlayerController,
    ledger: ResourceLedger,
    level: u32,
    lives: u32,
    platforms_jumped: u32,
    score: u64,
    phase: Phase,
    /// When the current phase began; countdown takes it from the first advance
    phase_started: Option<Timestamp>,
    countdown_remaining: f64,
    pending_jump: bool,
    time_ticks: u64,
}

impl RunSession {
    /// A fresh run at level 1 with full lives, waiting on its countdown
    ///
    /// Fails with `InvalidTuning` when `tuning` does not validate.
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self> {
        let mut field = PlatformField::new(tuning, seed)?;
        let start = field.spawn_initial(1);
        let player = PlayerController::new(tuning, &start);
        log::info!("New run (seed {})", seed);
        Ok(Self {
            difficulty: DifficultyModel::new(&tuning),
            field,
            player,
            ledger: ResourceLedger::default(),
            level: 1,
            lives: tuning.start_lives,
            platforms_jumped: 0,
            score: 0,
            phase: Phase::Countdown,
            phase_started: None,
            countdown_remaining: tuning.countdown_secs,
            pending_jump: false,
            time_ticks: 0,
            tuning,
        })
    }

    /// (Re)start at `level` behind a countdown
    ///
    /// The ledger is zeroed on every start, even when lives carry over.
    pub fn start(&mut self, level: u32, reset_lives: bool) {
        if reset_lives {
            self.lives = self.tuning.start_lives;
        }
        self.respawn(level);
        self.enter(Phase::Countdown, None);
        log::info!("Starting level {} with {} lives", self.level, self.lives);
    }

    fn respawn(&mut self, level: u32) {
        self.level = level.max(1);
        self.platforms_jumped = 0;
        self.score = 0;
        self.ledger.reset();
        self.pending_jump = false;
        self.countdown_remaining = self.tuning.countdown_secs;
        let start = self.field.spawn_initial(self.level);
        self.player = PlayerController::new(self.tuning, &start);
    }

    fn enter(&mut self, phase: Phase, at: Option<Timestamp>) {
        self.phase = phase;
        self.phase_started = at;
    }

    /// Queue a jump attempt for the next `advance`
    pub fn request_jump(&mut self) {
        self.pending_jump = true;
    }

    /// Run one tick at time `now`
    pub fn advance(&mut self, now: Timestamp) -> Snapshot {
        self.time_ticks += 1;

        match self.phase {
            Phase::Countdown => {
                self.pending_jump = false;
                let started = *self.phase_started.get_or_insert(now);
                let elapsed = now.since(started);
                self.countdown_remaining = (self.tuning.countdown_secs - elapsed).max(0.0);

                if elapsed >= self.tuning.countdown_secs {
                    self.enter(Phase::Running, Some(now));
                    log::info!("Level {} running", self.level);
                    self.step_running(now);
                } else {
                    self.player.update(self.field.platforms(), false);
                }
            }
            Phase::Running => self.step_running(now),
            Phase::LevelComplete => {
                self.pending_jump = false;
                let done = self
                    .phase_started
                    .is_none_or(|at| now.since(at) >= self.tuning.level_complete_secs);
                if done {
                    self.level += 1;
                    self.platforms_jumped = 0;
                    self.enter(Phase::Running, Some(now));
                    log::info!("Level {} running", self.level);
                }
            }
            Phase::LifeLost | Phase::GameOver => {
                self.pending_jump = false;
            }
        }

        self.snapshot()
    }

    fn step_running(&mut self, now: Timestamp) {
        let settings = self.settings();

        if std::mem::take(&mut self.pending_jump) {
            if let Some(kind) = self.player.request_jump(now) {
                log::debug!("{:?} jump at {:.3}s", kind, now.as_secs());
            }
        }

        match self.player.update(self.field.platforms(), true) {
            UpdateOutcome::NewPlatform(id) => {
                self.platforms_jumped += 1;
                log::debug!(
                    "Landed on platform {} ({}/{})",
                    id,
                    self.platforms_jumped,
                    self.tuning.platforms_per_level
                );
                if self.platforms_jumped >= self.tuning.platforms_per_level
                    && self.phase != Phase::LevelComplete
                {
                    self.enter(Phase::LevelComplete, Some(now));
                    // Top up with next-level gaps so the new level is walkable at once
                    self.field.ensure_minimum(self.level + 1);
                    log::info!("Level {} complete", self.level);
                }
            }
            UpdateOutcome::Fell => {
                if self.lives > 1 {
                    self.lives -= 1;
                    self.enter(Phase::LifeLost, Some(now));
                    log::info!("Life lost on level {}, {} left", self.level, self.lives);
                } else {
                    self.enter(Phase::GameOver, Some(now));
                    log::info!("Game over on level {} (score {})", self.level, self.score);
                }
            }
            UpdateOutcome::None => {}
        }

        self.field.scroll(settings.scroll_speed);
        for collectible in self.field.collect(&self.player.rect()) {
            self.ledger.credit(collectible.kind, collectible.value);
            self.score += self.tuning.collection_score;
        }
        self.field.ensure_minimum(self.level);
        debug_assert!(!self.field.is_empty(), "platform field emptied during play");
    }

    /// Try again after a lost life or a game over
    ///
    /// After a lost life play resumes immediately; after a game over a new
    /// countdown runs, and `same_level = false` also restores full lives.
    /// Returns `false` (and changes nothing) in any other phase.
    pub fn retry(&mut self, same_level: bool) -> bool {
        let level = if same_level { self.level } else { 1 };
        match self.phase {
            Phase::LifeLost => {
                self.respawn(level);
                self.enter(Phase::Running, None);
                log::info!("Retrying level {} with {} lives", self.level, self.lives);
                true
            }
            Phase::GameOver => {
                self.start(level, !same_level);
                true
            }
            _ => false,
        }
    }

    /// Tear the run down, handing back what the outer screens keep
    pub fn abandon(self) -> RunSummary {
        log::info!("Run abandoned on level {}", self.level);
        self.summary()
    }

    /// Level, score and ledger as they stand now
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            level: self.level,
            score: self.score,
            platforms_jumped: self.platforms_jumped,
            ledger: self.ledger,
        }
    }

    /// Read-only view of the current tick
    pub fn snapshot(&self) -> Snapshot {
        let player = self.player.player();
        Snapshot {
            phase: self.phase,
            level: self.level,
            lives: self.lives,
            platforms_jumped: self.platforms_jumped,
            score: self.score,
            time_ticks: self.time_ticks,
            scroll_speed: self.settings().scroll_speed,
            player: player.rect,
            player_grounded: player.grounded,
            platforms: self.field.platforms().to_vec(),
            collectibles: self.field.collectibles().to_vec(),
            countdown_remaining: if self.phase == Phase::Countdown {
                self.countdown_remaining
            } else {
                0.0
            },
            ledger: self.ledger,
        }
    }

    /// Difficulty settings of the current level
    pub fn settings(&self) -> LevelSettings {
        self.difficulty.settings_for_level(self.level)
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current level (1-based)
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Lives remaining
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// New platforms landed on this level
    pub fn platforms_jumped(&self) -> u32 {
        self.platforms_jumped
    }

    /// Score of the current attempt
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Resources collected in the current attempt
    pub fn ledger(&self) -> &ResourceLedger {
        &self.ledger
    }

    /// Tuning the run was built with
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
