//! Run leaderboard
//!
//! Keeps the best finished runs, ranked by level reached and then score.
//! Lives in memory only; the outer screens decide what to do with it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::sim::RunSummary;

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub level: u32,
    pub score: u64,
    pub platforms_jumped: u32,
    /// Total resources collected in the final attempt
    pub resources: u32,
    /// Seed the run was generated from
    pub seed: u64,
}

impl RunRecord {
    /// Record a finished run played from `seed`
    pub fn from_summary(summary: &RunSummary, seed: u64) -> Self {
        Self {
            level: summary.level,
            score: summary.score,
            platforms_jumped: summary.platforms_jumped,
            resources: summary.ledger.total(),
            seed,
        }
    }

    /// Leaderboard order: higher level first, then higher score
    fn rank_cmp(&self, other: &RunRecord) -> Ordering {
        (other.level, other.score).cmp(&(self.level, self.score))
    }

    fn beats(&self, other: &RunRecord) -> bool {
        self.rank_cmp(other) == Ordering::Less
    }
}

/// Leaderboard of the best runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<RunRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a run would make the board
    pub fn qualifies(&self, record: &RunRecord) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().is_none_or(|e| record.beats(e))
    }

    /// Rank a run would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, record: &RunRecord) -> Option<usize> {
        if !self.qualifies(record) {
            return None;
        }
        let rank = self.entries.iter().position(|e| record.beats(e));
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a run; returns the rank achieved or None if it didn't qualify
    pub fn add(&mut self, record: RunRecord) -> Option<usize> {
        let rank = self.potential_rank(&record)?;
        self.entries.insert(rank - 1, record);
        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("New leaderboard entry at rank {}", rank);
        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best run on the board
    pub fn top(&self) -> Option<&RunRecord> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(level: u32, score: u64) -> RunRecord {
        RunRecord {
            level,
            score,
            platforms_jumped: 0,
            resources: 0,
            seed: 0,
        }
    }

    #[test]
    fn test_empty_board() {
        let board = HighScores::new();
        assert!(board.is_empty());
        assert!(board.qualifies(&record(1, 0)));
        assert_eq!(board.potential_rank(&record(1, 0)), Some(1));
    }

    #[test]
    fn test_level_outranks_score() {
        let mut board = HighScores::new();
        board.add(record(1, 500));
        assert_eq!(board.add(record(2, 10)), Some(1));
        assert_eq!(board.add(record(2, 20)), Some(1));
        assert_eq!(board.add(record(1, 600)), Some(3));
        let order: Vec<_> = board.entries.iter().map(|e| (e.level, e.score)).collect();
        assert_eq!(order, vec![(2, 20), (2, 10), (1, 600), (1, 500)]);
        assert_eq!(board.top().map(|e| e.level), Some(2));
    }

    #[test]
    fn test_ties_rank_after_existing() {
        let mut board = HighScores::new();
        board.add(record(3, 100));
        assert_eq!(board.add(record(3, 100)), Some(2));
    }

    #[test]
    fn test_full_board_trims_and_rejects() {
        let mut board = HighScores::new();
        for i in 0..MAX_HIGH_SCORES as u64 {
            board.add(record(2, 100 + i));
        }
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert!(!board.qualifies(&record(1, 10_000)));
        assert_eq!(board.add(record(1, 10_000)), None);

        assert_eq!(board.add(record(5, 0)), Some(1));
        assert_eq!(board.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(board.entries.last().map(|e| e.score), Some(101));
    }

    #[test]
    fn test_from_summary() {
        use crate::sim::ResourceLedger;
        let summary = RunSummary {
            level: 4,
            score: 90,
            platforms_jumped: 12,
            ledger: ResourceLedger { stone: 3, ice: 2, energy: 4 },
        };
        let rec = RunRecord::from_summary(&summary, 42);
        assert_eq!(rec.resources, 9);
        assert_eq!(rec.level, 4);
        assert_eq!(rec.seed, 42);
    }
}
