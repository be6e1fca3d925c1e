//! High score leaderboard
//!
//! Kept in memory for the lifetime of the process, tracks the top 10 rounds.
//! The best entry is the process high score.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Result of one finished round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Pairs cleared
    pub score: u32,
    /// Ticks survived
    pub ticks: u64,
    /// Round number within this process
    pub round: u32,
}

/// Finished rounds, best first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ranked entries, best first; ties keep the earlier round ahead
    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Best score recorded so far, 0 before any scoring round
    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    /// Rank a finished round. Returns its 1-based rank if it made the board.
    ///
    /// Rounds that cleared nothing are not ranked.
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if entry.score == 0 {
            return None;
        }
        let index = self.entries.partition_point(|e| e.score >= entry.score);
        if index >= MAX_HIGH_SCORES {
            return None;
        }

        if index == 0 {
            log::info!("New high score: {} (round {})", entry.score, entry.round);
        }
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(round: u32, score: u32) -> HighScoreEntry {
        HighScoreEntry {
            score,
            ticks: u64::from(score) * 100,
            round,
        }
    }

    #[test]
    fn test_scoreless_rounds_are_not_ranked() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(round(1, 0)), None);
        assert!(scores.entries().is_empty());
        assert_eq!(scores.best(), 0);
    }

    #[test]
    fn test_ranked_best_first() {
        let mut scores = HighScores::new();
        assert_eq!(scores.record(round(1, 5)), Some(1));
        assert_eq!(scores.record(round(2, 9)), Some(1));
        assert_eq!(scores.record(round(3, 7)), Some(2));
        // Ties go behind the earlier round
        assert_eq!(scores.record(round(4, 5)), Some(4));
        let order: Vec<u32> = scores.entries().iter().map(|e| e.round).collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
        assert_eq!(scores.best(), 9);
    }

    #[test]
    fn test_full_board_drops_the_worst() {
        let mut scores = HighScores::new();
        for r in 1..=15 {
            scores.record(round(r, r));
        }
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(scores.best(), 15);
        assert_eq!(scores.entries().last().map(|e| e.score), Some(6));

        // Tying the last place does not displace it
        assert_eq!(scores.record(round(16, 6)), None);
        assert_eq!(scores.record(round(17, 7)), Some(10));
        assert_eq!(scores.entries().last().map(|e| e.round), Some(17));
        assert_eq!(scores.record(round(18, 100)), Some(1));
        assert_eq!(scores.best(), 100);
    }
}
