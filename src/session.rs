//! In-memory record of the games played during one session.
//!
//! Outcomes are only ever prepended, so iteration yields the most recent game
//! first. Nothing is persisted; dropping the history discards it.

use crate::games::types::{GameOutcome, GameType};
use crate::leaderboard::LeaderboardEntry;
use serde::Serialize;
use std::collections::VecDeque;

/// Win/played tallies derived from the history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub wins: u32,
    pub total_played: u32,
}

impl SessionStats {
    pub fn losses(&self) -> u32 {
        self.total_played - self.wins
    }
}

#[derive(Debug, Default, Clone)]
pub struct SessionHistory {
    outcomes: VecDeque<GameOutcome>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an outcome as the newest entry
    pub fn record(&mut self, outcome: GameOutcome) {
        tracing::debug!(
            "Recording {} outcome (won: {}), history size {}",
            outcome.game_type(),
            outcome.won,
            self.outcomes.len() + 1
        );
        self.outcomes.push_front(outcome);
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &GameOutcome> + '_ {
        self.outcomes.iter()
    }

    pub fn latest(&self) -> Option<&GameOutcome> {
        self.outcomes.front()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn for_game(&self, game: GameType) -> impl Iterator<Item = &GameOutcome> + '_ {
        self.outcomes.iter().filter(move |o| o.game_type() == game)
    }

    pub fn stats(&self) -> SessionStats {
        self.outcomes.iter().fold(SessionStats::default(), |mut acc, o| {
            acc.total_played += 1;
            if o.won {
                acc.wins += 1;
            }
            acc
        })
    }

    /// Summarize this session as a leaderboard row for the given player
    pub fn as_leaderboard_entry(&self, address: &str) -> LeaderboardEntry {
        let stats = self.stats();
        LeaderboardEntry::new(address, stats.wins, stats.total_played)
    }

    /// Owned copy of the history, newest first
    pub fn snapshot(&self) -> Vec<GameOutcome> {
        self.outcomes.iter().cloned().collect()
    }
}
