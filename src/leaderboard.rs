//! Read-only leaderboard data.
//!
//! Rank is implied by position; this module never reorders what it is given.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub address: String,
    pub wins: u32,
    pub total_played: u32,
}

impl LeaderboardEntry {
    pub fn new(address: impl Into<String>, wins: u32, total_played: u32) -> Self {
        Self {
            address: address.into(),
            wins,
            total_played,
        }
    }

    /// `0x1234...cdef` style abbreviation
    pub fn short_address(&self) -> String {
        shorten_address(&self.address)
    }
}

pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }

    /// Placeholder standings shown until a real source exists
    pub fn mock() -> Self {
        Self::new(vec![
            LeaderboardEntry::new("0x1234567890abcdef", 10, 15),
            LeaderboardEntry::new("0xabcdef1234567890", 8, 12),
            LeaderboardEntry::new("0x9876543210fedcba", 5, 9),
        ])
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One display row per entry, ranked from 1
    pub fn rows(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "#{} {}  {} wins  {} games played",
                    i + 1,
                    entry.short_address(),
                    entry.wins,
                    entry.total_played
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        assert_eq!(shorten_address("0x1234567890abcdef"), "0x1234...cdef");
        assert_eq!(shorten_address("0xabc"), "0xabc");
    }

    #[test]
    fn test_rows_keep_given_order() {
        let board = Leaderboard::mock();
        let rows = board.rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "#1 0x1234...cdef  10 wins  15 games played");
        assert!(rows[2].starts_with("#3 0x9876...dcba"));
    }
}
