use crate::games::types::GameType;
use std::collections::BTreeSet;

/// Games whose resolution has started but not yet been published
#[derive(Debug, Default)]
pub struct PendingGamesPool {
    pending: BTreeSet<GameType>,
}

impl PendingGamesPool {
    /// Create a new pending games pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a game as in flight. Returns false if it already was.
    pub fn add_pending(&mut self, game: GameType) -> bool {
        self.pending.insert(game)
    }

    /// Release a game once its outcome is published
    pub fn complete_game(&mut self, game: GameType) -> bool {
        self.pending.remove(&game)
    }

    /// Get number of pending games
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Check if a game is pending
    pub fn is_pending(&self, game: GameType) -> bool {
        self.pending.contains(&game)
    }

    pub fn pending_games(&self) -> impl Iterator<Item = GameType> + '_ {
        self.pending.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_pool() {
        let mut pool = PendingGamesPool::new();

        assert!(pool.add_pending(GameType::Dice));
        assert!(!pool.add_pending(GameType::Dice));
        assert!(pool.add_pending(GameType::Lottery));
        assert_eq!(pool.pending_count(), 2);
        assert!(pool.is_pending(GameType::Dice));
        assert!(!pool.is_pending(GameType::Coin));

        assert!(pool.complete_game(GameType::Dice));
        assert!(!pool.complete_game(GameType::Dice));
        assert_eq!(pool.pending_games().collect::<Vec<_>>(), vec![GameType::Lottery]);
    }
}
