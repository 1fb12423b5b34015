use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported game types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Dice,
    Coin,
    Lottery,
}

impl GameType {
    /// All games in display order
    pub const ALL: [GameType; 3] = [GameType::Dice, GameType::Coin, GameType::Lottery];

    /// Card title shown by the presentation layer
    pub fn title(&self) -> &'static str {
        match self {
            GameType::Dice => "Dice Roll",
            GameType::Coin => "Coin Flip",
            GameType::Lottery => "Lottery",
        }
    }

    /// One-line rules blurb
    pub fn description(&self) -> &'static str {
        match self {
            GameType::Dice => "Roll a dice and win if you get 4 or higher!",
            GameType::Coin => "Flip a coin and win on heads!",
            GameType::Lottery => "Pick 6 numbers and match 3 or more to win!",
        }
    }

    /// Label shown on the play control while a resolution is outstanding
    pub fn pending_label(&self) -> &'static str {
        match self {
            GameType::Dice => "Rolling...",
            GameType::Coin => "Flipping...",
            GameType::Lottery => "Drawing...",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::Dice => write!(f, "dice"),
            GameType::Coin => write!(f, "coin"),
            GameType::Lottery => write!(f, "lottery"),
        }
    }
}

impl std::str::FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dice" => Ok(GameType::Dice),
            "coin" => Ok(GameType::Coin),
            "lottery" => Ok(GameType::Lottery),
            other => Err(format!("unknown game '{}'", other)),
        }
    }
}

/// What the coin landed on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    /// Side that pays out
    pub const WINNING: CoinSide = CoinSide::Heads;
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "heads"),
            CoinSide::Tails => write!(f, "tails"),
        }
    }
}

/// Game-specific result payload (discriminated union)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "game_type", rename_all = "lowercase")]
pub enum GameData {
    Dice {
        face: u8,
    },
    Coin {
        side: CoinSide,
    },
    Lottery {
        matches: u8,
        picks: Vec<u8>,
        winning_numbers: Vec<u8>,
    },
}

impl GameData {
    pub fn game_type(&self) -> GameType {
        match self {
            GameData::Dice { .. } => GameType::Dice,
            GameData::Coin { .. } => GameType::Coin,
            GameData::Lottery { .. } => GameType::Lottery,
        }
    }
}

/// Recorded result of one game resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Carries the game selection as its `game_type` tag
    #[serde(flatten)]
    pub data: GameData,
    pub won: bool,
    pub timestamp: DateTime<Utc>,
    /// Reserved for on-chain settlement; nothing fills it in today
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

impl GameOutcome {
    pub fn new(data: GameData, won: bool, timestamp: DateTime<Utc>) -> Self {
        Self {
            data,
            won,
            timestamp,
            transaction_hash: None,
        }
    }

    pub fn game_type(&self) -> GameType {
        self.data.game_type()
    }

    fn verdict(&self) -> &'static str {
        if self.won {
            "You won!"
        } else {
            "Try again!"
        }
    }

    /// Human-readable notification published when the game completes
    pub fn notification(&self) -> String {
        match &self.data {
            GameData::Dice { face } => format!("You rolled a {}! {}", face, self.verdict()),
            GameData::Coin { side } => format!("Coin landed on {}! {}", side, self.verdict()),
            GameData::Lottery {
                matches,
                picks,
                winning_numbers,
            } => format!(
                "Winning numbers: {}\nYour numbers: {}\nMatches: {}\n{}",
                join_numbers(winning_numbers),
                join_numbers(picks),
                matches,
                self.verdict()
            ),
        }
    }

    /// Compact line used in the recent games list
    pub fn history_line(&self) -> String {
        let status = if self.won { "Won!" } else { "Lost" };
        match &self.data {
            GameData::Dice { face } => format!("Rolled a {} - {}", face, status),
            GameData::Coin { side } => format!("Coin landed on {} - {}", side, status),
            GameData::Lottery { matches, .. } => {
                format!("Lottery: {} matches - {}", matches, status)
            }
        }
    }
}

pub(crate) fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(data: GameData, won: bool) -> GameOutcome {
        GameOutcome::new(data, won, Utc::now())
    }

    #[test]
    fn test_dice_notification() {
        let won = outcome(GameData::Dice { face: 5 }, true);
        assert_eq!(won.notification(), "You rolled a 5! You won!");

        let lost = outcome(GameData::Dice { face: 2 }, false);
        assert_eq!(lost.notification(), "You rolled a 2! Try again!");
        assert_eq!(lost.history_line(), "Rolled a 2 - Lost");
    }

    #[test]
    fn test_lottery_notification_lists_both_sequences() {
        let result = outcome(
            GameData::Lottery {
                matches: 3,
                picks: vec![1, 2, 3, 4, 5, 6],
                winning_numbers: vec![1, 2, 3, 10, 11, 12],
            },
            true,
        );

        assert_eq!(
            result.notification(),
            "Winning numbers: 1, 2, 3, 10, 11, 12\nYour numbers: 1, 2, 3, 4, 5, 6\nMatches: 3\nYou won!"
        );
        assert_eq!(result.history_line(), "Lottery: 3 matches - Won!");
    }

    #[test]
    fn test_outcome_serialization() {
        let result = outcome(GameData::Coin { side: CoinSide::Heads }, true);
        let json = serde_json::to_value(&result).expect("serialize");

        assert_eq!(json["game_type"], "coin");
        assert_eq!(json["side"], "heads");
        assert_eq!(json["won"], true);
        assert!(json.get("transaction_hash").is_none());
    }

    #[test]
    fn test_game_type_parsing() {
        assert_eq!("Dice".parse::<GameType>(), Ok(GameType::Dice));
        assert_eq!(" lottery ".parse::<GameType>(), Ok(GameType::Lottery));
        assert!("poker".parse::<GameType>().is_err());
    }
}
