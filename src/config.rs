//! Configuration management with validation and defaults
//!
//! Values come from built-in defaults, optionally replaced by a TOML file, then
//! by `FLARE_GAMES_*` environment variables, and are validated last.

use crate::errors::{ConfigurationError, FlareResult};
use crate::games::processor::DrawMode;
use crate::games::types::GameType;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Longest artificial delay accepted for any game
pub const MAX_DELAY_MS: u64 = 60_000;

pub const ENV_SEED: &str = "FLARE_GAMES_SEED";
pub const ENV_DRAW_MODE: &str = "FLARE_GAMES_DRAW_MODE";
pub const ENV_LOG_LEVEL: &str = "FLARE_GAMES_LOG_LEVEL";
pub const ENV_INSTANT: &str = "FLARE_GAMES_INSTANT";

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlareConfig {
    pub delays: DelayConfig,
    pub lottery: LotteryConfig,
    pub rng: RngConfig,
    pub logging: LoggingConfig,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// "Drawing in progress" delay before each game resolves
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DelayConfig {
    pub dice_ms: u64,
    pub coin_ms: u64,
    pub lottery_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            dice_ms: 1_000,
            coin_ms: 1_000,
            lottery_ms: 2_000,
        }
    }
}

impl DelayConfig {
    pub fn instant() -> Self {
        Self {
            dice_ms: 0,
            coin_ms: 0,
            lottery_ms: 0,
        }
    }

    pub fn for_game(&self, game: GameType) -> Duration {
        let ms = match game {
            GameType::Dice => self.dice_ms,
            GameType::Coin => self.coin_ms,
            GameType::Lottery => self.lottery_ms,
        };
        Duration::from_millis(ms)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LotteryConfig {
    pub draw_mode: DrawMode,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RngConfig {
    /// Fixed seed for reproducible sessions; entropy when absent
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigurationError::InvalidValue {
                field: "logging.level".to_string(),
                value: other.to_string(),
                reason: "expected error, warn, info, debug or trace".to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

impl FlareConfig {
    /// Defaults with every artificial delay removed
    pub fn instant() -> Self {
        Self {
            delays: DelayConfig::instant(),
            ..Default::default()
        }
    }

    /// Defaults with a fixed seed and no delays, for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: RngConfig { seed: Some(seed) },
            ..Self::instant()
        }
    }

    /// Load from an optional TOML file, apply environment overrides and validate
    pub fn load(path: Option<&Path>) -> FlareResult<Self> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides_from(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: &Path) -> FlareResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to_file(&self, path: &Path) -> FlareResult<()> {
        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, toml_string).map_err(|e| {
            ConfigurationError::SaveFailed(format!(
                "Failed to write to {}: {}",
                path.display(),
                e
            ))
            .into()
        })
    }

    /// Apply overrides using `lookup` to resolve variable names
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> FlareResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(ENV_SEED) {
            let parsed = seed.trim().parse::<u64>().map_err(|_| ConfigurationError::InvalidValue {
                field: ENV_SEED.to_string(),
                value: seed.clone(),
                reason: "Must be an unsigned 64-bit integer".to_string(),
            })?;
            self.rng.seed = Some(parsed);
        }

        if let Some(mode) = lookup(ENV_DRAW_MODE) {
            self.lottery.draw_mode = match mode.trim().to_ascii_lowercase().as_str() {
                "distinct" => DrawMode::Distinct,
                "independent" => DrawMode::Independent,
                _ => {
                    return Err(ConfigurationError::InvalidValue {
                        field: ENV_DRAW_MODE.to_string(),
                        value: mode,
                        reason: "Must be 'distinct' or 'independent'".to_string(),
                    }
                    .into())
                }
            };
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level.parse::<LogLevel>()?;
        }

        if let Some(flag) = lookup(ENV_INSTANT) {
            if matches!(flag.trim(), "1" | "true" | "yes") {
                self.delays = DelayConfig::instant();
            }
        }

        Ok(())
    }

    /// Validate configuration for logical consistency
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for (field, value) in [
            ("delays.dice_ms", self.delays.dice_ms),
            ("delays.coin_ms", self.delays.coin_ms),
            ("delays.lottery_ms", self.delays.lottery_ms),
        ] {
            if value > MAX_DELAY_MS {
                return Err(ConfigurationError::InvalidValue {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: format!("Delay cannot exceed {}ms", MAX_DELAY_MS),
                });
            }
        }

        for entry in &self.leaderboard {
            if entry.address.trim().is_empty() {
                return Err(ConfigurationError::ValidationFailed(
                    "Leaderboard entry has an empty address".to_string(),
                ));
            }
            if entry.wins > entry.total_played {
                return Err(ConfigurationError::ValidationFailed(format!(
                    "Leaderboard entry {} has more wins ({}) than games played ({})",
                    entry.address, entry.wins, entry.total_played
                )));
            }
        }

        Ok(())
    }

    /// Configured standings, or the placeholder board when none are set
    pub fn leaderboard(&self) -> Leaderboard {
        if self.leaderboard.is_empty() {
            Leaderboard::mock()
        } else {
            Leaderboard::new(self.leaderboard.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FlareConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.delays.for_game(GameType::Dice), Duration::from_secs(1));
        assert_eq!(config.delays.for_game(GameType::Lottery), Duration::from_secs(2));
        assert_eq!(config.lottery.draw_mode, DrawMode::Distinct);
    }

    #[test]
    fn test_partial_toml() {
        let config: FlareConfig = toml::from_str(
            r#"
            [lottery]
            draw_mode = "independent"

            [rng]
            seed = 42

            [[leaderboard]]
            address = "0x1111222233334444"
            wins = 1
            total_played = 2
            "#,
        )
        .expect("parse");

        assert_eq!(config.lottery.draw_mode, DrawMode::Independent);
        assert_eq!(config.rng.seed, Some(42));
        assert_eq!(config.delays, DelayConfig::default());
        assert_eq!(config.leaderboard().len(), 1);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = FlareConfig::default();
        config
            .apply_env_overrides_from(env(&[
                (ENV_SEED, "7"),
                (ENV_DRAW_MODE, "Independent"),
                (ENV_LOG_LEVEL, "debug"),
                (ENV_INSTANT, "true"),
            ]))
            .expect("overrides");

        assert_eq!(config.rng.seed, Some(7));
        assert_eq!(config.lottery.draw_mode, DrawMode::Independent);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.delays, DelayConfig::instant());
    }

    #[test]
    fn test_bad_env_override() {
        let mut config = FlareConfig::default();
        assert!(config
            .apply_env_overrides_from(env(&[(ENV_SEED, "not-a-number")]))
            .is_err());
        assert!(config
            .apply_env_overrides_from(env(&[(ENV_DRAW_MODE, "lucky")]))
            .is_err());
    }

    #[test]
    fn test_invalid_config_validation() {
        let mut config = FlareConfig::default();
        config.delays.lottery_ms = MAX_DELAY_MS + 1;
        assert!(config.validate().is_err());

        let mut config = FlareConfig::default();
        config.leaderboard = vec![LeaderboardEntry::new("0xabc", 5, 2)];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_leaderboard_falls_back_to_mock() {
        assert_eq!(FlareConfig::default().leaderboard(), Leaderboard::mock());
    }
}
