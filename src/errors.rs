//! Error types for the Flare Games core
//!
//! Errors are grouped by category under a single root type so callers can
//! match on the broad class first and the specific cause second.

use crate::games::types::GameType;

/// Root error type for all Flare Games operations
#[derive(Debug, thiserror::Error)]
pub enum FlareError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Game play errors
    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Errors surfaced to the presentation layer when a play or selection is refused
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Please select exactly 6 numbers between 1 and 49")]
    IncompleteTicket { selected: usize },

    #[error("Number {0} is outside 1..=49")]
    NumberOutOfRange(u8),

    #[error("Duplicate number {0} in ticket")]
    DuplicateNumber(u8),

    #[error("{0} is already in progress")]
    GameInProgress(GameType),

    #[error("Connect wallet to play")]
    WalletDisconnected,

    #[error("Resolution task failed: {0}")]
    ResolutionFailed(String),
}

impl From<toml::de::Error> for FlareError {
    fn from(e: toml::de::Error) -> Self {
        FlareError::Configuration(ConfigurationError::LoadFailed(format!(
            "Failed to parse TOML: {}",
            e
        )))
    }
}

// Convenience type alias for Results
pub type FlareResult<T> = Result<T, FlareError>;
