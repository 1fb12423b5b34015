//! Flare Games - dice, coin flip and lottery for a wallet-connected player
//!
//! Outcomes are resolved locally from an injected random source. Nothing is
//! settled on chain and nothing outlives the session.
//!
//! ```no_run
//! use flare_games::{FlareConfig, GameTable, GameType, MockWallet};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), flare_games::GameError> {
//! let wallet = Arc::new(MockWallet::connected("0x1234567890abcdef"));
//! let table = GameTable::new(&FlareConfig::default(), wallet);
//! let report = table.play(GameType::Dice).await?;
//! println!("{}", report.notification);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod games;
pub mod leaderboard;
pub mod session;
pub mod table;
pub mod wallet;

pub use config::FlareConfig;
pub use errors::{ConfigurationError, FlareError, FlareResult, GameError};
pub use games::{
    CoinSide, DrawMode, GameData, GameOutcome, GameProcessor, GameType, LotteryTicket,
    SealedTicket, SelectionChange,
};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use session::{SessionHistory, SessionStats};
pub use table::{ControlState, GameEvent, GameTable, PendingPlay, PlayReport};
pub use wallet::{AccountProvider, MockWallet};
