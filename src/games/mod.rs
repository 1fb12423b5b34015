pub mod types;
pub mod ticket;
pub mod pending_pool;
pub mod processor;

pub use types::*;
pub use ticket::{LotteryTicket, SealedTicket, SelectionChange};
pub use pending_pool::PendingGamesPool;
pub use processor::{DrawMode, GameProcessor, ResolveRequest};
