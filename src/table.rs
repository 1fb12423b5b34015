//! Game table: the presentation-facing controller.
//!
//! Owns the session history, the lottery ticket being filled in and the random
//! source. A play is validated synchronously, then resolved on a spawned task
//! after the configured delay, so a resolution that has started always records
//! its outcome even if the caller stops waiting for it.

use crate::config::{DelayConfig, FlareConfig};
use crate::errors::GameError;
use crate::games::pending_pool::PendingGamesPool;
use crate::games::processor::{GameProcessor, ResolveRequest};
use crate::games::ticket::{LotteryTicket, SelectionChange};
use crate::games::types::{GameOutcome, GameType};
use crate::session::{SessionHistory, SessionStats};
use crate::wallet::AccountProvider;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Random source shared by every game at the table
pub type BoxedRng = Box<dyn RngCore + Send>;

/// Build the table's generator from an optional seed
pub fn seeded_rng(seed: Option<u64>) -> BoxedRng {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(StdRng::from_entropy()),
    }
}

/// What a game's play control should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Disconnected,
    Pending,
    /// Lottery only: fewer than six numbers picked
    NeedsNumbers,
    Ready,
}

impl ControlState {
    pub fn is_enabled(&self) -> bool {
        matches!(self, ControlState::Ready)
    }

    pub fn label(&self, game: GameType) -> &'static str {
        match self {
            ControlState::Disconnected => "Connect Wallet to Play",
            ControlState::Pending => game.pending_label(),
            ControlState::NeedsNumbers | ControlState::Ready => "Play Now",
        }
    }
}

/// Published to subscribers as plays start and finish
#[derive(Debug, Clone)]
pub enum GameEvent {
    Started { game: GameType },
    Completed(PlayReport),
}

/// Completed play returned to the presentation layer
#[derive(Debug, Clone)]
pub struct PlayReport {
    pub outcome: GameOutcome,
    pub notification: String,
}

impl PlayReport {
    fn new(outcome: GameOutcome) -> Self {
        let notification = outcome.notification();
        Self {
            outcome,
            notification,
        }
    }
}

/// Handle to a resolution in flight. Dropping it does not cancel the play.
pub struct PendingPlay {
    game: GameType,
    handle: JoinHandle<PlayReport>,
}

impl PendingPlay {
    pub fn game_type(&self) -> GameType {
        self.game
    }

    /// Wait for the outcome to be recorded
    pub async fn wait(self) -> Result<PlayReport, GameError> {
        self.handle
            .await
            .map_err(|e| GameError::ResolutionFailed(e.to_string()))
    }
}

struct TableState {
    rng: BoxedRng,
    history: SessionHistory,
    ticket: LotteryTicket,
    pending: PendingGamesPool,
}

#[derive(Clone)]
pub struct GameTable {
    state: Arc<Mutex<TableState>>,
    wallet: Arc<dyn AccountProvider>,
    processor: Arc<GameProcessor>,
    delays: DelayConfig,
    events: broadcast::Sender<GameEvent>,
}

impl GameTable {
    pub fn new(config: &FlareConfig, wallet: Arc<dyn AccountProvider>) -> Self {
        Self::with_rng(config, wallet, seeded_rng(config.rng.seed))
    }

    pub fn with_rng(config: &FlareConfig, wallet: Arc<dyn AccountProvider>, rng: BoxedRng) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(TableState {
                rng,
                history: SessionHistory::new(),
                ticket: LotteryTicket::new(),
                pending: PendingGamesPool::new(),
            })),
            wallet,
            processor: Arc::new(GameProcessor::new(config.lottery.draw_mode)),
            delays: config.delays.clone(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    pub fn wallet(&self) -> &Arc<dyn AccountProvider> {
        &self.wallet
    }

    pub fn control_state(&self, game: GameType) -> ControlState {
        if !self.wallet.is_connected() {
            return ControlState::Disconnected;
        }
        let state = self.state.lock();
        if state.pending.is_pending(game) {
            ControlState::Pending
        } else if game == GameType::Lottery && !state.ticket.is_complete() {
            ControlState::NeedsNumbers
        } else {
            ControlState::Ready
        }
    }

    /// Validate and start a play. Must be called from within a tokio runtime.
    ///
    /// Rejected plays leave the table untouched: nothing is recorded and the
    /// lottery selection is kept.
    pub fn begin(&self, game: GameType) -> Result<PendingPlay, GameError> {
        let request = {
            let mut state = self.state.lock();
            if let Err(e) = self.require_wallet() {
                warn!("Refusing {} play: wallet not connected", game);
                return Err(e);
            }
            if state.pending.is_pending(game) {
                warn!("Refusing {} play: already in progress", game);
                return Err(GameError::GameInProgress(game));
            }
            let request = match game {
                GameType::Dice => ResolveRequest::Dice,
                GameType::Coin => ResolveRequest::Coin,
                GameType::Lottery => match state.ticket.seal() {
                    Ok(ticket) => ResolveRequest::Lottery(ticket),
                    Err(e) => {
                        warn!("Refusing lottery play: {} numbers selected", state.ticket.len());
                        return Err(e);
                    }
                },
            };
            state.pending.add_pending(game);
            request
        };

        info!("Started {} play", game);
        let _ = self.events.send(GameEvent::Started { game });

        let table = self.clone();
        let delay = self.delays.for_game(game);
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            table.complete(request)
        });

        Ok(PendingPlay { game, handle })
    }

    /// Start a play and wait for its outcome
    pub async fn play(&self, game: GameType) -> Result<PlayReport, GameError> {
        self.begin(game)?.wait().await
    }

    fn complete(&self, request: ResolveRequest) -> PlayReport {
        let game = request.game_type();
        let outcome = {
            let mut state = self.state.lock();
            let TableState {
                rng,
                history,
                ticket,
                pending,
            } = &mut *state;

            let outcome = self.processor.process_game(&mut **rng, request);
            history.record(outcome.clone());
            pending.complete_game(game);
            if game == GameType::Lottery {
                ticket.clear();
            }
            outcome
        };

        info!(
            "Completed {} play: {}",
            game,
            if outcome.won { "won" } else { "lost" }
        );
        let report = PlayReport::new(outcome);
        let _ = self.events.send(GameEvent::Completed(report.clone()));
        report
    }

    fn require_wallet(&self) -> Result<(), GameError> {
        if self.wallet.is_connected() {
            Ok(())
        } else {
            Err(GameError::WalletDisconnected)
        }
    }

    /// Number picks are disabled along with the play controls while no wallet is connected
    pub fn toggle_number(&self, number: u8) -> Result<SelectionChange, GameError> {
        self.require_wallet()?;
        let change = self.state.lock().ticket.toggle(number)?;
        debug!("Ticket selection change: {:?}", change);
        Ok(change)
    }

    /// Select without the deselect half of a toggle
    pub fn select_number(&self, number: u8) -> Result<SelectionChange, GameError> {
        self.require_wallet()?;
        self.state.lock().ticket.select(number)
    }

    pub fn clear_ticket(&self) {
        self.state.lock().ticket.clear();
    }

    pub fn ticket(&self) -> LotteryTicket {
        self.state.lock().ticket.clone()
    }

    /// Run `f` against a read-only view of the session history
    pub fn with_history<T>(&self, f: impl FnOnce(&SessionHistory) -> T) -> T {
        f(&self.state.lock().history)
    }

    /// Owned copy of the history, newest first
    pub fn history(&self) -> Vec<GameOutcome> {
        self.with_history(|history| history.snapshot())
    }

    pub fn stats(&self) -> SessionStats {
        self.with_history(|history| history.stats())
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().pending.pending_count()
    }
}
