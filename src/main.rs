//! Flare Games terminal front-end
//!
//! Plays the role of the browser page: a mock wallet gates play, results come
//! back as notifications, and the session history lives only as long as the
//! process.

use clap::{Parser, Subcommand};
use flare_games::{
    config::FlareConfig,
    games::ticket::{MAX_NUMBER, MIN_NUMBER, TICKET_SIZE},
    AccountProvider, GameEvent, GameTable, GameType, MockWallet, SelectionChange,
};
use std::{path::PathBuf, sync::Arc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDRESS: &str = "0x1234567890abcdef";

/// Flare Games CLI
#[derive(Parser)]
#[command(name = "flare-games")]
#[command(about = "Dice roll, coin flip and lottery against a local random source")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed the random source for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the drawing delays
    #[arg(long)]
    instant: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print outcomes as JSON
    #[arg(long)]
    json: bool,

    /// Wallet address to connect with
    #[arg(long, default_value = DEFAULT_ADDRESS)]
    address: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game, optionally several rounds
    Play {
        /// dice, coin or lottery
        game: GameType,

        /// Lottery numbers, comma separated
        #[arg(long, value_delimiter = ',')]
        numbers: Vec<u8>,

        /// Rounds to play
        #[arg(short, long, default_value = "1")]
        rounds: u32,
    },

    /// Show the leaderboard
    Leaderboard,

    /// Interactive session
    Interactive,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = FlareConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.rng.seed = Some(seed);
    }
    if cli.instant {
        config.delays = flare_games::config::DelayConfig::instant();
    }
    init_logging(if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    });

    match cli.command {
        Commands::Play {
            game,
            numbers,
            rounds,
        } => play(&config, &cli.address, cli.json, game, &numbers, rounds).await,
        Commands::Leaderboard => {
            let board = config.leaderboard();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(board.entries())?);
            } else {
                println!("🏆 Leaderboard");
                for row in board.rows() {
                    println!("  {}", row);
                }
            }
            Ok(())
        }
        Commands::Interactive => interactive(&config, &cli.address).await,
    }
}

async fn play(
    config: &FlareConfig,
    address: &str,
    json: bool,
    game: GameType,
    numbers: &[u8],
    rounds: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let wallet = Arc::new(MockWallet::connected(address));
    let table = GameTable::new(config, wallet);

    for _ in 0..rounds {
        if game == GameType::Lottery {
            table.clear_ticket();
            for &n in numbers {
                table.select_number(n)?;
            }
        }

        let pending = table.begin(game)?;
        if !json {
            println!("{}", game.pending_label());
        }
        let report = pending.wait().await?;

        if json {
            println!("{}", serde_json::to_string(&report.outcome)?);
        } else {
            println!("{}\n", report.notification);
        }
    }

    if !json {
        let stats = table.stats();
        println!("Session: {} wins / {} played", stats.wins, stats.total_played);
    }
    Ok(())
}

const HELP: &str = "\
commands:
  dice | coin | lottery   start a game (runs in the background)
  pick <n> [n ...]        toggle lottery numbers
  clear                   clear lottery numbers
  status                  show play controls and ticket
  history                 recent games, newest first
  leaderboard             show standings
  connect [address]       connect the wallet
  disconnect              disconnect the wallet
  quit";

async fn interactive(config: &FlareConfig, address: &str) -> Result<(), Box<dyn std::error::Error>> {
    let wallet = Arc::new(MockWallet::connected(address));
    let provider: Arc<dyn AccountProvider> = wallet.clone();
    let table = GameTable::new(config, provider);
    let leaderboard = config.leaderboard();

    let mut events = table.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(GameEvent::Started { game }) => println!("{}", game.pending_label()),
                Ok(GameEvent::Completed(report)) => println!("\n{}\n", report.notification),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });

    println!("Flare Games. Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        match command {
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            "connect" => wallet.connect(words.next().unwrap_or(address)),
            "disconnect" => wallet.disconnect(),
            "pick" => {
                for word in words {
                    match word.parse::<u8>() {
                        Ok(n) => match table.toggle_number(n) {
                            Ok(SelectionChange::Ignored(n)) => {
                                println!("Ticket full, {} not added", n)
                            }
                            Ok(_) => {}
                            Err(e) => println!("{}", e),
                        },
                        Err(_) => println!("'{}' is not a number", word),
                    }
                }
                println!("Selected: {}", table.ticket());
            }
            "clear" => table.clear_ticket(),
            "status" => {
                for game in GameType::ALL {
                    let state = table.control_state(game);
                    println!("{:<10} [{}]", game.title(), state.label(game));
                }
                println!(
                    "Select {} numbers ({}-{}): {}",
                    TICKET_SIZE,
                    MIN_NUMBER,
                    MAX_NUMBER,
                    table.ticket()
                );
            }
            "history" => table.with_history(|history| {
                if history.is_empty() {
                    println!("No games yet");
                }
                for outcome in history.iter() {
                    println!(
                        "{}  ({})",
                        outcome.history_line(),
                        outcome.timestamp.format("%Y-%m-%d %H:%M:%S")
                    );
                }
            }),
            "leaderboard" => {
                for row in leaderboard.rows() {
                    println!("{}", row);
                }
                if let Some(address) = wallet.address() {
                    let mine = table.with_history(|h| h.as_leaderboard_entry(&address));
                    println!("you: {} wins / {} played", mine.wins, mine.total_played);
                }
            }
            other => match other.parse::<GameType>() {
                Ok(game) => {
                    // The outcome arrives through the event stream
                    if let Err(e) = table.begin(game) {
                        println!("{}", e);
                    }
                }
                Err(e) => println!("{}; type 'help' for commands", e),
            },
        }
    }

    Ok(())
}
