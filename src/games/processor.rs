//! Game resolution
//!
//! Each resolver is a pure function of its inputs plus whatever it pulls from
//! the supplied random source. Feeding the same seeded generator produces the
//! same results.

use crate::games::ticket::{SealedTicket, MAX_NUMBER, MIN_NUMBER, TICKET_SIZE};
use crate::games::types::{CoinSide, GameData, GameOutcome, GameType};
use chrono::Utc;
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest dice face that wins
pub const DICE_WINNING_FACE: u8 = 4;
/// Matches needed for a winning lottery ticket
pub const LOTTERY_WINNING_MATCHES: u8 = 3;

/// How the six winning lottery numbers are drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Without replacement, like a ball machine
    #[default]
    Distinct,
    /// Six independent draws; the same number may come up twice
    Independent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    pub face: u8,
    pub won: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinFlip {
    pub side: CoinSide,
    pub won: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotteryDraw {
    pub picks: [u8; TICKET_SIZE],
    /// Ascending; may repeat under [`DrawMode::Independent`]
    pub winning_numbers: Vec<u8>,
    pub matches: u8,
    pub won: bool,
}

impl DiceRoll {
    pub fn from_face(face: u8) -> Self {
        Self {
            face,
            won: face >= DICE_WINNING_FACE,
        }
    }
}

impl CoinFlip {
    pub fn from_side(side: CoinSide) -> Self {
        Self {
            side,
            won: side == CoinSide::WINNING,
        }
    }
}

pub fn roll_dice<R: Rng + ?Sized>(rng: &mut R) -> DiceRoll {
    DiceRoll::from_face(rng.gen_range(1..=6u8))
}

pub fn flip_coin<R: Rng + ?Sized>(rng: &mut R) -> CoinFlip {
    let side = if rng.gen_bool(0.5) {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    };
    CoinFlip::from_side(side)
}

/// Draw the winning numbers, sorted ascending
pub fn draw_winning_numbers<R: Rng + ?Sized>(rng: &mut R, mode: DrawMode) -> Vec<u8> {
    let mut numbers: Vec<u8> = match mode {
        DrawMode::Distinct => index::sample(rng, MAX_NUMBER as usize, TICKET_SIZE)
            .into_iter()
            .map(|i| i as u8 + MIN_NUMBER)
            .collect(),
        DrawMode::Independent => (0..TICKET_SIZE)
            .map(|_| rng.gen_range(MIN_NUMBER..=MAX_NUMBER))
            .collect(),
    };
    numbers.sort_unstable();
    numbers
}

/// Count the ticket's picks that appear among the winning numbers
pub fn count_matches(ticket: &SealedTicket, winning_numbers: &[u8]) -> u8 {
    ticket
        .picks()
        .iter()
        .filter(|pick| winning_numbers.contains(*pick))
        .count() as u8
}

/// Score a ticket against an already drawn set of numbers
pub fn score_lottery(ticket: &SealedTicket, mut winning_numbers: Vec<u8>) -> LotteryDraw {
    winning_numbers.sort_unstable();
    let matches = count_matches(ticket, &winning_numbers);
    LotteryDraw {
        picks: *ticket.picks(),
        winning_numbers,
        matches,
        won: matches >= LOTTERY_WINNING_MATCHES,
    }
}

pub fn draw_lottery<R: Rng + ?Sized>(
    rng: &mut R,
    ticket: &SealedTicket,
    mode: DrawMode,
) -> LotteryDraw {
    score_lottery(ticket, draw_winning_numbers(rng, mode))
}

/// Resolves games against a random source and stamps the outcome
pub struct GameProcessor {
    draw_mode: DrawMode,
}

impl GameProcessor {
    pub fn new(draw_mode: DrawMode) -> Self {
        Self { draw_mode }
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.draw_mode
    }

    /// Resolve one game and stamp it with the current time
    pub fn process_game<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        game: ResolveRequest,
    ) -> GameOutcome {
        let (data, won) = match game {
            ResolveRequest::Dice => {
                let roll = roll_dice(rng);
                (GameData::Dice { face: roll.face }, roll.won)
            }
            ResolveRequest::Coin => {
                let flip = flip_coin(rng);
                (GameData::Coin { side: flip.side }, flip.won)
            }
            ResolveRequest::Lottery(ticket) => {
                let draw = draw_lottery(rng, &ticket, self.draw_mode);
                (
                    GameData::Lottery {
                        matches: draw.matches,
                        picks: draw.picks.to_vec(),
                        winning_numbers: draw.winning_numbers,
                    },
                    draw.won,
                )
            }
        };
        GameOutcome::new(data, won, Utc::now())
    }
}

impl Default for GameProcessor {
    fn default() -> Self {
        Self::new(DrawMode::default())
    }
}

/// A game ready to resolve, carrying whatever input it needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveRequest {
    Dice,
    Coin,
    Lottery(SealedTicket),
}

impl ResolveRequest {
    pub fn game_type(&self) -> GameType {
        match self {
            ResolveRequest::Dice => GameType::Dice,
            ResolveRequest::Coin => GameType::Coin,
            ResolveRequest::Lottery(_) => GameType::Lottery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ticket() -> SealedTicket {
        SealedTicket::new(&[1, 2, 3, 4, 5, 6]).unwrap()
    }

    #[test]
    fn test_dice_faces_and_win_flag() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let roll = roll_dice(&mut rng);
            assert!((1..=6).contains(&roll.face));
            assert_eq!(roll.won, roll.face >= 4);
        }
    }

    #[test]
    fn test_dice_threshold() {
        assert!(DiceRoll::from_face(4).won);
        assert!(!DiceRoll::from_face(3).won);
        assert!(CoinFlip::from_side(CoinSide::Heads).won);
        assert!(!CoinFlip::from_side(CoinSide::Tails).won);
    }

    #[test]
    fn test_dice_covers_all_faces() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 6];
        for _ in 0..500 {
            seen[(roll_dice(&mut rng).face - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_coin_win_flag() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut heads = 0;
        for _ in 0..1_000 {
            let flip = flip_coin(&mut rng);
            assert_eq!(flip.won, flip.side == CoinSide::Heads);
            if flip.side == CoinSide::Heads {
                heads += 1;
            }
        }
        assert!(heads > 400 && heads < 600, "heads = {}", heads);
    }

    #[test]
    fn test_three_matches_wins() {
        let draw = score_lottery(&ticket(), vec![12, 11, 10, 3, 2, 1]);
        assert_eq!(draw.matches, 3);
        assert!(draw.won);
        assert_eq!(draw.winning_numbers, vec![1, 2, 3, 10, 11, 12]);
    }

    #[test]
    fn test_no_matches_loses() {
        let draw = score_lottery(&ticket(), vec![7, 8, 9, 10, 11, 12]);
        assert_eq!(draw.matches, 0);
        assert!(!draw.won);
    }

    #[test]
    fn test_duplicate_winning_numbers_do_not_inflate_matches() {
        let draw = score_lottery(&ticket(), vec![1, 1, 1, 2, 2, 40]);
        assert_eq!(draw.matches, 2);
        assert!(!draw.won);
    }

    #[test]
    fn test_distinct_draw_has_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..500 {
            let numbers = draw_winning_numbers(&mut rng, DrawMode::Distinct);
            assert_eq!(numbers.len(), TICKET_SIZE);
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
            assert!(numbers.iter().all(|n| (1..=49).contains(n)));
        }
    }

    #[test]
    fn test_independent_draw_sorted_and_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let numbers = draw_winning_numbers(&mut rng, DrawMode::Independent);
            assert_eq!(numbers.len(), TICKET_SIZE);
            assert!(numbers.windows(2).all(|w| w[0] <= w[1]));
            assert!(numbers.iter().all(|n| (1..=49).contains(n)));
        }
    }

    #[test]
    fn test_lottery_match_count_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        for mode in [DrawMode::Distinct, DrawMode::Independent] {
            for _ in 0..500 {
                let draw = draw_lottery(&mut rng, &ticket(), mode);
                assert!(draw.matches <= 6);
                assert_eq!(draw.won, draw.matches >= 3);
            }
        }
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let processor = GameProcessor::default();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            [
                ResolveRequest::Dice,
                ResolveRequest::Coin,
                ResolveRequest::Lottery(ticket()),
            ]
            .into_iter()
            .map(|request| {
                let outcome = processor.process_game(&mut rng, request);
                (outcome.data, outcome.won)
            })
            .collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_processor_outcome_shape() {
        let processor = GameProcessor::new(DrawMode::Independent);
        let mut rng = StdRng::seed_from_u64(8);

        let outcome = processor.process_game(&mut rng, ResolveRequest::Lottery(ticket()));
        assert_eq!(outcome.game_type(), GameType::Lottery);
        assert!(outcome.transaction_hash.is_none());
        match outcome.data {
            GameData::Lottery { picks, winning_numbers, matches } => {
                assert_eq!(picks, vec![1, 2, 3, 4, 5, 6]);
                assert_eq!(winning_numbers.len(), 6);
                assert_eq!(outcome.won, matches >= 3);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
