//! Lottery ticket selection
//!
//! A [`LotteryTicket`] is built up one number at a time by the player. Once it
//! holds exactly [`TICKET_SIZE`] numbers it can be sealed into a
//! [`SealedTicket`], which is the only form the lottery resolver accepts.

use crate::errors::GameError;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Numbers a ticket must hold before it can be played
pub const TICKET_SIZE: usize = 6;
/// Lowest selectable number
pub const MIN_NUMBER: u8 = 1;
/// Highest selectable number
pub const MAX_NUMBER: u8 = 49;

fn check_range(number: u8) -> Result<(), GameError> {
    if (MIN_NUMBER..=MAX_NUMBER).contains(&number) {
        Ok(())
    } else {
        Err(GameError::NumberOutOfRange(number))
    }
}

/// Effect of a toggle on the ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Added(u8),
    Removed(u8),
    /// Ticket was already full; nothing changed
    Ignored(u8),
}

/// In-progress selection of up to six distinct numbers, kept ascending
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LotteryTicket {
    numbers: BTreeSet<u8>,
}

impl LotteryTicket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the number if absent and there is room, remove it if present.
    pub fn toggle(&mut self, number: u8) -> Result<SelectionChange, GameError> {
        check_range(number)?;
        if self.numbers.remove(&number) {
            return Ok(SelectionChange::Removed(number));
        }
        if self.numbers.len() >= TICKET_SIZE {
            return Ok(SelectionChange::Ignored(number));
        }
        self.numbers.insert(number);
        Ok(SelectionChange::Added(number))
    }

    /// Select a number without deselecting it when already chosen
    pub fn select(&mut self, number: u8) -> Result<SelectionChange, GameError> {
        check_range(number)?;
        if self.numbers.contains(&number) || self.numbers.len() >= TICKET_SIZE {
            return Ok(SelectionChange::Ignored(number));
        }
        self.numbers.insert(number);
        Ok(SelectionChange::Added(number))
    }

    /// Returns true if the number was selected
    pub fn deselect(&mut self, number: u8) -> bool {
        self.numbers.remove(&number)
    }

    pub fn clear(&mut self) {
        self.numbers.clear();
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }

    /// Whether the number's control should be enabled
    pub fn can_select(&self, number: u8) -> bool {
        check_range(number).is_ok() && (self.contains(number) || !self.is_complete())
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.numbers.len() == TICKET_SIZE
    }

    /// Selected numbers in ascending order
    pub fn numbers(&self) -> Vec<u8> {
        self.numbers.iter().copied().collect()
    }

    /// Freeze the selection for a draw
    pub fn seal(&self) -> Result<SealedTicket, GameError> {
        if !self.is_complete() {
            return Err(GameError::IncompleteTicket {
                selected: self.numbers.len(),
            });
        }
        let mut picks = [0u8; TICKET_SIZE];
        for (slot, number) in picks.iter_mut().zip(self.numbers.iter()) {
            *slot = *number;
        }
        Ok(SealedTicket { picks })
    }
}

impl fmt::Display for LotteryTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numbers.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", crate::games::types::join_numbers(&self.numbers()))
        }
    }
}

/// Exactly six distinct in-range numbers, ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SealedTicket {
    picks: [u8; TICKET_SIZE],
}

impl SealedTicket {
    /// Validate an arbitrary set of picks
    pub fn new(numbers: &[u8]) -> Result<Self, GameError> {
        let mut ticket = LotteryTicket::new();
        for &number in numbers {
            check_range(number)?;
            if ticket.contains(number) {
                return Err(GameError::DuplicateNumber(number));
            }
            if ticket.select(number)? == SelectionChange::Ignored(number) {
                return Err(GameError::IncompleteTicket {
                    selected: numbers.len(),
                });
            }
        }
        ticket.seal()
    }

    pub fn picks(&self) -> &[u8; TICKET_SIZE] {
        &self.picks
    }

    pub fn contains(&self, number: u8) -> bool {
        self.picks.binary_search(&number).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_ticket() -> LotteryTicket {
        let mut ticket = LotteryTicket::new();
        for n in [6, 2, 4, 1, 5, 3] {
            ticket.toggle(n).unwrap();
        }
        ticket
    }

    #[test]
    fn test_numbers_kept_ascending() {
        assert_eq!(full_ticket().numbers(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_seventh_number_is_noop() {
        let mut ticket = full_ticket();
        let before = ticket.clone();

        assert_eq!(ticket.toggle(7), Ok(SelectionChange::Ignored(7)));
        assert_eq!(ticket, before);
        assert!(!ticket.can_select(7));
        assert!(ticket.can_select(3));
    }

    #[test]
    fn test_deselect_removes_only_that_number() {
        let mut ticket = full_ticket();

        assert_eq!(ticket.toggle(4), Ok(SelectionChange::Removed(4)));
        assert_eq!(ticket.numbers(), vec![1, 2, 3, 5, 6]);
        assert!(!ticket.deselect(4));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut ticket = LotteryTicket::new();

        assert_eq!(ticket.toggle(0), Err(GameError::NumberOutOfRange(0)));
        assert_eq!(ticket.toggle(50), Err(GameError::NumberOutOfRange(50)));
        assert!(ticket.is_empty());
    }

    #[test]
    fn test_seal_requires_six() {
        let mut ticket = full_ticket();
        ticket.deselect(6);
        ticket.deselect(5);

        assert_eq!(
            ticket.seal(),
            Err(GameError::IncompleteTicket { selected: 4 })
        );

        ticket.select(40).unwrap();
        ticket.select(41).unwrap();
        let sealed = ticket.seal().expect("six numbers");
        assert_eq!(sealed.picks(), &[1, 2, 3, 4, 40, 41]);
        assert!(sealed.contains(40));
        assert!(!sealed.contains(5));
    }

    #[test]
    fn test_sealed_ticket_validation() {
        assert!(SealedTicket::new(&[1, 2, 3, 4, 5, 6]).is_ok());
        assert_eq!(
            SealedTicket::new(&[1, 2, 3, 3, 5, 6]),
            Err(GameError::DuplicateNumber(3))
        );
        assert_eq!(
            SealedTicket::new(&[1, 2, 3, 4, 5, 60]),
            Err(GameError::NumberOutOfRange(60))
        );
        assert_eq!(
            SealedTicket::new(&[1, 2, 3, 4, 5, 6, 7]),
            Err(GameError::IncompleteTicket { selected: 7 })
        );
        assert_eq!(
            SealedTicket::new(&[1, 2]),
            Err(GameError::IncompleteTicket { selected: 2 })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(LotteryTicket::new().to_string(), "None");
        assert_eq!(full_ticket().to_string(), "1, 2, 3, 4, 5, 6");
    }
}
