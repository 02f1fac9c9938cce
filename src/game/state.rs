//! Phase and view types.

extern crate alloc;

use alloc::vec::Vec;

use serde::Serialize;

use crate::card::CardKey;
use crate::result::MatchSummary;

/// Global turn phase.
///
/// A round moves `Preparing` → `Player` → `Opponent` → `RoundOver`; the next
/// deal starts over at `Preparing` or ends the match in `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// New match, nothing dealt yet.
    Ready,
    /// Deck shuffled, hands not yet revealed.
    Preparing,
    /// Waiting for player hits and stands.
    Player,
    /// The opponent plays the tables the player stood on.
    Opponent,
    /// Round scored; waiting for the next deal.
    RoundOver,
    /// Not enough cards for another round.
    GameOver,
}

/// What a deal request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealOutcome {
    /// A new round was started.
    Started {
        /// 1-based round number.
        round: u32,
    },
    /// The deck could not cover a round; the match is over.
    MatchOver(MatchSummary),
}

/// Remaining-deck view for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckStatus {
    /// Cards left to draw.
    pub remaining: usize,
    /// Cards on the discard pile.
    pub discarded: usize,
    /// Keys of the cards left to draw in one list, sorted by suit, then rank.
    pub remaining_keys: Vec<CardKey>,
    /// Keys of special cards left to draw, sorted.
    pub special_remaining: Vec<CardKey>,
}

/// Result of checking that every card is accounted for exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardAudit {
    /// Cards counted across deck, discard pile, and hands.
    pub total: usize,
    /// Keys seen more than once.
    pub duplicates: Vec<CardKey>,
    /// Keys of the full deck not seen at all.
    pub missing: Vec<CardKey>,
}

impl CardAudit {
    /// Returns whether the match holds each card exactly once.
    #[must_use]
    pub fn is_sound(&self) -> bool {
        self.duplicates.is_empty() && self.missing.is_empty()
    }
}
