//! Card types and identity keys.

use core::fmt;

use serde::Serialize;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Suit {
    /// Spades.
    Spade,
    /// Clubs.
    Club,
    /// Hearts.
    Heart,
    /// Diamonds.
    Diamond,
}

impl Suit {
    /// All suits in deck construction order.
    pub const ALL: [Self; 4] = [Self::Spade, Self::Club, Self::Heart, Self::Diamond];

    /// Returns the suit name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spade => "Spade",
            Self::Club => "Club",
            Self::Heart => "Heart",
            Self::Diamond => "Diamond",
        }
    }
}

/// Rank of an Ace.
pub const ACE: u8 = 1;
/// Rank of a Jack.
pub const JACK: u8 = 11;
/// Rank of a Queen.
pub const QUEEN: u8 = 12;
/// Rank of a King.
pub const KING: u8 = 13;

/// Ranks in deck construction order (2 through 10, J, Q, K, A).
pub const RANKS: [u8; 13] = [2, 3, 4, 5, 6, 7, 8, 9, 10, JACK, QUEEN, KING, ACE];

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Structural identity of a card (rank and suit).
///
/// A match uses a single deck, so a key identifies exactly one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CardKey {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card.
    pub rank: u8,
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", rank_label(self.rank), self.suit.name())
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
    /// Whether the card is overbust-proof.
    pub special: bool,
}

impl Card {
    /// Creates a new, non-special card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but score as zero.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            special: false,
        }
    }

    /// Returns a copy of this card carrying the special mark.
    #[must_use]
    pub const fn into_special(mut self) -> Self {
        self.special = true;
        self
    }

    /// Returns the structural identity of the card.
    #[must_use]
    pub const fn key(&self) -> CardKey {
        CardKey {
            suit: self.suit,
            rank: self.rank,
        }
    }

    /// Returns whether the card is an Ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == ACE
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.key().fmt(f)
    }
}

/// Returns the printed label for a rank.
#[must_use]
pub const fn rank_label(rank: u8) -> &'static str {
    match rank {
        ACE => "A",
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        JACK => "J",
        QUEEN => "Q",
        KING => "K",
        _ => "?",
    }
}
