//! Deck construction, shuffling, scoring, and deck-composition statistics.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::card::{ACE, Card, DECK_SIZE, RANKS, Suit};

/// Creates a fresh 52-card deck in construction order with no special marks.
#[must_use]
pub fn create_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);

    for suit in Suit::ALL {
        for rank in RANKS {
            cards.push(Card::new(suit, rank));
        }
    }

    cards
}

/// Returns a uniformly shuffled copy of `cards`. The input is left untouched.
#[must_use]
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Returns the initial value of a rank (Ace = 11, faces = 10).
#[must_use]
pub const fn card_value(rank: u8) -> u8 {
    match rank {
        ACE => 11,
        2..=10 => rank,
        11..=13 => 10,
        _ => 0,
    }
}

/// Scores a hand.
///
/// Aces count as 11 and are demoted to 1 one at a time while the total is
/// over 21, giving the best non-bust total when one exists.
#[must_use]
pub fn score_hand(cards: &[Card]) -> u8 {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card_value(card.rank));
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    value
}

/// Composition of the remaining deck.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Distribution {
    /// Aces remaining.
    pub aces: usize,
    /// Ten-value cards remaining (10, J, Q, K).
    pub tens: usize,
    /// Number cards remaining (2 through 9).
    pub numbers: usize,
}

/// Deck-composition forecast for a hand's next draw.
///
/// This is what the player can see: it ignores the opponent's hand and the
/// special-card rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HandStats {
    /// Percentage of remaining cards that would bust the hand.
    pub bust: f64,
    /// Percentage of remaining cards that would raise the total (21 included).
    pub improve: f64,
    /// Percentage of remaining cards that would make exactly 21.
    pub to_21: f64,
    /// Average initial value of the remaining cards.
    pub avg_value: f64,
    /// Composition of the remaining cards.
    pub distribution: Distribution,
}

/// Computes the next-draw forecast for `hand` against `deck`.
///
/// Returns [`HandStats::default`] when the hand is already at 21 or more, or
/// the deck is empty.
#[must_use]
pub fn hand_stats(hand: &[Card], deck: &[Card]) -> HandStats {
    let score = score_hand(hand);
    if deck.is_empty() || score >= 21 {
        return HandStats::default();
    }

    let mut bust = 0usize;
    let mut improve = 0usize;
    let mut to_21 = 0usize;
    let mut total_value = 0usize;
    let mut distribution = Distribution::default();

    let mut drawn = Vec::with_capacity(hand.len() + 1);
    drawn.extend_from_slice(hand);

    for card in deck {
        drawn.push(*card);
        let new_score = score_hand(&drawn);
        drawn.pop();

        total_value += usize::from(card_value(card.rank));

        if new_score > 21 {
            bust += 1;
        } else if new_score == 21 {
            to_21 += 1;
            improve += 1;
        } else if new_score > score {
            improve += 1;
        }

        match card.rank {
            ACE => distribution.aces += 1,
            10..=13 => distribution.tens += 1,
            _ => distribution.numbers += 1,
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    let percent = |count: usize| (count as f64 / deck.len() as f64) * 100.0;

    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    let avg_value = total_value as f64 / deck.len() as f64;

    HandStats {
        bust: percent(bust),
        improve: percent(improve),
        to_21: percent(to_21),
        avg_value,
        distribution,
    }
}
