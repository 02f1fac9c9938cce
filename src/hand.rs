//! Hand representation shared by the player and the opponent.

extern crate alloc;

use alloc::vec::Vec;

use serde::Serialize;

use crate::card::Card;
use crate::deck;
use crate::special::contains_special;

/// One side's cards at one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Hand {
    /// Cards in the hand, in the order they were received.
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a hand holding `cards`.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Calculates the value of the hand.
    ///
    /// Aces are counted as 11 if possible without busting, otherwise as 1.
    #[must_use]
    pub fn value(&self) -> u8 {
        deck::score_hand(&self.cards)
    }

    /// Returns whether the hand holds a special card.
    #[must_use]
    pub fn has_special(&self) -> bool {
        contains_special(&self.cards)
    }

    /// Over 21 with no special card: the hand has lost.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21 && !self.has_special()
    }

    /// Over 21 but protected by a special card.
    #[must_use]
    pub fn is_overbust(&self) -> bool {
        self.value() > 21 && self.has_special()
    }

    /// Returns the value used when comparing against the other side.
    ///
    /// A bust hand compares as 0; an overbust hand keeps its raw total.
    #[must_use]
    pub fn effective_value(&self) -> u8 {
        if self.is_bust() { 0 } else { self.value() }
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes and returns every card, leaving the hand empty.
    pub fn take_cards(&mut self) -> Vec<Card> {
        core::mem::take(&mut self.cards)
    }
}
