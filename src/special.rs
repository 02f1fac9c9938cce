//! The overbust-proof card rule.
//!
//! Once per match a handful of cards still in the deck are marked special.
//! A hand holding any of them cannot bust: totals over 21 become an
//! *overbust* that is still compared by raw value.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::index;

use crate::card::{Card, CardKey};

/// Marks up to `count` distinct cards of `deck` as special, chosen uniformly
/// without replacement, and returns their keys in selection order.
///
/// Cards that are already special are never chosen again, so the mark is
/// only ever set once per card.
pub fn activate<R: Rng + ?Sized>(deck: &mut [Card], count: usize, rng: &mut R) -> Vec<CardKey> {
    let candidates: Vec<usize> = deck
        .iter()
        .enumerate()
        .filter(|(_, card)| !card.special)
        .map(|(i, _)| i)
        .collect();

    let amount = count.min(candidates.len());
    let mut keys = Vec::with_capacity(amount);

    for pick in index::sample(rng, candidates.len(), amount) {
        let card = &mut deck[candidates[pick]];
        *card = card.into_special();
        keys.push(card.key());
    }

    keys
}

/// Returns whether any card in `cards` is special.
#[must_use]
pub fn contains_special(cards: &[Card]) -> bool {
    cards.iter().any(|card| card.special)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::deck::create_deck;

    #[test]
    fn marks_exactly_count_distinct_cards() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut deck = create_deck();

        let keys = activate(&mut deck, 5, &mut rng);
        assert_eq!(keys.len(), 5);
        assert_eq!(deck.iter().filter(|c| c.special).count(), 5);

        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 5);
        assert!(
            deck.iter()
                .filter(|c| c.special)
                .all(|c| keys.contains(&c.key()))
        );
    }

    #[test]
    fn short_deck_marks_everything_left() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut deck = create_deck();
        deck.truncate(3);

        let keys = activate(&mut deck, 5, &mut rng);
        assert_eq!(keys.len(), 3);
        assert!(contains_special(&deck));
        assert!(deck.iter().all(|c| c.special));
    }
}
