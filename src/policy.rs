//! Opponent decision policy.

use crate::card::Card;
use crate::hand::Hand;

/// The opponent's choice for one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Draw another card.
    Hit,
    /// Keep the current hand.
    Stand,
}

/// What the opponent knows when deciding.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    /// The opponent's hand at this table.
    pub hand: &'a Hand,
    /// The player's effective score at this table (0 for a plain bust).
    pub player_score: u8,
    /// Cards left in the deck.
    pub remaining_deck: &'a [Card],
    /// Whether special cards exist in this match.
    pub special_active: bool,
}

/// Chooses whether the opponent hits.
///
/// Implementations must be pure: the same context yields the same decision.
pub trait OpponentPolicy {
    /// Returns the decision for `ctx`.
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision;
}

impl<F> OpponentPolicy for F
where
    F: Fn(&DecisionContext<'_>) -> Decision,
{
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision {
        self(ctx)
    }
}

/// Fixed-threshold dealer rule.
///
/// Without a special card the opponent hits below `stand_on`. Holding a
/// special card it cannot bust, so it keeps hitting while it does not beat
/// the player, unless the player is over 21.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdPolicy {
    /// Total at which a plain hand stands.
    pub stand_on: u8,
}

impl ThresholdPolicy {
    /// Creates a policy standing on `stand_on`.
    #[must_use]
    pub const fn new(stand_on: u8) -> Self {
        Self { stand_on }
    }
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        Self::new(17)
    }
}

impl OpponentPolicy for ThresholdPolicy {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision {
        let score = ctx.hand.value();

        let hit = if ctx.hand.has_special() {
            // An overbust player is not worth chasing.
            let target = if ctx.player_score > 21 { 0 } else { ctx.player_score };
            score <= target
        } else {
            score < self.stand_on
        };

        if hit { Decision::Hit } else { Decision::Stand }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{KING, Suit};

    fn ctx(hand: &Hand, player_score: u8) -> DecisionContext<'_> {
        DecisionContext {
            hand,
            player_score,
            remaining_deck: &[],
            special_active: true,
        }
    }

    #[test]
    fn plain_hand_uses_threshold() {
        let policy = ThresholdPolicy::default();

        let seventeen = Hand::from_cards(&[Card::new(Suit::Spade, KING), Card::new(Suit::Club, 7)]);
        assert_eq!(policy.decide(&ctx(&seventeen, 21)), Decision::Stand);

        let sixteen = Hand::from_cards(&[Card::new(Suit::Spade, KING), Card::new(Suit::Club, 6)]);
        assert_eq!(policy.decide(&ctx(&sixteen, 0)), Decision::Hit);
    }

    #[test]
    fn special_hand_chases_player_score() {
        let policy = ThresholdPolicy::default();
        let hand = Hand::from_cards(&[
            Card::new(Suit::Spade, KING).into_special(),
            Card::new(Suit::Club, 9),
        ]);

        assert_eq!(policy.decide(&ctx(&hand, 19)), Decision::Hit);
        assert_eq!(policy.decide(&ctx(&hand, 21)), Decision::Hit);
        assert_eq!(policy.decide(&ctx(&hand, 18)), Decision::Stand);
    }

    #[test]
    fn special_hand_stands_against_overbust_player() {
        let policy = ThresholdPolicy::default();
        let hand = Hand::from_cards(&[
            Card::new(Suit::Spade, KING).into_special(),
            Card::new(Suit::Club, 8),
        ]);

        assert_eq!(policy.decide(&ctx(&hand, 30)), Decision::Stand);
        assert_eq!(policy.decide(&ctx(&hand, 22)), Decision::Stand);
    }

    fn always_hit(_: &DecisionContext<'_>) -> Decision {
        Decision::Hit
    }

    #[test]
    fn functions_are_policies() {
        let hand = Hand::new();
        assert_eq!(always_hit.decide(&ctx(&hand, 0)), Decision::Hit);
    }
}
