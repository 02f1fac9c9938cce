use crate::card::Card;
use crate::error::OpponentError;
use crate::history::{Actor, HistoryAction, HistoryEvent};
use crate::policy::{Decision, DecisionContext, OpponentPolicy};
use crate::result::RoundResult;
use crate::table::TableStatus;

use super::{MatchState, Phase};

/// What one opponent step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentStep {
    /// The opponent drew a card.
    Hit {
        /// Table id.
        table: u8,
        /// Card drawn.
        card: Card,
        /// Opponent score afterwards.
        score: u8,
        /// Whether the draw busted the opponent.
        busted: bool,
    },
    /// The opponent stood, or the deck ran out.
    Stand {
        /// Table id.
        table: u8,
        /// Opponent score.
        score: u8,
    },
    /// Every table was played and the round has been scored.
    Resolved(RoundResult),
}

impl MatchState {
    /// Returns the table the opponent decides on next, skipping tables that
    /// the player did not stand on.
    #[must_use]
    pub fn pending_opponent_table(&self) -> Option<u8> {
        if self.phase != Phase::Opponent {
            return None;
        }

        self.tables
            .iter()
            .skip(self.opponent_cursor)
            .find(|t| t.status == TableStatus::Waiting)
            .map(|t| t.id)
    }

    /// Plays one opponent decision.
    ///
    /// Tables are played strictly in id order: the opponent keeps deciding on
    /// one table until it stands, busts, or the deck runs out, and only then
    /// moves on. Once no table is left the round is scored.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the opponent phase.
    pub fn opponent_step<P>(&mut self, policy: &P) -> Result<OpponentStep, OpponentError>
    where
        P: OpponentPolicy + ?Sized,
    {
        if self.phase != Phase::Opponent {
            return Err(OpponentError::InvalidState);
        }

        while self
            .tables
            .get(self.opponent_cursor)
            .is_some_and(|t| t.status != TableStatus::Waiting)
        {
            self.opponent_cursor += 1;
        }

        let Some(state) = self.tables.get_mut(self.opponent_cursor) else {
            return Ok(OpponentStep::Resolved(self.resolve_round()));
        };

        let table = state.id;
        let decision = policy.decide(&DecisionContext {
            hand: &state.opponent_hand,
            player_score: state.player_effective(),
            remaining_deck: &self.deck,
            special_active: self.special_fired,
        });

        let card = match decision {
            Decision::Hit => self.deck.pop(),
            Decision::Stand => None,
        };

        if let Some(card) = card {
            state.opponent_draw(card);
            let score = state.opponent_score;
            let busted = state.status == TableStatus::OpponentBust;

            self.history.push(
                HistoryEvent::action(Actor::Opponent, HistoryAction::Hits, table)
                    .with_card(card)
                    .with_score(score),
            );
            tracing::debug!(table, %card, score, "opponent hits");

            if busted {
                state.opponent_thinking = false;
                self.opponent_cursor += 1;
                self.history.push(
                    HistoryEvent::action(Actor::Opponent, HistoryAction::Busts, table)
                        .with_score(score),
                );
            }

            return Ok(OpponentStep::Hit {
                table,
                card,
                score,
                busted,
            });
        }

        state.opponent_thinking = false;
        let score = state.opponent_score;
        let action = if state.opponent_overbust {
            HistoryAction::OverbustStands
        } else {
            HistoryAction::Stands
        };
        self.opponent_cursor += 1;

        self.history
            .push(HistoryEvent::action(Actor::Opponent, action, table).with_score(score));
        tracing::debug!(table, score, ?decision, "opponent stands");

        Ok(OpponentStep::Stand { table, score })
    }

    /// Plays the whole opponent phase without pausing and scores the round.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the opponent phase.
    pub fn play_opponent_turns<P>(&mut self, policy: &P) -> Result<RoundResult, OpponentError>
    where
        P: OpponentPolicy + ?Sized,
    {
        loop {
            if let OpponentStep::Resolved(result) = self.opponent_step(policy)? {
                return Ok(result);
            }
        }
    }
}
