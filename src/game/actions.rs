use crate::card::Card;
use crate::error::ActionError;
use crate::history::{Actor, HistoryAction, HistoryEvent};
use crate::table::TableStatus;

use super::{MatchState, Phase};

const MAX_HITS_MESSAGE: &str = "Max hits used. Standing on all remaining tables.";

impl MatchState {
    fn ensure_player_turn(&self, table: u8) -> Result<usize, ActionError> {
        if self.phase != Phase::Player {
            return Err(ActionError::InvalidState);
        }

        let index = self.table_index(table)?;
        if self.tables[index].status != TableStatus::PlayerTurn {
            return Err(ActionError::TableNotActive);
        }

        Ok(index)
    }

    /// Player action: Hit (draw a card at `table`).
    ///
    /// Every hit spends one unit of the turn's shared hit budget, whichever
    /// table it lands on. A plain hand over 21 busts; a hand holding a
    /// special card overbusts and stays in play.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player phase, the table does not
    /// exist or is not waiting on the player, the hit budget is spent, or the
    /// deck is empty.
    pub fn hit(&mut self, table: u8) -> Result<Card, ActionError> {
        let index = self.ensure_player_turn(table)?;

        if self.hits_this_turn >= self.options.max_hits_per_turn {
            return Err(ActionError::HitLimitReached);
        }

        let card = self.draw().ok_or(ActionError::NoCards)?;
        self.hits_this_turn += 1;

        let state = &mut self.tables[index];
        state.player_draw(card);
        let score = state.player_score;
        let busted = state.status == TableStatus::PlayerBust;

        self.history.push(
            HistoryEvent::action(Actor::Player, HistoryAction::Hits, table)
                .with_card(card)
                .with_score(score),
        );
        tracing::debug!(table, %card, score, hits = self.hits_this_turn, "player hits");

        if busted {
            self.history.push(
                HistoryEvent::action(Actor::Player, HistoryAction::Busts, table).with_score(score),
            );
            self.focus_next_active();
        }

        self.refresh_stats();
        self.advance_player_phase();

        Ok(card)
    }

    /// Player action: Stand (end the turn at `table`).
    ///
    /// Focus moves on to the next table still waiting on the player.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player phase, or the table does not
    /// exist or is not waiting on the player.
    pub fn stand(&mut self, table: u8) -> Result<(), ActionError> {
        let index = self.ensure_player_turn(table)?;

        let state = &mut self.tables[index];
        state.stand();
        let action = if state.player_overbust {
            HistoryAction::OverbustStands
        } else {
            HistoryAction::Stands
        };
        let score = state.player_score;

        self.history
            .push(HistoryEvent::action(Actor::Player, action, table).with_score(score));
        tracing::debug!(table, score, "player stands");

        self.focus_next_active();
        self.advance_player_phase();

        Ok(())
    }

    /// Hands the turn to the opponent once no table waits on the player or
    /// the hit budget is spent. A spent budget stands every remaining table.
    pub(super) fn advance_player_phase(&mut self) {
        if self.phase != Phase::Player {
            return;
        }

        let any_active = self
            .tables
            .iter()
            .any(|t| t.status == TableStatus::PlayerTurn);
        let budget_spent = self.hits_this_turn >= self.options.max_hits_per_turn;

        if any_active && budget_spent {
            self.history.push(HistoryEvent::Message {
                content: MAX_HITS_MESSAGE.into(),
            });
            for table in &mut self.tables {
                if table.status == TableStatus::PlayerTurn {
                    table.stand();
                }
            }
        }

        if !any_active || budget_spent {
            self.enter_opponent_phase();
        }
    }

    pub(super) fn enter_opponent_phase(&mut self) {
        self.phase = Phase::Opponent;
        self.opponent_cursor = 0;
        for table in &mut self.tables {
            table.opponent_thinking = table.status == TableStatus::Waiting;
        }
        tracing::debug!(round = self.round, "opponent turn");
    }
}
