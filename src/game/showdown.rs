use alloc::vec::Vec;

use crate::history::HistoryEvent;
use crate::result::{RoundResult, RoundWinner, TableResult};

use super::{MatchState, Phase};

impl MatchState {
    /// Scores every table, tallies the round, and updates the streak.
    ///
    /// Tables that ended early (busts, blackjacks) keep their status; the
    /// rest compare effective scores. The phase becomes
    /// [`Phase::RoundOver`].
    pub(super) fn resolve_round(&mut self) -> RoundResult {
        let mut tables = Vec::with_capacity(self.tables.len());

        for state in &mut self.tables {
            state.opponent_thinking = false;
            if !state.status.is_terminal() {
                state.status = state.outcome();
            }

            self.history.push(HistoryEvent::TableResult {
                table: state.id,
                result: state.status,
                player_score: state.player_score,
                opponent_score: state.opponent_score,
            });
            tables.push(TableResult {
                table: state.id,
                outcome: state.status,
                player_score: state.player_score,
                opponent_score: state.opponent_score,
            });
        }

        let winner = RoundWinner::from_outcomes(tables.iter().map(|t| t.outcome));
        self.score.record(winner);
        self.streak.record(winner);
        self.history.push(HistoryEvent::RoundEnd { winner });

        let result = RoundResult {
            round: self.round,
            tables,
            winner,
            score: self.score,
            streak: self.streak,
        };

        tracing::info!(
            round = self.round,
            ?winner,
            player = self.score.player,
            opponent = self.score.opponent,
            draws = self.score.draws,
            streak = self.streak.current,
            "round scored"
        );

        self.phase = Phase::RoundOver;
        self.last_round = Some(result.clone());
        result
    }
}
