use alloc::vec::Vec;

use crate::deck::shuffle;
use crate::error::DealError;
use crate::history::{Actor, HistoryAction, HistoryEvent};
use crate::result::MatchSummary;
use crate::special;
use crate::table::{TABLE_COUNT, TableState, TableStatus};

use super::{CARDS_PER_ROUND, DealOutcome, MatchState, Phase};

impl MatchState {
    /// Deals the next round without pausing.
    ///
    /// Equivalent to [`begin_round`](Self::begin_round) followed by
    /// [`reveal_round`](Self::reveal_round).
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress or the match is over.
    pub fn deal_next_round(&mut self) -> Result<DealOutcome, DealError> {
        let outcome = self.begin_round()?;
        if let DealOutcome::Started { .. } = outcome {
            self.reveal_round()?;
        }
        Ok(outcome)
    }

    /// Starts a round: clears the last round's hands, ends the match if the
    /// deck cannot cover a round, fires the special-card rule when due, and
    /// shuffles. The phase becomes [`Phase::Preparing`].
    ///
    /// # Errors
    ///
    /// Returns an error unless the match is [`Phase::Ready`] or
    /// [`Phase::RoundOver`].
    pub fn begin_round(&mut self) -> Result<DealOutcome, DealError> {
        if !matches!(self.phase, Phase::Ready | Phase::RoundOver) {
            return Err(DealError::InvalidState);
        }

        for table in &mut self.tables {
            self.discard.extend(table.collect_cards());
        }
        self.tables.clear();

        if self.deck.len() < CARDS_PER_ROUND {
            let summary = MatchSummary::new(self.score, self.streak);
            self.summary = Some(summary);
            self.phase = Phase::GameOver;
            self.history.push(HistoryEvent::Message {
                content: "Not enough cards for another round.".into(),
            });
            tracing::info!(
                remaining = self.deck.len(),
                player = summary.score.player,
                opponent = summary.score.opponent,
                draws = summary.score.draws,
                max_streak = summary.max_streak,
                "match over"
            );
            return Ok(DealOutcome::MatchOver(summary));
        }

        let round = self.score.rounds() + 1;

        if round == self.options.special_round && !self.special_fired {
            let keys = special::activate(&mut self.deck, self.options.special_count, &mut self.rng);
            tracing::info!(round, count = keys.len(), "special cards activated");
            self.special_fired = true;
            self.special_cards.clone_from(&keys);
            self.history
                .push(HistoryEvent::SpecialCards { cards: keys });
        }

        self.deck = shuffle(&self.deck, &mut self.rng);
        self.round = round;
        self.hits_this_turn = 0;
        self.opponent_cursor = 0;
        self.last_round = None;
        self.phase = Phase::Preparing;
        self.history.push(HistoryEvent::RoundStart { round });
        tracing::info!(round, remaining = self.deck.len(), "round started");

        Ok(DealOutcome::Started { round })
    }

    /// Deals two cards per side at every table, round-robin from the top of
    /// the deck, and hands the turn to the player. Tables dealt 21 are
    /// blackjacks and skip the player phase.
    ///
    /// # Errors
    ///
    /// Returns an error unless the match is [`Phase::Preparing`].
    pub fn reveal_round(&mut self) -> Result<(), DealError> {
        if self.phase != Phase::Preparing {
            return Err(DealError::InvalidState);
        }

        let split = self
            .deck
            .len()
            .checked_sub(CARDS_PER_ROUND)
            .ok_or(DealError::InvalidState)?;

        // Draw order: table 1 player, table 1 opponent, table 2 player, ...
        let draws: Vec<_> = self.deck.split_off(split).into_iter().rev().collect();
        let pass = 2 * TABLE_COUNT;

        self.tables = (0..TABLE_COUNT)
            .map(|i| {
                let player = [draws[2 * i], draws[pass + 2 * i]];
                let opponent = [draws[2 * i + 1], draws[pass + 2 * i + 1]];
                TableState::dealt(i as u8 + 1, &player, &opponent)
            })
            .collect();

        for table in &self.tables {
            if table.status == TableStatus::Blackjack {
                self.history.push(
                    HistoryEvent::action(Actor::Player, HistoryAction::Blackjack, table.id)
                        .with_score(table.player_score)
                        .with_hand(table.player_hand.cards()),
                );
            }
        }

        for table in &self.tables {
            for (actor, hand, score) in [
                (Actor::Player, &table.player_hand, table.player_score),
                (Actor::Opponent, &table.opponent_hand, table.opponent_score),
            ] {
                self.history.push(
                    HistoryEvent::action(actor, HistoryAction::Dealt, table.id)
                        .with_score(score)
                        .with_hand(hand.cards()),
                );
            }
            tracing::debug!(
                table = table.id,
                player = table.player_score,
                opponent = table.opponent_score,
                status = ?table.status,
                "table dealt"
            );
        }

        self.refresh_stats();

        if self
            .tables
            .iter()
            .any(|t| t.status == TableStatus::PlayerTurn)
        {
            self.phase = Phase::Player;
            self.focus_next_active();
            self.advance_player_phase();
        } else {
            self.focused = 1;
            self.enter_opponent_phase();
        }

        Ok(())
    }
}
