//! Match engine and state management.

use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::{Card, CardKey};
use crate::deck::{create_deck, shuffle};
use crate::error::{ActionError, DealError};
use crate::history::HistoryLog;
use crate::options::MatchOptions;
use crate::result::{MatchSummary, RoundResult, RoundScore, RoundWinner, WinStreak};
use crate::table::{TABLE_COUNT, TableState, TableStatus};

mod actions;
mod deal;
mod handle;
mod opponent;
mod showdown;
pub mod state;

pub use handle::Game;
pub use opponent::OpponentStep;
pub use state::{CardAudit, DealOutcome, DeckStatus, Phase};

/// Cards needed to deal a round: two per side at every table.
pub const CARDS_PER_ROUND: usize = 2 * 2 * TABLE_COUNT;

/// The complete state of a match.
///
/// All transitions are methods on this value. A transition that returns an
/// error leaves the state exactly as it was, so a caller that ignores the
/// error sees the command as a no-op. Given the same seed and the same
/// commands, a match replays identically.
#[derive(Debug, Clone)]
pub struct MatchState {
    /// Match options.
    options: MatchOptions,
    /// Cards left to draw; the top of the deck is the end.
    deck: Vec<Card>,
    /// Cards from finished rounds.
    discard: Vec<Card>,
    /// Tables of the current round (empty before the first deal).
    tables: Vec<TableState>,
    /// Current phase.
    phase: Phase,
    /// Table id the display is focused on.
    focused: u8,
    /// Player hits taken this turn across all tables.
    hits_this_turn: u8,
    /// Number of the round being played (0 before the first deal).
    round: u32,
    /// Round tally.
    score: RoundScore,
    /// Player win streak.
    streak: WinStreak,
    /// Event log.
    history: HistoryLog,
    /// Whether the special-card rule has fired this match.
    special_fired: bool,
    /// Keys marked special, in selection order.
    special_cards: Vec<CardKey>,
    /// Index of the table the opponent is playing.
    opponent_cursor: usize,
    /// Result of the most recently scored round.
    last_round: Option<RoundResult>,
    /// Final report once the match is over.
    summary: Option<MatchSummary>,
    /// Bumped on every reset so in-flight pacing can notice.
    epoch: u64,
    /// Random number generator.
    rng: ChaCha8Rng,
}

impl MatchState {
    /// Creates a new match with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use triple21::{MatchOptions, MatchState, Phase};
    ///
    /// let state = MatchState::new(MatchOptions::default(), 42);
    /// assert_eq!(state.phase(), Phase::Ready);
    /// assert_eq!(state.cards_remaining(), 52);
    /// ```
    #[must_use]
    pub fn new(options: MatchOptions, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let deck = shuffle(&create_deck(), &mut rng);

        Self {
            options,
            deck,
            discard: Vec::new(),
            tables: Vec::new(),
            phase: Phase::Ready,
            focused: 1,
            hits_this_turn: 0,
            round: 0,
            score: RoundScore::default(),
            streak: WinStreak::default(),
            history: HistoryLog::new(),
            special_fired: false,
            special_cards: Vec::new(),
            opponent_cursor: 0,
            last_round: None,
            summary: None,
            epoch: 0,
            rng,
        }
    }

    /// Starts the match over with a fresh deck.
    ///
    /// Scores, streaks, history, and the special-card rule are cleared. The
    /// random generator carries on from its current state.
    pub fn reset(&mut self) {
        self.deck = shuffle(&create_deck(), &mut self.rng);
        self.discard.clear();
        self.tables.clear();
        self.phase = Phase::Ready;
        self.focused = 1;
        self.hits_this_turn = 0;
        self.round = 0;
        self.score = RoundScore::default();
        self.streak = WinStreak::default();
        self.history = HistoryLog::new();
        self.special_fired = false;
        self.special_cards.clear();
        self.opponent_cursor = 0;
        self.last_round = None;
        self.summary = None;
        self.epoch += 1;

        tracing::info!(epoch = self.epoch, "match reset");
    }

    /// Returns the match options.
    #[must_use]
    pub const fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the tables of the current round in id order.
    #[must_use]
    pub fn tables(&self) -> &[TableState] {
        &self.tables
    }

    /// Returns the table with the given id.
    #[must_use]
    pub fn table(&self, id: u8) -> Option<&TableState> {
        self.tables.iter().find(|table| table.id == id)
    }

    /// Returns the focused table id.
    #[must_use]
    pub const fn focused_table(&self) -> u8 {
        self.focused
    }

    /// Moves the display focus to another table.
    ///
    /// # Errors
    ///
    /// Returns an error if no table has this id.
    pub fn set_focus(&mut self, table: u8) -> Result<(), ActionError> {
        self.table(table).ok_or(ActionError::TableNotFound)?;
        self.focused = table;
        Ok(())
    }

    /// Returns the hits the player may still take this turn.
    #[must_use]
    pub const fn remaining_hits(&self) -> u8 {
        self.options
            .max_hits_per_turn
            .saturating_sub(self.hits_this_turn)
    }

    /// Returns the number of the current (or last) round, 0 before the first.
    #[must_use]
    pub const fn round_number(&self) -> u32 {
        self.round
    }

    /// Returns the round tally.
    #[must_use]
    pub const fn score(&self) -> RoundScore {
        self.score
    }

    /// Returns the player's win streak.
    #[must_use]
    pub const fn streak(&self) -> WinStreak {
        self.streak
    }

    /// Returns the event log.
    #[must_use]
    pub const fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Returns the most recently scored round.
    #[must_use]
    pub const fn last_round(&self) -> Option<&RoundResult> {
        self.last_round.as_ref()
    }

    /// Returns who took the most recently scored round, while it is shown.
    #[must_use]
    pub fn last_round_winner(&self) -> Option<RoundWinner> {
        match self.phase {
            Phase::RoundOver | Phase::GameOver => self.last_round.as_ref().map(|r| r.winner),
            _ => None,
        }
    }

    /// Returns the final report once the match is over.
    #[must_use]
    pub const fn summary(&self) -> Option<MatchSummary> {
        self.summary
    }

    /// Returns whether special cards exist in this match.
    #[must_use]
    pub const fn special_active(&self) -> bool {
        self.special_fired
    }

    /// Returns the keys marked special, in selection order.
    #[must_use]
    pub fn special_cards(&self) -> &[CardKey] {
        &self.special_cards
    }

    /// Returns the cards left to draw; the last card is drawn next.
    #[must_use]
    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    /// Returns the discard pile.
    #[must_use]
    pub fn discard(&self) -> &[Card] {
        &self.discard
    }

    /// Returns the number of cards left to draw.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len()
    }

    /// Returns the number of cards on the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Returns the reset counter.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Returns the remaining-deck view.
    #[must_use]
    pub fn deck_status(&self) -> DeckStatus {
        let mut remaining_keys: Vec<CardKey> = self.deck.iter().map(Card::key).collect();
        remaining_keys.sort_unstable();

        let mut special_remaining: Vec<CardKey> = self
            .deck
            .iter()
            .filter(|card| card.special)
            .map(Card::key)
            .collect();
        special_remaining.sort_unstable();

        DeckStatus {
            remaining: self.deck.len(),
            discarded: self.discard.len(),
            remaining_keys,
            special_remaining,
        }
    }

    /// Counts every card in the deck, the discard pile, and all hands.
    #[must_use]
    pub fn audit_cards(&self) -> CardAudit {
        let mut seen: HashMap<CardKey, usize> = HashMap::new();

        let hands = self
            .tables
            .iter()
            .flat_map(|t| t.player_hand.cards().iter().chain(t.opponent_hand.cards()));
        for card in self.deck.iter().chain(&self.discard).chain(hands) {
            *seen.entry(card.key()).or_insert(0) += 1;
        }

        let mut duplicates: Vec<CardKey> = seen
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(key, _)| *key)
            .collect();
        duplicates.sort_unstable();

        let missing = create_deck()
            .iter()
            .map(Card::key)
            .filter(|key| !seen.contains_key(key))
            .collect();

        CardAudit {
            total: seen.values().sum(),
            duplicates,
            missing,
        }
    }

    /// Moves `draws` to the top of the deck so they are drawn in the given
    /// order. Cards are matched by key; the rest of the deck keeps its order.
    ///
    /// Intended for tests and set-piece puzzles: call it after
    /// [`begin_round`](Self::begin_round) to choose the dealt hands.
    ///
    /// # Errors
    ///
    /// Returns an error if a card is not in the deck.
    pub fn stack_deck(&mut self, draws: &[Card]) -> Result<(), DealError> {
        let mut rest = self.deck.clone();
        let mut top = Vec::with_capacity(draws.len());

        for wanted in draws {
            let pos = rest
                .iter()
                .position(|card| card.key() == wanted.key())
                .ok_or(DealError::CardNotInDeck)?;
            top.push(rest.remove(pos));
        }

        top.reverse();
        rest.extend(top);
        self.deck = rest;
        Ok(())
    }

    /// Draws the top card.
    fn draw(&mut self) -> Option<Card> {
        self.deck.pop()
    }

    fn table_index(&self, table: u8) -> Result<usize, ActionError> {
        self.tables
            .iter()
            .position(|t| t.id == table)
            .ok_or(ActionError::TableNotFound)
    }

    /// Points the focus at the first table still waiting on the player.
    fn focus_next_active(&mut self) {
        if let Some(next) = self
            .tables
            .iter()
            .find(|t| t.status == TableStatus::PlayerTurn)
        {
            self.focused = next.id;
        }
    }

    fn refresh_stats(&mut self) {
        for table in &mut self.tables {
            table.refresh_stats(&self.deck);
        }
    }
}
