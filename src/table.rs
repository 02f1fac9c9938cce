//! Per-table state for a round.

extern crate alloc;

use alloc::vec::Vec;

use serde::Serialize;

use crate::card::Card;
use crate::deck::{self, HandStats};
use crate::hand::Hand;

/// Number of tables played each round.
pub const TABLE_COUNT: usize = 3;

/// Table status.
///
/// Within a round a table only moves forward: `PlayerTurn` → `Waiting` →
/// one of the terminal outcomes, or straight to a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableStatus {
    /// The player may hit or stand.
    PlayerTurn,
    /// The player stood; the opponent plays or has played.
    Waiting,
    /// The player busted.
    PlayerBust,
    /// The opponent busted.
    OpponentBust,
    /// The player won the comparison.
    PlayerWins,
    /// The opponent won the comparison.
    OpponentWins,
    /// Equal effective scores.
    Push,
    /// The player was dealt 21.
    Blackjack,
}

impl TableStatus {
    /// Returns whether the table is frozen until the next deal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::PlayerTurn | Self::Waiting)
    }

    /// Outcomes that count toward the player in the round tally.
    #[must_use]
    pub const fn favours_player(self) -> bool {
        matches!(self, Self::PlayerWins | Self::Blackjack | Self::OpponentBust)
    }

    /// Outcomes that count toward the opponent in the round tally.
    #[must_use]
    pub const fn favours_opponent(self) -> bool {
        matches!(self, Self::OpponentWins | Self::PlayerBust)
    }

    /// Short human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PlayerTurn => "Your Turn",
            Self::Waiting => "Standing",
            Self::PlayerBust => "You Busted!",
            Self::OpponentBust => "Opponent Busted!",
            Self::PlayerWins => "You Win!",
            Self::OpponentWins => "Opponent Wins!",
            Self::Push => "Push",
            Self::Blackjack => "Blackjack!",
        }
    }
}

/// One of the three tables of a round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableState {
    /// Table id (1-based).
    pub id: u8,
    /// The player's hand.
    pub player_hand: Hand,
    /// The opponent's hand.
    pub opponent_hand: Hand,
    /// The player's raw score.
    pub player_score: u8,
    /// The opponent's raw score.
    pub opponent_score: u8,
    /// Current status.
    pub status: TableStatus,
    /// Whether the player stood on this table (explicitly or forced).
    pub player_stood: bool,
    /// Whether the opponent is deciding on this table.
    pub opponent_thinking: bool,
    /// Next-draw forecast for the player's hand.
    pub stats: HandStats,
    /// The player is over 21 but holds a special card.
    pub player_overbust: bool,
    /// The opponent is over 21 but holds a special card.
    pub opponent_overbust: bool,
    /// The player's hand holds a special card.
    pub player_has_special: bool,
    /// The opponent's hand holds a special card.
    pub opponent_has_special: bool,
}

impl TableState {
    /// Creates a freshly dealt table. A dealt 21 is a blackjack.
    #[must_use]
    pub fn dealt(id: u8, player: &[Card], opponent: &[Card]) -> Self {
        let mut table = Self {
            id,
            player_hand: Hand::from_cards(player),
            opponent_hand: Hand::from_cards(opponent),
            player_score: 0,
            opponent_score: 0,
            status: TableStatus::PlayerTurn,
            player_stood: false,
            opponent_thinking: false,
            stats: HandStats::default(),
            player_overbust: false,
            opponent_overbust: false,
            player_has_special: false,
            opponent_has_special: false,
        };
        table.refresh_player();
        table.refresh_opponent();

        if table.player_score == 21 {
            table.status = TableStatus::Blackjack;
        }

        table
    }

    fn refresh_player(&mut self) {
        self.player_score = self.player_hand.value();
        self.player_has_special = self.player_hand.has_special();
        self.player_overbust = self.player_hand.is_overbust();
    }

    fn refresh_opponent(&mut self) {
        self.opponent_score = self.opponent_hand.value();
        self.opponent_has_special = self.opponent_hand.has_special();
        self.opponent_overbust = self.opponent_hand.is_overbust();
    }

    /// Adds a card to the player's hand. A plain bust ends the table.
    pub(crate) fn player_draw(&mut self, card: Card) {
        self.player_hand.add_card(card);
        self.refresh_player();
        if self.player_hand.is_bust() {
            self.status = TableStatus::PlayerBust;
            self.stats = HandStats::default();
        }
    }

    /// Adds a card to the opponent's hand. A plain bust ends the table.
    pub(crate) fn opponent_draw(&mut self, card: Card) {
        self.opponent_hand.add_card(card);
        self.refresh_opponent();
        if self.opponent_hand.is_bust() {
            self.status = TableStatus::OpponentBust;
        }
    }

    /// Ends the player's turn on this table.
    pub(crate) fn stand(&mut self) {
        self.status = TableStatus::Waiting;
        self.player_stood = true;
        self.stats = HandStats::default();
    }

    /// Recomputes the forecast against the current deck.
    pub(crate) fn refresh_stats(&mut self, remaining: &[Card]) {
        if self.status == TableStatus::PlayerTurn {
            self.stats = deck::hand_stats(self.player_hand.cards(), remaining);
        }
    }

    /// The player's score as seen by the comparison and the opponent.
    #[must_use]
    pub fn player_effective(&self) -> u8 {
        self.player_hand.effective_value()
    }

    /// The opponent's score as seen by the comparison.
    #[must_use]
    pub fn opponent_effective(&self) -> u8 {
        self.opponent_hand.effective_value()
    }

    /// Decides the outcome of a table that reached scoring without a
    /// terminal status. Terminal tables keep their status.
    #[must_use]
    pub fn outcome(&self) -> TableStatus {
        if self.status.is_terminal() {
            return self.status;
        }

        let player = self.player_effective();
        let opponent = self.opponent_effective();

        if self.opponent_hand.is_bust() {
            TableStatus::OpponentBust
        } else if player > opponent {
            TableStatus::PlayerWins
        } else if opponent > player {
            TableStatus::OpponentWins
        } else {
            TableStatus::Push
        }
    }

    /// Moves every card out of both hands.
    pub(crate) fn collect_cards(&mut self) -> Vec<Card> {
        let mut cards = self.player_hand.take_cards();
        cards.extend(self.opponent_hand.take_cards());
        cards
    }
}
