//! Append-only log of notable match events.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::Serialize;

use crate::card::{Card, CardKey};
use crate::result::RoundWinner;
use crate::table::TableStatus;

/// Who acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Actor {
    /// The human player.
    Player,
    /// The scripted opponent.
    Opponent,
}

/// What an actor did at a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    /// Received the initial two cards.
    Dealt,
    /// Drew a card.
    Hits,
    /// Ended their turn.
    Stands,
    /// Went over 21 without a special card.
    Busts,
    /// Was dealt 21.
    Blackjack,
    /// Ended their turn while overbusted.
    OverbustStands,
}

/// A logged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEvent {
    /// Free-form notice.
    Message {
        /// Text of the notice.
        content: String,
    },
    /// A round was dealt.
    RoundStart {
        /// 1-based round number.
        round: u32,
    },
    /// A round was scored.
    RoundEnd {
        /// Who took the round.
        winner: RoundWinner,
    },
    /// The special-card rule fired.
    SpecialCards {
        /// Cards that were marked.
        cards: Vec<CardKey>,
    },
    /// A player or opponent action.
    Action {
        /// Who acted.
        actor: Actor,
        /// What they did.
        action: HistoryAction,
        /// Table the action happened at.
        table: u8,
        /// Card drawn, for hits.
        #[serde(skip_serializing_if = "Option::is_none")]
        card: Option<Card>,
        /// Score after the action.
        #[serde(skip_serializing_if = "Option::is_none")]
        score: Option<u8>,
        /// Full hand, for deals and blackjacks.
        #[serde(skip_serializing_if = "Option::is_none")]
        hand: Option<Vec<Card>>,
    },
    /// A table was scored.
    TableResult {
        /// Table id.
        table: u8,
        /// Final status.
        result: TableStatus,
        /// The player's raw score.
        player_score: u8,
        /// The opponent's raw score.
        opponent_score: u8,
    },
}

impl HistoryEvent {
    /// Builds an [`HistoryEvent::Action`] with no card, score, or hand.
    #[must_use]
    pub const fn action(actor: Actor, action: HistoryAction, table: u8) -> Self {
        Self::Action {
            actor,
            action,
            table,
            card: None,
            score: None,
            hand: None,
        }
    }

    /// Sets the score of an action. Other events are returned unchanged.
    #[must_use]
    pub fn with_score(mut self, value: u8) -> Self {
        if let Self::Action { score, .. } = &mut self {
            *score = Some(value);
        }
        self
    }

    /// Sets the drawn card of an action.
    #[must_use]
    pub fn with_card(mut self, value: Card) -> Self {
        if let Self::Action { card, .. } = &mut self {
            *card = Some(value);
        }
        self
    }

    /// Sets the hand of an action.
    #[must_use]
    pub fn with_hand(mut self, cards: &[Card]) -> Self {
        if let Self::Action { hand, .. } = &mut self {
            *hand = Some(cards.to_vec());
        }
        self
    }
}

/// A logged event with its stable display key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// Position in the match log, starting at 1.
    pub seq: u64,
    /// The event.
    #[serde(flatten)]
    pub event: HistoryEvent,
}

/// Match history. Entries are immutable once pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    next_seq: u64,
}

impl HistoryLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Appends an event and returns its sequence number.
    pub fn push(&mut self, event: HistoryEvent) -> u64 {
        self.next_seq += 1;
        tracing::trace!(seq = self.next_seq, ?event, "history");
        self.entries.push(HistoryEntry {
            seq: self.next_seq,
            event,
        });
        self.next_seq
    }

    /// Iterates entries newest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + '_ {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for HistoryLog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
