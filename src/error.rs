//! Error types for match operations.
//!
//! A command that returns an error has not changed the match.

extern crate alloc;

use alloc::string::String;

use thiserror::Error;

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Not the player phase.
    #[error("invalid game state for this action")]
    InvalidState,
    /// No table with this id.
    #[error("table not found")]
    TableNotFound,
    /// The table is not waiting on the player.
    #[error("table is not active")]
    TableNotActive,
    /// The per-turn hit budget is spent.
    #[error("hit limit reached for this turn")]
    HitLimitReached,
    /// No cards left in the deck.
    #[error("no cards left in the deck")]
    NoCards,
}

/// Errors that can occur when dealing a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// A round is in progress or the match is over.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// A card asked for is not in the deck.
    #[error("card not in the deck")]
    CardNotInDeck,
}

/// Errors that can occur during the opponent phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OpponentError {
    /// Not the opponent phase.
    #[error("invalid game state for the opponent turn")]
    InvalidState,
    /// The opponent phase is already being played.
    #[error("opponent turn already running")]
    AlreadyRunning,
}

/// Errors reported by a leaderboard gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    /// The request could not be completed.
    #[error("leaderboard request failed: {0}")]
    Http(String),
    /// The store answered with a non-success status.
    #[error("leaderboard returned status {0}")]
    Status(u16),
    /// The response or request body could not be (de)serialized.
    #[error("leaderboard payload invalid: {0}")]
    Decode(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for LeaderboardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(alloc::string::ToString::to_string(&err))
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Http(alloc::string::ToString::to_string(&err))
        }
    }
}

#[cfg(feature = "http")]
impl From<serde_json::Error> for LeaderboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(alloc::string::ToString::to_string(&err))
    }
}
