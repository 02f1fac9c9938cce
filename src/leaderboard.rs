//! Leaderboard gateway and ranking helpers.
//!
//! The gateway is consulted only when a match ends. Its failures are logged
//! and never reach the match.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;
use crate::sync::Mutex;

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Display name.
    pub name: String,
    /// Longest win streak achieved.
    pub streak: u32,
}

impl LeaderboardEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(name: impl Into<String>, streak: u32) -> Self {
        Self {
            name: name.into(),
            streak,
        }
    }
}

/// Remote list of name/streak entries.
///
/// There is no merging: `replace` overwrites the whole list and the last
/// writer wins.
pub trait LeaderboardGateway {
    /// Fetches the stored list. A missing list is empty, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or answers with
    /// something other than a list.
    fn fetch(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;

    /// Replaces the stored list.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or rejects the write.
    fn replace(&self, entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError>;
}

/// In-process gateway.
#[derive(Debug, Default)]
pub struct MemoryLeaderboard {
    entries: Mutex<Vec<LeaderboardEntry>>,
}

impl MemoryLeaderboard {
    /// Creates a gateway holding `entries`.
    #[must_use]
    pub const fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Returns a copy of the stored list.
    #[must_use]
    pub fn snapshot(&self) -> Vec<LeaderboardEntry> {
        self.entries.lock().clone()
    }
}

impl LeaderboardGateway for MemoryLeaderboard {
    fn fetch(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        Ok(self.snapshot())
    }

    fn replace(&self, entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
        *self.entries.lock() = entries.to_vec();
        Ok(())
    }
}

/// Longest name kept on the board, in characters.
pub const MAX_NAME_LEN: usize = 15;

/// Sorts by streak, highest first, and keeps the top `size`.
///
/// The sort is stable: among equal streaks earlier entries stay ahead.
pub fn rank_entries(entries: &mut Vec<LeaderboardEntry>, size: usize) {
    entries.sort_by(|a, b| b.streak.cmp(&a.streak));
    entries.truncate(size);
}

/// Returns whether `streak` earns a place on a ranked `board`.
#[must_use]
pub fn qualifies(board: &[LeaderboardEntry], streak: u32, size: usize) -> bool {
    if streak == 0 {
        return false;
    }
    if board.len() < size {
        return true;
    }

    let lowest = board
        .get(size.saturating_sub(1))
        .or_else(|| board.last())
        .map_or(0, |entry| entry.streak);
    streak > lowest
}

/// Fetches and ranks the board. Failures are logged and read as empty.
pub fn load_board<G>(gateway: &G, size: usize) -> Vec<LeaderboardEntry>
where
    G: LeaderboardGateway + ?Sized,
{
    match gateway.fetch() {
        Ok(mut entries) => {
            rank_entries(&mut entries, size);
            entries
        }
        Err(err) => {
            tracing::warn!(%err, "failed to fetch leaderboard");
            Vec::new()
        }
    }
}

/// Adds `name` with `streak` to the board and writes it back.
///
/// Names are trimmed and cut to [`MAX_NAME_LEN`] characters. Only a streak
/// that [`qualifies`] is written; otherwise the ranked board is returned
/// as fetched. Gateway errors are logged and swallowed: when the fetch
/// fails nothing is written, and when the write fails the board is returned
/// unsaved. Blank names are not submitted.
pub fn submit_streak<G>(gateway: &G, name: &str, streak: u32, size: usize) -> Vec<LeaderboardEntry>
where
    G: LeaderboardGateway + ?Sized,
{
    let name: String = name.trim().chars().take(MAX_NAME_LEN).collect();
    let name = name.trim_end();

    let mut board = match gateway.fetch() {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(%err, "failed to fetch leaderboard; streak not saved");
            if name.is_empty() || streak == 0 {
                return Vec::new();
            }
            return alloc::vec![LeaderboardEntry::new(name, streak)];
        }
    };
    rank_entries(&mut board, size);

    if name.is_empty() || !qualifies(&board, streak, size) {
        tracing::debug!(streak, "streak not submitted");
        return board;
    }

    board.push(LeaderboardEntry::new(name, streak));
    rank_entries(&mut board, size);

    match gateway.replace(&board) {
        Ok(()) => tracing::info!(name, streak, "leaderboard updated"),
        Err(err) => tracing::warn!(%err, "failed to update leaderboard"),
    }

    board
}

#[cfg(feature = "http")]
pub use self::jsonbin::JsonBinLeaderboard;

#[cfg(feature = "http")]
mod jsonbin {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    use reqwest::StatusCode;
    use reqwest::blocking::Client;
    use serde_json::Value;

    use super::{LeaderboardEntry, LeaderboardGateway};
    use crate::error::LeaderboardError;

    const JSONBIN_API: &str = "https://api.jsonbin.io/v3/b";
    const MASTER_KEY_HEADER: &str = "X-Master-Key";

    /// Gateway backed by a JSONBin bin holding the entry list.
    #[cfg_attr(docsrs, doc(cfg(feature = "http")))]
    #[derive(Debug, Clone)]
    pub struct JsonBinLeaderboard {
        client: Client,
        base_url: String,
        master_key: String,
    }

    impl JsonBinLeaderboard {
        /// Creates a gateway for the bin `bin_id`.
        #[must_use]
        pub fn new(bin_id: &str, master_key: impl Into<String>) -> Self {
            Self::with_base_url(format!("{JSONBIN_API}/{bin_id}"), master_key)
        }

        /// Creates a gateway for a bin at `base_url` (without `/latest`).
        #[must_use]
        pub fn with_base_url(base_url: impl Into<String>, master_key: impl Into<String>) -> Self {
            Self {
                client: Client::new(),
                base_url: base_url.into(),
                master_key: master_key.into(),
            }
        }
    }

    /// Reads the `record` field of a bin response. Anything but a list is
    /// treated as an empty board.
    pub(super) fn parse_record(body: Value) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        match body {
            Value::Object(mut map) => match map.remove("record") {
                Some(record @ Value::Array(_)) => Ok(serde_json::from_value(record)?),
                _ => Ok(Vec::new()),
            },
            _ => Ok(Vec::new()),
        }
    }

    impl LeaderboardGateway for JsonBinLeaderboard {
        fn fetch(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
            let response = self
                .client
                .get(format!("{}/latest", self.base_url))
                .header(MASTER_KEY_HEADER, &self.master_key)
                .send()?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Ok(Vec::new());
            }
            if !status.is_success() {
                return Err(LeaderboardError::Status(status.as_u16()));
            }

            parse_record(response.json()?)
        }

        fn replace(&self, entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
            let response = self
                .client
                .put(&self.base_url)
                .header(MASTER_KEY_HEADER, &self.master_key)
                .json(entries)
                .send()?;

            let status = response.status();
            if !status.is_success() {
                return Err(LeaderboardError::Status(status.as_u16()));
            }

            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Unreachable;

    impl LeaderboardGateway for Unreachable {
        fn fetch(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
            Err(LeaderboardError::Http("connection refused".into()))
        }

        fn replace(&self, _entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
            Err(LeaderboardError::Status(503))
        }
    }

    struct ReadOnly(Vec<LeaderboardEntry>);

    impl LeaderboardGateway for ReadOnly {
        fn fetch(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
            Ok(self.0.clone())
        }

        fn replace(&self, _entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
            Err(LeaderboardError::Status(401))
        }
    }

    fn board(streaks: &[u32]) -> Vec<LeaderboardEntry> {
        streaks
            .iter()
            .enumerate()
            .map(|(i, &s)| LeaderboardEntry::new(alloc::format!("p{i}"), s))
            .collect()
    }

    #[test]
    fn ranking_sorts_descending_and_truncates() {
        let mut entries = board(&[1, 5, 3, 5, 2]);
        rank_entries(&mut entries, 3);

        let streaks: Vec<u32> = entries.iter().map(|e| e.streak).collect();
        assert_eq!(streaks, [5, 5, 3]);
        assert_eq!(entries[0].name, "p1");
        assert_eq!(entries[1].name, "p3");
    }

    #[test]
    fn qualification_rules() {
        assert!(!qualifies(&[], 0, 10));
        assert!(qualifies(&[], 1, 10));

        let full = board(&[9, 8, 7]);
        assert!(!qualifies(&full, 7, 3));
        assert!(qualifies(&full, 8, 3));
        assert!(qualifies(&full, 1, 4));
    }

    #[test]
    fn submit_writes_ranked_board() {
        let gateway = MemoryLeaderboard::new(board(&[4, 2]));

        let shown = submit_streak(&gateway, "  ada  ", 3, 10);
        assert_eq!(shown, gateway.snapshot());
        assert_eq!(shown[1], LeaderboardEntry::new("ada", 3));
        assert_eq!(shown.len(), 3);
    }

    #[test]
    fn submit_ignores_blank_names() {
        let gateway = MemoryLeaderboard::new(board(&[4]));
        let shown = submit_streak(&gateway, "   ", 9, 10);
        assert_eq!(shown, board(&[4]));
        assert_eq!(gateway.snapshot(), board(&[4]));
    }

    #[test]
    fn zero_streak_is_not_written() {
        let gateway = MemoryLeaderboard::new(board(&[3]));

        let shown = submit_streak(&gateway, "rin", 0, 10);
        assert_eq!(shown, board(&[3]));
        assert_eq!(gateway.snapshot(), board(&[3]));
    }

    #[test]
    fn streak_below_a_full_board_is_not_written() {
        let gateway = MemoryLeaderboard::new(board(&[2, 9, 5]));

        let shown = submit_streak(&gateway, "rin", 2, 3);
        let streaks: Vec<u32> = shown.iter().map(|e| e.streak).collect();
        assert_eq!(streaks, [9, 5, 2]);
        assert!(shown.iter().all(|e| e.name != "rin"));
        assert_eq!(gateway.snapshot(), board(&[2, 9, 5]));
    }

    #[test]
    fn long_names_are_cut() {
        let gateway = MemoryLeaderboard::new(Vec::new());

        let shown = submit_streak(&gateway, "  abcdefghijklmnopqrst ", 4, 10);
        assert_eq!(shown, [LeaderboardEntry::new("abcdefghijklmno", 4)]);
        assert_eq!(shown[0].name.chars().count(), MAX_NAME_LEN);
    }

    #[test]
    fn gateway_failures_are_swallowed() {
        let shown = submit_streak(&Unreachable, "ada", 3, 10);
        assert_eq!(shown, [LeaderboardEntry::new("ada", 3)]);
        assert!(load_board(&Unreachable, 10).is_empty());

        let shown = submit_streak(&ReadOnly(board(&[7])), "ada", 3, 10);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].streak, 7);
    }

    #[cfg(feature = "http")]
    #[test]
    fn jsonbin_record_parsing() {
        let body = serde_json::json!({ "record": [{ "name": "ada", "streak": 4 }] });
        assert_eq!(
            jsonbin::parse_record(body).unwrap(),
            [LeaderboardEntry::new("ada", 4)]
        );

        let body = serde_json::json!({ "record": {} });
        assert!(jsonbin::parse_record(body).unwrap().is_empty());
    }
}
