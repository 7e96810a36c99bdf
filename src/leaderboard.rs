//! Ranked per-mode results kept in a [`KeyValueStore`].

use crate::error::StoreError;
use crate::mode::Mode;
use crate::session::SessionResult;
use crate::store::KeyValueStore;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, warn};

pub const PLAYER_NAME_KEY: &str = "hrtm_player_name";
pub const DEFAULT_PLAYER_NAME: &str = "Player";
/// Entries kept per board
pub const BOARD_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub level: u32,
    pub accuracy: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wpm: Option<u32>,
    pub mode: Mode,
    pub date: DateTime<Local>,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, result: &SessionResult) -> Self {
        Self {
            name: name.into(),
            score: result.score,
            level: result.level,
            accuracy: result.accuracy,
            wpm: result.wpm,
            mode: result.mode,
            date: result.finished_at,
        }
    }
}

/// Higher score first; ties go to WPM on boards ranked by it, else to level
fn rank(a: &LeaderboardEntry, b: &LeaderboardEntry, by_wpm: bool) -> Ordering {
    let tie = if by_wpm {
        b.wpm.unwrap_or(0).cmp(&a.wpm.unwrap_or(0))
    } else {
        b.level.cmp(&a.level)
    };
    b.score.cmp(&a.score).then(tie)
}

pub struct Leaderboard<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn player_name(&self) -> String {
        self.store
            .get(PLAYER_NAME_KEY)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER_NAME.to_string())
    }

    pub fn set_player_name(&mut self, name: &str) -> Result<(), StoreError> {
        self.store.set(PLAYER_NAME_KEY, name.trim())
    }

    /// Ranked entries of the board `mode` posts to. Unreadable data reads as empty.
    pub fn entries(&self, mode: Mode) -> Vec<LeaderboardEntry> {
        let key = mode.board_key();
        let Some(raw) = self.store.get(key) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(board = key, error = %e, "corrupt leaderboard, starting empty");
                Vec::new()
            }
        }
    }

    /// Posts a finished session under the current player name. Returns the
    /// 1-based rank when the entry made the board.
    pub fn record(&mut self, result: &SessionResult) -> Result<Option<usize>, StoreError> {
        let entry = LeaderboardEntry::new(self.player_name(), result);
        let mut entries = self.entries(result.mode);
        entries.push(entry.clone());

        let by_wpm = result.mode.ranks_by_wpm();
        entries.sort_by(|a, b| rank(a, b, by_wpm));
        entries.truncate(BOARD_SIZE);

        let position = entries.iter().rposition(|e| *e == entry).map(|i| i + 1);
        let data = serde_json::to_string(&entries)?;
        self.store.set(result.mode.board_key(), &data)?;

        debug!(board = result.mode.board_key(), rank = ?position, "result recorded");
        Ok(position)
    }
}
