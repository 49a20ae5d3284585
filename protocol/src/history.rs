use chrono::{DateTime, Utc};
use memorito_core::RoundSummary;
use serde::{Deserialize, Serialize};

use crate::*;

/// Most recent rounds kept in the log.
pub const HISTORY_LIMIT: usize = 50;

/// One completed round as it is remembered, newest entries first in the log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub cards: u16,
    pub flips: u32,
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<u8>,
}

impl HistoryEntry {
    pub fn from_summary(summary: &RoundSummary, finished_at: DateTime<Utc>) -> Self {
        Self {
            date: finished_at.format("%-m/%-d/%Y").to_string(),
            cards: summary.card_count,
            flips: summary.flip_count,
            timestamp: finished_at.timestamp_millis(),
            efficiency: summary.efficiency,
        }
    }
}

/// Whole history list as stored, always replaced in one write.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameHistory(pub Vec<HistoryEntry>);

impl StorageKey for GameHistory {
    const KEY: &'static str = "memoryGameHistory";
}

/// History log over a key-value store.
///
/// Storage trouble never reaches the player: unreadable data reads as an empty list and failed writes are logged
/// and dropped.
#[derive(Clone, Debug)]
pub struct HistoryLog<S> {
    store: S,
}

impl<S: KeyValueStore> HistoryLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        match self.store.load::<GameHistory>() {
            Ok(history) => history.unwrap_or_default().0,
            Err(err) => {
                log::error!("Error reading game history: {}", err);
                Vec::new()
            }
        }
    }

    /// Puts the entry in front and drops whatever falls past the limit.
    pub fn record(&mut self, entry: HistoryEntry) {
        let mut entries = self.entries();
        entries.insert(0, entry);
        entries.truncate(HISTORY_LIMIT);
        self.replace(entries);
    }

    pub fn replace(&mut self, entries: Vec<HistoryEntry>) {
        if let Err(err) = self.store.save(&GameHistory(entries)) {
            log::error!("Error saving game history: {}", err);
        }
    }

    pub fn clear(&mut self) {
        if let Err(err) = self.store.delete::<GameHistory>() {
            log::error!("Error clearing game history: {}", err);
        }
    }

    pub fn stats(&self) -> GameStats {
        GameStats::from_history(&self.entries())
    }

    pub fn export(&self, exported_at: DateTime<Utc>) -> GameDataExport {
        GameDataExport::new(self.entries(), exported_at)
    }

    /// Replaces the log with the history of an export blob, returns how many entries were taken.
    pub fn import(&mut self, json: &str) -> Option<usize> {
        let entries = import_history(json)?;
        let count = entries.len();
        self.replace(entries);
        Some(count)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
