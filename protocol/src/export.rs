use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

pub const EXPORT_VERSION: &str = "1.0";

/// Suggested file name when the shell asks where to save.
pub const EXPORT_FILE_NAME: &str = "memory-game-data.json";

/// Blob written by "save game data": the history plus stats derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDataExport {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub stats: GameStats,
    pub history: Vec<HistoryEntry>,
}

impl GameDataExport {
    pub fn new(history: Vec<HistoryEntry>, exported_at: DateTime<Utc>) -> Self {
        Self {
            version: EXPORT_VERSION.to_owned(),
            export_date: exported_at,
            stats: GameStats::from_history(&history),
            history,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Deserialize)]
struct ImportedData {
    history: Vec<HistoryEntry>,
}

/// Pulls the history out of an exported blob.
///
/// Anything with a well-formed `history` array is accepted, other fields are ignored. The list is capped like the
/// live log.
pub fn import_history(json: &str) -> Option<Vec<HistoryEntry>> {
    match serde_json::from_str::<ImportedData>(json) {
        Ok(ImportedData { mut history }) => {
            if history.len() > HISTORY_LIMIT {
                log::warn!(
                    "Imported history holds {} entries, keeping the newest {}",
                    history.len(),
                    HISTORY_LIMIT
                );
                history.truncate(HISTORY_LIMIT);
            }
            Some(history)
        }
        Err(err) => {
            log::error!("Error importing game data: {}", err);
            None
        }
    }
}
