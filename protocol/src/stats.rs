use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub total_games: usize,
    pub average_flips: u32,
    pub total_flips: u64,
    /// Only rounds that tracked efficiency count towards these two.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_efficiency: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_efficiency: Option<u8>,
}

impl GameStats {
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        if history.is_empty() {
            return Self::default();
        }

        let total_games = history.len();
        let total_flips: u64 = history.iter().map(|entry| u64::from(entry.flips)).sum();
        let efficiencies: Vec<u64> = history
            .iter()
            .filter_map(|entry| entry.efficiency.map(u64::from))
            .collect();

        Self {
            total_games,
            average_flips: rounded_mean(total_flips, total_games as u64) as u32,
            total_flips,
            average_efficiency: (!efficiencies.is_empty()).then(|| {
                rounded_mean(efficiencies.iter().sum(), efficiencies.len() as u64) as u8
            }),
            best_efficiency: efficiencies.iter().max().map(|&best| best as u8),
        }
    }
}

/// Mean rounded half up, `count` must be non-zero.
fn rounded_mean(total: u64, count: u64) -> u64 {
    (total + count / 2) / count
}
