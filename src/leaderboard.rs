//! Best runs, persisted as a single JSON array.

use crate::core::constants::{LEADERBOARD_CAPACITY, LEADERBOARD_FILE};
use crate::utils::persistence::{load_json_at, save_json_at, save_path};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRecord {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub total_trophies: u32,
    pub round_reached: u32,
    pub seed: u64,
}

/// Top runs by trophies, highest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    runs: Vec<RunRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a run, keeping the board sorted and capped. Ties keep the
    /// earlier entry first.
    pub fn add_run(&mut self, run: RunRecord) {
        self.runs.push(run);
        self.runs
            .sort_by(|a, b| b.total_trophies.cmp(&a.total_trophies));
        self.runs.truncate(LEADERBOARD_CAPACITY);
    }

    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Decodes a stored blob. Anything unreadable means no records.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Vec<RunRecord>>(json) {
            Ok(runs) => {
                let mut board = Self::new();
                for run in runs {
                    board.add_run(run);
                }
                board
            }
            Err(err) => {
                tracing::warn!(error = %err, "leaderboard unreadable, starting empty");
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.runs)
    }

    pub fn load() -> Self {
        match save_path(LEADERBOARD_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::new(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let mut board: Leaderboard = load_json_at(path);
        board.runs.sort_by(|a, b| b.total_trophies.cmp(&a.total_trophies));
        board.runs.truncate(LEADERBOARD_CAPACITY);
        board
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&save_path(LEADERBOARD_FILE)?)
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json_at(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(trophies: u32, round: u32, seed: u64) -> RunRecord {
        RunRecord {
            run_id: Uuid::new_v4(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            total_trophies: trophies,
            round_reached: round,
            seed,
        }
    }

    #[test]
    fn test_record_round_trip() {
        let cases = [
            record(0, 0, 0),
            record(3, 1, 1),
            record(17, 6, 42),
            record(u32::MAX, u32::MAX, u64::MAX),
        ];
        for original in cases {
            let json = serde_json::to_string(&original).unwrap();
            let back: RunRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(back, original);
        }
    }

    #[test]
    fn test_record_uses_camel_case_keys() {
        let json = serde_json::to_value(record(1, 2, 3)).unwrap();
        for key in ["runId", "timestamp", "totalTrophies", "roundReached", "seed"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_board_sorts_and_caps() {
        let mut board = Leaderboard::new();
        for trophies in 0..30 {
            board.add_run(record(trophies, 1, trophies as u64));
        }
        assert_eq!(board.len(), LEADERBOARD_CAPACITY);
        assert_eq!(board.runs()[0].total_trophies, 29);
        assert_eq!(board.runs()[LEADERBOARD_CAPACITY - 1].total_trophies, 10);
        assert!(board
            .runs()
            .windows(2)
            .all(|w| w[0].total_trophies >= w[1].total_trophies));
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        assert!(Leaderboard::from_json("not json at all").is_empty());
        assert!(Leaderboard::from_json(r#"[{"runId": 5}]"#).is_empty());
    }

    #[test]
    fn test_blob_round_trip() {
        let mut board = Leaderboard::new();
        board.add_run(record(4, 2, 9));
        board.add_run(record(8, 3, 10));
        let restored = Leaderboard::from_json(&board.to_json().unwrap());
        assert_eq!(restored, board);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir().join(format!("ascii-battles-board-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(LEADERBOARD_FILE);
        let mut board = Leaderboard::new();
        board.add_run(record(5, 4, 77));
        board.save_to(&path).unwrap();
        assert_eq!(Leaderboard::load_from(&path), board);
        std::fs::remove_dir_all(dir).ok();
    }
}
