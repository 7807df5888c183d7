//! Date-scoped local progress cache.
//!
//! One JSON blob holds the current calendar day's completion count plus the
//! last-known gamification values. The counter is daily: a snapshot from an
//! earlier day is loaded with its count treated as zero, while the
//! gamification cache carries over (XP and badges never reset server-side).
//! The stale blob is overwritten on the next save, never deleted eagerly.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::data_dir;
use crate::error::StoreError;
use crate::gamification::GamificationCache;

/// Persisted shape. Field names match the legacy browser-storage blob so a
/// snapshot written by either client round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub date: NaiveDate,
    pub completed_pomodoros: u32,
    #[serde(default)]
    pub gamification: GamificationCache,
}

/// Loads and saves the daily snapshot. The calendar day is read from the
/// local wall clock at each load/save; tests inject a fixed provider.
pub struct ProgressStore {
    path: PathBuf,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl ProgressStore {
    /// Store under the default data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::Open {
            message: e.to_string(),
        })?;
        Ok(Self::at_path(dir.join("progress.json")))
    }

    pub fn at_path(path: PathBuf) -> Self {
        Self {
            path,
            today: local_today,
        }
    }

    pub fn with_date_provider(path: PathBuf, today: fn() -> NaiveDate) -> Self {
        Self { path, today }
    }

    fn today(&self) -> NaiveDate {
        (self.today)()
    }

    /// Read the persisted snapshot, normalized to the current day.
    ///
    /// An absent file yields a fresh snapshot. A malformed blob is logged
    /// and replaced by a fresh snapshot rather than aborting the load. A
    /// snapshot dated on an earlier day keeps its gamification cache but
    /// has its completion count treated as zero.
    pub fn load(&self) -> ProgressSnapshot {
        let today = self.today();
        let fresh = ProgressSnapshot {
            date: today,
            completed_pomodoros: 0,
            gamification: GamificationCache::default(),
        };

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return fresh,
        };

        let stored: ProgressSnapshot = match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(path = %self.path.display(), "corrupt progress snapshot, starting fresh: {e}");
                return fresh;
            }
        };

        if stored.date == today {
            stored
        } else {
            ProgressSnapshot {
                date: today,
                completed_pomodoros: 0,
                gamification: stored.gamification,
            }
        }
    }

    /// Overwrite the persisted blob with the current day and state.
    pub fn save(
        &self,
        completed_pomodoros: u32,
        gamification: &GamificationCache,
    ) -> Result<(), StoreError> {
        let snapshot = ProgressSnapshot {
            date: self.today(),
            completed_pomodoros,
            gamification: gamification.clone(),
        };
        let content = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(&self.path, content).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}
