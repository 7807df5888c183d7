//! Wire types for the remote progress/gamification authority.
//!
//! Field names match the HTTP JSON contract exactly; everything here is a
//! read-only mirror of server-computed values.

use serde::{Deserialize, Serialize};

use crate::gamification::Badge;

/// Body for `POST /api/progress/complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub focus_seconds: u32,
}

/// Aggregate completion totals owned by the remote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub completed_pomodoros: u32,
    pub total_focus_time: f64,
}

/// Gamification delta attached to a recorded completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionGamification {
    pub xp_earned: u32,
    pub total_xp: u32,
    pub level: u32,
    pub streak_days: u32,
    #[serde(default)]
    pub new_badges: Vec<Badge>,
}

/// Response of `POST /api/progress/complete`. The gamification field is
/// optional: older servers report progress only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub progress: ProgressSummary,
    #[serde(default)]
    pub gamification: Option<CompletionGamification>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpProgress {
    pub xp_in_current_level: u32,
    pub xp_needed_for_next: u32,
    pub progress_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyActivity {
    pub day_name: String,
    pub completed_pomodoros: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyStats {
    #[serde(default)]
    pub daily_data: Vec<DailyActivity>,
    pub total_pomodoros: u32,
    pub avg_focus_minutes_per_day: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub total_pomodoros: u32,
    pub total_focus_minutes: u32,
    pub active_days: u32,
    pub completion_rate: f64,
}

/// Response of `GET /api/gamification`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamificationSnapshot {
    pub level: u32,
    pub total_xp: u32,
    pub xp_progress: XpProgress,
    pub streak_days: u32,
    #[serde(default)]
    pub badges: Vec<Badge>,
    pub weekly_stats: WeeklyStats,
    pub monthly_stats: MonthlyStats,
}

/// Sync failure taxonomy. Callers pattern-match; nothing here is ever
/// allowed to escape the completion protocol.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server returned HTTP {status}")]
    Http { status: u16 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Remote did not respond within {secs}s")]
    Timeout { secs: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_response_without_gamification_parses() {
        let json = r#"{"progress": {"completed_pomodoros": 3, "total_focus_time": 4500.0}}"#;
        let resp: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.progress.completed_pomodoros, 3);
        assert!(resp.gamification.is_none());
    }

    #[test]
    fn gamification_snapshot_parses_contract_fields() {
        let json = r#"{
            "level": 3,
            "total_xp": 450,
            "xp_progress": {"xp_in_current_level": 200, "xp_needed_for_next": 250, "progress_percent": 80.0},
            "streak_days": 5,
            "badges": [{"icon": "🎯", "name": "First Step", "description": "First completion"}],
            "weekly_stats": {"daily_data": [{"day_name": "Mon", "completed_pomodoros": 4}], "total_pomodoros": 12, "avg_focus_minutes_per_day": 75.5},
            "monthly_stats": {"total_pomodoros": 40, "total_focus_minutes": 1000, "active_days": 10, "completion_rate": 66.7}
        }"#;
        let snap: GamificationSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.level, 3);
        assert_eq!(snap.badges.len(), 1);
        assert_eq!(snap.weekly_stats.daily_data[0].day_name, "Mon");
    }
}
