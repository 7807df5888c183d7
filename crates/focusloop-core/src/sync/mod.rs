mod client;
mod types;

pub use client::{SyncClient, DEFAULT_TIMEOUT_SECS};
pub use types::{
    CompletionGamification, CompletionRequest, CompletionResponse, DailyActivity,
    GamificationSnapshot, MonthlyStats, ProgressSummary, SyncError, WeeklyStats, XpProgress,
};
