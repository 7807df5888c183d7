use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Work,
    ShortBreak,
    LongBreak,
}

/// The four cycle constants.
///
/// Defaults follow the classic 25/5/15 pattern with a long break every
/// fourth work session. Overridable from `[durations]` in config.toml.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Durations {
    #[serde(default = "default_work_secs")]
    pub work_secs: u32,
    #[serde(default = "default_short_break_secs")]
    pub short_break_secs: u32,
    #[serde(default = "default_long_break_secs")]
    pub long_break_secs: u32,
    #[serde(default = "default_pomodoros_until_long_break")]
    pub pomodoros_until_long_break: u32,
}

fn default_work_secs() -> u32 {
    25 * 60
}
fn default_short_break_secs() -> u32 {
    5 * 60
}
fn default_long_break_secs() -> u32 {
    15 * 60
}
fn default_pomodoros_until_long_break() -> u32 {
    4
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            work_secs: default_work_secs(),
            short_break_secs: default_short_break_secs(),
            long_break_secs: default_long_break_secs(),
            pomodoros_until_long_break: default_pomodoros_until_long_break(),
        }
    }
}

impl Durations {
    /// Total seconds for a counted-down phase. `Idle` shows the upcoming
    /// work duration, matching what a reset machine displays.
    pub fn for_phase(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Idle | Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }
}

/// Countdown state owned by the state machine.
///
/// Invariants: `0 <= remaining_secs <= total_secs`; `completed_count` only
/// grows within a calendar day and counts completed work phases only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub remaining_secs: u32,
    pub total_secs: u32,
    pub running: bool,
    pub completed_count: u32,
}

impl SessionState {
    pub fn idle(durations: &Durations) -> Self {
        Self {
            phase: Phase::Idle,
            remaining_secs: durations.work_secs,
            total_secs: durations.work_secs,
            running: false,
            completed_count: 0,
        }
    }
}
