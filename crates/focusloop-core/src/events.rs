use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::Badge;
use crate::session::Phase;

/// Every state change in the engine produces an Event.
/// The CLI renders them; a notification sink subscribes to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        phase: Phase,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    SessionStopped {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    SessionReset {
        at: DateTime<Utc>,
    },
    /// A countdown reached zero. Carries the phase that just ended,
    /// not the one the machine advanced to.
    PhaseCompleted {
        phase: Phase,
        at: DateTime<Utc>,
    },
    /// XP granted by the remote authority for a recorded completion.
    XpAwarded {
        amount: u32,
        at: DateTime<Utc>,
    },
    /// Cached level increased after a completion was recorded.
    LevelUp {
        new_level: u32,
        at: DateTime<Utc>,
    },
    /// A badge newly issued by the remote authority.
    BadgeAwarded {
        badge: Badge,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        running: bool,
        remaining_secs: u32,
        total_secs: u32,
        completed_count: u32,
        at: DateTime<Utc>,
    },
}
