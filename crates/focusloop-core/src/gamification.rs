//! Client-side cache of the remote gamification record.
//!
//! The remote authority owns all scoring: XP curve, level thresholds,
//! streak arithmetic and badge rules. This cache only mirrors what the
//! server last returned and derives notification events from the delta.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::sync::{CompletionGamification, GamificationSnapshot};

/// A badge as issued by the remote authority. Immutable once issued;
/// locally the badge sequence is append-only and never reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub icon: String,
    pub name: String,
    pub description: String,
}

/// Last-known gamification values, persisted alongside the daily snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamificationCache {
    pub level: u32,
    pub total_xp: u32,
    pub streak_days: u32,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl GamificationCache {
    /// Fold a successful completion response into the cache and derive the
    /// events a notification sink should render, in the fixed order
    /// XP award, then level-up, then one event per new badge.
    ///
    /// `total_xp` and `streak_days` are replaced unconditionally; the
    /// remote is authoritative for both. A level-up is detected by
    /// comparing against the previously cached level.
    pub fn apply_completion(&mut self, update: &CompletionGamification) -> Vec<Event> {
        let at = Utc::now();
        let mut events = vec![Event::XpAwarded {
            amount: update.xp_earned,
            at,
        }];

        if update.level > self.level && self.level > 0 {
            events.push(Event::LevelUp {
                new_level: update.level,
                at,
            });
        }
        self.level = update.level;
        self.total_xp = update.total_xp;
        self.streak_days = update.streak_days;

        for badge in &update.new_badges {
            self.badges.push(badge.clone());
            events.push(Event::BadgeAwarded {
                badge: badge.clone(),
                at,
            });
        }
        events
    }

    /// Overwrite the cache from a full gamification fetch. No events are
    /// derived here; fetches refresh display state, they do not announce.
    pub fn merge_snapshot(&mut self, snapshot: &GamificationSnapshot) {
        self.level = snapshot.level;
        self.total_xp = snapshot.total_xp;
        self.streak_days = snapshot.streak_days;
        self.badges = snapshot.badges.clone();
    }
}
