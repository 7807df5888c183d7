use focusloop_core::metrics::format_seconds;
use focusloop_core::{Event, NotificationSink, Phase};

/// Renders engine events as console lines.
pub struct ConsoleSink {
    enabled: bool,
}

impl ConsoleSink {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "idle",
        Phase::Work => "work",
        Phase::ShortBreak => "short break",
        Phase::LongBreak => "long break",
    }
}

impl NotificationSink for ConsoleSink {
    fn deliver(&self, event: &Event) {
        if !self.enabled {
            return;
        }
        match event {
            Event::SessionStarted { phase, duration_secs, .. } => {
                println!(
                    "▶ {} session started ({})",
                    phase_label(*phase),
                    format_seconds(*duration_secs)
                );
            }
            Event::SessionStopped { remaining_secs, .. } => {
                println!("⏸ stopped with {} remaining", format_seconds(*remaining_secs));
            }
            Event::SessionReset { .. } => {
                println!("↺ reset");
            }
            Event::PhaseCompleted { phase, .. } => {
                println!("\n✔ {} phase complete", phase_label(*phase));
            }
            Event::XpAwarded { amount, .. } => {
                println!("  +{amount} XP");
            }
            Event::LevelUp { new_level, .. } => {
                println!("  ⬆ level {new_level}!");
            }
            Event::BadgeAwarded { badge, .. } => {
                println!("  {} badge earned: {} ({})", badge.icon, badge.name, badge.description);
            }
            Event::StateSnapshot { .. } => {}
        }
    }
}
