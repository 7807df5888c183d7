use focusloop_core::storage::ProgressStore;
use focusloop_core::Config;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = ProgressStore::open_default()?;

    match super::sync_client(&config)?.fetch_gamification().await {
        Ok(snapshot) => {
            println!("level {} ({} XP total)", snapshot.level, snapshot.total_xp);
            println!(
                "  {}/{} XP to next level ({:.0}%)",
                snapshot.xp_progress.xp_in_current_level,
                snapshot.xp_progress.xp_needed_for_next,
                snapshot.xp_progress.progress_percent
            );
            println!("  streak: {} days", snapshot.streak_days);
            if !snapshot.badges.is_empty() {
                println!("badges");
                for badge in &snapshot.badges {
                    println!("  {} {}: {}", badge.icon, badge.name, badge.description);
                }
            }
            println!(
                "this week: {} sessions, avg {:.0} focus min/day",
                snapshot.weekly_stats.total_pomodoros,
                snapshot.weekly_stats.avg_focus_minutes_per_day
            );

            // Refresh the local cache so offline runs show current values.
            let local = store.load();
            let mut cache = local.gamification;
            cache.merge_snapshot(&snapshot);
            store.save(local.completed_pomodoros, &cache)?;
        }
        Err(e) => {
            eprintln!("warning: remote gamification unavailable: {e}");
            // Fall back to the last-known cached values.
            let cached = store.load().gamification;
            println!("cached: level {} ({} XP total)", cached.level, cached.total_xp);
            println!("  streak: {} days", cached.streak_days);
            println!("  badges: {}", cached.badges.len());
        }
    }
    Ok(())
}
