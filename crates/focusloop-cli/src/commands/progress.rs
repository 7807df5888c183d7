use focusloop_core::metrics::format_duration;
use focusloop_core::storage::ProgressStore;
use focusloop_core::Config;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let snapshot = ProgressStore::open_default()?.load();

    println!("today ({})", snapshot.date);
    println!("  completed: {}", snapshot.completed_pomodoros);
    println!(
        "  focus time: {}",
        format_duration(snapshot.completed_pomodoros * config.durations.work_secs)
    );

    // Remote totals are best-effort display data.
    match super::sync_client(&config)?.fetch_progress().await {
        Ok(remote) => {
            println!("remote");
            println!("  completed: {}", remote.completed_pomodoros);
            println!("  focus time: {}", format_duration(remote.total_focus_time as u32));
        }
        Err(e) => eprintln!("warning: remote progress unavailable: {e}"),
    }
    Ok(())
}
