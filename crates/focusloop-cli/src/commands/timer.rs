use std::io::Write;

use clap::Subcommand;
use focusloop_core::metrics::{band_for_phase, format_seconds};
use focusloop_core::{Event, NotificationSink, Phase, SessionClock};

use crate::sink::ConsoleSink;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run countdown sessions in the foreground until N work phases finish
    Run {
        /// Number of work sessions to complete before exiting
        #[arg(long, default_value = "1")]
        sessions: u32,
    },
    /// Print the current timer state as JSON
    Status,
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { sessions } => run_sessions(sessions).await,
        TimerAction::Status => {
            let (machine, _config) = super::build_machine()?;
            println!("{}", serde_json::to_string_pretty(&machine.snapshot())?);
            Ok(())
        }
    }
}

async fn run_sessions(sessions: u32) -> Result<(), Box<dyn std::error::Error>> {
    let (mut machine, config) = super::build_machine()?;
    let sink = ConsoleSink::new(config.notifications.enabled);
    let clock = SessionClock::default();

    let mut completed_work = 0u32;
    while completed_work < sessions {
        // The machine stays stopped after every completion; this loop is
        // the caller that starts the next phase.
        if let Some(event) = machine.start() {
            sink.deliver(&event);
        }

        let mut subscription = clock.subscribe();
        while machine.is_running() {
            subscription.pulse().await;
            let events = machine.tick().await;
            draw_countdown(&machine);
            for event in &events {
                if let Event::PhaseCompleted { phase: Phase::Work, .. } = event {
                    completed_work += 1;
                }
                sink.deliver(event);
            }
        }
    }
    Ok(())
}

fn draw_countdown(machine: &focusloop_core::SessionStateMachine) {
    let band = band_for_phase(machine.phase(), machine.remaining_secs(), machine.total_secs());
    print!(
        "\r{} {:?} ",
        format_seconds(machine.remaining_secs()),
        band
    );
    let _ = std::io::stdout().flush();
}
