//! Countdown session state machine.
//!
//! The machine owns the timer state and drives phase transitions. It has no
//! internal thread: the caller delivers discrete one-second pulses via
//! `tick()`, normally sourced from a [`super::clock::SessionClock`]
//! subscription. Each pulse decrements the countdown by exactly one second,
//! so tests are fully deterministic.
//!
//! ## Phase cycle
//!
//! ```text
//! Idle -> Work -> (ShortBreak | LongBreak) -> Work -> ...
//! ```
//!
//! A long break follows every Nth completed work phase (N = 4 by default);
//! breaks always return to work. After any completion the machine stays
//! stopped; the caller decides when to `start()` the next phase.

use chrono::Utc;
use tracing::{debug, warn};

use super::state::{Durations, Phase, SessionState};
use crate::events::Event;
use crate::gamification::GamificationCache;
use crate::storage::ProgressStore;
use crate::sync::SyncClient;

pub struct SessionStateMachine {
    state: SessionState,
    durations: Durations,
    store: ProgressStore,
    sync: SyncClient,
    gamification: GamificationCache,
}

impl SessionStateMachine {
    /// Create a machine, restoring today's completion count and the cached
    /// gamification values from the store.
    pub fn new(durations: Durations, store: ProgressStore, sync: SyncClient) -> Self {
        let snapshot = store.load();
        let mut state = SessionState::idle(&durations);
        state.completed_count = snapshot.completed_pomodoros;
        Self {
            state,
            durations,
            store,
            sync,
            gamification: snapshot.gamification,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.state.total_secs
    }

    pub fn completed_count(&self) -> u32 {
        self.state.completed_count
    }

    pub fn gamification(&self) -> &GamificationCache {
        &self.gamification
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase,
            running: self.state.running,
            remaining_secs: self.state.remaining_secs,
            total_secs: self.state.total_secs,
            completed_count: self.state.completed_count,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin counting down. A no-op while already running, which is what
    /// keeps at most one clock subscription alive. From `Idle` this enters
    /// the work phase; otherwise the current phase resumes where it was.
    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        if self.state.phase == Phase::Idle {
            self.state.phase = Phase::Work;
            self.state.total_secs = self.durations.work_secs;
            self.state.remaining_secs = self.state.total_secs;
        }
        self.state.running = true;
        Some(Event::SessionStarted {
            phase: self.state.phase,
            duration_secs: self.state.total_secs,
            at: Utc::now(),
        })
    }

    /// Halt the countdown without touching phase or remaining time.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        Some(Event::SessionStopped {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and return to an idle machine showing a full work countdown.
    /// The daily completion count is kept.
    pub fn reset(&mut self) -> Option<Event> {
        self.stop();
        self.state.phase = Phase::Idle;
        self.state.total_secs = self.durations.work_secs;
        self.state.remaining_secs = self.state.total_secs;
        Some(Event::SessionReset { at: Utc::now() })
    }

    /// Deliver one clock pulse. Decrements the countdown by exactly one
    /// second; when it reaches zero the completion protocol runs to the end
    /// before this call returns, so no pulse can ever interleave with an
    /// unresolved completion. A pulse on a stopped machine is dropped.
    pub async fn tick(&mut self) -> Vec<Event> {
        if !self.state.running {
            return Vec::new();
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs > 0 {
            return Vec::new();
        }
        self.complete_phase().await
    }

    /// The completion protocol. Runs with the machine already stopped;
    /// after it returns the machine holds the next phase, fully wound, and
    /// waits for the caller's `start()`.
    async fn complete_phase(&mut self) -> Vec<Event> {
        // Stop before anything else: no pulse may land mid-completion.
        self.state.running = false;
        let ended = self.state.phase;
        let mut events = vec![Event::PhaseCompleted {
            phase: ended,
            at: Utc::now(),
        }];

        if ended == Phase::Work {
            self.state.completed_count += 1;
            let focus_seconds = self.state.total_secs;

            // Sequenced: the next countdown must not start while this
            // request is unresolved. The client bounds the wait, and any
            // failure degrades to local-only bookkeeping.
            match self.sync.record_completion(focus_seconds).await {
                Ok(response) => {
                    debug!(
                        remote_count = response.progress.completed_pomodoros,
                        "completion recorded"
                    );
                    if let Some(update) = response.gamification {
                        events.extend(self.gamification.apply_completion(&update));
                    }
                }
                Err(e) => warn!("recording completion failed, keeping local count: {e}"),
            }

            if let Err(e) = self.store.save(self.state.completed_count, &self.gamification) {
                warn!("persisting progress snapshot failed: {e}");
            }

            self.state.phase = next_phase_after_work(
                self.state.completed_count,
                self.durations.pomodoros_until_long_break,
            );
        } else {
            // Both break kinds return to work unconditionally.
            self.state.phase = Phase::Work;
        }

        self.state.total_secs = self.durations.for_phase(self.state.phase);
        self.state.remaining_secs = self.state.total_secs;
        events
    }
}

/// Which break follows the `completed_count`-th work phase.
fn next_phase_after_work(completed_count: u32, every: u32) -> Phase {
    if every > 0 && completed_count % every == 0 {
        Phase::LongBreak
    } else {
        Phase::ShortBreak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;
    use url::Url;

    fn unreachable_sync() -> SyncClient {
        // Connection refused immediately; exercises the local-only path.
        SyncClient::new(Url::parse("http://127.0.0.1:1").unwrap(), 1)
    }

    fn machine_in(dir: &tempfile::TempDir, durations: Durations) -> SessionStateMachine {
        let store = ProgressStore::at_path(dir.path().join("progress.json"));
        SessionStateMachine::new(durations, store, unreachable_sync())
    }

    fn short_durations() -> Durations {
        Durations {
            work_secs: 2,
            short_break_secs: 1,
            long_break_secs: 3,
            pomodoros_until_long_break: 4,
        }
    }

    /// Tick until the running phase completes, returning its events.
    async fn run_phase(machine: &mut SessionStateMachine) -> Vec<Event> {
        machine.start();
        loop {
            let events = machine.tick().await;
            if !events.is_empty() {
                return events;
            }
        }
    }

    #[test]
    fn start_enters_work_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut machine = machine_in(&dir, Durations::default());
        assert_eq!(machine.phase(), Phase::Idle);

        assert!(machine.start().is_some());
        assert_eq!(machine.phase(), Phase::Work);
        assert_eq!(machine.total_secs(), 1500);
        assert!(machine.is_running());

        assert!(machine.start().is_none());
    }

    #[test]
    fn stop_keeps_phase_and_remaining_and_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut machine = machine_in(&dir, Durations::default());
        machine.start();

        assert!(machine.stop().is_some());
        assert!(!machine.is_running());
        assert_eq!(machine.phase(), Phase::Work);
        assert_eq!(machine.remaining_secs(), 1500);

        assert!(machine.stop().is_none());
    }

    #[test]
    fn reset_returns_to_idle_full_work_countdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut machine = machine_in(&dir, Durations::default());
        machine.start();
        machine.reset();
        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(machine.remaining_secs(), 1500);
        assert!(!machine.is_running());
    }

    #[tokio::test]
    async fn tick_decrements_by_exactly_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut machine = machine_in(&dir, Durations::default());
        machine.start();

        assert!(machine.tick().await.is_empty());
        assert_eq!(machine.remaining_secs(), 1499);
        assert!(machine.tick().await.is_empty());
        assert_eq!(machine.remaining_secs(), 1498);
    }

    #[tokio::test]
    async fn tick_on_stopped_machine_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let mut machine = machine_in(&dir, Durations::default());
        machine.start();
        machine.stop();

        assert!(machine.tick().await.is_empty());
        assert_eq!(machine.remaining_secs(), 1500);
    }

    #[tokio::test]
    async fn work_completion_survives_unreachable_remote() {
        let dir = tempfile::tempdir().unwrap();
        let mut machine = machine_in(&dir, short_durations());

        let events = run_phase(&mut machine).await;
        assert!(matches!(
            events[0],
            Event::PhaseCompleted { phase: Phase::Work, .. }
        ));
        assert_eq!(machine.completed_count(), 1);
        assert_eq!(machine.phase(), Phase::ShortBreak);
        assert_eq!(machine.total_secs(), 1);
        assert_eq!(machine.remaining_secs(), 1);
        assert!(!machine.is_running());
    }

    #[tokio::test]
    async fn stalled_remote_times_out_and_still_advances() {
        // Accepts the connection but never responds; the bounded wait in
        // the sync client must cut the completion protocol loose.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let mut held = Vec::new();
            for stream in listener.incoming().flatten() {
                held.push(stream);
            }
        });

        let dir = tempfile::tempdir().unwrap();
        let store = ProgressStore::at_path(dir.path().join("progress.json"));
        let sync = SyncClient::new(Url::parse(&format!("http://{addr}")).unwrap(), 1);
        let mut machine = SessionStateMachine::new(short_durations(), store, sync);

        let events = run_phase(&mut machine).await;
        assert!(matches!(
            events[0],
            Event::PhaseCompleted { phase: Phase::Work, .. }
        ));
        assert_eq!(events.len(), 1); // no gamification events on timeout
        assert_eq!(machine.completed_count(), 1);
        assert_eq!(machine.phase(), Phase::ShortBreak);
        assert!(!machine.is_running());

        // The local snapshot recorded the completion despite the stall.
        let reloaded = ProgressStore::at_path(dir.path().join("progress.json")).load();
        assert_eq!(reloaded.completed_pomodoros, 1);
    }

    #[tokio::test]
    async fn break_completion_returns_to_work() {
        let dir = tempfile::tempdir().unwrap();
        let mut machine = machine_in(&dir, short_durations());

        run_phase(&mut machine).await; // work -> short break
        let events = run_phase(&mut machine).await;
        assert!(matches!(
            events[0],
            Event::PhaseCompleted { phase: Phase::ShortBreak, .. }
        ));
        assert_eq!(machine.phase(), Phase::Work);
        assert_eq!(machine.total_secs(), 2);
        assert_eq!(machine.completed_count(), 1);
    }

    #[tokio::test]
    async fn fourth_completion_earns_the_long_break() {
        let dir = tempfile::tempdir().unwrap();
        let mut machine = machine_in(&dir, short_durations());

        for n in 1..=4u32 {
            run_phase(&mut machine).await; // work phase
            assert_eq!(machine.completed_count(), n);
            if n == 4 {
                assert_eq!(machine.phase(), Phase::LongBreak);
                assert_eq!(machine.total_secs(), 3);
            } else {
                assert_eq!(machine.phase(), Phase::ShortBreak);
                run_phase(&mut machine).await; // break phase
            }
        }
    }

    #[tokio::test]
    async fn completion_count_restored_from_todays_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut machine = machine_in(&dir, short_durations());
            run_phase(&mut machine).await;
            assert_eq!(machine.completed_count(), 1);
        }
        let machine = machine_in(&dir, short_durations());
        assert_eq!(machine.completed_count(), 1);
    }

    proptest! {
        #[test]
        fn long_break_exactly_every_fourth(n in 1u32..200) {
            let expected = if n % 4 == 0 { Phase::LongBreak } else { Phase::ShortBreak };
            prop_assert_eq!(next_phase_after_work(n, 4), expected);
        }

        #[test]
        fn remaining_decreases_by_exactly_one_per_tick(n in 1u32..1500) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            let result: Result<(), TestCaseError> = rt.block_on(async {
                let dir = tempfile::tempdir().unwrap();
                let mut machine = machine_in(&dir, Durations::default());
                machine.start();
                let mut prev = machine.remaining_secs();
                for _ in 0..n {
                    let events = machine.tick().await;
                    prop_assert!(events.is_empty());
                    let now = machine.remaining_secs();
                    prop_assert_eq!(now, prev - 1);
                    prev = now;
                }
                // Never observed below zero before the completion fires.
                prop_assert!(machine.remaining_secs() >= 1);
                Ok(())
            });
            result?;
        }
    }
}
