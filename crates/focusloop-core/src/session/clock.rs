//! One-second pulse source.
//!
//! The machine itself never owns a timer task; whoever drives it takes a
//! subscription and forwards each pulse to `tick()`. Dropping the
//! subscription cancels the stream, so a stopped machine can never receive
//! a stray pulse from a leaked timer.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

#[derive(Debug, Clone)]
pub struct SessionClock {
    period: Duration,
}

impl Default for SessionClock {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(1),
        }
    }
}

impl SessionClock {
    /// Clock with a non-standard period, for tests and demos.
    pub fn with_period(period: Duration) -> Self {
        Self { period }
    }

    /// Take a pulse subscription. The first pulse fires one full period
    /// after subscription, not immediately.
    pub fn subscribe(&self) -> ClockSubscription {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ClockSubscription { interval }
    }
}

/// A live pulse stream. Drop to unsubscribe.
pub struct ClockSubscription {
    interval: Interval,
}

impl ClockSubscription {
    /// Wait for the next pulse.
    pub async fn pulse(&mut self) {
        self.interval.tick().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn pulses_arrive_at_one_second_spacing() {
        let clock = SessionClock::default();
        let mut sub = clock.subscribe();

        let before = Instant::now();
        sub.pulse().await;
        sub.pulse().await;
        sub.pulse().await;
        assert_eq!((Instant::now() - before).as_secs(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn first_pulse_is_not_immediate() {
        let clock = SessionClock::default();
        let mut sub = clock.subscribe();

        let before = Instant::now();
        sub.pulse().await;
        assert!(Instant::now() - before >= Duration::from_secs(1));
    }
}
