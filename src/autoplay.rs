use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// Recurring autoplay deadline.
///
/// Armed state is the presence of a deadline, so it can never be armed twice.
#[derive(Debug)]
pub struct AutoplayScheduler {
    interval: Duration,
    enabled: bool,
    deadline: Option<Instant>,
}

impl AutoplayScheduler {
    /// A disabled scheduler ignores `start`, which keeps hover-exit symmetric
    /// with carousels that were configured without autoplay.
    pub fn new(interval: Duration, enabled: bool) -> Self {
        Self {
            interval,
            enabled: enabled && !interval.is_zero(),
            deadline: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn start(&mut self, now: Instant) {
        if !self.enabled || self.deadline.is_some() {
            return;
        }
        self.deadline = Some(now + self.interval);
        trace!(interval_ms = self.interval.as_millis() as u64, "autoplay armed");
    }

    pub fn stop(&mut self) {
        if self.deadline.take().is_some() {
            trace!("autoplay disarmed");
        }
    }

    /// Count the periods that elapsed up to `now` and re-arm for the next one.
    ///
    /// Deadlines advance in whole intervals from where they were armed, so a
    /// late poll does not shift the cadence.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(deadline) = self.deadline else {
            return 0;
        };
        if now < deadline {
            return 0;
        }
        let behind = now.saturating_duration_since(deadline);
        let missed = behind.as_nanos() / self.interval.as_nanos();
        let fired = u32::try_from(missed).unwrap_or(u32::MAX - 1) + 1;
        self.deadline = Some(deadline + self.interval * fired);
        fired
    }

    /// Run `f` with the timer disarmed, then re-arm it from `now` if it had
    /// been armed before.
    pub fn suspended<R>(&mut self, now: Instant, f: impl FnOnce() -> R) -> R {
        let was_armed = self.is_armed();
        self.stop();
        let out = f();
        if was_armed {
            self.start(now);
        }
        out
    }
}
