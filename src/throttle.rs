use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

/// One-shot rate limiter for manual navigation.
///
/// The window matches the transition duration so a second click cannot
/// start before the first slide has finished moving.
#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    open_until: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            open_until: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_open(&self, now: Instant) -> bool {
        self.open_until.is_some_and(|until| now < until)
    }

    /// Run `action` unless a window is open; running it opens a new window.
    pub fn try_run<R>(&mut self, now: Instant, action: impl FnOnce() -> R) -> Option<R> {
        if self.is_open(now) {
            trace!("throttled");
            return None;
        }
        self.open_until = Some(now + self.window);
        Some(action())
    }

    pub fn cancel(&mut self) {
        self.open_until = None;
    }
}
