use tokio::time::Instant;
use tracing::{debug, info};

use crate::autoplay::AutoplayScheduler;
use crate::config::CarouselConfiguration;
use crate::events::{CarouselCommand, Direction, ViewUpdate};
use crate::position::{CarouselState, PositionMachine};
use crate::sequence::SlideSequence;
use crate::throttle::Throttle;

/// A carousel instance: position state, autoplay and the arrow throttle.
///
/// Every externally triggered navigation disarms autoplay, mutates the
/// position and re-arms autoplay afterwards, so an automatic advance can
/// never overlap a manual one.
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfiguration,
    sequence: SlideSequence,
    position: PositionMachine,
    autoplay: AutoplayScheduler,
    throttle: Throttle,
    hovered: bool,
}

impl Carousel {
    pub fn new(config: CarouselConfiguration) -> Self {
        let sequence = SlideSequence::build(&config.images);
        let n = sequence.image_count();
        let duration = config.transition_duration;
        Self {
            position: PositionMachine::new(n, duration),
            // An empty carousel is a static shell and never schedules anything.
            autoplay: AutoplayScheduler::new(config.interval, config.autoplay && n > 0),
            throttle: Throttle::new(duration),
            sequence,
            config,
            hovered: false,
        }
    }

    pub fn config(&self) -> &CarouselConfiguration {
        &self.config
    }

    pub fn sequence(&self) -> &SlideSequence {
        &self.sequence
    }

    pub fn state(&self) -> CarouselState {
        self.position.state()
    }

    pub fn is_autoplay_armed(&self) -> bool {
        self.autoplay.is_armed()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Lifecycle start: arms autoplay if it is configured.
    pub fn start(&mut self, now: Instant) {
        info!(
            images = self.sequence.image_count(),
            slides = self.sequence.len(),
            autoplay = self.autoplay.is_enabled(),
            "carousel started"
        );
        self.autoplay.start(now);
    }

    pub fn handle(&mut self, command: CarouselCommand, now: Instant) -> Vec<ViewUpdate> {
        match command {
            CarouselCommand::Next => self.next(now),
            CarouselCommand::Prev => self.prev(now),
            CarouselCommand::JumpTo(index) => self.jump_to(index, now),
            CarouselCommand::HoverEnter => {
                self.hover_enter();
                Vec::new()
            }
            CarouselCommand::HoverExit => {
                self.hover_exit(now);
                Vec::new()
            }
        }
    }

    /// Right arrow.
    pub fn next(&mut self, now: Instant) -> Vec<ViewUpdate> {
        self.arrow(Direction::Forward, now)
    }

    /// Left arrow.
    pub fn prev(&mut self, now: Instant) -> Vec<ViewUpdate> {
        self.arrow(Direction::Backward, now)
    }

    /// Dot click.
    pub fn jump_to(&mut self, index: usize, now: Instant) -> Vec<ViewUpdate> {
        let Self {
            position,
            autoplay,
            throttle,
            config,
            ..
        } = self;
        let mut jump = || {
            autoplay
                .suspended(now, || position.jump_to(index, now))
                .into_iter()
                .collect::<Vec<_>>()
        };
        if config.throttle_dots {
            throttle.try_run(now, jump).unwrap_or_default()
        } else {
            jump()
        }
    }

    pub fn hover_enter(&mut self) {
        self.hovered = true;
        if self.config.stop_on_hover {
            debug!("hover: autoplay suspended");
            self.autoplay.stop();
        }
    }

    pub fn hover_exit(&mut self, now: Instant) {
        self.hovered = false;
        if self.config.stop_on_hover {
            debug!("hover ended: autoplay resumed");
            self.autoplay.start(now);
        }
    }

    /// Apply deferred work that is due: finished transitions and autoplay.
    pub fn tick(&mut self, now: Instant) -> Vec<ViewUpdate> {
        let mut updates: Vec<ViewUpdate> = self.position.tick(now).into_iter().collect();
        for _ in 0..self.autoplay.poll(now) {
            updates.extend(self.position.advance(Direction::Forward, now));
        }
        updates
    }

    /// Earliest instant at which `tick` has something to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.position.next_deadline(), self.autoplay.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Cancel every timer this carousel owns.
    pub fn teardown(&mut self) {
        self.autoplay.stop();
        self.throttle.cancel();
        self.position.cancel_pending();
        debug!("carousel torn down");
    }

    fn arrow(&mut self, direction: Direction, now: Instant) -> Vec<ViewUpdate> {
        let Self {
            position,
            autoplay,
            throttle,
            ..
        } = self;
        throttle
            .try_run(now, || {
                autoplay.suspended(now, || position.advance(direction, now))
            })
            .unwrap_or_default()
    }
}
