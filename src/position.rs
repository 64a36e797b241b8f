use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, trace};

use crate::events::{Direction, ViewUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Resting,
    Transitioning,
}

/// Snapshot of the frame position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselState {
    pub index: usize,
    pub offset_slots: usize,
    pub animating: bool,
}

/// Work left over from the last move, due when its animation finishes.
#[derive(Debug, Clone, Copy)]
struct Settle {
    due: Instant,
    /// Resting offset to jump to without animation after a wrap.
    snap_to: Option<usize>,
}

/// Wrap-aware position state machine over a padded slide sequence.
///
/// Offsets are expressed in slide-widths shifted left from the origin of the
/// padded sequence. At rest the frame sits on `index + 1`. A move across the
/// end of the sequence first animates onto the padding copy and is then
/// snapped back onto the canonical slide once the transition has finished.
#[derive(Debug)]
pub struct PositionMachine {
    image_count: usize,
    transition: Duration,
    state: CarouselState,
    settle: Option<Settle>,
}

impl PositionMachine {
    pub fn new(image_count: usize, transition: Duration) -> Self {
        Self {
            image_count,
            transition,
            state: CarouselState {
                index: 0,
                offset_slots: 1,
                animating: false,
            },
            settle: None,
        }
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn offset_slots(&self) -> usize {
        self.state.offset_slots
    }

    pub fn is_animating(&self) -> bool {
        self.state.animating
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        if self.state.animating {
            Phase::Transitioning
        } else {
            Phase::Resting
        }
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn transition_duration(&self) -> Duration {
        self.transition
    }

    /// When the in-flight transition finishes, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.settle.map(|s| s.due)
    }

    /// Whether a wrap snap is still waiting for its transition to finish.
    pub fn has_pending_snap(&self) -> bool {
        self.settle.is_some_and(|s| s.snap_to.is_some())
    }

    /// Move one slide in `direction`.
    ///
    /// Returns the updates to apply in order: a snap left over from an
    /// unfinished wrap (if any) followed by the animated move itself.
    pub fn advance(&mut self, direction: Direction, now: Instant) -> Vec<ViewUpdate> {
        let n = self.image_count;
        if n <= 1 {
            return Vec::new();
        }

        let mut updates = Vec::with_capacity(2);
        // A stale snap must never land after the frame has moved on.
        if let Some(snap) = self.take_pending_snap() {
            updates.push(snap);
        }

        let from = self.state.index;
        debug_assert_eq!(self.state.offset_slots, from + 1);
        let (index, offset_slots, wrapped) = match direction {
            Direction::Forward => ((from + 1) % n, self.state.offset_slots + 1, from == n - 1),
            Direction::Backward => ((from + n - 1) % n, self.state.offset_slots - 1, from == 0),
        };

        self.state = CarouselState {
            index,
            offset_slots,
            animating: true,
        };
        self.settle = Some(Settle {
            due: now + self.transition,
            snap_to: wrapped.then_some(index + 1),
        });
        debug!(from, to = index, offset_slots, wrapped, ?direction, "advance");

        updates.push(self.update(true));
        updates
    }

    /// Animate directly to `target`. Out-of-range targets are ignored.
    pub fn jump_to(&mut self, target: usize, now: Instant) -> Option<ViewUpdate> {
        if self.image_count <= 1 {
            return None;
        }
        if target >= self.image_count {
            debug!(target, count = self.image_count, "ignoring out-of-range jump");
            return None;
        }

        if self.has_pending_snap() {
            trace!("jump supersedes pending snap");
        }
        self.state = CarouselState {
            index: target,
            offset_slots: target + 1,
            animating: true,
        };
        self.settle = Some(Settle {
            due: now + self.transition,
            snap_to: None,
        });
        debug!(to = target, "jump");
        Some(self.update(true))
    }

    /// Finish the in-flight transition once it is due.
    ///
    /// Yields an unanimated update only when a wrap snap repositions the
    /// frame; a plain move just returns to rest.
    pub fn tick(&mut self, now: Instant) -> Option<ViewUpdate> {
        let settle = self.settle?;
        if now < settle.due {
            return None;
        }
        self.settle = None;
        self.state.animating = false;
        let offset_slots = settle.snap_to?;
        self.state.offset_slots = offset_slots;
        trace!(index = self.state.index, offset_slots, "snap");
        Some(self.update(false))
    }

    /// Drop deferred work without notifying anyone.
    ///
    /// The state still lands on its resting offset so the machine stays
    /// usable after a teardown.
    pub fn cancel_pending(&mut self) {
        if let Some(offset_slots) = self.settle.take().and_then(|s| s.snap_to) {
            self.state.offset_slots = offset_slots;
        }
        self.state.animating = false;
    }

    fn take_pending_snap(&mut self) -> Option<ViewUpdate> {
        let offset_slots = self.settle.take()?.snap_to?;
        self.state.offset_slots = offset_slots;
        self.state.animating = false;
        trace!(index = self.state.index, offset_slots, "settling early snap");
        Some(self.update(false))
    }

    fn update(&self, animated: bool) -> ViewUpdate {
        ViewUpdate {
            index: self.state.index,
            offset_slots: self.state.offset_slots,
            animated,
        }
    }
}
