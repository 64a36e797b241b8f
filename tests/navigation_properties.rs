use std::time::Duration;

use light_swiper::events::Direction;
use light_swiper::position::{CarouselState, PositionMachine};
use light_swiper::sequence::{SlideItem, SlideSequence};
use light_swiper::throttle::Throttle;
use tokio::time::Instant;

const D: Duration = Duration::from_millis(1000);

fn sequence(n: usize) -> SlideSequence {
    let images: Vec<SlideItem> = (0..n).map(|i| SlideItem::new(format!("{i}"))).collect();
    SlideSequence::build(&images)
}

#[test]
fn forward_advances_track_index_modulo_n() {
    let t0 = Instant::now();
    for n in 2..=7 {
        let mut sm = PositionMachine::new(n, D);
        for k in 1..=(3 * n + 2) {
            let now = t0 + D * (k as u32) * 2;
            sm.advance(Direction::Forward, now);
            sm.tick(now + D);
            assert_eq!(sm.index(), k % n, "n={n} k={k}");
            assert_eq!(sm.offset_slots(), sm.index() + 1, "n={n} k={k}");
            assert!(!sm.is_animating());
        }
    }
}

#[test]
fn rapid_moves_never_leave_the_padded_strip() {
    let t0 = Instant::now();
    let pattern = [
        Direction::Forward,
        Direction::Forward,
        Direction::Backward,
        Direction::Forward,
        Direction::Backward,
        Direction::Backward,
        Direction::Backward,
    ];
    for n in 2..=5 {
        let seq = sequence(n);
        let mut sm = PositionMachine::new(n, D);
        let mut expected = 0usize;
        for (step, direction) in pattern.iter().cycle().take(40).enumerate() {
            // Far quicker than the transition, so snaps are always pending.
            let now = t0 + Duration::from_millis(10) * step as u32;
            for update in sm.advance(*direction, now) {
                assert!(update.offset_slots < seq.len(), "n={n} step={step}");
            }
            expected = match direction {
                Direction::Forward => (expected + 1) % n,
                Direction::Backward => (expected + n - 1) % n,
            };
            assert_eq!(sm.index(), expected);
            // Whatever the frame shows is the image for the logical index.
            let shown = seq.get(sm.offset_slots()).unwrap();
            assert_eq!(shown.url, expected.to_string());
        }
        sm.tick(t0 + D * 10);
        assert_eq!(sm.offset_slots(), sm.index() + 1);
    }
}

#[test]
fn forward_wrap_lands_on_trailing_padding_then_rests_on_first() {
    let t0 = Instant::now();
    for n in 2..=6 {
        let seq = sequence(n);
        let mut sm = PositionMachine::new(n, D);
        sm.jump_to(n - 1, t0);
        sm.tick(t0 + D);
        let rest = sm.offset_slots();

        let t1 = t0 + D * 2;
        let updates = sm.advance(Direction::Forward, t1);
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].offset_slots, rest + 1, "single-slide animated move");
        assert!(updates[0].animated);
        assert_eq!(seq.get(updates[0].offset_slots).unwrap().url, "0");

        let snap = sm.tick(t1 + D).expect("snap");
        assert!(!snap.animated);
        assert_eq!(
            sm.state(),
            CarouselState {
                index: 0,
                offset_slots: 1,
                animating: false
            }
        );
        // Pixel-identical: the padding copy and the canonical slide match.
        assert_eq!(seq.get(updates[0].offset_slots), seq.get(snap.offset_slots));
    }
}

#[test]
fn backward_wrap_lands_on_leading_padding_then_rests_on_last() {
    let t0 = Instant::now();
    for n in 2..=6 {
        let seq = sequence(n);
        let mut sm = PositionMachine::new(n, D);
        let updates = sm.advance(Direction::Backward, t0);
        assert_eq!(updates[0].offset_slots, 0);
        let snap = sm.tick(t0 + D).expect("snap");
        assert_eq!(snap.offset_slots, n);
        assert_eq!(sm.index(), n - 1);
        assert_eq!(seq.get(0), seq.get(n));
    }
}

#[test]
fn degenerate_carousels_ignore_navigation() {
    let t0 = Instant::now();
    for n in [0, 1] {
        let mut sm = PositionMachine::new(n, D);
        let before = sm.state();
        assert!(sm.advance(Direction::Forward, t0).is_empty());
        assert!(sm.advance(Direction::Backward, t0).is_empty());
        assert!(sm.jump_to(0, t0).is_none());
        assert!(sm.tick(t0 + D).is_none());
        assert_eq!(sm.state(), before);
        assert_eq!(before.index, 0);
        assert_eq!(before.offset_slots, 1);
    }
}

#[test]
fn throttle_runs_once_per_window() {
    let t0 = Instant::now();
    for m in 1..20u32 {
        let mut throttle = Throttle::new(D);
        let mut runs = 0;
        for i in 0..m {
            throttle.try_run(t0 + D * i / (m + 1), || runs += 1);
        }
        assert_eq!(runs, 1, "m={m}");
    }
}
