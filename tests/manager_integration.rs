use std::time::Duration;

use light_swiper::Carousel;
use light_swiper::config::{Configuration, Viewport};
use light_swiper::events::{CarouselCommand, ViewUpdate};
use light_swiper::sequence::SlideItem;
use light_swiper::tasks::{manager, viewer};
use light_swiper::view::ViewModel;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

fn config(n: usize, tweak: impl FnOnce(&mut Configuration)) -> light_swiper::config::CarouselConfiguration {
    let mut cfg = Configuration {
        interval: Duration::from_millis(5000),
        duration: Duration::from_millis(1000),
        ..Configuration::default()
    };
    tweak(&mut cfg);
    let images = (0..n).map(|i| SlideItem::new(format!("/{i}.jpg"))).collect();
    cfg.resolve(
        images,
        Some(Viewport {
            width: 100,
            height: 50,
        }),
    )
    .expect("valid configuration")
}

fn drain(rx: &mut mpsc::Receiver<ViewUpdate>) -> Vec<ViewUpdate> {
    let mut out = Vec::new();
    while let Ok(update) = rx.try_recv() {
        out.push(update);
    }
    out
}

fn animated(updates: &[ViewUpdate]) -> usize {
    updates.iter().filter(|u| u.animated).count()
}

#[tokio::test(start_paused = true)]
async fn autoplay_advances_once_per_interval() {
    let carousel = Carousel::new(config(3, |_| {}));
    let (_cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(8);
    let (view_tx, mut view_rx) = mpsc::channel::<ViewUpdate>(64);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(manager::run(carousel, cmd_rx, view_tx, cancel.clone()));

    sleep(Duration::from_millis(22_500)).await;
    cancel.cancel();
    let carousel = handle.await.unwrap().unwrap();

    let updates = drain(&mut view_rx);
    assert_eq!(animated(&updates), 4, "floor(22.5s / 5s) advances");
    let indices: Vec<usize> = updates
        .iter()
        .filter(|u| u.animated)
        .map(|u| u.index)
        .collect();
    assert_eq!(indices, vec![1, 2, 0, 1]);

    // The wrap onto the trailing padding was followed by exactly one snap.
    let snaps: Vec<&ViewUpdate> = updates.iter().filter(|u| !u.animated).collect();
    assert_eq!(snaps.len(), 1);
    assert_eq!(snaps[0].offset_slots, 1);

    assert_eq!(carousel.state().index, 1);
    assert!(!carousel.is_autoplay_armed());
    assert!(carousel.next_deadline().is_none());
}

#[tokio::test(start_paused = true)]
async fn hover_suspends_autoplay_until_exit() {
    let carousel = Carousel::new(config(3, |_| {}));
    let (cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(8);
    let (view_tx, mut view_rx) = mpsc::channel::<ViewUpdate>(64);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(manager::run(carousel, cmd_rx, view_tx, cancel.clone()));

    sleep(Duration::from_millis(1000)).await;
    cmd_tx.send(CarouselCommand::HoverEnter).await.unwrap();
    sleep(Duration::from_millis(12_000)).await;
    assert!(drain(&mut view_rx).is_empty(), "no advances while hovered");

    cmd_tx.send(CarouselCommand::HoverExit).await.unwrap();
    sleep(Duration::from_millis(5500)).await;
    let updates = drain(&mut view_rx);
    assert_eq!(animated(&updates), 1, "autoplay resumes after hover exit");
    assert_eq!(updates[0].index, 1);

    cancel.cancel();
    let _ = handle.await;
}

#[tokio::test(start_paused = true)]
async fn arrow_bursts_are_throttled() {
    let carousel = Carousel::new(config(4, |cfg| cfg.autoplay = false));
    let (cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(8);
    let (view_tx, mut view_rx) = mpsc::channel::<ViewUpdate>(64);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(manager::run(carousel, cmd_rx, view_tx, cancel.clone()));

    for _ in 0..5 {
        cmd_tx.send(CarouselCommand::Next).await.unwrap();
    }
    sleep(Duration::from_millis(500)).await;
    let updates = drain(&mut view_rx);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].index, 1);

    sleep(Duration::from_millis(600)).await;
    cmd_tx.send(CarouselCommand::Prev).await.unwrap();
    cmd_tx.send(CarouselCommand::JumpTo(3)).await.unwrap();
    sleep(Duration::from_millis(10)).await;
    let updates = drain(&mut view_rx);
    assert_eq!(
        updates,
        vec![
            ViewUpdate {
                index: 0,
                offset_slots: 1,
                animated: true
            },
            ViewUpdate {
                index: 3,
                offset_slots: 4,
                animated: true
            },
        ]
    );

    cancel.cancel();
    let carousel = handle.await.unwrap().unwrap();
    assert_eq!(carousel.state().index, 3);
}

#[tokio::test(start_paused = true)]
async fn empty_carousel_stays_idle() {
    let carousel = Carousel::new(config(0, |_| {}));
    let (cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(8);
    let (view_tx, mut view_rx) = mpsc::channel::<ViewUpdate>(8);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(manager::run(carousel, cmd_rx, view_tx, cancel.clone()));

    cmd_tx.send(CarouselCommand::Next).await.unwrap();
    cmd_tx.send(CarouselCommand::JumpTo(0)).await.unwrap();
    sleep(Duration::from_secs(60)).await;
    assert!(drain(&mut view_rx).is_empty());

    cancel.cancel();
    let carousel = handle.await.unwrap().unwrap();
    assert!(!carousel.is_autoplay_armed());
}

#[tokio::test(start_paused = true)]
async fn closed_command_channel_keeps_autoplay_running() {
    let carousel = Carousel::new(config(2, |_| {}));
    let (cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(8);
    let (view_tx, mut view_rx) = mpsc::channel::<ViewUpdate>(64);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(manager::run(carousel, cmd_rx, view_tx, cancel.clone()));
    drop(cmd_tx);

    sleep(Duration::from_millis(5500)).await;
    assert_eq!(animated(&drain(&mut view_rx)), 1);

    cancel.cancel();
    let _ = handle.await;
}

#[tokio::test(start_paused = true)]
async fn manager_stops_when_view_goes_away() {
    let carousel = Carousel::new(config(3, |_| {}));
    let (_cmd_tx, cmd_rx) = mpsc::channel::<CarouselCommand>(8);
    let (view_tx, view_rx) = mpsc::channel::<ViewUpdate>(8);
    drop(view_rx);

    let carousel = manager::run(carousel, cmd_rx, view_tx, CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(carousel.state().index, 1);
    assert!(!carousel.is_autoplay_armed());
}

#[tokio::test(start_paused = true)]
async fn viewer_tracks_frame_through_a_wrap() {
    let cfg = config(3, |_| {});
    let model = ViewModel::new(&cfg);
    let (tx, rx) = mpsc::channel::<ViewUpdate>(8);
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(viewer::run(model, rx, cancel));

    tx.send(ViewUpdate {
        index: 0,
        offset_slots: 4,
        animated: true,
    })
    .await
    .unwrap();
    tx.send(ViewUpdate {
        index: 0,
        offset_slots: 1,
        animated: false,
    })
    .await
    .unwrap();
    drop(tx);

    let model = handle.await.unwrap().unwrap();
    assert_eq!(model.active_dot(), 0);
    assert_eq!(model.frame_left_px(), -100);
    assert_eq!(model.current_url(), Some("/0.jpg"));
    assert!(model.transition().is_none());
}
