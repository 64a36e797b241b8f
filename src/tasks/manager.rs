use crate::carousel::Carousel;
use crate::events::{CarouselCommand, ViewUpdate};
use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{Duration, Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Parking deadline used while nothing is scheduled.
const IDLE_WAKE: Duration = Duration::from_secs(60 * 60);

/// Owns the carousel and paces it.
///
/// Rules:
/// - All navigation, autoplay and snaps run on this one task.
/// - Commands are applied in arrival order; every resulting update is
///   forwarded to the view before the next event is looked at.
/// - The task sleeps until the carousel's earliest deadline.
/// - On cancellation every timer is torn down before returning.
pub async fn run(
    mut carousel: Carousel,
    mut commands: Receiver<CarouselCommand>,
    to_view: Sender<ViewUpdate>,
    cancel: CancellationToken,
) -> Result<Carousel> {
    carousel.start(Instant::now());
    let mut commands_open = true;

    loop {
        let deadline = carousel.next_deadline();
        let wake_at = deadline.unwrap_or_else(|| Instant::now() + IDLE_WAKE);

        let updates = select! {
            _ = cancel.cancelled() => break,

            maybe_cmd = commands.recv(), if commands_open => {
                match maybe_cmd {
                    Some(cmd) => {
                        debug!(?cmd, "command");
                        carousel.handle(cmd, Instant::now())
                    }
                    None => {
                        // Input side ended; autoplay keeps going.
                        debug!("command channel closed");
                        commands_open = false;
                        Vec::new()
                    }
                }
            }

            _ = sleep_until(wake_at) => {
                if deadline.is_some() {
                    carousel.tick(Instant::now())
                } else {
                    Vec::new()
                }
            }
        };

        if !forward(&to_view, updates).await {
            warn!("view channel closed");
            break;
        }
    }

    carousel.teardown();
    Ok(carousel)
}

async fn forward(to_view: &Sender<ViewUpdate>, updates: Vec<ViewUpdate>) -> bool {
    for update in updates {
        if to_view.send(update).await.is_err() {
            return false;
        }
    }
    true
}
