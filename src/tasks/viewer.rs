use crate::events::ViewUpdate;
use crate::view::ViewModel;
use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Applies position updates to the view model and reports what is shown.
///
/// Returns the final model once the update stream ends or the task is
/// cancelled.
pub async fn run(
    mut model: ViewModel,
    mut updates: Receiver<ViewUpdate>,
    cancel: CancellationToken,
) -> Result<ViewModel> {
    info!(
        slides = model.slides().len(),
        dots = model.dot_count(),
        left_px = model.frame_left_px(),
        "view ready"
    );
    loop {
        select! {
            _ = cancel.cancelled() => break,
            maybe_update = updates.recv() => {
                let Some(update) = maybe_update else {
                    break;
                };
                model.apply(update);
                if update.animated {
                    info!(
                        index = update.index,
                        dot = model.active_dot(),
                        image = model.current_url().unwrap_or_default(),
                        left_px = model.frame_left_px(),
                        "slide"
                    );
                } else {
                    debug!(
                        index = update.index,
                        left_px = model.frame_left_px(),
                        "snap"
                    );
                }
            }
        }
    }
    Ok(model)
}
