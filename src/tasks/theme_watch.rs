//! Theme change logging task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::{AppState, ThemeEvent};

/// Background task that reports theme store changes
pub async fn theme_watch_task(state: Arc<AppState>) {
    info!("Starting theme watch task");

    let mut theme_rx = state.theme_change_tx.subscribe();

    loop {
        match theme_rx.recv().await {
            Ok(ThemeEvent::Selected { name }) => info!("Theme selected: {}", name),
            Ok(ThemeEvent::Added { name }) => info!("Theme added: {}", name),
            Ok(ThemeEvent::Deleted { names, selected }) => {
                info!("Themes deleted: {:?}, now using {:?}", names, selected);
            }
            Ok(ThemeEvent::Imported { added }) => info!("Themes imported: {}", added),
            Err(RecvError::Lagged(skipped)) => warn!("Theme watcher skipped {} events", skipped),
            Err(RecvError::Closed) => {
                info!("Theme change channel closed");
                break;
            }
        }
    }
}
