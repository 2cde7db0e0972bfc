//! Input watcher for preview mode. Polls the modification times of the dataset
//! and the layout override once a second and regenerates on any change.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::book::generator::regenerate;
use crate::state::AppState;

const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Modification time per watched path; `None` while a file is missing.
type Snapshot = Vec<Option<SystemTime>>;

pub fn watched_paths(state: &AppState) -> Vec<PathBuf> {
    let mut paths = vec![state.config.data_path.clone()];
    if let Some(path) = &state.config.layout_config_path {
        paths.push(path.clone());
    }
    paths
}

pub fn spawn(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let paths = watched_paths(&state);
        info!(paths = ?paths, "Watching inputs for changes");

        let mut interval = tokio::time::interval(POLL_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = snapshot(&paths).await;

        loop {
            interval.tick().await;
            let current = snapshot(&paths).await;
            if current == last {
                continue;
            }
            last = current;

            info!("Input changed, regenerating");
            match regenerate(&state).await {
                Ok(Some(generated)) => {
                    info!(html = %generated.html.display(), "Preview updated")
                }
                Ok(None) => info!("Selection is empty after reload"),
                Err(e) => warn!(error = %e, "Regeneration failed"),
            }
        }
    })
}

async fn snapshot(paths: &[PathBuf]) -> Snapshot {
    let mut times = Vec::with_capacity(paths.len());
    for path in paths {
        let modified = tokio::fs::metadata(path)
            .await
            .ok()
            .and_then(|meta| meta.modified().ok());
        times.push(modified);
    }
    times
}
