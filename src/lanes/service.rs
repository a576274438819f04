//! Async driver for a [`Lanes`] context.
//!
//! # Responsibilities
//! - Tick the context whenever the location is written
//! - Forward navigation and readiness requests from other tasks
//! - Apply validated config updates (route table hot reload)
//! - Stop the context on shutdown or when the watcher goes away
//!
//! # Design Decisions
//! - Requests go through the context's readiness gate: a navigation sent
//!   before `Ready` is held and replayed in order afterwards
//! - Each `Navigate` request is resolved on its own; unlike raw location
//!   writes, consecutive requests never coalesce

use tokio::sync::{broadcast, mpsc};

use super::root::Lanes;
use crate::config::{build_table, LanesConfig};
use crate::observability::metrics;

/// A request from another task to the running context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Change the location to this path (prefix excluded).
    Navigate(String),
    /// The host is ready; release deferred work.
    Ready,
}

/// Cloneable sender of [`Request`]s for observers and producers.
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<Request>,
}

impl Navigator {
    /// Navigate to `path`. Returns false once the service is gone.
    pub fn navigate(&self, path: impl Into<String>) -> bool {
        self.tx.send(Request::Navigate(path.into())).is_ok()
    }

    /// Signal readiness. Returns false once the service is gone.
    pub fn ready(&self) -> bool {
        self.tx.send(Request::Ready).is_ok()
    }
}

/// Create a request channel for [`run`].
pub fn request_channel() -> (Navigator, mpsc::UnboundedReceiver<Request>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Navigator { tx }, rx)
}

/// Drive `lanes` until shutdown. Returns the stopped context.
pub async fn run(
    mut lanes: Lanes,
    mut requests: mpsc::UnboundedReceiver<Request>,
    mut config_updates: mpsc::UnboundedReceiver<LanesConfig>,
    mut shutdown: broadcast::Receiver<()>,
) -> Lanes {
    let mut changes = lanes.location_changes();
    let mut requests_open = true;
    let mut updates_open = true;

    // The initial location was written before we subscribed.
    lanes.tick();

    loop {
        tokio::select! {
            biased;

            changed = changes.changed() => {
                if !changed {
                    tracing::debug!("Location watcher closed");
                    break;
                }
                lanes.tick();
            }
            request = requests.recv(), if requests_open => {
                match request {
                    Some(Request::Navigate(path)) => lanes.set_location(&path),
                    Some(Request::Ready) => lanes.signal_ready(),
                    None => requests_open = false,
                }
            }
            update = config_updates.recv(), if updates_open => {
                match update {
                    Some(config) => match build_table(&config) {
                        Ok(table) => {
                            metrics::record_reload();
                            lanes.reload(table);
                        }
                        Err(e) => tracing::error!(error = %e, "Rejected route table update"),
                    },
                    None => updates_open = false,
                }
            }
            _ = shutdown.recv() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    lanes.stop();
    lanes
}
