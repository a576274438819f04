//! OS signal handling.

use std::sync::Arc;

use super::shutdown::Shutdown;

/// Trigger `shutdown` on Ctrl-C. Runs until the signal arrives.
pub async fn shutdown_on_ctrl_c(shutdown: Arc<Shutdown>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Ctrl-C received");
            shutdown.trigger();
        }
        Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl-C"),
    }
}
