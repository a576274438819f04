//! Live location value.
//!
//! # Responsibilities
//! - Hold the current location token (`prefix + path`)
//! - Let producers write new tokens from any task
//! - Report unseen changes to the driver, synchronously or asynchronously
//!
//! # Design Decisions
//! - Backed by a `tokio::sync::watch` channel: writes between two ticks
//!   coalesce into the latest value
//! - Writing the same token again still counts as a change; deduplication
//!   is the synchronizer's job
//! - Tokens that do not carry the prefix belong to someone else and are skipped

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug)]
struct Shared {
    prefix: String,
    tx: watch::Sender<String>,
    stopped: AtomicBool,
}

impl Shared {
    fn strip<'a>(&self, token: &'a str) -> Option<&'a str> {
        let path = token.strip_prefix(self.prefix.as_str());
        if path.is_none() {
            tracing::debug!(token, prefix = %self.prefix, "Ignoring token without prefix");
        }
        path
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// Cloneable writer for external producers.
#[derive(Debug, Clone)]
pub struct LocationHandle {
    shared: Arc<Shared>,
}

impl LocationHandle {
    /// Write a raw token, prefix included.
    pub fn set_token(&self, token: impl Into<String>) {
        if self.shared.is_stopped() {
            return;
        }
        self.shared.tx.send_replace(token.into());
    }

    /// Write a path; the prefix is added.
    pub fn set_value(&self, path: &str) {
        self.set_token(format!("{}{}", self.shared.prefix, path));
    }
}

/// Async view of location changes, for drivers.
#[derive(Debug)]
pub struct LocationChanges {
    shared: Arc<Shared>,
    rx: watch::Receiver<String>,
}

impl LocationChanges {
    /// Wait for the next write. Returns false once the watcher is stopped.
    pub async fn changed(&mut self) -> bool {
        if self.shared.is_stopped() {
            return false;
        }
        self.rx.changed().await.is_ok() && !self.shared.is_stopped()
    }
}

/// Watches the location token.
#[derive(Debug)]
pub struct LocationWatcher {
    shared: Arc<Shared>,
    rx: watch::Receiver<String>,
}

impl LocationWatcher {
    /// Create a watcher whose first tick reports `initial_path`.
    pub fn new(prefix: impl Into<String>, initial_path: &str) -> Self {
        let prefix = prefix.into();
        let (tx, rx) = watch::channel(String::new());
        tx.send_replace(format!("{}{}", prefix, initial_path));

        Self {
            shared: Arc::new(Shared {
                prefix,
                tx,
                stopped: AtomicBool::new(false),
            }),
            rx,
        }
    }

    pub fn handle(&self) -> LocationHandle {
        LocationHandle {
            shared: self.shared.clone(),
        }
    }

    pub fn subscribe(&self) -> LocationChanges {
        LocationChanges {
            shared: self.shared.clone(),
            rx: self.shared.tx.subscribe(),
        }
    }

    /// Write a path; the prefix is added.
    pub fn set_value(&self, path: &str) {
        self.handle().set_value(path);
    }

    /// Current path, without marking it as seen.
    pub fn value(&self) -> Option<String> {
        let token = self.rx.borrow();
        self.shared.strip(&token).map(str::to_string)
    }

    /// Take the latest unseen path, if any.
    pub fn poll_change(&mut self) -> Option<String> {
        if self.shared.is_stopped() || !self.rx.has_changed().unwrap_or(false) {
            return None;
        }
        let token = self.rx.borrow_and_update().clone();
        self.shared.strip(&token).map(str::to_string)
    }

    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }

    /// Stop reporting changes. Idempotent.
    pub fn stop(&self) {
        if !self.shared.stopped.swap(true, Ordering::AcqRel) {
            // Wake pending `changed()` waiters so they observe the stop.
            self.shared.tx.send_modify(|_| {});
            tracing::debug!(prefix = %self.shared.prefix, "Location watcher stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_value_is_reported_once() {
        let mut watcher = LocationWatcher::new("", "/");
        assert_eq!(watcher.poll_change(), Some("/".to_string()));
        assert_eq!(watcher.poll_change(), None);
    }

    #[test]
    fn test_prefix_is_added_and_stripped() {
        let mut watcher = LocationWatcher::new("!", "/");
        watcher.poll_change();

        watcher.set_value("/users/1");
        assert_eq!(watcher.value(), Some("/users/1".to_string()));
        assert_eq!(watcher.poll_change(), Some("/users/1".to_string()));

        watcher.handle().set_token("!/users/2");
        assert_eq!(watcher.poll_change(), Some("/users/2".to_string()));

        watcher.handle().set_token("/elsewhere");
        assert_eq!(watcher.poll_change(), None);
    }

    #[test]
    fn test_writes_coalesce() {
        let mut watcher = LocationWatcher::new("", "/");
        let handle = watcher.handle();
        handle.set_value("/a");
        handle.set_value("/b");
        assert_eq!(watcher.poll_change(), Some("/b".to_string()));
        assert_eq!(watcher.poll_change(), None);
    }

    #[test]
    fn test_same_value_counts_as_change() {
        let mut watcher = LocationWatcher::new("", "/");
        watcher.poll_change();
        watcher.set_value("/");
        assert_eq!(watcher.poll_change(), Some("/".to_string()));
    }

    #[test]
    fn test_stop_silences_watcher() {
        let mut watcher = LocationWatcher::new("", "/");
        watcher.stop();
        watcher.stop();
        watcher.handle().set_value("/a");
        assert!(watcher.is_stopped());
        assert_eq!(watcher.poll_change(), None);
    }

    #[tokio::test]
    async fn test_changes_wake_on_write_and_stop() {
        let watcher = LocationWatcher::new("", "/");
        let mut changes = watcher.subscribe();
        let handle = watcher.handle();

        handle.set_value("/a");
        assert!(changes.changed().await);

        watcher.stop();
        assert!(!changes.changed().await);
    }
}
