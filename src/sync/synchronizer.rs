//! Route synchronizer state machine.
//!
//! # States
//! - Unstarted: not wired yet, resolutions are ignored
//! - Active: resolutions are compared and change events emitted
//! - Stopped: terminal, nothing is emitted
//!
//! # State Transitions
//! ```text
//! Unstarted → Active:  start()
//! Active → Active:     on_resolved() (no-op, or leave? → update? → route)
//! * → Stopped:         stop()
//! ```
//!
//! # Commit protocol
//! ```text
//! on_resolved()    propose: emit events, queue candidate as pending
//! EventBus         broadcast the route event, acknowledge it
//! accept_current() commit: pending proposal becomes the current route
//! ```

use std::collections::VecDeque;

use super::notify::{Notifier, RouteEvent};
use crate::observability::metrics;
use crate::routing::{routes_equal, Route};

/// Lifecycle state of a [`RouteSynchronizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Unstarted,
    Active,
    Stopped,
}

/// What one call to [`RouteSynchronizer::on_resolved`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The synchronizer is not active.
    Inactive,
    /// The candidate equals the current route.
    Unchanged,
    /// A change was proposed and its events emitted.
    Proposed { left: bool },
}

/// Owns the current route and decides what to emit for each resolution.
#[derive(Debug)]
pub struct RouteSynchronizer {
    state: SyncState,
    current: Option<Route>,
    pending: VecDeque<Option<Route>>,
}

impl Default for RouteSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteSynchronizer {
    pub fn new() -> Self {
        Self {
            state: SyncState::Unstarted,
            current: None,
            pending: VecDeque::new(),
        }
    }

    pub fn start(&mut self) {
        if self.state == SyncState::Unstarted {
            self.state = SyncState::Active;
            tracing::debug!("Route synchronizer started");
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Last committed route.
    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Proposals emitted but not yet committed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Handle one resolution.
    ///
    /// `previous` is the resolver's own prior result and drives the `leave`
    /// event; the comparison itself is against the committed current route.
    pub fn on_resolved<N>(
        &mut self,
        candidate: Option<Route>,
        previous: Option<Route>,
        sink: &mut N,
    ) -> Outcome
    where
        N: Notifier + ?Sized,
    {
        if self.state != SyncState::Active {
            tracing::debug!(state = ?self.state, "Resolution ignored");
            return Outcome::Inactive;
        }

        let unchanged = match (&self.current, &candidate) {
            (None, None) => true,
            (current, candidate) => routes_equal(current.as_ref(), candidate.as_ref()),
        };
        if unchanged {
            metrics::record_duplicate();
            return Outcome::Unchanged;
        }

        let candidate_name = candidate.as_ref().map(|c| c.name.as_str());
        let left = match previous {
            Some(prev) if candidate_name != Some(prev.name.as_str()) => {
                self.emit(sink, RouteEvent::Leave(prev));
                true
            }
            _ => false,
        };

        if let Some(route) = &candidate {
            self.emit(sink, RouteEvent::Update(route.clone()));
        }

        self.pending.push_back(candidate.clone());
        self.emit(sink, RouteEvent::Route(candidate));

        Outcome::Proposed { left }
    }

    /// Commit an acknowledged route as the current one.
    pub fn accept_current(&mut self, route: Option<Route>) {
        if self.state == SyncState::Stopped {
            return;
        }

        match self.pending.iter().position(|p| *p == route) {
            Some(idx) => {
                self.pending.drain(..=idx);
            }
            None => tracing::warn!(
                route = route.as_ref().map(|r| r.name.as_str()),
                "Commit without a matching proposal"
            ),
        }

        tracing::debug!(
            route = route.as_ref().map(|r| r.name.as_str()),
            path = route.as_ref().map(|r| r.path.as_str()),
            "Current route committed"
        );
        self.current = route;
    }

    /// Stop for good. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if self.state == SyncState::Stopped {
            return false;
        }
        self.state = SyncState::Stopped;
        self.current = None;
        self.pending.clear();
        tracing::debug!("Route synchronizer stopped");
        true
    }

    fn emit<N>(&self, sink: &mut N, event: RouteEvent)
    where
        N: Notifier + ?Sized,
    {
        tracing::debug!(
            topic = %event.topic(),
            path = event.payload().map(|r| r.path.as_str()),
            "Emitting route event"
        );
        metrics::record_event(event.kind());
        sink.notify(event);
    }
}
