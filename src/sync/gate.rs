//! Readiness gate.
//!
//! Work submitted before the host is ready is queued and replayed in
//! submission order once [`ReadinessGate::signal_ready`] is called.
//! A closed gate drops queued work and refuses new work.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Waiting,
    Ready,
    Closed,
}

/// FIFO barrier in front of the synchronizer.
#[derive(Debug)]
pub struct ReadinessGate<T> {
    state: GateState,
    queue: VecDeque<T>,
}

impl<T> ReadinessGate<T> {
    /// A gate that is open from the start.
    pub fn ready() -> Self {
        Self {
            state: GateState::Ready,
            queue: VecDeque::new(),
        }
    }

    /// A gate that holds work until [`signal_ready`](Self::signal_ready).
    pub fn deferred() -> Self {
        Self {
            state: GateState::Waiting,
            queue: VecDeque::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state == GateState::Ready
    }

    pub fn is_closed(&self) -> bool {
        self.state == GateState::Closed
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Submit a task.
    ///
    /// Returns it back for immediate execution when the gate is ready and
    /// nothing is queued ahead of it.
    pub fn ensure_ready(&mut self, task: T) -> Option<T> {
        match self.state {
            GateState::Closed => None,
            GateState::Ready if self.queue.is_empty() => Some(task),
            _ => {
                self.queue.push_back(task);
                None
            }
        }
    }

    /// Open the gate. Queued tasks become available through `next_ready`.
    pub fn signal_ready(&mut self) {
        if self.state == GateState::Waiting {
            self.state = GateState::Ready;
        }
    }

    /// Pop the oldest queued task once the gate is ready.
    pub fn next_ready(&mut self) -> Option<T> {
        if self.is_ready() {
            self.queue.pop_front()
        } else {
            None
        }
    }

    /// Drop queued tasks and refuse further ones.
    pub fn close(&mut self) -> usize {
        self.state = GateState::Closed;
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }
}
