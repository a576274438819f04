//! Root wiring of one routing context.
//!
//! # Responsibilities
//! - Own the watcher, resolver, gate, synchronizer and event bus
//! - Turn watcher ticks into resolutions and resolutions into events
//! - Commit acknowledged route events back into the synchronizer
//! - Tear everything down on stop
//!
//! # Design Decisions
//! - Single-threaded: `&mut self` serializes every step
//! - Resolution runs when the location changes; comparison and emission
//!   run behind the readiness gate, in submission order
//! - `set_location` is itself gated work: once it runs, the new location is
//!   resolved right away, so held navigations replay one by one

use crate::config::{build_table, ConfigError, LanesConfig};
use crate::location::{LocationChanges, LocationHandle, LocationWatcher};
use crate::routing::{Resolution, Resolve, Route, RouteTable, TableResolver};
use crate::sync::{
    Audience, EventBus, Outcome, ReadinessGate, RouteEvent, RouteSynchronizer, SubscriptionId,
    SyncState, TopicFilter,
};

/// Options for a [`Lanes`] instance.
#[derive(Debug, Clone, Default)]
pub struct LanesOptions {
    /// Token prefix passed to the location watcher.
    pub prefix: String,
    /// Location resolved on the first tick.
    pub initial: String,
    /// Hold all work until [`Lanes::signal_ready`] is called.
    pub defer_until_ready: bool,
}

#[derive(Debug)]
enum Task {
    SetLocation(String),
    Resolved(Resolution),
}

/// A routing context: keeps the current route in sync with the location.
#[derive(Debug)]
pub struct Lanes {
    watcher: LocationWatcher,
    resolver: TableResolver,
    gate: ReadinessGate<Task>,
    synchronizer: RouteSynchronizer,
    bus: EventBus,
}

impl Lanes {
    pub fn new(table: RouteTable, options: LanesOptions) -> Self {
        let gate = if options.defer_until_ready {
            ReadinessGate::deferred()
        } else {
            ReadinessGate::ready()
        };

        let mut synchronizer = RouteSynchronizer::new();
        synchronizer.start();

        tracing::info!(
            routes = table.len(),
            prefix = %options.prefix,
            initial = %options.initial,
            "Routing context started"
        );

        Self {
            watcher: LocationWatcher::new(options.prefix, &options.initial),
            resolver: TableResolver::new(table),
            gate,
            synchronizer,
            bus: EventBus::new(),
        }
    }

    /// Build from a validated configuration.
    pub fn from_config(config: &LanesConfig) -> Result<Self, ConfigError> {
        let table = build_table(config)?;
        Ok(Self::new(
            table,
            LanesOptions {
                prefix: config.prefix.clone(),
                initial: config.initial.clone(),
                defer_until_ready: false,
            },
        ))
    }

    /// Register an observer. See [`EventBus::subscribe`].
    pub fn subscribe<F>(
        &mut self,
        filter: impl Into<TopicFilter>,
        audience: Audience,
        handler: F,
    ) -> SubscriptionId
    where
        F: FnMut(&RouteEvent) + Send + 'static,
    {
        self.bus.subscribe(filter, audience, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Navigate to `path`. Resolved as soon as the readiness gate lets it run.
    pub fn set_location(&mut self, path: &str) {
        self.schedule(Task::SetLocation(path.to_string()));
    }

    /// Writer for producers on other tasks.
    pub fn location_handle(&self) -> LocationHandle {
        self.watcher.handle()
    }

    /// Async notification of location writes, for drivers.
    pub fn location_changes(&self) -> LocationChanges {
        self.watcher.subscribe()
    }

    /// Resolve the latest unseen location, if any. Returns true if one was
    /// processed.
    pub fn tick(&mut self) -> bool {
        match self.watcher.poll_change() {
            Some(path) => {
                let resolution = self.resolver.resolve(&path);
                self.schedule(Task::Resolved(resolution));
                true
            }
            None => false,
        }
    }

    /// Open the readiness gate and run deferred work in order.
    pub fn signal_ready(&mut self) {
        self.gate.signal_ready();
        while let Some(task) = self.gate.next_ready() {
            self.run(task);
        }
    }

    /// Swap the route table and re-resolve the current location.
    pub fn reload(&mut self, table: RouteTable) {
        if self.is_stopped() {
            return;
        }
        tracing::info!(routes = table.len(), "Route table replaced");
        self.resolver.replace_table(table);
        if let Some(path) = self.watcher.value() {
            let resolution = self.resolver.resolve(&path);
            self.schedule(Task::Resolved(resolution));
        }
    }

    pub fn current_route(&self) -> Option<&Route> {
        self.synchronizer.current()
    }

    pub fn is_stopped(&self) -> bool {
        self.synchronizer.state() == SyncState::Stopped
    }

    /// Stop for good: no further events, deferred work dropped. Idempotent.
    pub fn stop(&mut self) {
        if !self.synchronizer.stop() {
            return;
        }
        let dropped = self.gate.close();
        self.watcher.stop();
        self.bus.clear();
        tracing::info!(dropped_tasks = dropped, "Routing context stopped");
    }

    fn schedule(&mut self, task: Task) {
        if let Some(task) = self.gate.ensure_ready(task) {
            self.run(task);
        }
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::SetLocation(path) => {
                tracing::debug!(path = %path, "Changing location");
                self.watcher.set_value(&path);
                self.tick();
            }
            Task::Resolved(Resolution {
                candidate,
                previous,
            }) => {
                let outcome = self
                    .synchronizer
                    .on_resolved(candidate, previous, &mut self.bus);
                if let Outcome::Proposed { .. } = outcome {
                    while let Some(route) = self.bus.take_acknowledged() {
                        self.synchronizer.accept_current(route);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn lanes(defer: bool) -> (Lanes, Arc<Mutex<Vec<String>>>) {
        let table = RouteTable::from_pairs([("home", "/"), ("user", "/users/:id")]).unwrap();
        let mut lanes = Lanes::new(
            table,
            LanesOptions {
                prefix: String::new(),
                initial: "/".into(),
                defer_until_ready: defer,
            },
        );
        let log = Arc::new(Mutex::new(Vec::new()));
        let l = log.clone();
        lanes.subscribe(TopicFilter::All, Audience::Root, move |e| {
            l.lock().unwrap().push(e.topic().to_string());
        });
        (lanes, log)
    }

    #[test]
    fn test_tick_resolves_initial_location() {
        let (mut lanes, log) = lanes(false);
        assert!(lanes.tick());
        assert!(!lanes.tick());
        assert_eq!(*log.lock().unwrap(), vec!["lanes:update:home", "lanes:route"]);
        assert_eq!(lanes.current_route().unwrap().name, "home");
    }

    #[test]
    fn test_set_location_resolves_when_ready() {
        let (mut lanes, log) = lanes(false);
        lanes.tick();
        log.lock().unwrap().clear();

        lanes.set_location("/users/42");
        assert!(!lanes.tick());

        assert_eq!(
            *log.lock().unwrap(),
            vec!["lanes:leave:home", "lanes:update:user", "lanes:route"]
        );
        assert_eq!(lanes.current_route().unwrap().params, vec!["42".to_string()]);
    }

    #[test]
    fn test_deferred_navigation_replays_in_order() {
        let (mut lanes, log) = lanes(true);
        lanes.tick();
        lanes.set_location("/users/1");
        lanes.set_location("/users/2");
        assert!(log.lock().unwrap().is_empty());
        assert!(lanes.current_route().is_none());

        lanes.signal_ready();
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "lanes:update:home",
                "lanes:route",
                "lanes:leave:home",
                "lanes:update:user",
                "lanes:route",
                "lanes:update:user",
                "lanes:route",
            ]
        );
        assert_eq!(lanes.current_route().unwrap().params, vec!["2".to_string()]);
        assert!(!lanes.tick());
    }

    #[test]
    fn test_deferred_ticks_flush_on_ready() {
        let (mut lanes, log) = lanes(true);
        assert!(lanes.tick());
        lanes.location_handle().set_value("/users/1");
        assert!(lanes.tick());
        assert!(log.lock().unwrap().is_empty());

        lanes.signal_ready();
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                "lanes:update:home",
                "lanes:route",
                "lanes:leave:home",
                "lanes:update:user",
                "lanes:route",
            ]
        );
        assert_eq!(lanes.current_route().unwrap().name, "user");
    }

    #[test]
    fn test_stop_drops_deferred_work() {
        let (mut lanes, log) = lanes(true);
        lanes.tick();
        lanes.stop();
        lanes.signal_ready();
        lanes.set_location("/users/1");
        assert!(!lanes.tick());
        assert!(log.lock().unwrap().is_empty());
        assert!(lanes.is_stopped());
    }

    #[test]
    fn test_reload_reresolves_current_location() {
        let (mut lanes, log) = lanes(false);
        lanes.tick();
        log.lock().unwrap().clear();

        lanes.reload(RouteTable::from_pairs([("start", "/")]).unwrap());
        assert_eq!(
            *log.lock().unwrap(),
            vec!["lanes:leave:home", "lanes:update:start", "lanes:route"]
        );
        assert_eq!(lanes.current_route().unwrap().name, "start");
    }
}
