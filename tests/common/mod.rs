//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use route_lanes::{Audience, Lanes, LanesOptions, Route, RouteEvent, RouteTable, TopicFilter};

/// Events observed by a recording subscriber, in delivery order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<RouteEvent>>>,
}

#[allow(dead_code)]
impl Recorder {
    /// Attach to every topic on the given audience.
    pub fn attach(lanes: &mut Lanes, audience: Audience) -> Self {
        let recorder = Self::default();
        let events = recorder.events.clone();
        lanes.subscribe(TopicFilter::All, audience, move |e| {
            events.lock().unwrap().push(e.clone());
        });
        recorder
    }

    /// Take everything recorded so far.
    pub fn drain(&self) -> Vec<RouteEvent> {
        std::mem::take(&mut *self.events.lock().unwrap())
    }

    pub fn topics(&self) -> Vec<String> {
        self.drain().iter().map(|e| e.topic().to_string()).collect()
    }
}

/// `[["home","/"],["user","/users/:id"]]`
pub fn sample_table() -> RouteTable {
    RouteTable::from_pairs([("home", "/"), ("user", "/users/:id")]).unwrap()
}

pub fn sample_lanes(initial: &str) -> Lanes {
    Lanes::new(
        sample_table(),
        LanesOptions {
            initial: initial.to_string(),
            ..Default::default()
        },
    )
}

#[allow(dead_code)]
pub fn home() -> Route {
    Route::new("home", "/", vec![])
}

#[allow(dead_code)]
pub fn user(id: &str) -> Route {
    Route::new("user", format!("/users/{}", id), vec![id.to_string()])
}
