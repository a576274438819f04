//! Route events and their delivery.
//!
//! # Responsibilities
//! - Name event topics (`lanes:leave:<name>`, `lanes:update:<name>`, `lanes:route`)
//! - Deliver events to registered observers
//! - Acknowledge generic `route` events so the synchronizer can commit them
//!
//! # Delivery order
//! ```text
//! leave / update:  Root observers → Descendant observers
//! route:           Root observers → Descendant observers (re-broadcast) → ack queue
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::routing::Route;

const NAMESPACE: &str = "lanes";

/// Address of an event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    Leave(String),
    Update(String),
    Route,
}

impl Topic {
    pub fn leave(name: impl Into<String>) -> Self {
        Topic::Leave(name.into())
    }

    pub fn update(name: impl Into<String>) -> Self {
        Topic::Update(name.into())
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Leave(name) => write!(f, "{}:leave:{}", NAMESPACE, name),
            Topic::Update(name) => write!(f, "{}:update:{}", NAMESPACE, name),
            Topic::Route => write!(f, "{}:route", NAMESPACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized topic: {0:?}")]
pub struct TopicParseError(String);

impl FromStr for Topic {
    type Err = TopicParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || TopicParseError(s.to_string());
        let rest = s
            .strip_prefix(NAMESPACE)
            .and_then(|r| r.strip_prefix(':'))
            .ok_or_else(err)?;

        if rest == "route" {
            return Ok(Topic::Route);
        }
        match rest.split_once(':') {
            Some(("leave", name)) if !name.is_empty() => Ok(Topic::leave(name)),
            Some(("update", name)) if !name.is_empty() => Ok(Topic::update(name)),
            _ => Err(err()),
        }
    }
}

/// A lifecycle notification emitted by the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEvent {
    /// The route previously resolved is being left.
    Leave(Route),
    /// The new route (same or different name) is now in effect.
    Update(Route),
    /// Generic change notification; `None` when the location matched nothing.
    Route(Option<Route>),
}

impl RouteEvent {
    pub fn topic(&self) -> Topic {
        match self {
            RouteEvent::Leave(route) => Topic::leave(route.name.as_str()),
            RouteEvent::Update(route) => Topic::update(route.name.as_str()),
            RouteEvent::Route(_) => Topic::Route,
        }
    }

    pub fn payload(&self) -> Option<&Route> {
        match self {
            RouteEvent::Leave(route) | RouteEvent::Update(route) => Some(route),
            RouteEvent::Route(route) => route.as_ref(),
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteEvent::Leave(_) => "leave",
            RouteEvent::Update(_) => "update",
            RouteEvent::Route(_) => "route",
        }
    }
}

/// Receives the events the synchronizer emits.
pub trait Notifier {
    fn notify(&mut self, event: RouteEvent);
}

/// Recording sink.
impl Notifier for Vec<RouteEvent> {
    fn notify(&mut self, event: RouteEvent) {
        self.push(event);
    }
}

/// Which observers an emission reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Direct emission: observers attached to the root context.
    Root,
    /// Broadcast: observers further down the tree.
    Descendants,
}

/// Which topics an observer wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicFilter {
    Exact(Topic),
    All,
}

impl TopicFilter {
    fn accepts(&self, topic: &Topic) -> bool {
        match self {
            TopicFilter::Exact(t) => t == topic,
            TopicFilter::All => true,
        }
    }
}

impl From<Topic> for TopicFilter {
    fn from(topic: Topic) -> Self {
        TopicFilter::Exact(topic)
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Handler = Box<dyn FnMut(&RouteEvent) + Send>;

struct Subscriber {
    id: SubscriptionId,
    filter: TopicFilter,
    audience: Audience,
    handler: Handler,
}

/// Publish/subscribe hub between the synchronizer and observers.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<Subscriber>,
    acknowledged: VecDeque<Option<Route>>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("acknowledged", &self.acknowledged)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Observers run in registration order.
    pub fn subscribe<F>(
        &mut self,
        filter: impl Into<TopicFilter>,
        audience: Audience,
        handler: F,
    ) -> SubscriptionId
    where
        F: FnMut(&RouteEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            filter: filter.into(),
            audience,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Drop every observer and pending acknowledgment.
    pub fn clear(&mut self) {
        self.subscribers.clear();
        self.acknowledged.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Next `route` payload delivered but not yet committed.
    pub fn take_acknowledged(&mut self) -> Option<Option<Route>> {
        self.acknowledged.pop_front()
    }

    fn emit(&mut self, audience: Audience, event: &RouteEvent) {
        let topic = event.topic();
        for sub in self
            .subscribers
            .iter_mut()
            .filter(|s| s.audience == audience && s.filter.accepts(&topic))
        {
            (sub.handler)(event);
        }
    }
}

impl Notifier for EventBus {
    fn notify(&mut self, event: RouteEvent) {
        self.emit(Audience::Root, &event);
        self.emit(Audience::Descendants, &event);

        if let RouteEvent::Route(route) = event {
            tracing::debug!(
                route = route.as_ref().map(|r| r.name.as_str()),
                "Route event broadcast, acknowledging"
            );
            self.acknowledged.push_back(route);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn home() -> Route {
        Route::new("home", "/", vec![])
    }

    #[test]
    fn test_topic_display_and_parse() {
        assert_eq!(Topic::leave("home").to_string(), "lanes:leave:home");
        assert_eq!(Topic::update("user").to_string(), "lanes:update:user");
        assert_eq!(Topic::Route.to_string(), "lanes:route");

        assert_eq!("lanes:update:user".parse::<Topic>(), Ok(Topic::update("user")));
        assert_eq!("lanes:route".parse::<Topic>(), Ok(Topic::Route));
        assert!("lanes:update:".parse::<Topic>().is_err());
        assert!("other:route".parse::<Topic>().is_err());
    }

    #[test]
    fn test_root_before_descendants() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();

        let l = log.clone();
        bus.subscribe(TopicFilter::All, Audience::Descendants, move |e| {
            l.lock().unwrap().push(format!("child {}", e.topic()));
        });
        let l = log.clone();
        bus.subscribe(Topic::update("home"), Audience::Root, move |e| {
            l.lock().unwrap().push(format!("root {}", e.topic()));
        });

        bus.notify(RouteEvent::Update(home()));

        assert_eq!(
            *log.lock().unwrap(),
            vec!["root lanes:update:home", "child lanes:update:home"]
        );
    }

    #[test]
    fn test_filter_by_topic() {
        let count = Arc::new(Mutex::new(0));
        let mut bus = EventBus::new();
        let c = count.clone();
        bus.subscribe(Topic::leave("home"), Audience::Root, move |_| {
            *c.lock().unwrap() += 1;
        });

        bus.notify(RouteEvent::Update(home()));
        bus.notify(RouteEvent::Leave(home()));
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_route_event_is_acknowledged() {
        let mut bus = EventBus::new();
        bus.notify(RouteEvent::Update(home()));
        assert!(bus.take_acknowledged().is_none());

        bus.notify(RouteEvent::Route(Some(home())));
        bus.notify(RouteEvent::Route(None));
        assert_eq!(bus.take_acknowledged(), Some(Some(home())));
        assert_eq!(bus.take_acknowledged(), Some(None));
        assert_eq!(bus.take_acknowledged(), None);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let id = bus.subscribe(TopicFilter::All, Audience::Root, |_| {});
        assert_eq!(bus.subscriber_count(), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.subscriber_count(), 0);
    }
}
