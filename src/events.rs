//! Typed notification channel between the engine and its consumers.
//!
//! Every `search()` call produces exactly one event; a failed index load
//! additionally produces one `Error` event with no query attached. Events
//! are dispatched synchronously to all current subscribers, so a consumer
//! that subscribes before calling `search()` always observes the outcome.

use std::sync::{Arc, RwLock};

use crate::error::LoadError;
use crate::types::ScoredDocument;

/// A notification emitted by the search engine.
///
/// Consumers issuing overlapping queries correlate outcomes through the
/// query string carried in each payload.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// The index is still loading; the query was not answered and should
    /// be re-issued by the caller once the load settles.
    Loading { query: String },

    /// Ranked results for a query. An empty list is a successful outcome;
    /// blank queries always land here.
    Results {
        query: String,
        results: Vec<ScoredDocument>,
    },

    /// The query matched no documents.
    NoResults { query: String },

    /// The index could not be loaded. Emitted once at load time with no
    /// query, then again for every query attempted afterwards.
    Error {
        error: Arc<LoadError>,
        query: Option<String>,
    },
}

impl SearchEvent {
    /// Stable wire name of the event, as consumed by UI layers.
    pub fn name(&self) -> &'static str {
        match self {
            SearchEvent::Loading { .. } => "loading",
            SearchEvent::Results { .. } => "results",
            SearchEvent::NoResults { .. } => "no-results",
            SearchEvent::Error { .. } => "error",
        }
    }

    /// The query the event answers, if it answers one.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchEvent::Loading { query }
            | SearchEvent::Results { query, .. }
            | SearchEvent::NoResults { query } => Some(query),
            SearchEvent::Error { query, .. } => query.as_deref(),
        }
    }
}

type Subscriber = Box<dyn Fn(&SearchEvent) + Send + Sync>;

/// Synchronous publish-subscribe channel for engine notifications.
///
/// Cloning yields a handle to the same subscriber list. Subscribers are
/// invoked in registration order on the emitting thread.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked for every subsequent event.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&SearchEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .write()
            .expect("event bus lock poisoned")
            .push(Box::new(callback));
    }

    /// Dispatch an event to all current subscribers.
    pub fn emit(&self, event: &SearchEvent) {
        let subscribers = self.subscribers.read().expect("event bus lock poisoned");
        for subscriber in subscribers.iter() {
            subscriber(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn collector() -> (Arc<Mutex<Vec<String>>>, impl Fn(&SearchEvent) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback = move |event: &SearchEvent| {
            sink.lock().unwrap().push(event.name().to_string());
        };
        (seen, callback)
    }

    #[test]
    fn test_emit_reaches_subscriber() {
        let bus = EventBus::new();
        let (seen, callback) = collector();
        bus.subscribe(callback);

        bus.emit(&SearchEvent::NoResults {
            query: "nothing".to_string(),
        });

        assert_eq!(*seen.lock().unwrap(), vec!["no-results"]);
    }

    #[test]
    fn test_emit_reaches_all_subscribers_in_order() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for id in ["first", "second"] {
            let sink = Arc::clone(&seen);
            bus.subscribe(move |_event| sink.lock().unwrap().push(id));
        }

        bus.emit(&SearchEvent::Loading {
            query: "q".to_string(),
        });

        assert_eq!(*seen.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_cloned_bus_shares_subscribers() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let (seen, callback) = collector();
        bus.subscribe(callback);

        clone.emit(&SearchEvent::Loading {
            query: "q".to_string(),
        });

        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_event_names_match_wire_contract() {
        let results = SearchEvent::Results {
            query: "q".to_string(),
            results: vec![],
        };
        assert_eq!(results.name(), "results");
        assert_eq!(
            SearchEvent::Loading {
                query: "q".to_string()
            }
            .name(),
            "loading"
        );
        assert_eq!(
            SearchEvent::NoResults {
                query: "q".to_string()
            }
            .name(),
            "no-results"
        );
    }

    #[test]
    fn test_query_accessor() {
        let event = SearchEvent::Results {
            query: "joe".to_string(),
            results: vec![],
        };
        assert_eq!(event.query(), Some("joe"));

        let load_failure = SearchEvent::Error {
            error: Arc::new(crate::error::LoadError::Status {
                url: "http://localhost/search-index.json".to_string(),
                status: 500,
            }),
            query: None,
        };
        assert_eq!(load_failure.query(), None);
    }
}
