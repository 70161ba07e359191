//! Index lifecycle: one fetch per engine instance, three observable states.
//!
//! The store starts in `Loading` and moves exactly once to either `Ready`
//! or `Failed`. There is no retry and no partial state; a failure is
//! terminal until a new engine (and store) is constructed.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::events::{EventBus, SearchEvent};
use crate::fetch::IndexClient;
use crate::types::SearchIndex;

/// Lifecycle state of the document collection.
#[derive(Debug, Clone)]
pub enum IndexState {
    /// The fetch is in flight; queries are answered with `loading`.
    Loading,
    /// The index parsed successfully and is available for queries.
    Ready(Arc<SearchIndex>),
    /// The one load failed; every query is answered with `error`.
    Failed(Arc<LoadError>),
}

/// Owns the loaded document collection.
///
/// The spawned load task is the only writer, and it writes exactly once;
/// after that the index is read-only shared data.
pub struct IndexStore {
    state: watch::Receiver<IndexState>,
}

impl IndexStore {
    /// Start fetching the index in the background and return immediately.
    ///
    /// Must be called from within a tokio runtime. A load failure is
    /// reported on `bus` as an `error` event with no query attached, in
    /// addition to becoming the store's terminal state.
    pub fn spawn(client: IndexClient, index_path: String, bus: EventBus) -> Self {
        let (tx, rx) = watch::channel(IndexState::Loading);

        tokio::spawn(async move {
            debug!(url = client.base_url(), path = %index_path, "fetching search index");
            match client.fetch_index(&index_path).await {
                Ok(index) => {
                    info!(pages = index.pages.len(), "search index loaded");
                    let _ = tx.send(IndexState::Ready(Arc::new(index)));
                }
                Err(err) => {
                    warn!(error = %err, "search index load failed");
                    let err = Arc::new(err);
                    // Emit before publishing the terminal state so anyone
                    // who observes `Failed` can rely on the event having
                    // been dispatched.
                    bus.emit(&SearchEvent::Error {
                        error: Arc::clone(&err),
                        query: None,
                    });
                    let _ = tx.send(IndexState::Failed(err));
                }
            }
        });

        Self { state: rx }
    }

    /// True iff the load succeeded and the index is available. Never blocks.
    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), IndexState::Ready(_))
    }

    /// Non-blocking snapshot of the current lifecycle state.
    pub fn snapshot(&self) -> IndexState {
        self.state.borrow().clone()
    }

    /// Wait until the load has finished, one way or the other.
    pub async fn settled(&self) -> IndexState {
        let mut state = self.state.clone();
        let settled = match state
            .wait_for(|s| !matches!(s, IndexState::Loading))
            .await
        {
            Ok(settled) => settled.clone(),
            // The load task publishes a terminal state before dropping the
            // sender, so on a closed channel the current value is final.
            Err(_) => self.state.borrow().clone(),
        };
        settled
    }

    /// Build a store already in the given state, skipping the fetch.
    #[cfg(test)]
    pub fn preloaded(state: IndexState) -> Self {
        let (_tx, rx) = watch::channel(state);
        Self { state: rx }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    const INDEX_JSON: &str = r#"{
        "pages": [
            {"title": "About Joe Mizzi", "url": "/about/", "content": "musician"},
            {"title": "Home", "url": "/", "content": "Joe Mizzi fan page"}
        ]
    }"#;

    /// Serve a fixed body for every request on an ephemeral port.
    async fn serve_body(body: &'static str) -> String {
        let app = axum::Router::new().fallback(move || async move { body });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> IndexClient {
        IndexClient::new(base_url, Duration::from_secs(2))
    }

    #[tokio::test]
    async fn test_load_success_reaches_ready() {
        let base_url = serve_body(INDEX_JSON).await;
        let store = IndexStore::spawn(
            client(&base_url),
            "/search-index.json".to_string(),
            EventBus::new(),
        );

        let state = store.settled().await;
        match state {
            IndexState::Ready(index) => assert_eq!(index.pages.len(), 2),
            other => panic!("expected Ready, got {other:?}"),
        }
        assert!(store.is_ready());
    }

    #[tokio::test]
    async fn test_load_failure_reaches_failed_and_emits_error() {
        let bus = EventBus::new();
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        bus.subscribe(move |event| {
            if let SearchEvent::Error { query, .. } = event {
                sink.lock().unwrap().push(query.clone());
            }
        });

        let store = IndexStore::spawn(
            client("http://127.0.0.1:19999"),
            "/search-index.json".to_string(),
            bus,
        );

        let state = store.settled().await;
        assert!(matches!(state, IndexState::Failed(_)));
        assert!(!store.is_ready());

        // Load-time error events carry no query.
        let errors = errors.lock().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0], None);
    }

    #[tokio::test]
    async fn test_parse_failure_is_terminal_failed_state() {
        let base_url = serve_body("this is not json").await;
        let store = IndexStore::spawn(
            client(&base_url),
            "/search-index.json".to_string(),
            EventBus::new(),
        );

        match store.settled().await {
            IndexState::Failed(err) => {
                assert!(matches!(*err, LoadError::Parse { .. }), "got: {err}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_is_ready_false_while_loading() {
        let store = IndexStore::preloaded(IndexState::Loading);
        assert!(!store.is_ready());
        assert!(matches!(store.snapshot(), IndexState::Loading));
    }
}
