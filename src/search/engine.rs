//! The query engine: guard ladder, ranking pipeline, and event dispatch.

use tracing::debug;

use crate::config::Config;
use crate::events::{EventBus, SearchEvent};
use crate::fetch::IndexClient;
use crate::index::{IndexState, IndexStore};
use crate::search::score;
use crate::types::{ScoredDocument, SearchIndex};

/// Maximum number of results reported for one query.
pub const MAX_RESULTS: usize = 20;

/// Event-driven search over a site's published index.
///
/// Construction starts the one index fetch; queries can be issued
/// immediately and are answered against whatever state the store is in.
/// Every `search()` call dispatches exactly one event before returning.
pub struct SearchEngine {
    store: IndexStore,
    bus: EventBus,
}

impl SearchEngine {
    /// Build an engine for the configured site and start fetching its
    /// index. Must be called from within a tokio runtime.
    pub fn connect(config: &Config) -> Self {
        let bus = EventBus::new();
        let client = IndexClient::new(&config.site.url, config.fetch.timeout());
        let store = IndexStore::spawn(client, config.site.index_path.clone(), bus.clone());
        Self { store, bus }
    }

    /// Register a callback for every event this engine emits.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&SearchEvent) + Send + Sync + 'static,
    {
        self.bus.subscribe(callback);
    }

    /// True iff the index loaded successfully. Never blocks.
    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    /// Wait until the index load has finished, one way or the other.
    pub async fn settled(&self) -> IndexState {
        self.store.settled().await
    }

    /// Answer a query with exactly one event.
    ///
    /// A blank query is a successful no-op: it yields an empty `results`
    /// event in every index state. Otherwise the outcome depends on the
    /// store: `loading` while the fetch is in flight, `error` after a
    /// failed load, and `results`/`no-results` against a ready index.
    pub fn search(&self, query: &str) {
        if query.trim().is_empty() {
            self.bus.emit(&SearchEvent::Results {
                query: query.to_string(),
                results: Vec::new(),
            });
            return;
        }

        match self.store.snapshot() {
            IndexState::Loading => {
                self.bus.emit(&SearchEvent::Loading {
                    query: query.to_string(),
                });
            }
            IndexState::Failed(error) => {
                self.bus.emit(&SearchEvent::Error {
                    error,
                    query: Some(query.to_string()),
                });
            }
            IndexState::Ready(index) => {
                let results = rank(&index, query);
                debug!(query, results = results.len(), "query answered");
                if results.is_empty() {
                    self.bus.emit(&SearchEvent::NoResults {
                        query: query.to_string(),
                    });
                } else {
                    self.bus.emit(&SearchEvent::Results {
                        query: query.to_string(),
                        results,
                    });
                }
            }
        }
    }

    /// Build an engine over a fixed store state, skipping the fetch.
    #[cfg(test)]
    fn with_state(state: IndexState) -> Self {
        Self {
            store: IndexStore::preloaded(state),
            bus: EventBus::new(),
        }
    }
}

/// Score every document, keep positive scores, sort, truncate.
///
/// The sort is stable and the comparison is on the integer score alone, so
/// equal scores keep their original index order.
pub fn rank(index: &SearchIndex, query: &str) -> Vec<ScoredDocument> {
    let terms = score::tokenize(query);

    let mut results: Vec<ScoredDocument> = index
        .pages
        .iter()
        .filter_map(|page| {
            let score = score::score_document(page, &terms);
            (score > 0).then(|| ScoredDocument {
                document: page.clone(),
                score,
            })
        })
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(MAX_RESULTS);
    results
}
