use serde::{Deserialize, Serialize};

/// One searchable page from the site's published index.
///
/// Immutable once loaded; owned by the index store for the lifetime of the
/// engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    pub content: String,
}

/// The full document collection, loaded wholesale from the site's published
/// index artifact. Either fully present or entirely absent; no partial
/// index is ever observable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchIndex {
    pub pages: Vec<Document>,
}

/// A document annotated with its relevance score for one query.
///
/// Transient: recomputed per query, never cached across queries. Only
/// documents with a positive score are ever reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: u32,
}
