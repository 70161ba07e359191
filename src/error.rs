use thiserror::Error;

/// Failure to load the search index.
///
/// Terminal for the engine instance that hit it: there is no retry, and
/// every subsequent query is answered with an `error` event carrying this
/// cause. A new engine must be constructed to attempt another load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request never produced a response (connection, DNS, timeout).
    #[error("failed to fetch search index from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("search index request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body was not a valid index document.
    #[error("failed to parse search index from {url}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
