use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tower_http::services::ServeDir;

/// A temporary built-site directory served over HTTP on an ephemeral port
/// for the lifetime of the fixture.
pub struct TestSite {
    dir: TempDir,
    addr: SocketAddr,
    _runtime: tokio::runtime::Runtime,
}

impl TestSite {
    /// Serve a site whose published index is the given JSON payload.
    pub fn start(index_json: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::write(dir.path().join("search-index.json"), index_json)
            .expect("failed to write index fixture");
        Self::serve(dir)
    }

    /// Serve a site directory with no published index; fetches get a 404.
    pub fn start_without_index() -> Self {
        Self::serve(TempDir::new().expect("failed to create temp dir"))
    }

    fn serve(dir: TempDir) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("failed to build runtime");

        let root = dir.path().to_path_buf();
        let addr = runtime.block_on(async move {
            let app = axum::Router::new().fallback_service(ServeDir::new(root));
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("failed to bind fixture server");
            let addr = listener.local_addr().expect("no local addr");
            tokio::spawn(async move {
                let _ = axum::serve(listener, app).await;
            });
            addr
        });

        Self {
            dir,
            addr,
            _runtime: runtime,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// A base URL nothing listens on; every fetch fails fast.
pub fn dead_site_url() -> String {
    "http://127.0.0.1:19999".to_string()
}

/// The two-page music site used throughout the scoring tests.
pub fn music_index() -> String {
    serde_json::json!({
        "pages": [
            {"title": "About Joe Mizzi", "url": "/about/", "content": "musician"},
            {"title": "Home", "url": "/", "content": "Joe Mizzi fan page"}
        ]
    })
    .to_string()
}

/// An index with `count` pages all containing the same terms.
pub fn repeated_index(count: usize) -> String {
    let pages: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "title": format!("Page {i}"),
                "url": format!("/p{i}/"),
                "content": "Joe Mizzi content here"
            })
        })
        .collect();
    serde_json::json!({ "pages": pages }).to_string()
}

/// Path to the rummage binary built by cargo.
pub fn rummage_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rummage"))
}
