use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::OutputConfig;

#[derive(Args)]
pub struct ServeArgs {
    /// Built site directory to serve (defaults to current directory)
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Port to listen on (0 picks an ephemeral port)
    #[arg(long, default_value = "1313")]
    port: u16,
}

/// Serve a built site directory over HTTP so its published search index
/// can be fetched locally (for previewing and integration tests).
pub async fn run(args: ServeArgs, output: OutputConfig) -> Result<()> {
    let root = args
        .dir
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", args.dir.display()))?;

    let app = axum::Router::new()
        .fallback_service(ServeDir::new(&root))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    let addr = listener.local_addr().context("Failed to read bound address")?;

    tracing::info!("serving {} on {}", root.display(), addr);
    if !output.quiet && !output.json {
        println!(
            "{} Serving {} at {}",
            "✓".green(),
            root.display(),
            format!("http://{addr}").cyan()
        );
    }

    axum::serve(listener, app).await.context("HTTP server error")
}
