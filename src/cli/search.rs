use std::path::PathBuf;
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::OutputConfig;
use crate::events::SearchEvent;
use crate::search::SearchEngine;
use crate::types::ScoredDocument;

#[derive(Args)]
pub struct SearchArgs {
    /// The search query
    query: String,

    /// Site base URL (overrides the config file)
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// Config file path (defaults to rummage.toml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of results to display
    #[arg(long, short = 'n', default_value = "20")]
    limit: usize,
}

/// JSON output format for search results
#[derive(Serialize)]
struct SearchOutput {
    query: String,
    outcome: String,
    count: usize,
    results: Vec<SearchResultOutput>,
}

#[derive(Serialize)]
struct SearchResultOutput {
    title: String,
    url: String,
    score: u32,
    excerpt: String,
}

pub async fn run(args: SearchArgs, output: OutputConfig) -> Result<()> {
    let config = super::resolve_config(args.config.as_deref(), args.url.as_deref())?;

    let engine = SearchEngine::connect(&config);

    let (tx, rx) = mpsc::channel();
    engine.subscribe(move |event| {
        let _ = tx.send(event.clone());
    });

    // Wait out the initial load unless it has already settled; a query
    // issued mid-load only comes back as a non-final loading event.
    if !engine.is_ready() {
        engine.settled().await;
    }

    engine.search(&args.query);
    let outcome = next_outcome(&rx, &args.query)?;

    match &outcome {
        SearchEvent::Results { results, .. } => {
            let shown = &results[..results.len().min(args.limit)];
            if output.json {
                print_json_output(&args.query, outcome.name(), shown)?;
            } else if !output.quiet {
                print_human_output(&args.query, shown, output.verbose);
            }
            Ok(())
        }
        SearchEvent::NoResults { .. } => {
            if output.json {
                print_json_output(&args.query, outcome.name(), &[])?;
            } else if !output.quiet {
                println!("{} No results for: {}", "!".yellow(), args.query.cyan());
            }
            Ok(())
        }
        SearchEvent::Error { error, .. } => {
            bail!("search index unavailable: {error}")
        }
        SearchEvent::Loading { .. } => {
            bail!("search index is still loading; try again")
        }
    }
}

/// Block until the engine reports an outcome for `query`.
///
/// Dispatch is synchronous, so the matching event is already queued by the
/// time `search()` returns. Load-time error events carry no query and are
/// skipped.
fn next_outcome(rx: &mpsc::Receiver<SearchEvent>, query: &str) -> Result<SearchEvent> {
    rx.iter()
        .find(|event| event.query() == Some(query))
        .context("engine closed without answering the query")
}

fn print_json_output(query: &str, outcome: &str, results: &[ScoredDocument]) -> Result<()> {
    let output = SearchOutput {
        query: query.to_string(),
        outcome: outcome.to_string(),
        count: results.len(),
        results: results
            .iter()
            .map(|r| SearchResultOutput {
                title: r.document.title.clone(),
                url: r.document.url.clone(),
                score: r.score,
                excerpt: truncate_content(&r.document.content, 200),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_human_output(query: &str, results: &[ScoredDocument], verbose: bool) {
    println!(
        "{} Found {} results for: {}",
        "✓".green(),
        results.len(),
        query.cyan()
    );
    println!();

    for (i, result) in results.iter().enumerate() {
        println!(
            "{}. {} {}",
            (i + 1).to_string().bold(),
            result.document.title.blue(),
            result.document.url.dimmed()
        );
        println!("   score {}", result.score);

        if verbose {
            let excerpt = truncate_content(&result.document.content, 200);
            for line in excerpt.lines().take(3) {
                println!("   {}", line.dimmed());
            }
        }

        println!();
    }
}

fn truncate_content(content: &str, max_len: usize) -> String {
    if content.chars().count() <= max_len {
        content.to_string()
    } else {
        let truncated: String = content.chars().take(max_len).collect();
        format!("{}...", truncated.trim_end())
    }
}
