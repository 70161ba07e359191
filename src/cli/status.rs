use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::OutputConfig;
use crate::index::IndexState;
use crate::search::SearchEngine;

#[derive(Args)]
pub struct StatusArgs {
    /// Site base URL (overrides the config file)
    #[arg(long, short = 'u')]
    url: Option<String>,

    /// Config file path (defaults to rummage.toml in the working directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Serialize)]
struct StatusOutput {
    status: String,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn run(args: StatusArgs, output: OutputConfig) -> Result<()> {
    let config = super::resolve_config(args.config.as_deref(), args.url.as_deref())?;
    let site_url = config.site.url.clone();

    let engine = SearchEngine::connect(&config);

    match engine.settled().await {
        IndexState::Ready(index) => {
            if output.json {
                let json_output = StatusOutput {
                    status: "ready".to_string(),
                    url: site_url,
                    pages: Some(index.pages.len()),
                    error: None,
                };
                println!("{}", serde_json::to_string_pretty(&json_output)?);
            } else if !output.quiet {
                println!("{} Search index for {}", "✓".green(), site_url.cyan());
                println!();
                println!("  Status: {}", "Ready".green());
                println!("  Pages:  {}", index.pages.len().to_string().cyan());
            }
        }
        IndexState::Failed(err) => {
            if output.json {
                let json_output = StatusOutput {
                    status: "unavailable".to_string(),
                    url: site_url,
                    pages: None,
                    error: Some(err.to_string()),
                };
                println!("{}", serde_json::to_string_pretty(&json_output)?);
            } else if !output.quiet {
                println!(
                    "{} Search index unavailable for {}",
                    "!".yellow(),
                    site_url.cyan()
                );
                println!("  {err}");
            }
        }
        // settled() only reports Loading if the load task died early.
        IndexState::Loading => {
            if output.json {
                let json_output = StatusOutput {
                    status: "loading".to_string(),
                    url: site_url,
                    pages: None,
                    error: None,
                };
                println!("{}", serde_json::to_string_pretty(&json_output)?);
            } else if !output.quiet {
                println!("{} Search index still loading", "!".yellow());
            }
        }
    }

    Ok(())
}
