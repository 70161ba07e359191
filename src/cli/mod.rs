mod completions;
mod init;
mod search;
mod serve;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rummage")]
#[command(about = "Query a static site's published search index")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Show detailed output
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default rummage.toml
    Init(init::InitArgs),

    /// Search the site's index
    Search(search::SearchArgs),

    /// Report index availability and size
    Status(status::StatusArgs),

    /// Serve a built site directory locally
    Serve(serve::ServeArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let output = OutputConfig {
            json: self.json,
            quiet: self.quiet,
            verbose: self.verbose,
        };

        match self.command {
            Commands::Init(args) => init::run(args, output),
            Commands::Search(args) => search::run(args, output).await,
            Commands::Status(args) => status::run(args, output).await,
            Commands::Serve(args) => serve::run(args, output).await,
            Commands::Completions(args) => {
                completions::run(args);
                Ok(())
            }
        }
    }
}

/// Output configuration passed to all commands
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}

/// Resolve configuration for a command, with `--url` taking precedence
/// over any config file.
fn resolve_config(path: Option<&std::path::Path>, url: Option<&str>) -> Result<crate::config::Config> {
    let mut config = crate::config::Config::resolve(path)?;
    if let Some(url) = url {
        config.site.url = url.to_string();
    }
    Ok(config)
}
