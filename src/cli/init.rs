use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::OutputConfig;
use crate::config::Config;

#[derive(Args)]
pub struct InitArgs {
    /// Directory to write rummage.toml into (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Site base URL to record in the config
    #[arg(long)]
    url: Option<String>,

    /// Overwrite existing configuration
    #[arg(long)]
    force: bool,
}

#[derive(Serialize)]
struct InitOutput {
    status: String,
    config: String,
}

pub fn run(args: InitArgs, output: OutputConfig) -> Result<()> {
    let root = args
        .path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", args.path.display()))?;

    let config_path = root.join(Config::FILE_NAME);

    if config_path.exists() && !args.force {
        if output.json {
            let json_output = InitOutput {
                status: "already_initialized".to_string(),
                config: config_path.display().to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&json_output)?);
            return Ok(());
        }
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    let mut config = Config::default();
    if let Some(url) = args.url {
        config.site.url = url;
    }
    config.save(&config_path)?;

    if output.json {
        let json_output = InitOutput {
            status: "initialized".to_string(),
            config: config_path.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&json_output)?);
    } else if !output.quiet {
        println!(
            "{} Config written to {}",
            "✓".green(),
            config_path.display()
        );
        println!("  Site: {}", config.site.url.cyan());
        println!("\nNext steps:");
        println!("  {} to check the index", "rummage status".cyan());
        println!("  {} to search it", "rummage search <query>".cyan());
    }

    Ok(())
}
