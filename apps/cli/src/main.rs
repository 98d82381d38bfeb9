use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{config, ArtworkSource, HttpArtworkSource};
use shared::error::FetchException;
use tracing_subscriber::EnvFilter;

mod render;
mod session;

#[derive(Parser, Debug)]
#[command(name = "artwork_cli", about = "Browse the public artwork listing")]
struct Args {
    /// Listing endpoint; overrides artworks.toml and the environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    page_size: Option<u32>,
    /// Settings file to read instead of ./artworks.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one page and print it.
    Page {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        #[arg(long)]
        json: bool,
    },
    /// Interactive session with a selection that persists across pages.
    Browse {
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => config::load_settings_at(path),
        None => config::load_settings(),
    };
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    tracing::debug!(?settings, "resolved settings");

    let source = HttpArtworkSource::from_settings(&settings)
        .context("failed to build artwork source")?;
    tracing::debug!(base_url = %source.base_url(), "artwork source ready");

    match args.command {
        Command::Page { page, json } => print_page(&source, page, settings.page_size, json).await,
        Command::Browse { page } => session::run(&source, settings.page_size, page).await,
    }
}

async fn print_page(
    source: &dyn ArtworkSource,
    page: u32,
    page_size: u32,
    json: bool,
) -> Result<()> {
    let result = match source.fetch_page(page, page_size).await {
        Ok(result) => result,
        Err(err) => {
            let failure = err.to_failure(page);
            if json {
                println!("{}", serde_json::to_string_pretty(&failure)?);
            }
            return Err(FetchException::from(failure).into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::page_table(&result.records, |_| None));
        println!(
            "page {} of {} ({} records)",
            result.current_page, result.total_pages, result.total
        );
    }
    Ok(())
}
