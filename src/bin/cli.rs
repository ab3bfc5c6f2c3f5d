//! Ordinals CLI
//!
//! Command-line interface for the inscription dashboard:
//! - Print the recent inscriptions table
//! - Print the charts as text bars
//! - Export `inscriptions.csv` and `images.zip`
//! - Render the dashboard page to an HTML file

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use ordinals_dashboard::config::{generate_default_config, Config};
use ordinals_dashboard::dashboard::{render_charts_text, render_html, render_text, Dashboard, Page};
use ordinals_dashboard::export::{build_image_archive, encode_csv, ARCHIVE_FILENAME, CSV_FILENAME};
use ordinals_dashboard::logging;
use ordinals_dashboard::source::{fetch_inscriptions, HttpSource};

#[derive(Parser)]
#[command(name = "ordinals")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Most viewed Ordinals inscriptions of the last 24 hours")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Feed URL (default: configured source URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print recent inscriptions, most viewed first
    Show {
        /// Maximum rows to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the views histogram, top list and categories
    Charts,

    /// Write inscriptions.csv and images.zip
    Export {
        /// Output directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Skip fetching images
        #[arg(long)]
        no_images: bool,
    },

    /// Render the dashboard page to an HTML file
    Render {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_or_print(output.as_deref(), &generate_default_config());
    }

    let config = Config::resolve(cli.config.as_deref()).context("Failed to load config")?;
    logging::init(&config.logging);

    let url = cli
        .url
        .clone()
        .unwrap_or_else(|| config.source.default_url.clone());
    let source = HttpSource::new(&config.source).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::Show { limit } => {
            let outcome = fetch_inscriptions(&source, &url).await;
            let dashboard = Dashboard::build(&url, &outcome, &config.dashboard, Utc::now());
            print!("{}", render_text(&dashboard, limit));
        }

        Commands::Charts => {
            let outcome = fetch_inscriptions(&source, &url).await;
            let dashboard = Dashboard::build(&url, &outcome, &config.dashboard, Utc::now());
            print!("{}", render_charts_text(&dashboard));
        }

        Commands::Export { dir, no_images } => {
            let outcome = fetch_inscriptions(&source, &url).await;
            let dashboard = Dashboard::build(&url, &outcome, &config.dashboard, Utc::now());

            if let Some(notice) = &dashboard.notice {
                eprintln!("Error: {}", notice);
            }
            if dashboard.recent.is_empty() {
                println!("{}", dashboard.status_message());
                println!("Nothing to export");
                return Ok(());
            }

            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory {:?}", dir))?;

            let csv_path = dir.join(CSV_FILENAME);
            let csv = encode_csv(&dashboard.recent)?;
            std::fs::write(&csv_path, csv)
                .with_context(|| format!("Failed to write {:?}", csv_path))?;
            println!("Wrote {} rows to {:?}", dashboard.recent.len(), csv_path);

            if !no_images {
                let archive = build_image_archive(&source, &dashboard.recent).await?;
                let zip_path = dir.join(ARCHIVE_FILENAME);
                std::fs::write(&zip_path, &archive.bytes)
                    .with_context(|| format!("Failed to write {:?}", zip_path))?;
                println!(
                    "Wrote {} images to {:?}",
                    archive.included.len(),
                    zip_path
                );
                for skipped in &archive.skipped {
                    eprintln!("  skipped #{} {}: {}", skipped.index, skipped.url, skipped.reason);
                }
            }
        }

        Commands::Render { output } => {
            let page = Page::load(&source, &url, &config.dashboard, Utc::now()).await?;
            write_or_print(output.as_deref(), &render_html(&page))?;
        }

        Commands::Config { .. } => unreachable!("handled before config is loaded"),
    }

    Ok(())
}

fn write_or_print(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create directory {:?}", parent))?;
                }
            }
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            println!("Written to {:?}", path);
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
