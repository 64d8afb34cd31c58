//! musinsa-crawler - Ranking page crawler for Musinsa categories
//!
//! Picks a category, crawls its full infinite-scroll ranking and prints or
//! saves the products as a flat table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use musinsa_crawler::commands::CrawlCommand;
use musinsa_crawler::config::{Config, OutputFormat};
use musinsa_crawler::musinsa::Category;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "musinsa-crawler",
    version,
    about = "Crawl Musinsa category rankings into a flat table",
    long_about = "Renders a Musinsa category ranking in headless Chrome, scrolls until every item has loaded, and exports image, name, price and brand for each product."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Pause after each scroll in milliseconds
    #[arg(long, global = true)]
    settle_ms: Option<u64>,

    /// Maximum number of scrolls before giving up on the page settling
    #[arg(long, global = true)]
    max_scrolls: Option<usize>,

    /// Chrome/Chromium executable
    #[arg(long, global = true)]
    chrome_path: Option<PathBuf>,

    /// Show the browser window
    #[arg(long, global = true)]
    headful: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl one category ranking
    #[command(alias = "c")]
    Crawl {
        /// Category label, e.g. 신발 (see `categories`)
        category: String,

        /// Save records as CSV to this file instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List supported categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(settle_ms) = cli.settle_ms {
        config.settle_ms = settle_ms;
    }
    if let Some(max_scrolls) = cli.max_scrolls {
        config.max_scrolls = max_scrolls;
    }
    if let Some(path) = cli.chrome_path {
        config.chrome_path = Some(path);
    }
    if cli.headful {
        config.headless = false;
    }

    match cli.command {
        Commands::Crawl { category, output } => {
            let cmd = CrawlCommand::new(config, output);
            let output = cmd.execute(&category).await?;
            println!("{}", output);
        }

        Commands::Categories => {
            println!("Supported categories:\n");
            println!("{:<16} {:<8}", "Label", "Code");
            println!("{:-<16} {:-<8}", "", "");

            for category in Category::all() {
                println!("{:<16} {:<8}", category.label(), category.code().as_str());
            }
        }
    }

    Ok(())
}
