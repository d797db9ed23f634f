mod logging;
mod scrape;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "shelfwatch-cli")]
#[command(about = "Storefront category listing scraper")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape category listings and write one CSV file per category
    Scrape {
        /// Scrape a single category (by slug); omits the Category column
        #[arg(long)]
        category: Option<String>,

        /// Print the first listing URL per category without launching a browser
        #[arg(long)]
        dry_run: bool,
    },
    /// List the configured categories
    Categories,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shelfwatch_core::load_app_config()?;
    if let Some(path) = logging::init(&config)? {
        tracing::info!(path = %path.display(), "writing log file");
    }
    tracing::debug!(env = %config.env, base_url = %config.base_url, "configuration loaded");

    match cli.command {
        Some(Commands::Scrape { category, dry_run }) => {
            scrape::run_scrape(&config, category.as_deref(), dry_run).await?;
        }
        Some(Commands::Categories) => scrape::list_categories(&config)?,
        None => println!("shelfwatch-cli: run `shelfwatch-cli --help` for commands"),
    }

    Ok(())
}
