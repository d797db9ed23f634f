//! `scrape` and `categories` command handlers.
//!
//! Categories run strictly one after another on a single browser tab. A
//! category that times out, comes back empty, or cannot be written is
//! logged and counted; it never stops the remaining categories.

mod runner;

use shelfwatch_core::{AppConfig, CategoriesFile, CategoryConfig, RunMode};
use shelfwatch_scraper::{ChromeSession, LaunchOptions};

use runner::run_categories;

/// Resolves the categories to scrape and the output mode.
///
/// No filter selects every configured category in multi-category mode. A
/// filter selects exactly that category in single-category mode.
pub(crate) fn select_categories(
    file: &CategoriesFile,
    category_filter: Option<&str>,
) -> anyhow::Result<(Vec<CategoryConfig>, RunMode)> {
    match category_filter {
        Some(slug) => {
            let category = file
                .find(slug)
                .ok_or_else(|| anyhow::anyhow!("category '{slug}' not found in categories file"))?;
            Ok((vec![category.clone()], RunMode::Single))
        }
        None => Ok((file.categories.clone(), RunMode::Multi)),
    }
}

fn launch_options(config: &AppConfig) -> LaunchOptions {
    LaunchOptions {
        headless: config.headless,
        chrome_path: config.chrome_path.clone(),
        ..LaunchOptions::default()
    }
}

/// Scrapes the selected categories and writes one CSV per category.
///
/// When `dry_run` is `true`, prints each category's first listing URL and
/// returns without launching a browser.
///
/// # Errors
///
/// Returns an error if the categories file cannot be loaded, the filter
/// names an unknown category, the browser cannot be launched, or every
/// category failed.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    category_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let file = shelfwatch_core::load_categories(&config.categories_path)?;
    let (categories, mode) = select_categories(&file, category_filter)?;

    if dry_run {
        println!(
            "dry-run: would scrape {} categories into {}",
            categories.len(),
            config.output_dir.display()
        );
        for category in &categories {
            println!("  {:<20} {}", category.slug, category.page_url(&config.base_url, 1));
        }
        return Ok(());
    }

    let session = ChromeSession::launch(&launch_options(config)).await?;
    let totals = run_categories(&session, config, &categories, mode).await;
    if let Err(e) = session.close().await {
        tracing::warn!(error = %e, "browser did not shut down cleanly");
    }

    println!(
        "scraped {} products across {} categories",
        totals.products, totals.categories
    );

    if totals.failed > 0 {
        tracing::warn!(
            failed_categories = totals.failed,
            total_categories = totals.categories,
            "some categories failed"
        );
    }
    if totals.all_failed() {
        anyhow::bail!("all {} categories failed", totals.failed);
    }

    Ok(())
}

/// Prints the configured categories, one per line.
///
/// # Errors
///
/// Returns an error if the categories file cannot be loaded.
pub(crate) fn list_categories(config: &AppConfig) -> anyhow::Result<()> {
    let file = shelfwatch_core::load_categories(&config.categories_path)?;
    for category in &file.categories {
        println!("{:<20} {}", category.slug, category.display_name());
    }
    println!("{} categories", file.categories.len());
    Ok(())
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
