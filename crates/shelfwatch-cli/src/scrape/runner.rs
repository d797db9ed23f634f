use std::path::PathBuf;

use shelfwatch_core::{AppConfig, CategoryConfig, ProductRecord, RunMode};
use shelfwatch_scraper::{BrowserDriver, CategoryRun, ListingScraper};
use tracing::Instrument;
use uuid::Uuid;

/// Aggregated results of one scrape run.
#[derive(Debug, Default)]
pub(crate) struct RunTotals {
    /// Records written across all categories.
    pub products: usize,
    pub categories: usize,
    pub failed: usize,
}

impl RunTotals {
    pub(crate) fn all_failed(&self) -> bool {
        self.categories > 0 && self.failed == self.categories
    }
}

/// Scrapes `categories` in order on `driver`, writing each category's CSV as
/// soon as it finishes.
///
/// A category counts as failed when its file cannot be written, or when it
/// stopped early without producing a single record.
pub(crate) async fn run_categories<D: BrowserDriver>(
    driver: &D,
    config: &AppConfig,
    categories: &[CategoryConfig],
    mode: RunMode,
) -> RunTotals {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("scrape_run", %run_id);
    run_categories_inner(driver, config, categories, mode)
        .instrument(span)
        .await
}

async fn run_categories_inner<D: BrowserDriver>(
    driver: &D,
    config: &AppConfig,
    categories: &[CategoryConfig],
    mode: RunMode,
) -> RunTotals {
    let scraper = ListingScraper::new(driver, &config.base_url, config.timings, config.max_pages);
    let mut totals = RunTotals {
        categories: categories.len(),
        ..RunTotals::default()
    };

    tracing::info!(categories = categories.len(), ?mode, "starting scrape run");

    for category in categories {
        let run = scraper.scrape_category(category, mode).await;
        let stopped_empty = !run.termination.is_exhausted() && run.records.is_empty();

        match flush(config, &run, mode) {
            Ok(path) => {
                totals.products += run.records.len();
                tracing::debug!(
                    category = %run.category,
                    path = %path.display(),
                    "category flushed"
                );
                if stopped_empty {
                    tracing::error!(
                        category = %run.category,
                        label = run.display_name(),
                        termination = %run.termination,
                        "category produced no records"
                    );
                    totals.failed += 1;
                }
            }
            Err(e) => {
                tracing::error!(
                    category = %run.category,
                    label = run.display_name(),
                    error = %e,
                    "failed to write category output"
                );
                totals.failed += 1;
            }
        }
    }

    tracing::info!(
        products = totals.products,
        categories = totals.categories,
        failed = totals.failed,
        "scrape run finished"
    );
    totals
}

fn flush(
    config: &AppConfig,
    run: &CategoryRun,
    mode: RunMode,
) -> Result<PathBuf, shelfwatch_export::ExportError> {
    shelfwatch_export::write_category_csv(
        &config.output_dir,
        &run.category,
        mode,
        &run.records,
        ProductRecord::now(),
    )
}
