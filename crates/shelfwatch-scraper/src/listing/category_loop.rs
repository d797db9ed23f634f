use shelfwatch_core::{CategoryConfig, ProductRecord, RunMode};
use tracing::Instrument;

use crate::driver::BrowserDriver;
use crate::error::ScraperError;
use crate::extract::extract_product;
use crate::types::{CategoryRun, LoadFailure, PageLoadResult, TerminationReason};

use super::ListingScraper;

impl<D: BrowserDriver> ListingScraper<'_, D> {
    /// Scrapes every listing page of `category`, starting at page 1.
    ///
    /// Pages are requested in order and the page number only advances after
    /// a page was scraped and a next-page control was seen on it. The first
    /// load failure (`Timeout`/`Empty`) or driver error ends the category;
    /// failed pages are never retried. Records from earlier pages are always
    /// returned, whatever the termination reason.
    ///
    /// Unreadable tiles are logged and skipped without affecting the rest of
    /// the page.
    pub async fn scrape_category(&self, category: &CategoryConfig, mode: RunMode) -> CategoryRun {
        let span = tracing::info_span!("category", category = %category.slug);
        self.scrape_category_inner(category, mode)
            .instrument(span)
            .await
    }

    async fn scrape_category_inner(&self, category: &CategoryConfig, mode: RunMode) -> CategoryRun {
        tracing::info!(label = category.display_name(), "starting scraping for category");

        let record_category = mode.record_category(category);
        let mut records: Vec<ProductRecord> = Vec::new();
        let mut pages_requested: Vec<u32> = Vec::new();
        let mut skipped_items = 0usize;
        let mut page: u32 = 1;

        let termination = loop {
            if page > self.max_pages {
                let err = ScraperError::PaginationLimit {
                    category: category.slug.clone(),
                    max_pages: self.max_pages,
                };
                tracing::error!(page, error = %err, "scraping aborted for category");
                break TerminationReason::Aborted {
                    page,
                    reason: err.to_string(),
                };
            }

            let url = category.page_url(&self.base_url, page);
            pages_requested.push(page);

            let items = match self.load_page(&url, page == 1).await {
                Ok(PageLoadResult::Success(items)) => items,
                Ok(PageLoadResult::Timeout) => {
                    tracing::error!(page, "scraping aborted for category: page load timed out");
                    break TerminationReason::LoadFailure {
                        page,
                        failure: LoadFailure::Timeout,
                    };
                }
                Ok(PageLoadResult::Empty) => {
                    tracing::error!(page, "scraping aborted for category: page has no products");
                    break TerminationReason::LoadFailure {
                        page,
                        failure: LoadFailure::Empty,
                    };
                }
                Err(e) => {
                    tracing::error!(page, error = %e, "scraping aborted for category");
                    break TerminationReason::Aborted {
                        page,
                        reason: e.to_string(),
                    };
                }
            };

            for (index, item) in items.iter().enumerate() {
                match extract_product(item, &record_category).await {
                    Ok(record) => {
                        tracing::debug!(name = %record.name, "scraped product");
                        records.push(record);
                    }
                    Err(e) => {
                        tracing::error!(
                            page,
                            index,
                            error = %e,
                            "error retrieving product data; skipping item"
                        );
                        skipped_items += 1;
                    }
                }
            }

            if !self.has_next_page().await {
                tracing::info!(page, "last page reached for category");
                break TerminationReason::Exhausted;
            }

            page += 1;
            tracing::debug!(page, "moving to next page");
        };

        tracing::info!(
            records = records.len(),
            pages = pages_requested.len(),
            skipped_items,
            termination = %termination,
            "finished category"
        );

        CategoryRun {
            category: category.slug.clone(),
            label: category.label.clone(),
            records,
            pages_requested,
            skipped_items,
            termination,
        }
    }
}
