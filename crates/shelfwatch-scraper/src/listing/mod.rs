//! Listing-page engine: load a page, read its tiles, check for a next page.

mod category_loop;
mod next_page;

use shelfwatch_core::ScrapeTimings;

use crate::driver::BrowserDriver;
use crate::error::{DriverError, ScraperError};
use crate::selectors;
use crate::types::PageLoadResult;

/// Drives one browser tab across a storefront's category listings.
///
/// Borrows the driver for its whole lifetime: pages are loaded strictly one
/// at a time, and [`Self::has_next_page`] only reflects the page left by the
/// most recent [`Self::load_page`].
pub struct ListingScraper<'a, D: BrowserDriver> {
    driver: &'a D,
    base_url: String,
    timings: ScrapeTimings,
    /// Hard cap on pages per category. Guards against a next-page control
    /// that never disappears.
    max_pages: u32,
}

impl<'a, D: BrowserDriver> ListingScraper<'a, D> {
    #[must_use]
    pub fn new(driver: &'a D, base_url: &str, timings: ScrapeTimings, max_pages: u32) -> Self {
        Self {
            driver,
            base_url: base_url.trim_end_matches('/').to_owned(),
            timings,
            max_pages: max_pages.max(1),
        }
    }

    /// Navigates to `url`, scrolls to trigger lazy tiles, and waits for the
    /// product grid.
    ///
    /// `is_first_page` adds the first-page settle delay before scrolling.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Driver`] if navigation, the scroll script, or
    /// the element query fails. A readiness timeout is not an error; it is
    /// reported as [`PageLoadResult::Timeout`].
    pub async fn load_page(
        &self,
        url: &str,
        is_first_page: bool,
    ) -> Result<PageLoadResult<D::Element>, ScraperError> {
        tracing::info!(url, "scraping page");
        self.driver.navigate(url).await?;

        if is_first_page && !self.timings.first_page_settle.is_zero() {
            tracing::info!(
                delay_ms = self.timings.first_page_settle.as_millis(),
                "waiting extra time for the first page to fully load"
            );
            tokio::time::sleep(self.timings.first_page_settle).await;
        }

        self.driver
            .execute_script(selectors::SCROLL_TO_BOTTOM_JS)
            .await?;
        if !self.timings.scroll_settle.is_zero() {
            tokio::time::sleep(self.timings.scroll_settle).await;
        }

        match self
            .driver
            .wait_for_presence(selectors::PRODUCT_ITEM, self.timings.ready_timeout)
            .await
        {
            Ok(()) => tracing::debug!(url, "product elements loaded"),
            Err(DriverError::Timeout { waited, .. }) => {
                tracing::error!(
                    url,
                    waited_secs = waited.as_secs(),
                    "timeout waiting for page to load"
                );
                return Ok(PageLoadResult::Timeout);
            }
            Err(e) => return Err(e.into()),
        }

        let items = self.driver.find_all(selectors::PRODUCT_ITEM).await?;
        if items.is_empty() {
            tracing::warn!(url, "no products found on page");
            return Ok(PageLoadResult::Empty);
        }

        tracing::info!(url, count = items.len(), "found products on page");
        Ok(PageLoadResult::Success(items))
    }
}
