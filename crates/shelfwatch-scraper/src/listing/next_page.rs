use crate::driver::BrowserDriver;
use crate::lookup::Lookup;
use crate::selectors;

use super::ListingScraper;

impl<D: BrowserDriver> ListingScraper<'_, D> {
    /// Returns `true` if the currently loaded page shows a next-page control.
    ///
    /// Must be called after [`Self::load_page`] for the same page. A driver
    /// error during the lookup is logged and treated as "no next page".
    pub async fn has_next_page(&self) -> bool {
        match self.driver.find(selectors::NEXT_PAGE).await {
            Ok(Lookup::Found(_)) => {
                tracing::debug!("next page button found");
                true
            }
            Ok(Lookup::Absent) => {
                tracing::debug!("no next page button found");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "next page lookup failed; treating as last page");
                false
            }
        }
    }
}
