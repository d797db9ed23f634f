//! Capability contract over a browser-automation driver.
//!
//! The listing engine only needs a handful of primitives: navigate, run a
//! script, wait for a selector, and query elements globally or scoped to an
//! element. [`crate::ChromeSession`] implements this over Chromium via CDP;
//! [`crate::testing::FakeDriver`] implements it over an in-memory page table.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;
use crate::lookup::Lookup;

/// A handle to one DOM element on the currently loaded page.
#[async_trait]
pub trait ElementHandle: Send + Sync + Sized {
    /// Finds the first descendant matching `selector`, never searching
    /// outside this element.
    async fn find_scoped(&self, selector: &str) -> Result<Lookup<Self>, DriverError>;

    /// Rendered text content.
    async fn text(&self) -> Result<String, DriverError>;

    async fn attribute(&self, name: &str) -> Result<Lookup<String>, DriverError>;
}

/// A controlled browser tab.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    type Element: ElementHandle;

    async fn navigate(&self, url: &str) -> Result<(), DriverError>;

    async fn execute_script(&self, script: &str) -> Result<(), DriverError>;

    /// Resolves once at least one element matches `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Timeout`] if nothing matches before `deadline`.
    async fn wait_for_presence(&self, selector: &str, deadline: Duration)
        -> Result<(), DriverError>;

    /// All elements matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, DriverError>;

    /// First element matching `selector` on the page.
    async fn find(&self, selector: &str) -> Result<Lookup<Self::Element>, DriverError> {
        let first = self.find_all(selector).await?.into_iter().next();
        Ok(Lookup::from(first))
    }
}
