use std::time::Duration;

use thiserror::Error;

/// Failures reported by a [`crate::BrowserDriver`] implementation.
///
/// Element absence is not an error; lookups report it as
/// [`crate::Lookup::Absent`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("timed out after {}s waiting for \"{selector}\"", waited.as_secs())]
    Timeout { selector: String, waited: Duration },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("script execution failed: {0}")]
    Script(String),

    #[error("element is no longer attached to the document")]
    StaleElement,

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("browser error: {0}")]
    Browser(String),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("pagination limit reached for {category}: exceeded {max_pages} pages")]
    PaginationLimit { category: String, max_pages: u32 },
}
