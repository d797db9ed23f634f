pub mod chrome;
pub mod driver;
pub mod error;
pub mod extract;
pub mod listing;
pub mod lookup;
pub mod selectors;
pub mod testing;
pub mod types;

pub use chrome::{ChromeElement, ChromeSession, LaunchOptions};
pub use driver::{BrowserDriver, ElementHandle};
pub use error::{DriverError, ScraperError};
pub use extract::extract_product;
pub use listing::ListingScraper;
pub use lookup::Lookup;
pub use types::{CategoryRun, LoadFailure, PageLoadResult, TerminationReason};
