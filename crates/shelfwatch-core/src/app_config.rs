use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Fixed waits applied around each page load.
///
/// These are empirical allowances for the storefront's render behavior,
/// not correctness requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeTimings {
    /// Extra wait after navigating to page 1 of a category (session warm-up).
    pub first_page_settle: Duration,
    /// Wait after the full-height scroll that triggers lazy-loaded tiles.
    pub scroll_settle: Duration,
    /// Deadline for the first product tile to appear.
    pub ready_timeout: Duration,
}

impl Default for ScrapeTimings {
    fn default() -> Self {
        Self {
            first_page_settle: Duration::from_millis(5000),
            scroll_settle: Duration::from_millis(2000),
            ready_timeout: Duration::from_secs(15),
        }
    }
}

impl ScrapeTimings {
    /// All-zero timings with the given readiness deadline. Used by tests and
    /// fake drivers where no real rendering happens.
    #[must_use]
    pub fn immediate(ready_timeout: Duration) -> Self {
        Self {
            first_page_settle: Duration::ZERO,
            scroll_settle: Duration::ZERO,
            ready_timeout,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
    pub base_url: String,
    pub categories_path: PathBuf,
    pub output_dir: PathBuf,
    pub chrome_path: Option<PathBuf>,
    pub headless: bool,
    pub timings: ScrapeTimings,
    pub max_pages: u32,
}
