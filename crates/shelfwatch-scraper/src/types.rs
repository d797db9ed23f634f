use shelfwatch_core::ProductRecord;

/// Outcome of loading one listing page.
#[derive(Debug)]
pub enum PageLoadResult<E> {
    /// Product tiles in document order. Never empty.
    Success(Vec<E>),
    /// The page rendered but holds no product tiles.
    Empty,
    /// No product tile appeared before the readiness deadline.
    Timeout,
}

/// Page-level load failures that end a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    Timeout,
    Empty,
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadFailure::Timeout => write!(f, "timeout"),
            LoadFailure::Empty => write!(f, "empty"),
        }
    }
}

/// Why a category stopped paginating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The last scraped page had no next-page control.
    Exhausted,
    /// `page` failed to load; earlier pages' records are kept.
    LoadFailure { page: u32, failure: LoadFailure },
    /// The driver failed outside the readiness wait, or the page guard tripped.
    Aborted { page: u32, reason: String },
}

impl TerminationReason {
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, TerminationReason::Exhausted)
    }

    /// The load failure behind this termination, if any.
    #[must_use]
    pub fn load_failure(&self) -> Option<LoadFailure> {
        match self {
            TerminationReason::LoadFailure { failure, .. } => Some(*failure),
            _ => None,
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Exhausted => write!(f, "exhausted"),
            TerminationReason::LoadFailure { page, failure } => {
                write!(f, "load failure ({failure}) on page {page}")
            }
            TerminationReason::Aborted { page, reason } => {
                write!(f, "aborted on page {page}: {reason}")
            }
        }
    }
}

/// Result of scraping one category: everything collected plus why it stopped.
#[derive(Debug, Clone)]
pub struct CategoryRun {
    /// Category slug.
    pub category: String,
    /// Human-readable category name, when configured.
    pub label: Option<String>,
    pub records: Vec<ProductRecord>,
    /// Every page number requested, in request order.
    pub pages_requested: Vec<u32>,
    /// Items skipped because reading them failed mid-extraction.
    pub skipped_items: usize,
    pub termination: TerminationReason,
}

impl CategoryRun {
    /// Highest page number requested (the page the loop stopped on).
    #[must_use]
    pub fn last_page(&self) -> u32 {
        self.pages_requested.last().copied().unwrap_or(1)
    }

    /// The configured label, or the slug when none is set.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.category)
    }
}
