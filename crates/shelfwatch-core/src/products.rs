use chrono::{NaiveDateTime, SubsecRound};

/// Placeholder written when the product-name node is absent.
pub const NO_NAME: &str = "no-name";
/// Placeholder written when the packaging-details node is absent.
pub const NO_WEIGHT: &str = "no-weight";
/// Placeholder written when the price badge is absent.
pub const NO_PROMOTION: &str = "no-promotion";
/// Placeholder written when the info-item node is absent.
pub const NO_PROMOTION_DATE: &str = "no-promotion-date";
/// Placeholder written when the product link, or its `href`, is absent.
pub const NO_URL: &str = "no-url";

/// `strftime` pattern for [`ProductRecord::captured_at`] in exported files.
pub const CAPTURED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One product tile scraped from a category listing page.
///
/// Every field is always populated: an absent DOM node becomes the matching
/// sentinel constant, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    /// Category slug. Empty in single-category runs.
    pub category: String,
    pub name: String,
    /// Weight / volume / pack size text, e.g. `"1 kg"`.
    pub packaging: String,
    pub promotion_label: String,
    pub promotion_validity: String,
    /// Local wall-clock time of extraction, whole seconds.
    pub captured_at: NaiveDateTime,
    pub source_url: String,
}

impl ProductRecord {
    /// A record with every extracted field set to its sentinel.
    #[must_use]
    pub fn placeholder(category: impl Into<String>, captured_at: NaiveDateTime) -> Self {
        Self {
            category: category.into(),
            name: NO_NAME.to_string(),
            packaging: NO_WEIGHT.to_string(),
            promotion_label: NO_PROMOTION.to_string(),
            promotion_validity: NO_PROMOTION_DATE.to_string(),
            captured_at: captured_at.trunc_subsecs(0),
            source_url: NO_URL.to_string(),
        }
    }

    /// Current local time truncated to second precision.
    #[must_use]
    pub fn now() -> NaiveDateTime {
        chrono::Local::now().naive_local().trunc_subsecs(0)
    }

    #[must_use]
    pub fn captured_at_display(&self) -> String {
        self.captured_at.format(CAPTURED_AT_FORMAT).to_string()
    }

    /// `true` when the tile carried a promotion badge.
    #[must_use]
    pub fn is_promoted(&self) -> bool {
        self.promotion_label != NO_PROMOTION
    }

    /// Compares every field except `captured_at`.
    #[must_use]
    pub fn same_content(&self, other: &Self) -> bool {
        self.category == other.category
            && self.name == other.name
            && self.packaging == other.packaging
            && self.promotion_label == other.promotion_label
            && self.promotion_validity == other.promotion_validity
            && self.source_url == other.source_url
    }
}
