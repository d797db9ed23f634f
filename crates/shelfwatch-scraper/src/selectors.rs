//! CSS selectors for the storefront's listing markup.

/// One product tile in the listing grid. Its presence is the readiness signal.
pub const PRODUCT_ITEM: &str = ".product-grid__item";

/// Canonical product-name node (class marker plus `itemprop="name"`).
pub const PRODUCT_NAME: &str = r#"div.product-tile__name[itemprop="name"]"#;

pub const PACKAGING_DETAILS: &str = "div.packaging-details";

pub const PROMOTION_LABEL: &str = ".price-tile__label";

/// Generic info-item node. The storefront does not reserve it for promotion
/// dates, so it can carry unrelated info text.
pub const PROMOTION_VALIDITY: &str = ".product-details__info-item";

pub const PRODUCT_LINK: &str = ".js-product-link";

pub const PRODUCT_LINK_ATTR: &str = "href";

pub const NEXT_PAGE: &str = "a.bucket-pagination__icon.bucket-pagination__icon--next";

/// Scrolls to the bottom of the document so lazy-loaded tiles render.
pub const SCROLL_TO_BOTTOM_JS: &str = "window.scrollTo(0, document.body.scrollHeight);";
