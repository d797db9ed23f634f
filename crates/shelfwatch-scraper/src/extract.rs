//! Per-tile field extraction.
//!
//! Each field is looked up independently, scoped to the product tile. An
//! absent node yields the field's sentinel and a warning; the remaining
//! fields are still read. Driver errors (typically a tile detached by a
//! re-render) abort the tile, and the caller skips it.

use shelfwatch_core::{
    ProductRecord, NO_NAME, NO_PROMOTION, NO_PROMOTION_DATE, NO_URL, NO_WEIGHT,
};

use crate::driver::ElementHandle;
use crate::error::DriverError;
use crate::lookup::Lookup;
use crate::selectors;

/// Reads one product tile into a [`ProductRecord`].
///
/// `category` is stamped onto the record as-is (empty in single-category runs).
///
/// # Errors
///
/// Returns [`DriverError`] if the driver fails while reading the tile. Absent
/// fields are not errors.
pub async fn extract_product<E: ElementHandle>(
    item: &E,
    category: &str,
) -> Result<ProductRecord, DriverError> {
    let name = or_sentinel(
        scoped_text(item, selectors::PRODUCT_NAME).await?,
        "name",
        selectors::PRODUCT_NAME,
        NO_NAME,
    );
    let packaging = or_sentinel(
        scoped_text(item, selectors::PACKAGING_DETAILS).await?,
        "packaging",
        selectors::PACKAGING_DETAILS,
        NO_WEIGHT,
    );

    tracing::debug!(name = %name, packaging = %packaging, "processing product");

    let promotion_label = or_sentinel(
        scoped_text(item, selectors::PROMOTION_LABEL).await?,
        "promotion_label",
        selectors::PROMOTION_LABEL,
        NO_PROMOTION,
    );
    let promotion_validity = or_sentinel(
        scoped_text(item, selectors::PROMOTION_VALIDITY).await?,
        "promotion_validity",
        selectors::PROMOTION_VALIDITY,
        NO_PROMOTION_DATE,
    );
    let source_url = or_sentinel(
        scoped_attribute(
            item,
            selectors::PRODUCT_LINK,
            selectors::PRODUCT_LINK_ATTR,
        )
        .await?,
        "source_url",
        selectors::PRODUCT_LINK,
        NO_URL,
    );

    Ok(ProductRecord {
        category: category.to_owned(),
        name,
        packaging,
        promotion_label,
        promotion_validity,
        captured_at: ProductRecord::now(),
        source_url,
    })
}

/// Trimmed text of the first descendant of `item` matching `selector`.
async fn scoped_text<E: ElementHandle>(
    item: &E,
    selector: &str,
) -> Result<Lookup<String>, DriverError> {
    match item.find_scoped(selector).await? {
        Lookup::Found(node) => {
            let text = node.text().await?;
            Ok(Lookup::Found(text.trim().to_owned()))
        }
        Lookup::Absent => Ok(Lookup::Absent),
    }
}

/// Trimmed `attr` of the first descendant of `item` matching `selector`.
///
/// A matching node without the attribute counts as absent.
async fn scoped_attribute<E: ElementHandle>(
    item: &E,
    selector: &str,
    attr: &str,
) -> Result<Lookup<String>, DriverError> {
    match item.find_scoped(selector).await? {
        Lookup::Found(node) => Ok(node.attribute(attr).await?.map(|v| v.trim().to_owned())),
        Lookup::Absent => Ok(Lookup::Absent),
    }
}

fn or_sentinel(
    value: Lookup<String>,
    field: &'static str,
    selector: &str,
    sentinel: &str,
) -> String {
    match value {
        Lookup::Found(v) => v,
        Lookup::Absent => {
            tracing::warn!(field, selector, "product field not found; using placeholder");
            sentinel.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_sentinel_keeps_found_value_even_when_empty() {
        assert_eq!(
            or_sentinel(Lookup::Found(String::new()), "name", "x", NO_NAME),
            ""
        );
        assert_eq!(
            or_sentinel(Lookup::Found("Marchew".into()), "name", "x", NO_NAME),
            "Marchew"
        );
    }

    #[test]
    fn or_sentinel_substitutes_when_absent() {
        assert_eq!(
            or_sentinel(Lookup::Absent, "packaging", "x", NO_WEIGHT),
            NO_WEIGHT
        );
    }
}
