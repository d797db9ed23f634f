//! Integration tests for `extract_product`: per-field placeholder handling
//! and scoping of lookups to the product tile.

use shelfwatch_core::{NO_NAME, NO_PROMOTION, NO_PROMOTION_DATE, NO_URL, NO_WEIGHT};
use shelfwatch_scraper::testing::{FakeElement, FakeItem, FakeNode};
use shelfwatch_scraper::{extract_product, selectors, DriverError};

fn full_tile() -> FakeItem {
    FakeItem::product("Jabłka Gala", "1 kg", "https://shop.test/p/jablka")
        .promoted("-25%", "Promocja ważna do 20.03")
}

#[tokio::test]
async fn full_tile_extracts_every_field() {
    let record = extract_product(&FakeElement::Item(full_tile()), "owoce")
        .await
        .expect("extraction should succeed");

    assert_eq!(record.category, "owoce");
    assert_eq!(record.name, "Jabłka Gala");
    assert_eq!(record.packaging, "1 kg");
    assert_eq!(record.promotion_label, "-25%");
    assert_eq!(record.promotion_validity, "Promocja ważna do 20.03");
    assert_eq!(record.source_url, "https://shop.test/p/jablka");
    assert!(record.is_promoted());
}

#[tokio::test]
async fn each_missing_field_gets_only_its_own_placeholder() {
    let cases = [
        (selectors::PRODUCT_NAME, NO_NAME),
        (selectors::PACKAGING_DETAILS, NO_WEIGHT),
        (selectors::PROMOTION_LABEL, NO_PROMOTION),
        (selectors::PROMOTION_VALIDITY, NO_PROMOTION_DATE),
        (selectors::PRODUCT_LINK, NO_URL),
    ];
    let complete = extract_product(&FakeElement::Item(full_tile()), "")
        .await
        .unwrap();

    for (selector, sentinel) in cases {
        let tile = FakeElement::Item(full_tile().without(selector));
        let record = extract_product(&tile, "").await.unwrap();

        let fields = [
            (&record.name, &complete.name),
            (&record.packaging, &complete.packaging),
            (&record.promotion_label, &complete.promotion_label),
            (&record.promotion_validity, &complete.promotion_validity),
            (&record.source_url, &complete.source_url),
        ];
        let placeholders = fields.iter().filter(|(got, _)| got.as_str() == sentinel).count();
        assert_eq!(placeholders, 1, "{selector}: expected exactly one {sentinel}");
        let unchanged = fields.iter().filter(|(got, want)| got == want).count();
        assert_eq!(unchanged, 4, "{selector}: other fields must be untouched");
    }
}

#[tokio::test]
async fn link_without_href_counts_as_missing() {
    let tile = full_tile().with_node(selectors::PRODUCT_LINK, FakeNode::text("Zobacz"));
    let record = extract_product(&FakeElement::Item(tile), "").await.unwrap();

    assert_eq!(record.source_url, NO_URL);
}

#[tokio::test]
async fn surrounding_whitespace_is_trimmed() {
    let tile = full_tile().with_node(selectors::PRODUCT_NAME, FakeNode::text("\n  Gruszka  \t"));
    let record = extract_product(&FakeElement::Item(tile), "").await.unwrap();

    assert_eq!(record.name, "Gruszka");
}

#[tokio::test]
async fn extracting_twice_differs_only_in_timestamp() {
    let tile = FakeElement::Item(full_tile());
    let first = extract_product(&tile, "owoce").await.unwrap();
    let second = extract_product(&tile, "owoce").await.unwrap();

    assert!(first.same_content(&second));
    assert!(second.captured_at >= first.captured_at);
}

#[tokio::test]
async fn stale_tile_surfaces_driver_error() {
    let tile = FakeElement::Item(full_tile().stale());

    let result = extract_product(&tile, "owoce").await;

    assert!(matches!(result, Err(DriverError::StaleElement)));
}
