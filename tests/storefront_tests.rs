use std::io::Write;

use paradise_nursery::catalog::{parse_catalog, CatalogError, CatalogSource, JsonFileCatalog};
use paradise_nursery::models::Catalog;
use paradise_nursery::services::cart_view::{self, CHECKOUT_MESSAGE};
use paradise_nursery::services::{Gesture, Outcome, Storefront, StorefrontError, View};

const CATALOG_JSON: &str = r#"[
    {
        "category": "Air Purifying Plants",
        "plants": [
            {"name": "Snake Plant", "image": "snake.jpg", "description": "Hardy.", "cost": "$15"},
            {"name": "Spider Plant", "image": "spider.jpg", "description": "Filters air.", "cost": "$12"}
        ]
    },
    {
        "category": "Gifts",
        "plants": [
            {"name": "Mystery Seed", "image": "seed.jpg", "description": "Surprise.", "cost": "free"}
        ]
    }
]"#;

fn catalog() -> Catalog {
    parse_catalog(CATALOG_JSON).expect("fixture catalog parses")
}

#[test]
fn test_snake_and_spider_scenario() {
    let mut shop = Storefront::new(catalog());

    shop.add_to_cart("Snake Plant").unwrap();
    shop.increment("Snake Plant").unwrap();
    shop.add_to_cart("Spider Plant").unwrap();

    let entries = shop.store().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!((entries[0].name.as_str(), entries[0].quantity), ("Snake Plant", 2));
    assert_eq!((entries[1].name.as_str(), entries[1].quantity), ("Spider Plant", 1));
    assert_eq!(cart_view::cart_total(entries), "42.00");
    assert_eq!(cart_view::total_quantity(entries), 3);

    assert_eq!(shop.decrement("Spider Plant").unwrap(), None);

    let entries = shop.store().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].quantity, 2);
    assert_eq!(cart_view::cart_total(entries), "30.00");
}

#[test]
fn test_malformed_cost_does_not_break_cart() {
    let mut shop = Storefront::new(catalog());
    shop.add_to_cart("Mystery Seed").unwrap();

    let summary = shop.summary();
    assert_eq!(summary.lines[0].subtotal, "NaN");
    assert_eq!(summary.lines[0].unit_price, "NaN");
    assert_eq!(summary.total_amount, "NaN");
    assert_eq!(summary.total_quantity, 1);
}

#[test]
fn test_checkout_changes_nothing() {
    let mut shop = Storefront::new(catalog());
    shop.add_to_cart("Snake Plant").unwrap();
    let before = shop.store().clone();

    let notice = shop.checkout();

    assert_eq!(notice.message, CHECKOUT_MESSAGE);
    assert_eq!(shop.store(), &before);
}

#[test]
fn test_added_flag_survives_removal() {
    let mut shop = Storefront::new(catalog());
    shop.add_to_cart("Snake Plant").unwrap();
    shop.remove("Snake Plant").unwrap();

    assert!(shop.store().is_empty());
    assert!(shop.is_added("Snake Plant"));
    assert!(matches!(
        shop.add_to_cart("Snake Plant"),
        Err(StorefrontError::AlreadyAdded { .. })
    ));
}

#[test]
fn test_replay_reports_each_gesture() {
    let script = r#"[
        {"action": "add_to_cart", "name": "Snake Plant"},
        {"action": "increment", "name": "Snake Plant"},
        {"action": "add_to_cart", "name": "Spider Plant"},
        {"action": "show_cart"},
        {"action": "decrement", "name": "Spider Plant"},
        {"action": "remove", "name": "Cactus"},
        {"action": "checkout"},
        {"action": "show_plants"}
    ]"#;
    let gestures: Vec<Gesture> = serde_json::from_str(script).unwrap();

    let mut shop = Storefront::new(catalog());
    let results = shop.replay(gestures);

    assert_eq!(results.len(), 8);
    assert!(matches!(
        results[1],
        Ok(Outcome::Updated { quantity: 2, .. })
    ));
    assert!(matches!(results[3], Ok(Outcome::Navigated(View::Cart))));
    assert!(matches!(results[4], Ok(Outcome::Removed { .. })));
    assert!(matches!(results[5], Err(StorefrontError::NotInCart { .. })));
    assert!(matches!(results[6], Ok(Outcome::Checkout(_))));
    assert_eq!(shop.view(), View::Catalog);

    let summary = shop.summary();
    assert_eq!(summary.total_amount, "30.00");
    assert_eq!(shop.badge(), Some(2));
}

#[test]
fn test_summary_serializes_for_json_output() {
    let mut shop = Storefront::new(catalog());
    shop.add_to_cart("Spider Plant").unwrap();

    let value = serde_json::to_value(shop.summary()).unwrap();
    assert_eq!(value["total_amount"], "12.00");
    assert_eq!(value["total_quantity"], 1);
    assert_eq!(value["lines"][0]["name"], "Spider Plant");
}

#[test]
fn test_catalog_file_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG_JSON.as_bytes()).unwrap();

    let source = JsonFileCatalog::new(file.path());
    let catalog = source.load().unwrap();

    assert_eq!(catalog.categories().len(), 2);
    assert_eq!(catalog.len(), 3);
    assert!(source.describe().contains("catalog file"));
}

#[test]
fn test_catalog_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileCatalog::new(dir.path().join("nope.json"));

    assert!(matches!(source.load(), Err(CatalogError::Io { .. })));
}

#[test]
fn test_duplicate_names_across_categories_rejected() {
    let raw = r#"[
        {"category": "A", "plants": [{"name": "Lavender", "cost": "$20"}]},
        {"category": "B", "plants": [{"name": "Lavender", "cost": "$20"}]}
    ]"#;

    match parse_catalog(raw) {
        Err(CatalogError::DuplicateProduct { name }) => assert_eq!(name, "Lavender"),
        other => panic!("expected duplicate error, got {:?}", other),
    }
}
