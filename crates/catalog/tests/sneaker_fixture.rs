use std::path::PathBuf;

use adforge_catalog::{parse_catalog, parse_catalog_file, unique_vendors, CatalogFilter};
use adforge_common::error::{AdforgeError, ErrorKind};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("catalog")
        .join("sneakers.csv")
}

#[test]
fn sneaker_fixture_yields_listable_products_in_order() {
    let products = parse_catalog_file(&fixture_path()).expect("fixture should parse");

    let handles: Vec<&str> = products.iter().map(|p| p.handle.as_str()).collect();
    assert_eq!(handles, vec!["air-runner", "court-classic"]);

    let runner = &products[0];
    assert_eq!(runner.title, "Air Runner");
    assert_eq!(runner.tags, vec!["running", "lightweight", "new"]);
    assert_eq!(runner.color.as_deref(), Some("Volt"));
    assert_eq!(runner.material.as_deref(), Some("Mesh"));
    assert_eq!(runner.gender.as_deref(), Some("Unisex"));
    assert_eq!(runner.variants.len(), 2);
    assert_eq!(runner.variants[1].sku, "AR-42");
    assert_eq!(runner.variants[1].compare_at_price, Some(149.99));
    assert_eq!(
        runner.plain_description(100),
        "Featherweight daily trainer, built for city miles."
    );

    let court = &products[1];
    assert!(court.published);
    assert_eq!(court.image_src, "https://cdn.example.com/court-classic-40.jpg");
    assert_eq!(court.color.as_deref(), Some("White"));
    assert_eq!(court.gender.as_deref(), Some("Male"));
    assert_eq!(court.variants.len(), 2);
    assert_eq!(court.variants[0].inventory_qty, 0);
    assert_eq!(court.variants[0].compare_at_price, None);
}

#[test]
fn sneaker_fixture_reparse_is_identical() {
    let text = std::fs::read_to_string(fixture_path()).unwrap();
    assert_eq!(parse_catalog(&text).unwrap(), parse_catalog(&text).unwrap());
}

#[test]
fn vendor_filter_over_fixture() {
    let products = parse_catalog_file(&fixture_path()).unwrap();
    assert_eq!(unique_vendors(&products), vec!["Adidas", "Nike"]);

    let filter = CatalogFilter::new(Some("Adidas".into()), None);
    let hits = filter.apply(&products);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].handle, "court-classic");
}

#[test]
fn unreadable_catalog_is_a_catalog_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.csv");
    std::fs::write(&path, [b'H', b'a', b'n', 0xff, b'\n']).unwrap();

    let err = parse_catalog_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CatalogParse);

    let missing = parse_catalog_file(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(missing, AdforgeError::FileNotFound { .. }));
}

#[test]
fn byte_order_mark_file_parses_like_plain_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bom.csv");
    let plain = std::fs::read_to_string(fixture_path()).unwrap();
    std::fs::write(&path, format!("\u{feff}{plain}")).unwrap();

    let with_bom = parse_catalog_file(&path).unwrap();
    assert_eq!(with_bom, parse_catalog(&plain).unwrap());
    assert_eq!(with_bom.len(), 2);
}
