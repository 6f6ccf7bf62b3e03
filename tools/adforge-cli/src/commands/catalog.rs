//! List publishable products.

use std::path::PathBuf;

use adforge_catalog::{parse_catalog_file, unique_categories, unique_vendors, CatalogFilter, Product};

pub fn run(
    csv: PathBuf,
    vendor: Option<String>,
    category: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let products = parse_catalog_file(&csv)
        .map_err(|e| anyhow::anyhow!("Failed to load catalog: {e}"))?;
    let filter = CatalogFilter::new(vendor, category);
    let visible = filter.apply(&products);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("Catalog: {}", csv.display());
    println!("  Products: {} ({} shown)", products.len(), visible.len());
    println!("  Vendors: {}", unique_vendors(&products).join(", "));
    println!("  Categories: {}", unique_categories(&products).join(", "));
    println!();

    if visible.is_empty() {
        println!("No products match.");
        return Ok(());
    }

    for product in visible {
        println!(
            "  {:<28} {:<32} {:<12} {}",
            product.handle,
            product.title,
            product.vendor,
            price_label(product)
        );
    }

    Ok(())
}

pub fn price_label(product: &Product) -> String {
    match product.price_range() {
        Some((lo, hi)) if (hi - lo).abs() < f64::EPSILON => format!("{lo:.2}"),
        Some((lo, hi)) => format!("{lo:.2}-{hi:.2}"),
        None => "-".to_string(),
    }
}
