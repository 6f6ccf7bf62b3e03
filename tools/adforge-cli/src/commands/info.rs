//! Show one product in detail.

use std::path::PathBuf;

use adforge_catalog::{find_product, parse_catalog_file};

use super::catalog::price_label;

pub fn run(csv: PathBuf, handle: String) -> anyhow::Result<()> {
    let products = parse_catalog_file(&csv)
        .map_err(|e| anyhow::anyhow!("Failed to load catalog: {e}"))?;
    let p = find_product(&products, &handle)
        .ok_or_else(|| anyhow::anyhow!("No publishable product with handle {handle:?}"))?;

    println!("Product: {}", p.title);
    println!("  Handle: {}", p.handle);
    println!("  Vendor: {}", p.vendor);
    println!("  Category: {}", p.category);
    println!("  Type: {}", p.product_type);
    if !p.tags.is_empty() {
        println!("  Tags: {}", p.tags.join(", "));
    }
    if let Some(ref color) = p.color {
        println!("  Color: {color}");
    }
    if let Some(ref material) = p.material {
        println!("  Material: {material}");
    }
    if let Some(ref gender) = p.gender {
        println!("  Gender: {gender}");
    }
    println!("  Image: {}", p.image_src);
    println!("  Description: {}", p.plain_description(200));
    println!();

    println!("Variants ({}, price {}):", p.variants.len(), price_label(p));
    for v in &p.variants {
        let sale = v
            .compare_at_price
            .map(|c| format!(" (was {c:.2})"))
            .unwrap_or_default();
        println!(
            "  {:<8} {:<12} {:>8.2}{} stock {}",
            v.option_value, v.sku, v.price, sale, v.inventory_qty
        );
    }
    println!("  Total inventory: {}", p.total_inventory());

    Ok(())
}
