//! Storefront CSV parsing.
//!
//! Storefront exports spread one product over several rows: the first row
//! for a handle carries the product fields, every row carries one variant.
//! Parsing groups rows by handle (not by adjacency), then keeps only
//! published products that have an image.

use std::collections::HashMap;
use std::path::Path;

use adforge_common::error::{AdforgeError, AdforgeResult};

use crate::columns::{Column, HeaderMap, Row};
use crate::product::{Product, ProductVariant};

/// Parse catalog text into listable products, in first-seen order.
///
/// Input with fewer than two lines (header plus one data row) yields an
/// empty catalog. A header without the required columns is an error.
pub fn parse_catalog(raw: &str) -> AdforgeResult<Vec<Product>> {
    // Spreadsheet exports often start with a byte order mark.
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let lines: Vec<&str> = raw.trim().split('\n').collect();
    if lines.len() < 2 {
        return Ok(Vec::new());
    }

    let header = HeaderMap::resolve(lines[0])?;

    let mut order: Vec<String> = Vec::new();
    let mut by_handle: HashMap<String, Product> = HashMap::new();
    let mut skipped_rows = 0usize;

    for line in &lines[1..] {
        let fields = split_line(line);
        if fields.is_empty() {
            continue;
        }
        let row = header.row(&fields);

        let handle = row.get(Column::Handle);
        if handle.is_empty() {
            skipped_rows += 1;
            continue;
        }

        let product = by_handle.entry(handle.to_string()).or_insert_with(|| {
            order.push(handle.to_string());
            product_from_row(handle, &row)
        });

        let variant = variant_from_row(&row);
        if product.image_src.is_empty() {
            if let Some(image) = &variant.image {
                product.image_src = image.clone();
            }
        }
        product.variants.push(variant);
    }

    let total = order.len();
    let products: Vec<Product> = order
        .into_iter()
        .filter_map(|handle| by_handle.remove(&handle))
        .filter(Product::is_listable)
        .collect();

    tracing::info!(
        rows = lines.len() - 1,
        columns = header.width(),
        skipped_rows,
        products = total,
        listable = products.len(),
        "Parsed catalog"
    );

    Ok(products)
}

/// Read and parse a catalog file.
pub fn parse_catalog_file(path: &Path) -> AdforgeResult<Vec<Product>> {
    if !path.exists() {
        return Err(AdforgeError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path)
        .map_err(|e| AdforgeError::catalog(format!("cannot read {}: {e}", path.display())))?;
    let text = String::from_utf8(bytes).map_err(|e| {
        AdforgeError::catalog(format!("{} is not valid UTF-8: {e}", path.display()))
    })?;
    parse_catalog(&text)
}

/// Split one data line into trimmed fields.
///
/// A double quote toggles quoted mode and is dropped; a comma outside
/// quotes ends the field. The last field is always emitted, so the result
/// is never empty.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut in_quote = false;
    let mut current = String::new();

    for ch in line.chars() {
        match ch {
            '"' => in_quote = !in_quote,
            ',' if !in_quote => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn product_from_row(handle: &str, row: &Row<'_>) -> Product {
    let tags = row
        .get(Column::Tags)
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    Product {
        handle: handle.to_string(),
        title: row.get(Column::Title).to_string(),
        body_html: row.get(Column::BodyHtml).to_string(),
        vendor: row.get(Column::Vendor).to_string(),
        category: row.get(Column::ProductCategory).to_string(),
        product_type: row.get(Column::ProductType).to_string(),
        tags,
        published: row.get(Column::Published).eq_ignore_ascii_case("true"),
        image_src: row.get(Column::ImageSrc).to_string(),
        seo_title: row.get(Column::SeoTitle).to_string(),
        seo_description: row.get(Column::SeoDescription).to_string(),
        variants: Vec::new(),
        color: row
            .with_fallback(Column::ColorMetafield, Column::Color)
            .map(str::to_string),
        material: row
            .with_fallback(Column::FabricMetafield, Column::Fabric)
            .map(str::to_string),
        gender: row
            .with_fallback(Column::TargetGenderMetafield, Column::ShoppingGender)
            .map(str::to_string),
    }
}

fn variant_from_row(row: &Row<'_>) -> ProductVariant {
    let inventory = parse_lenient_int(row.get(Column::VariantInventoryQty)).unwrap_or(0);

    ProductVariant {
        option_value: row.get(Column::Option1Value).to_string(),
        sku: row.get(Column::VariantSku).to_string(),
        grams: parse_lenient_float(row.get(Column::VariantGrams)).unwrap_or(0.0),
        inventory_qty: inventory.clamp(0, u32::MAX as i64) as u32,
        price: parse_lenient_float(row.get(Column::VariantPrice))
            .unwrap_or(0.0)
            .max(0.0),
        compare_at_price: parse_lenient_float(row.get(Column::VariantCompareAtPrice))
            .filter(|price| *price > 0.0),
        image: row.non_empty(Column::VariantImage).map(str::to_string),
    }
}

/// Parse the longest numeric prefix of `text` as a float
/// (`"12.5g"` → 12.5). Returns `None` when there is no leading number.
pub fn parse_lenient_float(text: &str) -> Option<f64> {
    let prefix = numeric_prefix(text.trim_start(), true);
    prefix.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse the longest integer prefix of `text` (`"3.9"` → 3).
pub fn parse_lenient_int(text: &str) -> Option<i64> {
    numeric_prefix(text.trim_start(), false).parse::<i64>().ok()
}

fn numeric_prefix(text: &str, allow_fraction: bool) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;
    let mut has_digits = int_digits > 0;

    if allow_fraction {
        if bytes.get(end) == Some(&b'.') {
            let frac_digits = digits_from(end + 1);
            if has_digits || frac_digits > 0 {
                end += 1 + frac_digits;
                has_digits = true;
            }
        }
        if has_digits && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_end = end + 1;
            if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
                exp_end += 1;
            }
            let exp_digits = digits_from(exp_end);
            if exp_digits > 0 {
                end = exp_end + exp_digits;
            }
        }
    }

    if has_digits {
        &text[..end]
    } else {
        ""
    }
}
