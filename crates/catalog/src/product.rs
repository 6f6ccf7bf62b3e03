//! Catalog entries and their purchasable variants.

use serde::{Deserialize, Serialize};

/// One purchasable SKU of a product (typically a size).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Option label, e.g. the shoe size.
    pub option_value: String,

    pub sku: String,

    /// Weight in grams.
    pub grams: f64,

    pub inventory_qty: u32,

    pub price: f64,

    /// Original price when the variant is on sale.
    pub compare_at_price: Option<f64>,

    /// Image specific to this variant.
    pub image: Option<String>,
}

/// One catalog entry, keyed by its handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique slug-style identifier, used to merge rows.
    pub handle: String,

    pub title: String,

    /// Raw HTML description as exported by the storefront.
    pub body_html: String,

    pub vendor: String,

    pub category: String,

    pub product_type: String,

    /// Tags in export order. Empty entries are removed, duplicates kept.
    pub tags: Vec<String>,

    pub published: bool,

    /// Primary image. Backfilled from the first variant image when blank.
    pub image_src: String,

    pub seo_title: String,

    pub seo_description: String,

    /// Variants in row order.
    pub variants: Vec<ProductVariant>,

    pub color: Option<String>,

    pub material: Option<String>,

    pub gender: Option<String>,
}

impl Product {
    /// Whether the product may appear in the final catalog.
    pub fn is_listable(&self) -> bool {
        self.published && !self.image_src.is_empty()
    }

    /// Body with HTML tags stripped, cut to at most `limit` characters.
    pub fn plain_description(&self, limit: usize) -> String {
        strip_html_tags(&self.body_html).chars().take(limit).collect()
    }

    /// Lowest and highest variant price, if the product has variants.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        let mut prices = self.variants.iter().map(|v| v.price);
        let first = prices.next()?;
        Some(prices.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Total inventory across all variants.
    pub fn total_inventory(&self) -> u64 {
        self.variants.iter().map(|v| v.inventory_qty as u64).sum()
    }
}

/// Remove anything between `<` and the next `>`. An unterminated tag
/// swallows the rest of the input.
pub fn strip_html_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(price: f64, qty: u32) -> ProductVariant {
        ProductVariant {
            option_value: "42".into(),
            sku: "SKU".into(),
            grams: 0.0,
            inventory_qty: qty,
            price,
            compare_at_price: None,
            image: None,
        }
    }

    fn product() -> Product {
        Product {
            handle: "runner".into(),
            title: "Runner".into(),
            body_html: "<p>Light <b>and</b> fast</p>".into(),
            vendor: "Acme".into(),
            category: "Shoes".into(),
            product_type: "Sneakers".into(),
            tags: vec![],
            published: true,
            image_src: "https://cdn/runner.jpg".into(),
            seo_title: String::new(),
            seo_description: String::new(),
            variants: vec![variant(120.0, 3), variant(99.5, 4)],
            color: None,
            material: None,
            gender: None,
        }
    }

    #[test]
    fn test_plain_description_strips_and_truncates() {
        let p = product();
        assert_eq!(p.plain_description(100), "Light and fast");
        assert_eq!(p.plain_description(5), "Light");
    }

    #[test]
    fn test_unterminated_tag_swallows_rest() {
        assert_eq!(strip_html_tags("keep <br"), "keep ");
        assert_eq!(strip_html_tags("a > b"), "a > b");
    }

    #[test]
    fn test_price_range_and_inventory() {
        let p = product();
        assert_eq!(p.price_range(), Some((99.5, 120.0)));
        assert_eq!(p.total_inventory(), 7);

        let empty = Product {
            variants: vec![],
            ..product()
        };
        assert_eq!(empty.price_range(), None);
    }

    #[test]
    fn test_listable_requires_published_and_image() {
        assert!(product().is_listable());
        assert!(!Product {
            published: false,
            ..product()
        }
        .is_listable());
        assert!(!Product {
            image_src: String::new(),
            ..product()
        }
        .is_listable());
    }
}
