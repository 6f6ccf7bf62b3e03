//! Vendor/category narrowing for the product picker.

use std::collections::BTreeSet;

use crate::product::Product;

/// Vendor and category constraints. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub vendor: Option<String>,
    pub category: Option<String>,
}

impl CatalogFilter {
    pub fn new(vendor: Option<String>, category: Option<String>) -> Self {
        Self { vendor, category }
    }

    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.vendor.is_none() && self.category.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        let vendor_ok = self.vendor.as_deref().map_or(true, |v| product.vendor == v);
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| product.category == c);
        vendor_ok && category_ok
    }

    /// Products passing the filter, in catalog order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct vendors, sorted.
pub fn unique_vendors(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.vendor.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct categories, sorted.
pub fn unique_categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Look up a product by handle.
pub fn find_product<'a>(products: &'a [Product], handle: &str) -> Option<&'a Product> {
    products.iter().find(|p| p.handle == handle)
}
