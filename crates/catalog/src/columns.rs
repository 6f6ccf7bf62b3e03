//! Header resolution: storefront column names mapped to typed descriptors.
//!
//! The header row is resolved once, up front. A catalog that lacks a
//! required column is rejected before any data row is read.

use std::collections::HashMap;

use adforge_common::error::{AdforgeError, AdforgeResult};

/// A recognized catalog column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Handle,
    Title,
    BodyHtml,
    Vendor,
    ProductCategory,
    ProductType,
    Tags,
    Published,
    ImageSrc,
    SeoTitle,
    SeoDescription,
    Option1Value,
    VariantSku,
    VariantGrams,
    VariantInventoryQty,
    VariantPrice,
    VariantCompareAtPrice,
    VariantImage,
    ColorMetafield,
    Color,
    FabricMetafield,
    Fabric,
    TargetGenderMetafield,
    ShoppingGender,
}

impl Column {
    pub const ALL: [Column; 24] = [
        Column::Handle,
        Column::Title,
        Column::BodyHtml,
        Column::Vendor,
        Column::ProductCategory,
        Column::ProductType,
        Column::Tags,
        Column::Published,
        Column::ImageSrc,
        Column::SeoTitle,
        Column::SeoDescription,
        Column::Option1Value,
        Column::VariantSku,
        Column::VariantGrams,
        Column::VariantInventoryQty,
        Column::VariantPrice,
        Column::VariantCompareAtPrice,
        Column::VariantImage,
        Column::ColorMetafield,
        Column::Color,
        Column::FabricMetafield,
        Column::Fabric,
        Column::TargetGenderMetafield,
        Column::ShoppingGender,
    ];

    /// The exact header text used by storefront exports.
    pub fn header_name(&self) -> &'static str {
        match self {
            Column::Handle => "Handle",
            Column::Title => "Title",
            Column::BodyHtml => "Body (HTML)",
            Column::Vendor => "Vendor",
            Column::ProductCategory => "Product Category",
            Column::ProductType => "Type",
            Column::Tags => "Tags",
            Column::Published => "Published",
            Column::ImageSrc => "Image Src",
            Column::SeoTitle => "SEO Title",
            Column::SeoDescription => "SEO Description",
            Column::Option1Value => "Option1 Value",
            Column::VariantSku => "Variant SKU",
            Column::VariantGrams => "Variant Grams",
            Column::VariantInventoryQty => "Variant Inventory Qty",
            Column::VariantPrice => "Variant Price",
            Column::VariantCompareAtPrice => "Variant Compare At Price",
            Column::VariantImage => "Variant Image",
            Column::ColorMetafield => "Color (product.metafields.shopify.color-pattern)",
            Column::Color => "Color",
            Column::FabricMetafield => "Fabric (product.metafields.shopify.fabric)",
            Column::Fabric => "Fabric",
            Column::TargetGenderMetafield => {
                "Target gender (product.metafields.shopify.target-gender)"
            }
            Column::ShoppingGender => "Google Shopping / Gender",
        }
    }

    /// Columns without which no row can be interpreted.
    pub fn is_required(&self) -> bool {
        matches!(self, Column::Handle | Column::Published)
    }

    /// Resolve a trimmed header cell. Unknown headers yield `None`.
    pub fn from_header(name: &str) -> Option<Column> {
        Column::ALL
            .iter()
            .copied()
            .find(|column| column.header_name() == name)
    }
}

/// Positions of recognized columns within a row.
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    positions: HashMap<Column, usize>,
    width: usize,
}

impl HeaderMap {
    /// Resolve a header line (split on plain commas, names trimmed).
    ///
    /// When a header name repeats, the rightmost occurrence wins.
    pub fn resolve(header_line: &str) -> AdforgeResult<Self> {
        let names: Vec<&str> = header_line.split(',').map(str::trim).collect();
        let mut positions = HashMap::new();
        for (index, name) in names.iter().enumerate() {
            if let Some(column) = Column::from_header(name) {
                positions.insert(column, index);
            }
        }

        if let Some(missing) = Column::ALL
            .iter()
            .find(|column| column.is_required() && !positions.contains_key(column))
        {
            return Err(AdforgeError::missing_column(missing.header_name()));
        }

        tracing::debug!(
            recognized = positions.len(),
            total = names.len(),
            "Resolved catalog header"
        );

        Ok(Self {
            positions,
            width: names.len(),
        })
    }

    /// Number of header cells, recognized or not.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions.get(&column).copied()
    }

    /// Bind a split data row to this header.
    pub fn row<'a>(&'a self, fields: &'a [String]) -> Row<'a> {
        Row {
            header: self,
            fields,
        }
    }
}

/// A data row viewed through a resolved header.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    header: &'a HeaderMap,
    fields: &'a [String],
}

impl<'a> Row<'a> {
    /// Field text for a column. Absent columns and missing trailing
    /// fields read as the empty string.
    pub fn get(&self, column: Column) -> &'a str {
        self.header
            .position(column)
            .and_then(|index| self.fields.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Non-empty field text, or `None`.
    pub fn non_empty(&self, column: Column) -> Option<&'a str> {
        Some(self.get(column)).filter(|value| !value.is_empty())
    }

    /// Prefer `primary`, falling back to `fallback` when the primary column
    /// is absent or blank.
    pub fn with_fallback(&self, primary: Column, fallback: Column) -> Option<&'a str> {
        self.non_empty(primary).or_else(|| self.non_empty(fallback))
    }
}
