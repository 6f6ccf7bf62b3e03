//! The generated ad and hashtag normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use adforge_catalog::Product;
use adforge_compositor::{export_filename, ExportFormat};

/// A finished ad for one product. Replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAd {
    pub product_handle: String,

    pub product_title: String,

    /// Marketing image as a `data:` URL.
    pub marketing_image: String,

    pub caption: String,

    /// Hashtags, each starting with `#`.
    pub hashtags: Vec<String>,

    pub generated_at: DateTime<Utc>,
}

impl GeneratedAd {
    /// Build an ad for `product`, normalizing hashtags. Blank tags are dropped.
    pub fn new(
        product: &Product,
        marketing_image: String,
        caption: String,
        hashtags: Vec<String>,
    ) -> Self {
        Self {
            product_handle: product.handle.clone(),
            product_title: product.title.clone(),
            marketing_image,
            caption: caption.trim().to_string(),
            hashtags: hashtags
                .iter()
                .filter_map(|tag| normalize_hashtag(tag))
                .collect(),
            generated_at: Utc::now(),
        }
    }

    /// Caption followed by the hashtags, ready to paste into a post.
    pub fn share_text(&self) -> String {
        if self.hashtags.is_empty() {
            self.caption.clone()
        } else {
            format!("{}\n\n{}", self.caption, self.hashtags.join(" "))
        }
    }

    /// Default download name for the edited image.
    pub fn download_name(&self, brand_prefix: &str, format: ExportFormat) -> String {
        export_filename(brand_prefix, &self.product_handle, format)
    }
}

/// Prefix `tag` with `#` unless it already starts with one.
/// Returns `None` for blank input.
pub fn normalize_hashtag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else if tag.starts_with('#') {
        Some(tag.to_string())
    } else {
        Some(format!("#{tag}"))
    }
}
