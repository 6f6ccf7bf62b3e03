//! One generation attempt: image, then caption.

use adforge_catalog::Product;
use adforge_common::error::{AdforgeError, AdforgeResult};

use crate::ad::GeneratedAd;
use crate::client::GenerationBackend;
use crate::options::AdOptions;
use crate::prompt;

/// Drives a [`GenerationBackend`] to produce complete ads.
pub struct AdGenerator {
    backend: Box<dyn GenerationBackend>,
}

impl AdGenerator {
    pub fn new(backend: Box<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Generate an ad for `product`.
    ///
    /// The image is requested first and the caption second. Both must
    /// succeed; if the caption fails the image is discarded and no ad is
    /// produced. Nothing is retried.
    pub async fn generate(&self, product: &Product, options: &AdOptions) -> AdforgeResult<GeneratedAd> {
        let options = options.clone().normalized();
        tracing::info!(
            handle = %product.handle,
            aspect = %options.aspect_ratio,
            "Generating ad"
        );

        let image_prompt = prompt::image_prompt(product, &options);
        let image = self
            .backend
            .generate_image(&image_prompt, options.aspect_ratio)
            .await?;
        if image.trim().is_empty() {
            return Err(AdforgeError::empty_result("image"));
        }

        let caption = match self
            .backend
            .generate_caption(&prompt::caption_prompt(product))
            .await
        {
            Ok(caption) => caption,
            Err(e) => {
                tracing::warn!(
                    handle = %product.handle,
                    error = %e,
                    "Caption generation failed; discarding generated image"
                );
                return Err(e);
            }
        };
        if caption.caption.trim().is_empty() {
            return Err(AdforgeError::empty_result("caption"));
        }

        let ad = GeneratedAd::new(product, image, caption.caption, caption.hashtags);
        tracing::info!(
            handle = %ad.product_handle,
            hashtags = ad.hashtags.len(),
            "Ad generated"
        );
        Ok(ad)
    }
}
