//! Image asset loading from data URLs, HTTP(S) URLs, or local files.

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

use adforge_common::error::{AdforgeError, AdforgeResult};

use crate::data_url::{abbreviate, DataUrl};

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Embedded `data:` URL, as returned by the generation provider.
    DataUrl(String),
    /// Remote `http://` or `https://` URL.
    Remote(String),
    /// Local file.
    File(PathBuf),
}

impl ImageSource {
    /// Classify a source reference string.
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        if trimmed.starts_with("data:") {
            ImageSource::DataUrl(trimmed.to_string())
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            ImageSource::Remote(trimmed.to_string())
        } else {
            ImageSource::File(PathBuf::from(trimmed))
        }
    }

    /// Short description for logs and errors.
    pub fn describe(&self) -> String {
        match self {
            ImageSource::DataUrl(url) | ImageSource::Remote(url) => abbreviate(url),
            ImageSource::File(path) => path.display().to_string(),
        }
    }
}

/// A decoded image, shared cheaply between pipeline stages.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pixels: Arc<RgbaImage>,
    source_ref: String,
}

impl LoadedImage {
    /// Wrap decoded pixels. A zero-sized image cannot back a drawing
    /// surface and is rejected.
    pub fn from_rgba(pixels: RgbaImage, source_ref: impl Into<String>) -> AdforgeResult<Self> {
        let source_ref = source_ref.into();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(AdforgeError::surface_unavailable(format!(
                "{source_ref} has zero size ({}x{})",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self {
            pixels: Arc::new(pixels),
            source_ref,
        })
    }

    /// Decode encoded image bytes (PNG, JPEG, WebP).
    pub fn decode(bytes: &[u8], source_ref: impl Into<String>) -> AdforgeResult<Self> {
        let source_ref = source_ref.into();
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AdforgeError::asset_load(&source_ref, e.to_string()))?;
        Self::from_rgba(decoded.to_rgba8(), source_ref)
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn natural_width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn natural_height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn natural_size(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn source_ref(&self) -> &str {
        &self.source_ref
    }
}

/// Load and decode an image. Failures are not retried.
pub async fn load_image(reference: &str) -> AdforgeResult<LoadedImage> {
    let source = ImageSource::parse(reference);
    let label = source.describe();
    tracing::debug!(source = %label, "Loading image");

    let bytes = match &source {
        ImageSource::DataUrl(url) => DataUrl::parse(url)?.bytes,
        ImageSource::Remote(url) => fetch_remote(url).await?,
        ImageSource::File(path) => {
            if !path.exists() {
                return Err(AdforgeError::asset_load(&label, "file not found"));
            }
            tokio::fs::read(path)
                .await
                .map_err(|e| AdforgeError::asset_load(&label, e.to_string()))?
        }
    };

    let image = LoadedImage::decode(&bytes, label)?;
    tracing::info!(
        source = %image.source_ref(),
        width = image.natural_width(),
        height = image.natural_height(),
        "Image loaded"
    );
    Ok(image)
}

async fn fetch_remote(url: &str) -> AdforgeResult<Vec<u8>> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| AdforgeError::asset_load(url, e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(AdforgeError::asset_load(url, format!("HTTP {status}")));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| AdforgeError::asset_load(url, e.to_string()))?;
    Ok(bytes.to_vec())
}
