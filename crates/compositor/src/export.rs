//! Surface export to encoded bytes and data URLs.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};

use adforge_common::error::{AdforgeError, AdforgeResult};

use crate::data_url::{encode_data_url, DataUrl};

/// JPEG quality used when none (or an out-of-range one) is given.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.92;

/// Supported export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    /// Lossless WebP; quality is ignored.
    Webp,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Webp => "image/webp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Webp => "webp",
        }
    }

    pub fn is_lossy(&self) -> bool {
        matches!(self, ExportFormat::Jpeg)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = AdforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" | "image/jpeg" => Ok(ExportFormat::Jpeg),
            "webp" | "image/webp" => Ok(ExportFormat::Webp),
            other => Err(AdforgeError::config(format!(
                "unknown export format {other:?} (expected png, jpeg, webp)"
            ))),
        }
    }
}

/// Encode a surface. `quality` in `[0.0, 1.0]` applies to JPEG only.
pub fn encode_surface(
    surface: &RgbaImage,
    format: ExportFormat,
    quality: Option<f32>,
) -> AdforgeResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match format {
        ExportFormat::Png => surface
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| AdforgeError::encode(e.to_string()))?,
        ExportFormat::Webp => surface
            .write_to(&mut out, ImageFormat::WebP)
            .map_err(|e| AdforgeError::encode(e.to_string()))?,
        ExportFormat::Jpeg => {
            // JPEG has no alpha channel.
            let rgb = DynamicImage::ImageRgba8(surface.clone()).to_rgb8();
            let mut encoder = JpegEncoder::new_with_quality(&mut out, jpeg_quality(quality));
            encoder
                .encode_image(&rgb)
                .map_err(|e| AdforgeError::encode(e.to_string()))?;
        }
    }
    Ok(out.into_inner())
}

/// Encode a surface as a `data:` URL.
pub fn export_data_url(
    surface: &RgbaImage,
    format: ExportFormat,
    quality: Option<f32>,
) -> AdforgeResult<String> {
    let bytes = encode_surface(surface, format, quality)?;
    tracing::debug!(
        format = %format,
        bytes = bytes.len(),
        width = surface.width(),
        height = surface.height(),
        "Exported surface"
    );
    Ok(encode_data_url(format.mime_type(), &bytes))
}

/// Decode a data URL back into RGBA pixels.
pub fn decode_data_url(url: &str) -> AdforgeResult<RgbaImage> {
    let data = DataUrl::parse(url)?;
    let image = image::load_from_memory(&data.bytes)
        .map_err(|e| AdforgeError::asset_load("data URL", e.to_string()))?;
    Ok(image.to_rgba8())
}

/// Default download name: `{prefix}-ad-{handle}.{ext}`. Characters outside
/// `[A-Za-z0-9_-]` in the handle are replaced with `-`.
pub fn export_filename(prefix: &str, handle: &str, format: ExportFormat) -> String {
    let safe_handle: String = handle
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("{prefix}-ad-{safe_handle}.{}", format.extension())
}

fn jpeg_quality(quality: Option<f32>) -> u8 {
    let q = quality
        .filter(|q| q.is_finite() && (0.0..=1.0).contains(q))
        .unwrap_or(DEFAULT_JPEG_QUALITY);
    (q * 100.0).round().clamp(1.0, 100.0) as u8
}
