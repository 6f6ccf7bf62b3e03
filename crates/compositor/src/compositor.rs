//! Pure compositing steps: placement, resize, logo overlay, full render.
//!
//! Each function takes immutable inputs and returns a fresh buffer, so a
//! render never carries over content from a previous one.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use adforge_common::error::{AdforgeError, AdforgeResult};

use crate::asset::LoadedImage;
use crate::editor::CompositingState;

/// Distance between the logo and the canvas edges it is anchored to.
pub const LOGO_PADDING: i64 = 20;

/// Largest width or height a surface may be resized to.
pub const MAX_DIMENSION: u32 = 16_384;

/// Corner the logo is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl LogoAnchor {
    pub const ALL: [LogoAnchor; 4] = [
        LogoAnchor::TopLeft,
        LogoAnchor::TopRight,
        LogoAnchor::BottomLeft,
        LogoAnchor::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogoAnchor::TopLeft => "top-left",
            LogoAnchor::TopRight => "top-right",
            LogoAnchor::BottomLeft => "bottom-left",
            LogoAnchor::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for LogoAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogoAnchor {
    type Err = AdforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "topleft" => Ok(LogoAnchor::TopLeft),
            "topright" => Ok(LogoAnchor::TopRight),
            "bottomleft" => Ok(LogoAnchor::BottomLeft),
            "bottomright" => Ok(LogoAnchor::BottomRight),
            _ => Err(AdforgeError::config(format!(
                "unknown logo anchor {s:?} (expected top-left, top-right, bottom-left, bottom-right)"
            ))),
        }
    }
}

/// Where and how large the logo is drawn, in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Canvas at the image's natural size with the image drawn 1:1.
pub fn place_initial(source: &LoadedImage) -> RgbaImage {
    source.pixels().clone()
}

/// Compute final canvas dimensions for a resize request.
///
/// A target of `None` or `0` counts as not given. With the aspect lock on,
/// a single target derives the other side from the natural aspect ratio,
/// and two targets fit the image inside the requested box. With the lock
/// off, given targets are used verbatim and missing ones keep the natural
/// size.
pub fn resolve_resize(
    natural: (u32, u32),
    target_width: Option<u32>,
    target_height: Option<u32>,
    lock_aspect: bool,
) -> AdforgeResult<(u32, u32)> {
    let (natural_w, natural_h) = natural;
    if natural_w == 0 || natural_h == 0 {
        return Err(AdforgeError::invalid_dimensions(
            "source image has zero size",
        ));
    }

    let target_width = target_width.filter(|w| *w > 0).map(f64::from);
    let target_height = target_height.filter(|h| *h > 0).map(f64::from);
    let aspect = natural_w as f64 / natural_h as f64;

    let (width, height) = if lock_aspect {
        match (target_width, target_height) {
            (Some(w), None) => (w, w / aspect),
            (None, Some(h)) => (h * aspect, h),
            (Some(w), Some(h)) => {
                if aspect > w / h {
                    (w, w / aspect)
                } else {
                    (h * aspect, h)
                }
            }
            (None, None) => {
                return Err(AdforgeError::invalid_dimensions(
                    "resize needs a target width or height",
                ))
            }
        }
    } else {
        (
            target_width.unwrap_or(natural_w as f64),
            target_height.unwrap_or(natural_h as f64),
        )
    };

    let width = to_pixels(width);
    let height = to_pixels(height);
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(AdforgeError::invalid_dimensions(format!(
            "{width}x{height} exceeds the {MAX_DIMENSION}px limit"
        )));
    }
    Ok((width, height))
}

fn to_pixels(value: f64) -> u32 {
    value.round().clamp(1.0, u32::MAX as f64) as u32
}

/// Redraw the source scaled to exactly `size`.
pub fn resize_surface(source: &LoadedImage, size: (u32, u32)) -> AdforgeResult<RgbaImage> {
    let (width, height) = size;
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(AdforgeError::invalid_dimensions(format!(
            "cannot draw onto a {width}x{height} surface"
        )));
    }
    if size == source.natural_size() {
        return Ok(place_initial(source));
    }
    Ok(imageops::resize(
        source.pixels(),
        width,
        height,
        FilterType::Triangle,
    ))
}

/// Logo rectangle for a canvas of `canvas` size. The logo is scaled by
/// `fraction` of its own natural size and kept `LOGO_PADDING` pixels from
/// the anchored edges. Positions may be negative when the logo is larger
/// than the canvas; drawing clips.
pub fn logo_placement(
    canvas: (u32, u32),
    logo: (u32, u32),
    anchor: LogoAnchor,
    fraction: f64,
) -> LogoPlacement {
    let width = to_pixels(logo.0 as f64 * fraction);
    let height = to_pixels(logo.1 as f64 * fraction);
    let right = canvas.0 as i64 - width as i64 - LOGO_PADDING;
    let bottom = canvas.1 as i64 - height as i64 - LOGO_PADDING;

    let (x, y) = match anchor {
        LogoAnchor::TopLeft => (LOGO_PADDING, LOGO_PADDING),
        LogoAnchor::TopRight => (right, LOGO_PADDING),
        LogoAnchor::BottomLeft => (LOGO_PADDING, bottom),
        LogoAnchor::BottomRight => (right, bottom),
    };

    LogoPlacement {
        x,
        y,
        width,
        height,
    }
}

/// Draw the logo over `surface` without clearing it.
pub fn overlay_logo(
    surface: &RgbaImage,
    logo: &LoadedImage,
    anchor: LogoAnchor,
    fraction: f64,
) -> AdforgeResult<RgbaImage> {
    if !fraction.is_finite() || fraction <= 0.0 {
        return Err(AdforgeError::invalid_dimensions(format!(
            "logo scale must be positive, got {fraction}"
        )));
    }

    let placement = logo_placement(surface.dimensions(), logo.natural_size(), anchor, fraction);
    if placement.width > MAX_DIMENSION || placement.height > MAX_DIMENSION {
        return Err(AdforgeError::invalid_dimensions(format!(
            "logo would be {}x{}",
            placement.width, placement.height
        )));
    }

    let scaled = if (placement.width, placement.height) == logo.natural_size() {
        logo.pixels().clone()
    } else {
        imageops::resize(
            logo.pixels(),
            placement.width,
            placement.height,
            FilterType::Lanczos3,
        )
    };

    let mut out = surface.clone();
    imageops::overlay(&mut out, &scaled, placement.x, placement.y);
    Ok(out)
}

/// Full redraw from state: the source scaled to the state's dimensions,
/// then the logo when it is visible and loaded.
pub fn render(
    source: &LoadedImage,
    logo: Option<&LoadedImage>,
    state: &CompositingState,
) -> AdforgeResult<RgbaImage> {
    let base = resize_surface(source, (state.width, state.height))?;
    match logo {
        Some(logo) if state.logo_visible => {
            overlay_logo(&base, logo, state.logo_anchor, state.logo_scale)
        }
        _ => Ok(base),
    }
}
