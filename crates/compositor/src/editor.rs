//! Editing state and the render stage that keeps a surface in sync with it.

use std::path::Path;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use adforge_common::error::AdforgeResult;

use crate::asset::{load_image, LoadedImage};
use crate::compositor::{place_initial, render, resolve_resize, LogoAnchor};
use crate::export::{encode_surface, export_data_url, ExportFormat};

/// Logo scale after a reset.
pub const DEFAULT_LOGO_SCALE: f64 = 0.1;
/// Smallest logo scale the editor accepts.
pub const MIN_LOGO_SCALE: f64 = 0.05;
/// Largest logo scale the editor accepts.
pub const MAX_LOGO_SCALE: f64 = 0.5;

/// The editor's working set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositingState {
    /// Current canvas width in pixels.
    pub width: u32,
    /// Current canvas height in pixels.
    pub height: u32,
    pub logo_visible: bool,
    pub logo_anchor: LogoAnchor,
    /// Logo size as a fraction of the logo's natural size.
    pub logo_scale: f64,
}

impl CompositingState {
    /// Initial state for an image of the given natural size.
    pub fn for_image(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            logo_visible: false,
            logo_anchor: LogoAnchor::BottomRight,
            logo_scale: DEFAULT_LOGO_SCALE,
        }
    }

    /// Set the logo scale, clamped to `[MIN_LOGO_SCALE, MAX_LOGO_SCALE]`.
    /// Non-finite input falls back to the default.
    pub fn set_logo_scale(&mut self, scale: f64) {
        self.logo_scale = if scale.is_finite() {
            scale.clamp(MIN_LOGO_SCALE, MAX_LOGO_SCALE)
        } else {
            DEFAULT_LOGO_SCALE
        };
    }

    /// Back to the natural size with default logo settings.
    pub fn reset(&mut self, natural: (u32, u32)) {
        *self = Self::for_image(natural.0, natural.1);
    }
}

/// Render stage: owns the source, the optional logo, the state, and the
/// surface rendered from them.
///
/// Every mutation re-renders from scratch. If rendering fails, both the
/// state and the visible surface stay as they were.
#[derive(Debug, Clone)]
pub struct Editor {
    source: LoadedImage,
    logo: Option<LoadedImage>,
    state: CompositingState,
    surface: RgbaImage,
}

impl Editor {
    /// Load `source` and place it at its natural size.
    pub async fn open(source: &str) -> AdforgeResult<Self> {
        let image = load_image(source).await?;
        Ok(Self::from_image(image))
    }

    /// Start editing an already-loaded image.
    pub fn from_image(source: LoadedImage) -> Self {
        let (width, height) = source.natural_size();
        let surface = place_initial(&source);
        Self {
            source,
            logo: None,
            state: CompositingState::for_image(width, height),
            surface,
        }
    }

    /// Load a logo for overlaying. A failed load leaves the editor unchanged.
    pub async fn load_logo(&mut self, source: &str) -> AdforgeResult<()> {
        let logo = load_image(source).await?;
        self.set_logo(logo)
    }

    pub fn set_logo(&mut self, logo: LoadedImage) -> AdforgeResult<()> {
        let surface = render(&self.source, Some(&logo), &self.state)?;
        self.logo = Some(logo);
        self.surface = surface;
        Ok(())
    }

    /// Resize the canvas. See [`resolve_resize`] for how targets combine.
    /// Returns the final dimensions.
    pub fn resize(
        &mut self,
        target_width: Option<u32>,
        target_height: Option<u32>,
        lock_aspect: bool,
    ) -> AdforgeResult<(u32, u32)> {
        let (width, height) = resolve_resize(
            self.source.natural_size(),
            target_width,
            target_height,
            lock_aspect,
        )?;
        tracing::debug!(width, height, lock_aspect, "Resizing canvas");
        self.apply(CompositingState {
            width,
            height,
            ..self.state
        })?;
        Ok((width, height))
    }

    pub fn set_logo_visible(&mut self, visible: bool) -> AdforgeResult<()> {
        self.apply(CompositingState {
            logo_visible: visible,
            ..self.state
        })
    }

    pub fn set_logo_anchor(&mut self, anchor: LogoAnchor) -> AdforgeResult<()> {
        self.apply(CompositingState {
            logo_anchor: anchor,
            ..self.state
        })
    }

    pub fn set_logo_scale(&mut self, scale: f64) -> AdforgeResult<()> {
        let mut next = self.state;
        next.set_logo_scale(scale);
        self.apply(next)
    }

    /// Natural size, logo hidden, bottom-right anchor, default scale.
    pub fn reset(&mut self) -> AdforgeResult<()> {
        let mut next = self.state;
        next.reset(self.source.natural_size());
        self.apply(next)
    }

    /// Re-render the surface from the current state.
    pub fn redraw(&mut self) -> AdforgeResult<()> {
        self.apply(self.state)
    }

    fn apply(&mut self, next: CompositingState) -> AdforgeResult<()> {
        let surface = render(&self.source, self.logo.as_ref(), &next)?;
        self.state = next;
        self.surface = surface;
        Ok(())
    }

    pub fn state(&self) -> &CompositingState {
        &self.state
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn source(&self) -> &LoadedImage {
        &self.source
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Encode the current surface as a data URL.
    pub fn export(&self, format: ExportFormat, quality: Option<f32>) -> AdforgeResult<String> {
        export_data_url(&self.surface, format, quality)
    }

    /// Encode the current surface and write it to `path`.
    pub fn save(&self, path: &Path, format: ExportFormat, quality: Option<f32>) -> AdforgeResult<()> {
        let bytes = encode_surface(&self.surface, format, quality)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        tracing::info!(
            path = %path.display(),
            width = self.state.width,
            height = self.state.height,
            format = %format,
            "Saved edited image"
        );
        Ok(())
    }
}
