//! Resize, brand, and export an image.

use std::path::{Path, PathBuf};

use adforge_common::config::AppConfig;
use adforge_compositor::{Editor, ExportFormat, LogoAnchor, DEFAULT_LOGO_SCALE};

/// Post-processing options shared by `edit` and `generate`.
#[derive(Debug, Clone, clap::Args)]
pub struct EditArgs {
    /// Logo image to overlay (file path, http(s) URL, or data URL)
    #[arg(long)]
    pub logo: Option<String>,

    /// Logo corner: top-left, top-right, bottom-left, bottom-right
    #[arg(long, default_value = "bottom-right")]
    pub logo_anchor: LogoAnchor,

    /// Logo size as a fraction of its natural size [0.05, 0.5]
    #[arg(long, default_value_t = DEFAULT_LOGO_SCALE)]
    pub logo_scale: f64,

    /// Target width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Target height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Allow width and height to distort the aspect ratio
    #[arg(long)]
    pub no_lock: bool,

    /// Output format: png, jpeg, webp
    #[arg(long)]
    pub format: Option<ExportFormat>,

    /// Quality for JPEG output [0.0, 1.0]
    #[arg(long)]
    pub quality: Option<f32>,
}

impl EditArgs {
    /// Logo from the command line, else the configured default.
    fn logo_source(&self, config: &AppConfig) -> Option<String> {
        self.logo.clone().or_else(|| {
            config
                .editor
                .logo_path
                .as_ref()
                .map(|p| p.display().to_string())
        })
    }

    fn wants_resize(&self) -> bool {
        self.width.is_some_and(|w| w > 0) || self.height.is_some_and(|h| h > 0)
    }

    /// Explicit format, else the output extension, else the configured default.
    pub fn resolve_format(&self, config: &AppConfig, output: Option<&Path>) -> anyhow::Result<ExportFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        if let Some(ext) = output.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
            if let Ok(format) = ext.parse() {
                return Ok(format);
            }
        }
        config
            .editor
            .export_format
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid editor.export_format: {e}"))
    }

    pub fn quality(&self, config: &AppConfig) -> Option<f32> {
        self.quality.or(config.editor.export_quality)
    }
}

/// Apply logo and resize options to an open editor.
pub async fn apply(editor: &mut Editor, args: &EditArgs, config: &AppConfig) -> anyhow::Result<()> {
    if let Some(logo) = args.logo_source(config) {
        editor
            .load_logo(&logo)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to load logo: {e}"))?;
        editor.set_logo_anchor(args.logo_anchor)?;
        editor.set_logo_scale(args.logo_scale)?;
        editor.set_logo_visible(true)?;
    }

    if args.wants_resize() {
        let (width, height) = editor.resize(args.width, args.height, !args.no_lock)?;
        println!("  Resized to {width}x{height}");
    }

    Ok(())
}

pub async fn run(config: &AppConfig, image: String, output: PathBuf, args: EditArgs) -> anyhow::Result<()> {
    let format = args.resolve_format(config, Some(&output))?;

    let mut editor = Editor::open(&image)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load image: {e}"))?;
    let (w, h) = editor.source().natural_size();
    println!("Editing {} ({w}x{h})", editor.source().source_ref());

    apply(&mut editor, &args, config).await?;

    editor.save(&output, format, args.quality(config))?;
    let state = editor.state();
    println!(
        "Saved {} ({}x{}, {format}{})",
        output.display(),
        state.width,
        state.height,
        if state.logo_visible {
            format!(", logo {} @ {:.2}", state.logo_anchor, state.logo_scale)
        } else {
            String::new()
        }
    );

    Ok(())
}
