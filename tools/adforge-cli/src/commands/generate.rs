//! Generate a marketing ad for one product.

use std::path::PathBuf;

use adforge_catalog::parse_catalog_file;
use adforge_common::config::AppConfig;
use adforge_compositor::Editor;
use adforge_generation::{AdGenerator, AdOptions, AspectRatio, GeminiClient, StudioSession, Wearer};

use super::edit::{self, EditArgs};

/// Creative direction for the image prompt.
#[derive(Debug, Clone, clap::Args)]
pub struct CreativeArgs {
    /// Background, e.g. "seamless white studio"
    #[arg(long)]
    pub background: Option<String>,

    /// Environment, e.g. "night city"
    #[arg(long)]
    pub environment: Option<String>,

    /// Mood, e.g. "energetic"
    #[arg(long)]
    pub mood: Option<String>,

    /// Composition, e.g. "centered and minimalistic"
    #[arg(long)]
    pub composition: Option<String>,

    /// Wearer: none, wearing, held
    #[arg(long, default_value = "none")]
    pub wearer: Wearer,

    /// Camera angle, e.g. "low-angle shot"
    #[arg(long)]
    pub angle: Option<String>,

    /// Additional instructions appended to the prompt
    #[arg(long = "prompt")]
    pub custom_instructions: Option<String>,

    /// Aspect ratio: 1:1, 3:4, 4:3, 9:16, 16:9
    #[arg(long, default_value = "1:1")]
    pub aspect: AspectRatio,
}

impl From<CreativeArgs> for AdOptions {
    fn from(args: CreativeArgs) -> Self {
        AdOptions {
            background: args.background,
            environment: args.environment,
            mood: args.mood,
            composition: args.composition,
            wearer: args.wearer,
            angle: args.angle,
            custom_instructions: args.custom_instructions,
            aspect_ratio: args.aspect,
        }
        .normalized()
    }
}

pub async fn run(
    config: &AppConfig,
    csv: PathBuf,
    handle: String,
    output: PathBuf,
    creative: CreativeArgs,
    edit_args: EditArgs,
) -> anyhow::Result<()> {
    let products = parse_catalog_file(&csv)
        .map_err(|e| anyhow::anyhow!("Failed to load catalog: {e}"))?;

    let mut session = StudioSession::new();
    session.load_catalog(products);
    let product = session
        .select(&handle)
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .clone();

    let client = GeminiClient::new(&config.generation)
        .map_err(|e| anyhow::anyhow!("Cannot reach the generation provider: {e}"))?;
    let generator = AdGenerator::new(Box::new(client));
    let options = AdOptions::from(creative);

    println!("Generating ad for: {} ({})", product.title, product.handle);
    println!("  Aspect ratio: {}", options.aspect_ratio);

    let ticket = session.begin_generation()?;
    let ad = generator
        .generate(&product, &options)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to generate ad for {:?}: {e}", product.title))?;
    let ad = session.commit_ad(&ticket, ad)?.clone();

    println!();
    println!("Caption: {}", ad.caption);
    println!("Hashtags: {}", ad.hashtags.join(" "));
    println!();

    std::fs::create_dir_all(&output)?;
    let brand = &config.editor.brand_prefix;

    let mut editor = Editor::open(&ad.marketing_image)
        .await
        .map_err(|e| anyhow::anyhow!("Generated image is unreadable: {e}"))?;
    edit::apply(&mut editor, &edit_args, config).await?;

    let format = edit_args.resolve_format(config, None)?;
    let image_path = output.join(ad.download_name(brand, format));
    editor.save(&image_path, format, edit_args.quality(config))?;
    println!("  Image: {}", image_path.display());

    let json_path = image_path.with_extension("json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&ad)?)?;
    println!("  Ad: {}", json_path.display());

    tracing::info!(
        handle = %ad.product_handle,
        image = %image_path.display(),
        "Ad written"
    );
    Ok(())
}
