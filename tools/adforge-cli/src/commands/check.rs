//! Check configuration and credentials.

use adforge_common::config::{config_file_path, AppConfig, API_KEY_ENV_VARS};
use adforge_compositor::ExportFormat;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("AdForge Configuration Check");
    println!("{}", "=".repeat(50));

    let path = config_file_path();
    if path.exists() {
        println!("[OK] Config file: {}", path.display());
    } else {
        println!("[INFO] Config file: {} (not found, using defaults)", path.display());
    }

    let mut ok = true;

    match config.generation.require_api_key() {
        Ok(_) => println!("[OK] API key configured"),
        Err(_) => {
            ok = false;
            println!(
                "[FAIL] API key missing: set {} or generation.api_key",
                API_KEY_ENV_VARS.join(" / ")
            );
        }
    }

    match config.generation.validate() {
        Ok(()) => println!("[OK] Provider: {}", config.generation.base_url),
        Err(adforge_common::AdforgeError::MissingCredential) => {
            println!("[INFO] Provider: {}", config.generation.base_url)
        }
        Err(e) => {
            ok = false;
            println!("[FAIL] {e}");
        }
    }
    println!("     Image model: {}", config.generation.image_model);
    println!("     Caption model: {}", config.generation.caption_model);

    match config.editor.export_format.parse::<ExportFormat>() {
        Ok(format) => println!("[OK] Export format: {format}"),
        Err(e) => {
            ok = false;
            println!("[FAIL] {e}");
        }
    }
    if let Some(ref logo) = config.editor.logo_path {
        if logo.exists() {
            println!("[OK] Default logo: {}", logo.display());
        } else {
            ok = false;
            println!("[FAIL] Default logo not found: {}", logo.display());
        }
    }

    println!();
    if ok {
        println!("AdForge is ready.");
    } else {
        println!("Some settings need attention. See above for fixes.");
    }

    Ok(())
}
