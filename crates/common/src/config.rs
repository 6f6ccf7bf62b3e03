//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{AdforgeError, AdforgeResult};

/// Environment variables consulted for the provider credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generative provider settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Image editor defaults.
    #[serde(default)]
    pub editor: EditorDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for the remote image/caption provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Provider API key. Overridden by `API_KEY` / `GEMINI_API_KEY`.
    pub api_key: Option<String>,

    /// Base URL of the provider REST API.
    pub base_url: String,

    /// Model used for marketing images.
    pub image_model: String,

    /// Model used for captions and hashtags.
    pub caption_model: String,
}

/// Defaults applied by the image editor and exporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorDefaults {
    /// Prefix used for exported filenames (`{prefix}-ad-{handle}.png`).
    pub brand_prefix: String,

    /// Logo overlaid when none is given on the command line.
    pub logo_path: Option<PathBuf>,

    /// Output format name: "png", "jpeg" or "webp".
    pub export_format: String,

    /// Quality in `[0.0, 1.0]` for lossy formats.
    pub export_quality: Option<f32>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "adforge=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            caption_model: "gemini-2.5-flash".to_string(),
        }
    }
}

impl Default for EditorDefaults {
    fn default() -> Self {
        Self {
            brand_prefix: "adforge".to_string(),
            logo_path: None,
            export_format: "png".to_string(),
            export_quality: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl GenerationConfig {
    /// Return the configured API key, or `MissingCredential` if it is
    /// absent or blank.
    pub fn require_api_key(&self) -> AdforgeResult<&str> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AdforgeError::MissingCredential),
        }
    }

    /// Validate the whole provider section once, before any client is built.
    pub fn validate(&self) -> AdforgeResult<()> {
        self.require_api_key()?;
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AdforgeError::config(format!(
                "generation.base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.image_model.trim().is_empty() || self.caption_model.trim().is_empty() {
            return Err(AdforgeError::config("generation model names must not be empty"));
        }
        Ok(())
    }

    /// Replace the api key with the first non-empty credential variable
    /// found in the environment.
    pub fn apply_env(&mut self) {
        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.trim().is_empty())
        {
            self.api_key = Some(key);
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults,
    /// then apply environment overrides.
    ///
    /// The error that forced a fallback is returned alongside the config so
    /// it can be reported once logging is initialized.
    pub fn load() -> (Self, Option<AdforgeError>) {
        let (mut config, problem) = match Self::try_load_from(&config_file_path()) {
            Ok(loaded) => (loaded.unwrap_or_default(), None),
            Err(e) => (Self::default(), Some(e)),
        };
        config.generation.apply_env();
        (config, problem)
    }

    /// Load config from an explicit path. `Ok(None)` when the file is absent.
    pub fn try_load_from(path: &std::path::Path) -> AdforgeResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            AdforgeError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| AdforgeError::config(format!("failed to parse {}: {e}", path.display())))
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("adforge").join("config.json")
}
