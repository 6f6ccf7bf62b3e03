//! `data:` URL encoding for embedded images.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use adforge_common::error::{AdforgeError, AdforgeResult};

/// A decoded `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// Parse a base64 data URL. Non-base64 payloads are rejected.
    pub fn parse(url: &str) -> AdforgeResult<Self> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| AdforgeError::asset_load(abbreviate(url), "not a data URL"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| AdforgeError::asset_load(abbreviate(url), "data URL has no payload"))?;
        let mime = meta.strip_suffix(";base64").ok_or_else(|| {
            AdforgeError::asset_load(abbreviate(url), "only base64 data URLs are supported")
        })?;

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| AdforgeError::asset_load(abbreviate(url), format!("bad base64: {e}")))?;

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }
}

/// Build a base64 data URL for `bytes`.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Shorten a source reference for log and error messages; data URLs can
/// be megabytes long.
pub fn abbreviate(source_ref: &str) -> String {
    const MAX: usize = 48;
    if source_ref.chars().count() <= MAX {
        source_ref.to_string()
    } else {
        let head: String = source_ref.chars().take(MAX).collect();
        format!("{head}…")
    }
}
