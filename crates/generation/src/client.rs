//! Generative provider seam and the Gemini REST implementation.

use serde::{Deserialize, Serialize};
use serde_json::json;

use adforge_common::config::GenerationConfig;
use adforge_common::error::{AdforgeError, AdforgeResult};
use adforge_compositor::DataUrl;

use crate::options::AspectRatio;

/// Caption and hashtags as returned by the provider, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionResult {
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// Remote image and text generation.
#[async_trait::async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate one marketing image. Returns a `data:` URL.
    async fn generate_image(&self, prompt: &str, aspect: AspectRatio) -> AdforgeResult<String>;

    /// Generate a caption with hashtags.
    async fn generate_caption(&self, prompt: &str) -> AdforgeResult<CaptionResult>;
}

/// Imagen images plus Gemini captions over the Generative Language REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    image_model: String,
    caption_model: String,
}

impl GeminiClient {
    /// Validate `config` and build a client. A missing key fails here,
    /// before any request is made.
    pub fn new(config: &GenerationConfig) -> AdforgeResult<Self> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, config: &GenerationConfig) -> AdforgeResult<Self> {
        config.validate()?;
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_model: config.image_model.clone(),
            caption_model: config.caption_model.clone(),
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> AdforgeResult<serde_json::Value> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| AdforgeError::generation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(300).collect();
            return Err(AdforgeError::generation(format!(
                "provider returned HTTP {status}: {snippet}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AdforgeError::generation(format!("unreadable response: {e}")))
    }
}

#[async_trait::async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate_image(&self, prompt: &str, aspect: AspectRatio) -> AdforgeResult<String> {
        tracing::info!(
            model = %self.image_model,
            aspect = %aspect,
            prompt_chars = prompt.chars().count(),
            "Requesting marketing image"
        );
        let body = image_request(prompt, aspect);
        let url = self.endpoint(&self.image_model, "predict");
        let response = self.post_json(&url, &body).await?;
        parse_image_response(response)
    }

    async fn generate_caption(&self, prompt: &str) -> AdforgeResult<CaptionResult> {
        tracing::info!(model = %self.caption_model, "Requesting caption and hashtags");
        let body = caption_request(prompt);
        let url = self.endpoint(&self.caption_model, "generateContent");
        let response = self.post_json(&url, &body).await?;
        parse_caption_response(response)
    }
}

/// Imagen `:predict` request body for a single JPEG.
pub fn image_request(prompt: &str, aspect: AspectRatio) -> serde_json::Value {
    json!({
        "instances": [{ "prompt": prompt }],
        "parameters": {
            "sampleCount": 1,
            "aspectRatio": aspect.as_str(),
            "outputOptions": { "mimeType": "image/jpeg" },
        },
    })
}

/// Gemini `:generateContent` request body constrained to the caption schema.
pub fn caption_request(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "caption": { "type": "STRING" },
                    "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
                },
                "propertyOrdering": ["caption", "hashtags"],
            },
        },
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract the first image from a `:predict` response as a data URL.
pub fn parse_image_response(response: serde_json::Value) -> AdforgeResult<String> {
    let parsed: PredictResponse = serde_json::from_value(response)
        .map_err(|e| AdforgeError::generation(format!("malformed image response: {e}")))?;

    let prediction = parsed
        .predictions
        .into_iter()
        .find(|p| p.bytes_base64_encoded.as_deref().is_some_and(|b| !b.is_empty()))
        .ok_or_else(|| AdforgeError::empty_result("image"))?;

    let mime = prediction.mime_type.unwrap_or_else(|| "image/jpeg".to_string());
    let payload = prediction.bytes_base64_encoded.unwrap_or_default();
    let url = format!("data:{mime};base64,{payload}");

    // Reject payloads the compositor could not decode later.
    DataUrl::parse(&url)
        .map_err(|e| AdforgeError::generation(format!("image payload is not valid base64: {e}")))?;
    Ok(url)
}

/// Extract the caption JSON from a `:generateContent` response.
pub fn parse_caption_response(response: serde_json::Value) -> AdforgeResult<CaptionResult> {
    let parsed: GenerateContentResponse = serde_json::from_value(response)
        .map_err(|e| AdforgeError::generation(format!("malformed caption response: {e}")))?;

    let text: String = parsed
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect();
    let text = text.trim();
    if text.is_empty() {
        return Err(AdforgeError::empty_result("caption"));
    }

    serde_json::from_str(strip_code_fence(text))
        .map_err(|e| AdforgeError::generation(format!("caption is not valid JSON: {e}")))
}

/// Some models wrap JSON in a markdown fence even in JSON mode.
fn strip_code_fence(text: &str) -> &str {
    text.strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(text)
}
