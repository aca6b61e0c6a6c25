//! Gemini/Imagen REST client.
//!
//! Talks to the Generative Language API: `models/{model}:generateContent`
//! for structured text (with a response JSON schema) and
//! `models/{model}:predict` for Imagen images (single square PNG, base64
//! payload).

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};

use crate::config::AppConfig;
use crate::error::GenAiError;
use crate::genai::provider::GenAiProvider;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// REST client for Gemini text and Imagen image generation.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: SecretString,
    text_model: String,
    image_model: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    /// POST a JSON body, keying the request with the `x-goog-api-key` header.
    async fn post(
        &self,
        operation: &str,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, GenAiError> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GenAiError::RequestFailed {
                operation: operation.to_string(),
                reason: format!("{status}: {text}"),
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl GenAiProvider for GeminiClient {
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GenAiError> {
        let url = format!("{BASE_URL}/models/{}:generateContent", self.text_model);
        let body = serde_json::json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema
            }
        });

        tracing::debug!(model = %self.text_model, "requesting structured generation");
        let response = self.post("text generation", &url, &body).await?;
        let payload =
            candidate_text(&response).ok_or_else(|| GenAiError::InvalidResponse {
                operation: "text generation".to_string(),
                reason: "no candidate text in response".to_string(),
            })?;
        Ok(serde_json::from_str(&payload)?)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, GenAiError> {
        let url = format!("{BASE_URL}/models/{}:predict", self.image_model);
        let body = serde_json::json!({
            "instances": [ { "prompt": prompt } ],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "1:1",
                "outputMimeType": "image/png"
            }
        });

        tracing::debug!(model = %self.image_model, "requesting image generation");
        let response = self.post("image generation", &url, &body).await?;
        let encoded = response
            .pointer("/predictions/0/bytesBase64Encoded")
            .and_then(|v| v.as_str())
            .ok_or_else(|| GenAiError::InvalidResponse {
                operation: "image generation".to_string(),
                reason: "no image bytes in response".to_string(),
            })?;
        BASE64
            .decode(encoded)
            .map_err(|e| GenAiError::InvalidResponse {
                operation: "image generation".to_string(),
                reason: format!("invalid base64 image payload: {e}"),
            })
    }
}

/// Pull the text out of the first candidate, concatenating its parts.
fn candidate_text(response: &serde_json::Value) -> Option<String> {
    let parts = response
        .pointer("/candidates/0/content/parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();
    if text.is_empty() { None } else { Some(text) }
}
