use crate::{
    config::GeminiConfig,
    error::{Result, StudioError},
    models::ReferenceImage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::traits::PromptAnalyzer;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Multimodal enrichment step: asks Gemini to analyze the reference
/// images and folds the analysis back into the prompt text. Used only
/// when reference images are attached; failure never aborts the chain.
pub struct GeminiAnalyzer {
    client: Client,
    config: GeminiConfig,
}

impl GeminiAnalyzer {
    pub fn new(client: Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl PromptAnalyzer for GeminiAnalyzer {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn analyze(&self, prompt: &str, images: &[ReferenceImage]) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| StudioError::ConfigError("Gemini API key is not set".into()))?;
        let model = self.config.model.as_deref().unwrap_or(DEFAULT_MODEL);

        let mut parts = vec![json!({
            "text": format!(
                "Analyze this image and describe how to modify it: {}",
                prompt
            )
        })];
        for image in images {
            parts.push(json!({
                "inline_data": {
                    "mime_type": image.mime_type,
                    "data": image.to_base64()
                }
            }));
        }

        let body = json!({ "contents": [{ "parts": parts }] });

        let response = self
            .client
            .post(format!(
                "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
                model, api_key
            ))
            .json(&body)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StudioError::RequestError(format!(
                "Gemini returned HTTP {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| StudioError::ResponseError(e.to_string()))?;

        let analysis = payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                StudioError::ResponseError("Gemini response has no analysis text".into())
            })?;

        Ok(format!(
            "{} Based on the analysis: {}",
            prompt,
            analysis.trim()
        ))
    }
}
