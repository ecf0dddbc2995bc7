use crate::{
    config::HuggingFaceConfig,
    error::{Result, StudioError},
    models::{ReferenceImage, SourceBackend},
};
use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde_json::json;

use super::traits::ImageBackend;

const DEFAULT_MODEL: &str = "stabilityai/stable-diffusion-xl-base-1.0";

/// Secondary remote backend: Hugging Face inference API. Returns raw
/// image bytes on success.
pub struct HuggingFaceBackend {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceBackend {
    pub fn new(client: Client, config: HuggingFaceConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ImageBackend for HuggingFaceBackend {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn source(&self) -> SourceBackend {
        SourceBackend::HuggingFace
    }

    async fn try_generate(
        &self,
        prompt: &str,
        _images: &[ReferenceImage],
        width: u32,
        height: u32,
    ) -> Result<String> {
        let api_token = self.config.api_token.as_deref().ok_or_else(|| {
            StudioError::ConfigError("Hugging Face API token is not set".into())
        })?;
        let model = self.config.model.as_deref().unwrap_or(DEFAULT_MODEL);

        let body = json!({
            "inputs": prompt,
            "parameters": {
                "width": width,
                "height": height
            }
        });

        let response = self
            .client
            .post(format!(
                "https://api-inference.huggingface.co/models/{}",
                model
            ))
            .bearer_auth(api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StudioError::RequestError(format!(
                "Hugging Face returned HTTP {}",
                response.status()
            )));
        }

        // A 200 that is not an image (e.g. a model-loading notice) is a
        // failure for fallback purposes
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(StudioError::ResponseError(format!(
                "Hugging Face returned unexpected content type: {}",
                content_type
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StudioError::ResponseError(e.to_string()))?;

        Ok(base64::engine::general_purpose::STANDARD.encode(&bytes))
    }
}
