use crate::{
    config::ReplicateConfig,
    error::{Result, StudioError},
    models::{ReferenceImage, SourceBackend},
};
use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde_json::{json, Value};

use super::traits::ImageBackend;

const ENDPOINT: &str = "https://api.replicate.com/v1/predictions";

/// Tertiary remote backend: Replicate predictions API, called with
/// `Prefer: wait` so a single request carries the prediction to a
/// terminal state.
pub struct ReplicateBackend {
    client: Client,
    config: ReplicateConfig,
}

impl ReplicateBackend {
    pub fn new(client: Client, config: ReplicateConfig) -> Self {
        Self { client, config }
    }
}

/// The `output` field is a URL string or a list of URL strings depending
/// on the model
fn output_url(output: &Value) -> Option<&str> {
    match output {
        Value::String(url) => Some(url),
        Value::Array(items) => items.first().and_then(|v| v.as_str()),
        _ => None,
    }
}

#[async_trait]
impl ImageBackend for ReplicateBackend {
    fn name(&self) -> &'static str {
        "replicate"
    }

    fn source(&self) -> SourceBackend {
        SourceBackend::Replicate
    }

    async fn try_generate(
        &self,
        prompt: &str,
        _images: &[ReferenceImage],
        width: u32,
        height: u32,
    ) -> Result<String> {
        let api_token = self
            .config
            .api_token
            .as_deref()
            .ok_or_else(|| StudioError::ConfigError("Replicate API token is not set".into()))?;
        let version = self
            .config
            .model_version
            .as_deref()
            .ok_or_else(|| StudioError::ConfigError("Replicate model version is not set".into()))?;

        let body = json!({
            "version": version,
            "input": {
                "prompt": prompt,
                "width": width,
                "height": height
            }
        });

        let response = self
            .client
            .post(ENDPOINT)
            .header("Authorization", format!("Token {}", api_token))
            .header("Prefer", "wait")
            .json(&body)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StudioError::RequestError(format!(
                "Replicate returned HTTP {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| StudioError::ResponseError(e.to_string()))?;

        let status = payload["status"].as_str().unwrap_or_default();
        if status != "succeeded" {
            return Err(StudioError::ResponseError(format!(
                "Replicate prediction ended in status '{}'",
                status
            )));
        }

        let url = output_url(&payload["output"]).ok_or_else(|| {
            StudioError::ResponseError("Replicate prediction has no output URL".into())
        })?;

        let bytes = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StudioError::RequestError(e.to_string()))?
            .error_for_status()
            .map_err(|e| StudioError::RequestError(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| StudioError::ResponseError(e.to_string()))?;

        Ok(base64::engine::general_purpose::STANDARD.encode(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_url_from_string() {
        let value = json!("https://replicate.delivery/out.png");
        assert_eq!(output_url(&value), Some("https://replicate.delivery/out.png"));
    }

    #[test]
    fn test_output_url_from_array() {
        let value = json!(["https://replicate.delivery/a.png", "https://replicate.delivery/b.png"]);
        assert_eq!(output_url(&value), Some("https://replicate.delivery/a.png"));
    }

    #[test]
    fn test_output_url_missing() {
        assert_eq!(output_url(&json!(null)), None);
        assert_eq!(output_url(&json!([])), None);
    }
}
