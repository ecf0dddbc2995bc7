use crate::{
    config::OpenRouterConfig,
    error::{Result, StudioError},
    models::{ReferenceImage, SourceBackend},
};
use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde_json::{json, Value};

use super::traits::ImageBackend;

const DEFAULT_MODEL: &str = "black-forest-labs/flux-1.1-pro";
const ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

/// Image reference found inside an assistant message
#[derive(Debug, PartialEq)]
enum ImageRef {
    Url(String),
    Base64(String),
}

/// Scan free-form assistant text for a usable image reference: either a
/// direct URL with an image extension or an inline base64 data URL.
fn extract_image_reference(content: &str) -> Option<ImageRef> {
    for token in content.split_whitespace() {
        let token = token.trim_matches(|c| matches!(c, ')' | ']' | '(' | '[' | '"' | '\'' | ','));

        if let Some(rest) = token.strip_prefix("data:image/") {
            if let Some((_, payload)) = rest.split_once(";base64,") {
                let payload = payload.trim_end_matches('.');
                return Some(ImageRef::Base64(payload.to_string()));
            }
        }

        if token.starts_with("http://") || token.starts_with("https://") {
            let lower = token.trim_end_matches('.').to_lowercase();
            if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
                return Some(ImageRef::Url(token.trim_end_matches('.').to_string()));
            }
        }
    }
    None
}

/// Primary remote backend: OpenRouter chat completions with an
/// image-capable model. The response is plain chat content, so the
/// adapter mines it for an image URL or an inline data URL.
pub struct OpenRouterBackend {
    client: Client,
    config: OpenRouterConfig,
}

impl OpenRouterBackend {
    pub fn new(client: Client, config: OpenRouterConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl ImageBackend for OpenRouterBackend {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    fn source(&self) -> SourceBackend {
        SourceBackend::OpenRouter
    }

    async fn try_generate(
        &self,
        prompt: &str,
        _images: &[ReferenceImage],
        _width: u32,
        _height: u32,
    ) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| StudioError::ConfigError("OpenRouter API key is not set".into()))?;
        let model = self.config.model.as_deref().unwrap_or(DEFAULT_MODEL);

        let body = json!({
            "model": model,
            "messages": [{
                "role": "user",
                "content": format!("Generate an image: {}", prompt)
            }],
            "max_tokens": 1000,
            "temperature": 0.7
        });

        let mut request = self
            .client
            .post(ENDPOINT)
            .bearer_auth(api_key)
            .header("X-Title", self.config.app_title.as_deref().unwrap_or("ImageStudio"))
            .json(&body);
        if let Some(referer) = &self.config.referer {
            request = request.header("HTTP-Referer", referer);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StudioError::RequestError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StudioError::RequestError(format!(
                "OpenRouter returned HTTP {}",
                response.status()
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| StudioError::ResponseError(e.to_string()))?;

        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                StudioError::ResponseError("OpenRouter response has no message content".into())
            })?;

        match extract_image_reference(content) {
            Some(ImageRef::Base64(payload)) => {
                // Validate before passing it on; garbage counts as failure
                base64::engine::general_purpose::STANDARD
                    .decode(&payload)
                    .map_err(|e| StudioError::ResponseError(e.to_string()))?;
                Ok(payload)
            }
            Some(ImageRef::Url(url)) => {
                let bytes = self
                    .client
                    .get(&url)
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
            None => Err(StudioError::ResponseError(
                "OpenRouter response contains no image reference".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_image_url() {
        let content = "Here you go: https://cdn.example.com/result.png enjoy!";
        assert_eq!(
            extract_image_reference(content),
            Some(ImageRef::Url("https://cdn.example.com/result.png".into()))
        );
    }

    #[test]
    fn test_extracts_url_from_markdown_link() {
        let content = "![image](https://cdn.example.com/result.jpg)";
        assert_eq!(
            extract_image_reference(content),
            Some(ImageRef::Url("https://cdn.example.com/result.jpg".into()))
        );
    }

    #[test]
    fn test_extracts_inline_data_url() {
        let content = "data:image/png;base64,aGVsbG8= is your image";
        assert_eq!(
            extract_image_reference(content),
            Some(ImageRef::Base64("aGVsbG8=".into()))
        );
    }

    #[test]
    fn test_ignores_non_image_urls() {
        let content = "See https://example.com/about for details";
        assert_eq!(extract_image_reference(content), None);
    }

    #[test]
    fn test_plain_text_yields_none() {
        assert_eq!(extract_image_reference("a lovely description"), None);
    }
}
