use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Which link of the fallback chain produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceBackend {
    OpenRouter,
    HuggingFace,
    Replicate,
    LocalFallback,
}

impl SourceBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceBackend::OpenRouter => "openrouter",
            SourceBackend::HuggingFace => "huggingface",
            SourceBackend::Replicate => "replicate",
            SourceBackend::LocalFallback => "local-fallback",
        }
    }
}

/// A successful generation. Created once per run, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Base64 encoded image bytes. The local renderer emits PNG; remote
    /// backends pass provider bytes through unchanged, so the format can
    /// be anything the provider returns.
    pub image_data: String,
    pub source_backend: SourceBackend,
    /// The composed prompt that was sent to the backend
    pub composed_prompt: String,
}

impl GenerationResult {
    /// Data URL with the mime type sniffed from the actual bytes.
    /// Undecodable or unrecognized payloads fall back to `image/png`.
    pub fn to_data_url(&self) -> String {
        let mime = base64::engine::general_purpose::STANDARD
            .decode(&self.image_data)
            .ok()
            .and_then(|bytes| image::guess_format(&bytes).ok())
            .map(|format| format.to_mime_type())
            .unwrap_or("image/png");

        format!("data:{};base64,{}", mime, self.image_data)
    }
}

/// Output formats supported by the download re-encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpg,
    Jpeg,
    Webp,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Webp => "webp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpg | ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn result_from_bytes(bytes: &[u8]) -> GenerationResult {
        GenerationResult {
            image_data: base64::engine::general_purpose::STANDARD.encode(bytes),
            source_backend: SourceBackend::LocalFallback,
            composed_prompt: "a prompt".to_string(),
        }
    }

    #[test]
    fn test_data_url_detects_png() {
        let bytes = crate::render::render_placeholder("a blue circle", 64, 64).unwrap();
        let result = result_from_bytes(&bytes);
        assert!(result.to_data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_data_url_detects_jpeg() {
        let mut bytes = Vec::new();
        image::RgbImage::new(8, 8)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
            .unwrap();

        let result = result_from_bytes(&bytes);
        assert!(result.to_data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_data_url_falls_back_to_png_for_unknown_bytes() {
        let result = result_from_bytes(b"not an image at all");
        assert!(result.to_data_url().starts_with("data:image/png;base64,"));
    }
}
