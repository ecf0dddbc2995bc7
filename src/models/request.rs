use crate::error::{Result, StudioError};
use base64::Engine as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateFunction {
    Free,
    Thumbnail,
    Logo,
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditFunction {
    AddRemove,
    Retouch,
    Style,
    Compose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "9:16")]
    Tall,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "21:9")]
    UltraWide,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Wide => "16:9",
            AspectRatio::Tall => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::Portrait => "3:4",
            AspectRatio::UltraWide => "21:9",
        }
    }

    /// Fixed ratio to pixel-dimensions table
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1024, 1024),
            AspectRatio::Wide => (1920, 1080),
            AspectRatio::Tall => (1080, 1920),
            AspectRatio::Classic => (1024, 768),
            AspectRatio::Portrait => (768, 1024),
            AspectRatio::UltraWide => (2560, 1080),
        }
    }

    pub fn all() -> [AspectRatio; 6] {
        [
            AspectRatio::Square,
            AspectRatio::Wide,
            AspectRatio::Tall,
            AspectRatio::Classic,
            AspectRatio::Portrait,
            AspectRatio::UltraWide,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetouchStyle {
    None,
    Enhance,
    Vintage,
    Modern,
    Artistic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleFunctionStyle {
    None,
    OilPainting,
    Watercolor,
    Sketch,
    PopArt,
    Cyberpunk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreateStyle {
    Cinematic,
    #[serde(rename = "8k")]
    EightK,
    Realistic,
    Illustration,
}

/// A user-supplied reference image attached to a generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ReferenceImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| StudioError::EncodingError("Missing data URL prefix".into()))?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| StudioError::EncodingError("Data URL is not base64 encoded".into()))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| StudioError::EncodingError(e.to_string()))?;

        Ok(Self {
            bytes,
            mime_type: mime_type.to_string(),
        })
    }
}

/// Immutable description of one generation, passed through the composer
/// and the orchestrator. Built once per user action; the variation
/// feature re-submits the same request unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub mode: AppMode,
    pub create_fn: CreateFunction,
    pub edit_fn: EditFunction,
    pub aspect_ratio: AspectRatio,
    pub retouch_style: RetouchStyle,
    pub style_fn_style: StyleFunctionStyle,
    pub create_styles: Vec<CreateStyle>,
    pub reference_images: Vec<ReferenceImage>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            mode: AppMode::Create,
            create_fn: CreateFunction::Free,
            edit_fn: EditFunction::AddRemove,
            aspect_ratio: AspectRatio::Square,
            retouch_style: RetouchStyle::None,
            style_fn_style: StyleFunctionStyle::None,
            create_styles: Vec::new(),
            reference_images: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: AppMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_create_function(mut self, create_fn: CreateFunction) -> Self {
        self.mode = AppMode::Create;
        self.create_fn = create_fn;
        self
    }

    pub fn with_edit_function(mut self, edit_fn: EditFunction) -> Self {
        self.mode = AppMode::Edit;
        self.edit_fn = edit_fn;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_retouch_style(mut self, style: RetouchStyle) -> Self {
        self.retouch_style = style;
        self
    }

    pub fn with_style_function_style(mut self, style: StyleFunctionStyle) -> Self {
        self.style_fn_style = style;
        self
    }

    pub fn with_create_styles(mut self, styles: Vec<CreateStyle>) -> Self {
        self.create_styles = styles;
        self
    }

    pub fn with_reference_image(mut self, image: ReferenceImage) -> Self {
        self.reference_images.push(image);
        self
    }

    /// Target pixel dimensions for the active aspect ratio
    pub fn dimensions(&self) -> (u32, u32) {
        self.aspect_ratio.dimensions()
    }

    /// Pre-flight validation. This is the only failure a caller of the
    /// generation chain ever sees; everything downstream degrades to the
    /// local fallback instead of erroring.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(StudioError::ValidationError(
                "Prompt text is required".into(),
            ));
        }

        let count = self.reference_images.len();
        match self.mode {
            AppMode::Edit => {
                if self.edit_fn == EditFunction::Compose {
                    if count != 2 {
                        return Err(StudioError::ValidationError(format!(
                            "The compose function requires exactly 2 reference images, got {}",
                            count
                        )));
                    }
                } else if count != 1 {
                    return Err(StudioError::ValidationError(format!(
                        "Editing requires exactly 1 reference image, got {}",
                        count
                    )));
                }
            }
            AppMode::Create => {
                if count > 1 {
                    return Err(StudioError::ValidationError(format!(
                        "Create mode accepts at most 1 reference image, got {}",
                        count
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_image() -> ReferenceImage {
        ReferenceImage::new(vec![1, 2, 3], "image/png")
    }

    #[test]
    fn test_create_mode_accepts_zero_or_one_image() {
        let request = GenerationRequest::new("a landscape");
        assert!(request.validate().is_ok());

        let request = GenerationRequest::new("a landscape").with_reference_image(reference_image());
        assert!(request.validate().is_ok());

        let request = GenerationRequest::new("a landscape")
            .with_reference_image(reference_image())
            .with_reference_image(reference_image());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_edit_mode_requires_one_image() {
        let request = GenerationRequest::new("remove the car")
            .with_edit_function(EditFunction::AddRemove);
        assert!(request.validate().is_err());

        let request = request.with_reference_image(reference_image());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_compose_requires_two_images() {
        let request = GenerationRequest::new("blend these")
            .with_edit_function(EditFunction::Compose)
            .with_reference_image(reference_image());
        assert!(request.validate().is_err());

        let request = request.with_reference_image(reference_image());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_prompt_rejected() {
        let request = GenerationRequest::new("   ");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_aspect_ratio_table() {
        assert_eq!(AspectRatio::Square.dimensions(), (1024, 1024));
        assert_eq!(AspectRatio::Wide.dimensions(), (1920, 1080));
        assert_eq!(AspectRatio::Tall.dimensions(), (1080, 1920));
        assert_eq!(AspectRatio::Classic.dimensions(), (1024, 768));
        assert_eq!(AspectRatio::Portrait.dimensions(), (768, 1024));
        assert_eq!(AspectRatio::UltraWide.dimensions(), (2560, 1080));
    }

    #[test]
    fn test_reference_image_data_url_roundtrip() {
        let image = ReferenceImage::new(vec![0xde, 0xad, 0xbe, 0xef], "image/jpeg");
        let url = image.to_data_url();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let parsed = ReferenceImage::from_data_url(&url).unwrap();
        assert_eq!(parsed.bytes, image.bytes);
        assert_eq!(parsed.mime_type, "image/jpeg");
    }
}
