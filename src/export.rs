use crate::{
    error::{Result, StudioError},
    models::{GenerationResult, ImageFormat},
};
use base64::Engine as _;
use std::io::Cursor;

fn raster_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpg | ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Webp => image::ImageFormat::WebP,
    }
}

/// Re-encode a generation result for download. Returns the suggested
/// filename (fixed `ai-image-{timestamp}.{ext}` pattern) and the encoded
/// bytes.
pub fn export_image(result: &GenerationResult, format: ImageFormat) -> Result<(String, Vec<u8>)> {
    let raw = base64::engine::general_purpose::STANDARD
        .decode(&result.image_data)
        .map_err(|e| StudioError::EncodingError(e.to_string()))?;

    let decoded = image::load_from_memory(&raw)
        .map_err(|e| StudioError::EncodingError(e.to_string()))?;

    // JPEG has no alpha channel
    let decoded = match format {
        ImageFormat::Jpg | ImageFormat::Jpeg => image::DynamicImage::ImageRgb8(decoded.to_rgb8()),
        _ => decoded,
    };

    let mut bytes = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut bytes), raster_format(format))
        .map_err(|e| StudioError::EncodingError(e.to_string()))?;

    let filename = format!(
        "ai-image-{}.{}",
        chrono::Utc::now().timestamp(),
        format.extension()
    );

    Ok((filename, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceBackend;
    use crate::render;
    use base64::Engine as _;

    fn placeholder_result() -> GenerationResult {
        let bytes = render::render_placeholder("export test", 64, 64).unwrap();
        GenerationResult {
            image_data: base64::engine::general_purpose::STANDARD.encode(bytes),
            source_backend: SourceBackend::LocalFallback,
            composed_prompt: "export test".to_string(),
        }
    }

    #[test]
    fn test_export_as_png() {
        let (filename, bytes) = export_image(&placeholder_result(), ImageFormat::Png).unwrap();
        assert!(filename.starts_with("ai-image-"));
        assert!(filename.ends_with(".png"));
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Png
        );
    }

    #[test]
    fn test_export_as_jpeg_drops_alpha() {
        let (filename, bytes) = export_image(&placeholder_result(), ImageFormat::Jpg).unwrap();
        assert!(filename.ends_with(".jpg"));
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::Jpeg
        );
    }

    #[test]
    fn test_export_as_webp() {
        let (_, bytes) = export_image(&placeholder_result(), ImageFormat::Webp).unwrap();
        assert_eq!(
            image::guess_format(&bytes).unwrap(),
            image::ImageFormat::WebP
        );
    }

    #[test]
    fn test_export_rejects_garbage_data() {
        let result = GenerationResult {
            image_data: "not base64!!".to_string(),
            source_backend: SourceBackend::LocalFallback,
            composed_prompt: String::new(),
        };
        assert!(export_image(&result, ImageFormat::Png).is_err());
    }
}
