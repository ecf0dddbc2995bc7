use crate::models::{
    AppMode, CreateFunction, CreateStyle, EditFunction, GenerationRequest, RetouchStyle,
    StyleFunctionStyle,
};

/// Brand preamble prefixed to every non-thumbnail prompt
const STYLE_PREAMBLE: &str = "ImageStudio style: realism, high sharpness, balanced contrast.";

fn create_style_phrase(style: CreateStyle) -> &'static str {
    match style {
        CreateStyle::Cinematic => "cinematic style",
        CreateStyle::EightK => "8k resolution, ultra detailed",
        CreateStyle::Realistic => "photorealistic, hyper-realism",
        CreateStyle::Illustration => "illustration style, digital art",
    }
}

fn retouch_style_phrase(style: RetouchStyle) -> &'static str {
    match style {
        RetouchStyle::None => {
            "Retouch the image with professional adjustments and studio quality."
        }
        RetouchStyle::Enhance => {
            "Improve the image quality, increase sharpness and contrast."
        }
        RetouchStyle::Vintage => "Apply a vintage filter with sepia tones and grain.",
        RetouchStyle::Modern => {
            "Apply a modern style with vibrant colors and high saturation."
        }
        RetouchStyle::Artistic => "Turn it into a work of art with visible brush strokes.",
    }
}

fn style_function_phrase(style: StyleFunctionStyle) -> &'static str {
    match style {
        StyleFunctionStyle::None => {
            "Apply an artistic reinterpretation with a unique visual style."
        }
        StyleFunctionStyle::OilPainting => "Transform into a classic oil painting.",
        StyleFunctionStyle::Watercolor => "Apply a watercolor style with transparencies.",
        StyleFunctionStyle::Sketch => "Convert into a realistic pencil drawing.",
        StyleFunctionStyle::PopArt => "Apply a pop art style with vibrant colors.",
        StyleFunctionStyle::Cyberpunk => "Apply a futuristic cyberpunk style.",
    }
}

/// Fixed instruction phrase for the active edit sub-function. Each
/// sub-function maps to exactly one phrase, never combined.
fn edit_instruction(request: &GenerationRequest) -> &'static str {
    match request.edit_fn {
        EditFunction::AddRemove => {
            "Adjust the image by adding or removing the described elements, \
             keeping natural lighting and a photorealistic look."
        }
        EditFunction::Retouch => retouch_style_phrase(request.retouch_style),
        EditFunction::Style => style_function_phrase(request.style_fn_style),
        EditFunction::Compose => {
            "Combine the two reference images into a single seamless and \
             harmonious composition."
        }
    }
}

/// Derive the final prompt string from a request. Pure and total:
/// identical requests always compose to identical strings, which is what
/// lets the variation feature re-derive the same prompt from a stored
/// request.
pub fn compose(request: &GenerationRequest) -> String {
    let mut styled = request.prompt.trim().to_string();

    if request.mode == AppMode::Create && !request.create_styles.is_empty() {
        let phrases: Vec<&str> = request
            .create_styles
            .iter()
            .map(|s| create_style_phrase(*s))
            .collect();
        styled = format!("{}, {}", styled, phrases.join(", "));
    }

    let mut composed =
        if request.mode == AppMode::Create && request.create_fn == CreateFunction::Thumbnail {
            format!(
                "Create a YouTube thumbnail, 16:9 format, eye-catching, with vibrant \
                 colors and clear elements that stand out. The theme is: {}",
                styled
            )
        } else {
            format!("{} {}", STYLE_PREAMBLE, styled)
        };

    if request.mode == AppMode::Edit {
        composed.push(' ');
        composed.push_str(edit_instruction(request));
    }

    let (width, height) = request.dimensions();
    format!("{} Dimensions: {}x{} pixels.", composed, width, height)
}
