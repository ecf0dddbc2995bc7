//! Local placeholder renderer, the guaranteed-success terminal step of
//! the fallback chain. Palette and shape selection are deterministic for
//! a given prompt; randomness is confined to the cosmetic particle
//! scatter and never affects layout or color decisions.

pub mod font;
pub mod palette;
pub mod shapes;

use crate::error::{Result, StudioError};
use image::{Rgba, RgbaImage};
use rand::Rng;
use std::io::Cursor;

pub use palette::{palette_for_prompt, Palette};
pub use shapes::{shapes_for_prompt, Shape};

/// Deterministic canvas-proportional anchors, indexed by shape match order
const SHAPE_ANCHORS: &[(f32, f32)] = &[
    (0.20, 0.20),
    (0.80, 0.25),
    (0.50, 0.72),
    (0.22, 0.75),
    (0.78, 0.75),
    (0.50, 0.30),
];

const SCATTER_DOTS: usize = 20;
const SCATTER_LINES: usize = 6;

fn lerp(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

fn fill_radial_gradient(canvas: &mut RgbaImage, palette: &Palette) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = width.max(height) / 2.0;

    for y in 0..canvas.height() {
        for x in 0..canvas.width() {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
            // Three stops: primary at the center, secondary halfway,
            // tertiary at the rim
            let rgb = if t < 0.5 {
                lerp(palette.primary, palette.secondary, t * 2.0)
            } else {
                lerp(palette.secondary, palette.tertiary, (t - 0.5) * 2.0)
            };
            canvas.put_pixel(x, y, Rgba([rgb[0], rgb[1], rgb[2], 255]));
        }
    }
}

fn draw_text(canvas: &mut RgbaImage, text: &str, cx: f32, cy: f32, scale: u32, color: Rgba<u8>) {
    let total_width = font::text_width(text, scale);
    let mut pen_x = (cx - total_width as f32 / 2.0).round() as i64;
    let top = (cy - (font::GLYPH_HEIGHT * scale) as f32 / 2.0).round() as i64;

    for c in text.chars() {
        if let Some(rows) = font::glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if bits & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                shapes::blend_pixel(
                                    canvas,
                                    pen_x + (col * scale + sx) as i64,
                                    top + (row as u32 * scale + sy) as i64,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
        }
        pen_x += (font::GLYPH_ADVANCE * scale) as i64;
    }
}

fn draw_text_with_shadow(
    canvas: &mut RgbaImage,
    text: &str,
    cx: f32,
    cy: f32,
    scale: u32,
    color: Rgba<u8>,
) {
    let offset = scale.max(1) as f32;
    draw_text(canvas, text, cx + offset, cy + offset, scale, Rgba([0, 0, 0, 128]));
    draw_text(canvas, text, cx, cy, scale, color);
}

fn scatter_particles(canvas: &mut RgbaImage) {
    let width = canvas.width() as f32;
    let height = canvas.height() as f32;
    let reach = width.min(height) / 6.0;
    let mut rng = rand::thread_rng();

    for _ in 0..SCATTER_DOTS {
        let x = rng.gen_range(0.0..width);
        let y = rng.gen_range(0.0..height);
        let radius = rng.gen_range(1.0..4.0);
        shapes::draw_dot(canvas, x, y, radius, Rgba([255, 255, 255, 76]));
    }

    for _ in 0..SCATTER_LINES {
        let x0 = rng.gen_range(0.0..width);
        let y0 = rng.gen_range(0.0..height);
        let x1 = x0 + rng.gen_range(-reach..reach);
        let y1 = y0 + rng.gen_range(-reach..reach);
        shapes::draw_line(canvas, x0, y0, x1, y1, Rgba([255, 255, 255, 40]));
    }
}

/// Render a placeholder image for the prompt and encode it as PNG bytes.
///
/// Layout: keyword-selected radial gradient, keyword-selected decorative
/// shapes at fixed anchors, then the first three words of the prompt as a
/// title line and the next three as a subtitle, both centered with a drop
/// shadow, finished with a translucent particle scatter.
pub fn render_placeholder(prompt: &str, width: u32, height: u32) -> Result<Vec<u8>> {
    let width = width.max(1);
    let height = height.max(1);
    let mut canvas = RgbaImage::new(width, height);

    let palette = palette_for_prompt(prompt);
    fill_radial_gradient(&mut canvas, &palette);

    let shape_size = width.min(height) as f32 / 8.0;
    for (index, shape) in shapes_for_prompt(prompt).iter().enumerate() {
        let (fx, fy) = SHAPE_ANCHORS[index % SHAPE_ANCHORS.len()];
        shapes::draw_shape(
            &mut canvas,
            *shape,
            width as f32 * fx,
            height as f32 * fy,
            shape_size,
        );
    }

    let words: Vec<&str> = prompt.split_whitespace().collect();
    let title = words.iter().take(3).cloned().collect::<Vec<_>>().join(" ");
    let subtitle = if words.len() > 3 {
        words[3..words.len().min(6)].join(" ")
    } else {
        "AI Generated".to_string()
    };

    let min_side = width.min(height);
    let title_scale = (min_side / (20 * font::GLYPH_HEIGHT)).max(1);
    let subtitle_scale = (min_side / (30 * font::GLYPH_HEIGHT)).max(1);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;

    draw_text_with_shadow(
        &mut canvas,
        &title,
        cx,
        cy - min_side as f32 / 18.0,
        title_scale,
        Rgba([255, 255, 255, 230]),
    );
    draw_text_with_shadow(
        &mut canvas,
        &subtitle,
        cx,
        cy + min_side as f32 / 24.0,
        subtitle_scale,
        Rgba([255, 255, 255, 178]),
    );

    scatter_particles(&mut canvas);

    let mut bytes = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| StudioError::EncodingError(e.to_string()))?;
    Ok(bytes)
}
