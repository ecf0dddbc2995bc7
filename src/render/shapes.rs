use image::{Pixel, Rgba, RgbaImage};

/// Decorative primitives triggered by prompt keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Star,
    Heart,
}

/// Bilingual keyword table. Each row contributes at most one shape, in
/// table order, so shape placement is stable for a given prompt.
const SHAPE_TABLE: &[(&[&str], Shape)] = &[
    (&["circle", "círculo"], Shape::Circle),
    (&["sun", "sol"], Shape::Circle),
    (&["square", "quadrado"], Shape::Square),
    (&["triangle", "triângulo"], Shape::Triangle),
    (&["star", "estrela"], Shape::Star),
    (&["heart", "coração"], Shape::Heart),
];

pub fn shapes_for_prompt(prompt: &str) -> Vec<Shape> {
    let lower = prompt.to_lowercase();
    SHAPE_TABLE
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, shape)| *shape)
        .collect()
}

pub(super) fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }
    canvas.get_pixel_mut(x as u32, y as u32).blend(&color);
}

pub(super) fn draw_dot(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let r = radius.max(0.5);
    let (min_x, max_x) = ((cx - r).floor() as i64, (cx + r).ceil() as i64);
    let (min_y, max_y) = ((cy - r).floor() as i64, (cy + r).ceil() as i64);
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= r * r {
                blend_pixel(canvas, x, y, color);
            }
        }
    }
}

pub(super) fn draw_line(
    canvas: &mut RgbaImage,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    color: Rgba<u8>,
) {
    let steps = ((x1 - x0).abs().max((y1 - y0).abs()).ceil() as usize).max(1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = x0 + (x1 - x0) * t;
        let y = y0 + (y1 - y0) * t;
        blend_pixel(canvas, x.round() as i64, y.round() as i64, color);
    }
}

fn point_in_triangle(px: f32, py: f32, a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> bool {
    let sign = |p1: (f32, f32), p2: (f32, f32), p3: (f32, f32)| {
        (p1.0 - p3.0) * (p2.1 - p3.1) - (p2.0 - p3.0) * (p1.1 - p3.1)
    };
    let d1 = sign((px, py), a, b);
    let d2 = sign((px, py), b, c);
    let d3 = sign((px, py), c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

fn point_in_polygon(px: f32, py: f32, vertices: &[(f32, f32)]) -> bool {
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn point_in_heart(px: f32, py: f32, cx: f32, cy: f32, size: f32) -> bool {
    // Implicit heart curve (x^2 + y^2 - 1)^3 - x^2 y^3 <= 0
    let nx = (px - cx) / (size * 0.9);
    let ny = (cy - py) / (size * 0.9) + 0.25;
    let a = nx * nx + ny * ny - 1.0;
    a * a * a - nx * nx * ny * ny * ny <= 0.0
}

/// Render one translucent white primitive centered at (cx, cy)
pub fn draw_shape(canvas: &mut RgbaImage, shape: Shape, cx: f32, cy: f32, size: f32) {
    let fill = Rgba([255u8, 255, 255, 76]);
    let (min_x, max_x) = ((cx - size * 1.3).floor() as i64, (cx + size * 1.3).ceil() as i64);
    let (min_y, max_y) = ((cy - size * 1.3).floor() as i64, (cy + size * 1.3).ceil() as i64);

    let star: Vec<(f32, f32)> = (0..10)
        .map(|i| {
            let angle = -std::f32::consts::FRAC_PI_2 + i as f32 * std::f32::consts::PI / 5.0;
            let r = if i % 2 == 0 { size } else { size * 0.4 };
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect();

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32;
            let py = y as f32;
            let hit = match shape {
                Shape::Circle => {
                    let dx = px - cx;
                    let dy = py - cy;
                    dx * dx + dy * dy <= size * size
                }
                Shape::Square => (px - cx).abs() <= size && (py - cy).abs() <= size,
                Shape::Triangle => point_in_triangle(
                    px,
                    py,
                    (cx, cy - size),
                    (cx - size, cy + size * 0.8),
                    (cx + size, cy + size * 0.8),
                ),
                Shape::Star => point_in_polygon(px, py, &star),
                Shape::Heart => point_in_heart(px, py, cx, cy, size),
            };
            if hit {
                blend_pixel(canvas, x, y, fill);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_keywords() {
        assert_eq!(shapes_for_prompt("a blue circle"), vec![Shape::Circle]);
        assert_eq!(shapes_for_prompt("um quadrado vermelho"), vec![Shape::Square]);
        assert_eq!(
            shapes_for_prompt("estrela e coração"),
            vec![Shape::Star, Shape::Heart]
        );
        assert!(shapes_for_prompt("nothing geometric here").is_empty());
    }

    #[test]
    fn test_sun_triggers_a_circle() {
        assert_eq!(shapes_for_prompt("a dog in the sun"), vec![Shape::Circle]);
    }

    #[test]
    fn test_selection_follows_table_order() {
        // Table order, not occurrence order in the prompt
        assert_eq!(
            shapes_for_prompt("a star above a circle"),
            vec![Shape::Circle, Shape::Star]
        );
    }

    #[test]
    fn test_draw_shape_touches_center_only() {
        let mut canvas = RgbaImage::from_pixel(100, 100, image::Rgba([0, 0, 0, 255]));
        draw_shape(&mut canvas, Shape::Circle, 50.0, 50.0, 10.0);

        assert_ne!(canvas.get_pixel(50, 50), &image::Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(5, 5), &image::Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_draw_shape_clips_at_canvas_edge() {
        let mut canvas = RgbaImage::from_pixel(20, 20, image::Rgba([0, 0, 0, 255]));
        // Must not panic when the bounding box extends past the canvas
        draw_shape(&mut canvas, Shape::Star, 1.0, 1.0, 15.0);
    }
}
