//! Canvas drawing primitives.
//!
//! All primitives clip at the canvas edges rather than panic, so a spec that
//! runs slightly past the bottom degrades instead of aborting mid-render.

use image::{ImageBuffer, Rgba};
use rusttype::{point, Font, Scale};

use super::builtin;
use crate::font::FontHandle;
use crate::spec::ValidationError;

pub type Canvas = ImageBuffer<Rgba<u8>, Vec<u8>>;

/// Parse `#rrggbb` into an opaque pixel.
pub fn hex_color(s: &str) -> Result<Rgba<u8>, ValidationError> {
    let t = s.trim().trim_start_matches('#');
    if t.len() != 6 {
        return Err(ValidationError::BadColor(s.to_string()));
    }
    let b = hex::decode(t).map_err(|_| ValidationError::BadColor(s.to_string()))?;
    Ok(Rgba([b[0], b[1], b[2], 255]))
}

fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, alpha: f32) {
    let inv = 1.0 - alpha;
    dst.0[0] = (color.0[0] as f32 * alpha + dst.0[0] as f32 * inv) as u8;
    dst.0[1] = (color.0[1] as f32 * alpha + dst.0[1] as f32 * inv) as u8;
    dst.0[2] = (color.0[2] as f32 * alpha + dst.0[2] as f32 * inv) as u8;
    dst.0[3] = 255;
}

/// Draw one line of text with its top edge at `y`.
pub fn draw_text(
    canvas: &mut Canvas,
    font: &FontHandle,
    px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    match font {
        FontHandle::Truetype(f) => draw_truetype(canvas, f, px, x, y, color, text),
        FontHandle::Builtin => draw_builtin(canvas, px, x, y, color, text),
    }
}

fn draw_truetype(
    canvas: &mut Canvas,
    font: &Font<'static>,
    px: f32,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let mut caret_x = x as f32;
    let baseline_y = y as f32 + v_metrics.ascent;

    for ch in text.chars() {
        let glyph = font.glyph(ch).scaled(scale).positioned(point(caret_x, baseline_y));
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= canvas.width() || py >= canvas.height() {
                    return;
                }
                if v <= 0.0 {
                    return;
                }
                blend(canvas.get_pixel_mut(px, py), color, v.min(1.0));
            });
        }
        caret_x += glyph.unpositioned().h_metrics().advance_width;
    }
}

fn draw_builtin(canvas: &mut Canvas, px: f32, x: i32, y: i32, color: Rgba<u8>, text: &str) {
    // Integer upscale of the 5x7 cell, roughly matching the requested size.
    let scale = ((px / 8.0).round() as i32).max(1);
    let advance = (builtin::GLYPH_WIDTH as i32 + 1) * scale;
    let mut caret_x = x;

    for ch in text.chars() {
        let rows = builtin::glyph(ch).unwrap_or(builtin::TOFU);
        for (row, &bits) in rows.iter().enumerate() {
            for col in 0..builtin::GLYPH_WIDTH {
                if bits & (1 << (builtin::GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                fill_rect(
                    canvas,
                    caret_x + col as i32 * scale,
                    y + row as i32 * scale,
                    scale as u32,
                    scale as u32,
                    color,
                );
            }
        }
        caret_x += advance;
    }
}

/// Fill an axis-aligned rectangle, clipped to the canvas.
pub fn fill_rect(canvas: &mut Canvas, x: i32, y: i32, w: u32, h: u32, color: Rgba<u8>) {
    let x0 = x.max(0) as u32;
    let y0 = y.max(0) as u32;
    let x1 = (x + w as i32).clamp(0, canvas.width() as i32) as u32;
    let y1 = (y + h as i32).clamp(0, canvas.height() as i32) as u32;
    for py in y0..y1 {
        for px in x0..x1 {
            *canvas.get_pixel_mut(px, py) = color;
        }
    }
}

/// Horizontal line from `x0` to `x1` (inclusive) with the given stroke width.
pub fn draw_hline(canvas: &mut Canvas, x0: i32, x1: i32, y: i32, stroke: u32, color: Rgba<u8>) {
    fill_rect(canvas, x0.min(x1), y, x0.abs_diff(x1) + 1, stroke, color);
}

/// Vertical line from `y0` to `y1` (inclusive) with the given stroke width.
pub fn draw_vline(canvas: &mut Canvas, x: i32, y0: i32, y1: i32, stroke: u32, color: Rgba<u8>) {
    fill_rect(canvas, x, y0.min(y1), stroke, y0.abs_diff(y1) + 1, color);
}

/// Rectangle outline with the stroke drawn inside the bounds.
pub fn draw_rect_outline(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    stroke: u32,
    color: Rgba<u8>,
) {
    draw_hline(canvas, x, x + w as i32 - 1, y, stroke, color);
    draw_hline(canvas, x, x + w as i32 - 1, y + h as i32 - stroke as i32, stroke, color);
    draw_vline(canvas, x, y, y + h as i32 - 1, stroke, color);
    draw_vline(canvas, x + w as i32 - stroke as i32, y, y + h as i32 - 1, stroke, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_color("#f0f0f0").unwrap(), Rgba([240, 240, 240, 255]));
        assert_eq!(hex_color("000000").unwrap(), Rgba([0, 0, 0, 255]));
        assert!(hex_color("#fff").is_err());
        assert!(hex_color("#zzzzzz").is_err());
    }

    #[test]
    fn fill_rect_clips_at_edges() {
        let mut canvas = Canvas::from_pixel(10, 10, WHITE);
        fill_rect(&mut canvas, 8, 8, 10, 10, BLACK);
        assert_eq!(*canvas.get_pixel(9, 9), BLACK);
        assert_eq!(*canvas.get_pixel(7, 7), WHITE);

        // Fully outside: no-op, no panic.
        fill_rect(&mut canvas, -20, -20, 5, 5, BLACK);
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn builtin_text_marks_pixels() {
        let mut canvas = Canvas::from_pixel(60, 20, WHITE);
        draw_text(&mut canvas, &FontHandle::Builtin, 12.0, 2, 2, BLACK, "A1");
        let dark = canvas.pixels().filter(|p| p.0[0] == 0).count();
        assert!(dark > 0, "expected some ink on the canvas");
    }

    #[test]
    fn outline_leaves_interior_untouched() {
        let mut canvas = Canvas::from_pixel(20, 20, WHITE);
        draw_rect_outline(&mut canvas, 2, 2, 16, 16, 2, BLACK);
        assert_eq!(*canvas.get_pixel(2, 2), BLACK);
        assert_eq!(*canvas.get_pixel(17, 17), BLACK);
        assert_eq!(*canvas.get_pixel(10, 10), WHITE);
    }
}
