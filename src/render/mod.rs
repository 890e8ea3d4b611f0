//! Receipt renderer: one deterministic pass over the spec's rows.
//!
//! The layout policy is cursor-based: rendering starts at a fixed top
//! margin, each text row advances the cursor by the line height, each table
//! row by the table row height. Identical spec + canvas size gives
//! byte-identical PNG output.

pub mod builtin;
mod draw;

use image::ImageEncoder;
use thiserror::Error;

pub use draw::{hex_color, Canvas};

use crate::font::FontHandle;
use crate::spec::{FontSize, ReceiptSpec, Row, TableSpec, ValidationError};

pub const TOP_MARGIN: u32 = 30;
pub const LINE_HEIGHT: u32 = 20;
pub const TABLE_ROW_HEIGHT: u32 = 25;

/// Text inside a table cell sits this far below the row's top rule.
const CELL_TEXT_INSET: u32 = 5;
const TABLE_BORDER_STROKE: u32 = 2;
const TABLE_RULE_STROKE: u32 = 1;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid spec: {0}")]
    Invalid(#[from] ValidationError),
    #[error("png encode failed: {0}")]
    Encode(String),
}

/// Rasterize a validated spec onto a fresh canvas.
pub fn render(
    spec: &ReceiptSpec,
    font: &FontHandle,
    width: u32,
    height: u32,
) -> Result<Canvas, RenderError> {
    spec.validate(width, height)?;

    let mut canvas = Canvas::from_pixel(width, height, spec.background);
    let mut cursor = TOP_MARGIN;

    for row in &spec.rows {
        match row {
            Row::Text { content, x, size, advance } => {
                draw::draw_text(&mut canvas, font, size.px(), *x, cursor as i32, spec.ink, content);
                cursor += LINE_HEIGHT + advance;
            }
            Row::Gap(px) => cursor += px,
            Row::TaxTable(table) => {
                cursor += draw_table(&mut canvas, font, spec, table, cursor as i32);
            }
        }
    }

    Ok(canvas)
}

/// Draw the bordered grid at `top`; returns the vertical space consumed.
fn draw_table(
    canvas: &mut Canvas,
    font: &FontHandle,
    spec: &ReceiptSpec,
    table: &TableSpec,
    top: i32,
) -> u32 {
    let height = (1 + table.rows.len() as u32) * TABLE_ROW_HEIGHT;

    draw::fill_rect(canvas, table.x, top, table.width, TABLE_ROW_HEIGHT, table.header_fill);
    draw::draw_rect_outline(canvas, table.x, top, table.width, height, TABLE_BORDER_STROKE, spec.ink);

    let bottom = top + height as i32 - 1;
    for &sx in &table.separators {
        draw::draw_vline(canvas, sx, top, bottom, TABLE_RULE_STROKE, spec.ink);
    }

    let right = table.x + table.width as i32 - 1;
    for i in 1..=table.rows.len() {
        let ry = top + (i as u32 * TABLE_ROW_HEIGHT) as i32;
        draw::draw_hline(canvas, table.x, right, ry, TABLE_RULE_STROKE, spec.ink);
    }

    let cell_px = FontSize::Small.px();
    let header_y = top + CELL_TEXT_INSET as i32;
    for (cell, &tx) in table.header.iter().zip(&table.text_xs) {
        draw::draw_text(canvas, font, cell_px, tx, header_y, spec.ink, cell);
    }
    for (i, row) in table.rows.iter().enumerate() {
        let row_y = top + ((1 + i) as u32 * TABLE_ROW_HEIGHT + CELL_TEXT_INSET) as i32;
        for (cell, &tx) in row.iter().zip(&table.text_xs) {
            draw::draw_text(canvas, font, cell_px, tx, row_y, spec.ink, cell);
        }
    }

    height
}

/// Encode the canvas as PNG bytes.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut out);
    encoder
        .write_image(canvas.as_raw(), canvas.width(), canvas.height(), image::ColorType::Rgba8)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ReceiptSpec;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn empty_spec_renders_blank_background() {
        let spec = ReceiptSpec::new(Rgba([250, 240, 230, 255]), BLACK);
        let canvas = render(&spec, &FontHandle::Builtin, 40, 30).unwrap();
        assert!(canvas.pixels().all(|p| *p == Rgba([250, 240, 230, 255])));
    }

    #[test]
    fn invalid_spec_is_rejected_before_drawing() {
        let spec = ReceiptSpec::new(WHITE, BLACK);
        assert!(matches!(
            render(&spec, &FontHandle::Builtin, 0, 0),
            Err(RenderError::Invalid(_))
        ));
    }

    #[test]
    fn text_rows_advance_the_cursor() {
        // Two rows at the same x must not overlap: the second row's ink
        // starts at least one line height below the first.
        let mut spec = ReceiptSpec::new(WHITE, BLACK);
        spec.text("III", 10, crate::spec::FontSize::Medium);
        spec.text("III", 10, crate::spec::FontSize::Medium);
        let canvas = render(&spec, &FontHandle::Builtin, 100, 100).unwrap();

        let ink_rows: Vec<u32> = (0..canvas.height())
            .filter(|&y| (0..canvas.width()).any(|x| *canvas.get_pixel(x, y) == BLACK))
            .collect();
        assert!(!ink_rows.is_empty());
        assert!(ink_rows.first().unwrap() >= &TOP_MARGIN);
        assert!(ink_rows.last().unwrap() >= &(TOP_MARGIN + LINE_HEIGHT));
    }

    #[test]
    fn png_encoding_is_deterministic() {
        let mut spec = ReceiptSpec::new(WHITE, BLACK);
        spec.text("TOTAL: €25.38", 10, crate::spec::FontSize::Medium);
        let a = encode_png(&render(&spec, &FontHandle::Builtin, 200, 60).unwrap()).unwrap();
        let b = encode_png(&render(&spec, &FontHandle::Builtin, 200, 60).unwrap()).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..8], b"\x89PNG\r\n\x1a\n");
    }
}
