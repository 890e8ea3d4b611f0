//! In-memory receipt description consumed by the renderer.
//!
//! A spec is an ordered list of rows placed top-to-bottom by a vertical
//! cursor; rows carry horizontal offsets only, so no row can overlap another.

use image::Rgba;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("canvas must have positive dimensions, got {width}x{height}")]
    CanvasSize { width: u32, height: u32 },
    #[error("text row {index} at x={x} lies outside canvas width {width}")]
    TextOutOfRange { index: usize, x: i32, width: u32 },
    #[error("table at x={x} width={width} does not fit canvas width {canvas}")]
    TableOutOfRange { x: i32, width: u32, canvas: u32 },
    #[error("table column separator at x={x} lies outside the table")]
    SeparatorOutOfRange { x: i32 },
    #[error("table has no columns")]
    EmptyTable,
    #[error("table row has {got} cells, expected {expected}")]
    RaggedTableRow { got: usize, expected: usize },
    #[error("amount cannot be negative: {0}")]
    NegativeAmount(Decimal),
    #[error("tax rate must be a fraction in [0, 1): {0}")]
    RateOutOfRange(Decimal),
    #[error("invalid color: {0}")]
    BadColor(String),
}

/// The three font handles the receipts use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    Large,
    Medium,
    Small,
}

impl FontSize {
    pub fn px(self) -> f32 {
        match self {
            FontSize::Large => 16.0,
            FontSize::Medium => 14.0,
            FontSize::Small => 12.0,
        }
    }
}

/// Bordered tax-breakdown grid. Header labels and data cells are
/// preformatted strings; geometry is horizontal only, the renderer places
/// the table at the current cursor position.
#[derive(Clone, Debug)]
pub struct TableSpec {
    /// Left edge of the outer border.
    pub x: i32,
    /// Outer border width in pixels.
    pub width: u32,
    /// Per-column text x offsets (absolute canvas coordinates).
    pub text_xs: Vec<i32>,
    /// Vertical rule x offsets (absolute canvas coordinates).
    pub separators: Vec<i32>,
    pub header: Vec<String>,
    pub header_fill: Rgba<u8>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug)]
pub enum Row {
    /// One line of text; the cursor advances by the line height plus
    /// `advance` afterwards.
    Text {
        content: String,
        x: i32,
        size: FontSize,
        advance: u32,
    },
    /// Cursor-only vertical spacing.
    Gap(u32),
    TaxTable(TableSpec),
}

#[derive(Clone, Debug)]
pub struct ReceiptSpec {
    pub background: Rgba<u8>,
    pub ink: Rgba<u8>,
    pub rows: Vec<Row>,
}

impl ReceiptSpec {
    pub fn new(background: Rgba<u8>, ink: Rgba<u8>) -> Self {
        Self { background, ink, rows: Vec::new() }
    }

    pub fn text(&mut self, content: impl Into<String>, x: i32, size: FontSize) {
        self.rows.push(Row::Text { content: content.into(), x, size, advance: 0 });
    }

    pub fn gap(&mut self, px: u32) {
        self.rows.push(Row::Gap(px));
    }

    pub fn table(&mut self, table: TableSpec) {
        self.rows.push(Row::TaxTable(table));
    }

    /// Fail-fast input validation; the renderer refuses malformed specs
    /// instead of silently producing corrupt output. Vertical overflow is
    /// deliberately not checked, the caller sizes the canvas.
    pub fn validate(&self, width: u32, height: u32) -> Result<(), ValidationError> {
        if width == 0 || height == 0 {
            return Err(ValidationError::CanvasSize { width, height });
        }
        for (index, row) in self.rows.iter().enumerate() {
            match row {
                Row::Text { x, .. } => {
                    if *x < 0 || *x >= width as i32 {
                        return Err(ValidationError::TextOutOfRange { index, x: *x, width });
                    }
                }
                Row::Gap(_) => {}
                Row::TaxTable(t) => validate_table(t, width)?,
            }
        }
        Ok(())
    }
}

fn validate_table(t: &TableSpec, canvas: u32) -> Result<(), ValidationError> {
    if t.text_xs.is_empty() || t.header.len() != t.text_xs.len() {
        return Err(ValidationError::EmptyTable);
    }
    if t.x < 0 || t.x as i64 + t.width as i64 > canvas as i64 {
        return Err(ValidationError::TableOutOfRange { x: t.x, width: t.width, canvas });
    }
    let right = t.x + t.width as i32;
    for &sx in &t.separators {
        if sx < t.x || sx > right {
            return Err(ValidationError::SeparatorOutOfRange { x: sx });
        }
    }
    for row in &t.rows {
        if row.len() != t.text_xs.len() {
            return Err(ValidationError::RaggedTableRow {
                got: row.len(),
                expected: t.text_xs.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn sample_table() -> TableSpec {
        TableSpec {
            x: 40,
            width: 320,
            text_xs: vec![50, 130, 200, 280],
            separators: vec![120, 190, 270],
            header: vec!["Tax rate".into(), "Tax".into(), "Subtotal".into(), "Total".into()],
            header_fill: Rgba([240, 240, 240, 255]),
            rows: vec![vec!["14%".into(), "€1.76".into(), "€12.58".into(), "€14.34".into()]],
        }
    }

    #[test]
    fn empty_spec_is_valid() {
        let spec = ReceiptSpec::new(WHITE, BLACK);
        assert!(spec.validate(400, 550).is_ok());
    }

    #[test]
    fn rejects_zero_canvas() {
        let spec = ReceiptSpec::new(WHITE, BLACK);
        assert!(matches!(
            spec.validate(0, 550),
            Err(ValidationError::CanvasSize { .. })
        ));
        assert!(spec.validate(400, 0).is_err());
    }

    #[test]
    fn rejects_text_outside_canvas() {
        let mut spec = ReceiptSpec::new(WHITE, BLACK);
        spec.text("hello", -5, FontSize::Medium);
        assert!(matches!(
            spec.validate(400, 550),
            Err(ValidationError::TextOutOfRange { x: -5, .. })
        ));

        let mut spec = ReceiptSpec::new(WHITE, BLACK);
        spec.text("hello", 400, FontSize::Medium);
        assert!(spec.validate(400, 550).is_err());
    }

    #[test]
    fn rejects_overflowing_table() {
        let mut spec = ReceiptSpec::new(WHITE, BLACK);
        let mut t = sample_table();
        t.width = 500;
        spec.table(t);
        assert!(matches!(
            spec.validate(400, 600),
            Err(ValidationError::TableOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_ragged_table_rows() {
        let mut spec = ReceiptSpec::new(WHITE, BLACK);
        let mut t = sample_table();
        t.rows.push(vec!["24%".into()]);
        spec.table(t);
        assert!(matches!(
            spec.validate(400, 600),
            Err(ValidationError::RaggedTableRow { got: 1, expected: 4 })
        ));
    }

    #[test]
    fn accepts_well_formed_table() {
        let mut spec = ReceiptSpec::new(WHITE, BLACK);
        spec.table(sample_table());
        assert!(spec.validate(400, 600).is_ok());
    }
}
