//! Fixture builders: turn receipt data plus a locale pack into a
//! [`ReceiptSpec`] and produce the shipped PNG fixture set.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::font::{self, FallbackPolicy, FontError};
use crate::locale::{self, LocalePack};
use crate::money::{format_amount, TaxBreakdown, TaxBucket};
use crate::render::{self, hex_color, RenderError};
use crate::spec::{FontSize, ReceiptSpec, TableSpec, ValidationError};

#[derive(Debug, Error)]
pub enum GenError {
    #[error("bad spec: {0}")]
    Invalid(#[from] ValidationError),
    #[error("font: {0}")]
    Font(#[from] FontError),
    #[error("render: {0}")]
    Render(#[from] RenderError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown locale: {0}")]
    UnknownLocale(String),
}

#[derive(Clone, Debug)]
pub struct LineItem {
    pub name: String,
    pub amount: Decimal,
}

impl LineItem {
    fn new(name: &str, amount: Decimal) -> Self {
        Self { name: name.into(), amount }
    }
}

/// The literal content of one receipt.
#[derive(Clone, Debug)]
pub struct ReceiptData {
    pub timestamp: NaiveDateTime,
    pub receipt_no: String,
    pub items: Vec<LineItem>,
    pub buckets: Vec<TaxBucket>,
    /// Render the bordered per-rate breakdown table; plain receipts print a
    /// single tax line instead.
    pub breakdown_table: bool,
}

// Label column width in characters; amounts start right after it, giving
// the monospace-receipt look.
const LABEL_COLUMN: usize = 25;

const LEFT_MARGIN: i32 = 50;

fn pad_columns(label: &str, amount: &str) -> String {
    format!("{label:<LABEL_COLUMN$}{amount}")
}

/// Build the render spec for one receipt. One builder serves every locale;
/// everything language-specific comes from the pack.
pub fn build_spec(pack: &LocalePack, data: &ReceiptData) -> Result<ReceiptSpec, GenError> {
    let bg = hex_color("#ffffff")?;
    let ink = hex_color("#000000")?;
    let header_fill = hex_color("#f0f0f0")?;

    let breakdown = TaxBreakdown::new(data.buckets.clone());
    let cur = &pack.currency;

    let mut spec = ReceiptSpec::new(bg, ink);

    spec.text(pack.store_name.as_str(), 120, FontSize::Large);
    spec.text(pack.street.as_str(), 130, FontSize::Small);
    spec.text(pack.city.as_str(), 150, FontSize::Small);
    spec.gap(10);

    spec.text(
        format!("{} {}", pack.date_label, data.timestamp.format("%Y-%m-%d")),
        LEFT_MARGIN,
        FontSize::Medium,
    );
    spec.text(
        format!("{} {}", pack.time_label, data.timestamp.format("%H:%M:%S")),
        LEFT_MARGIN,
        FontSize::Medium,
    );
    spec.text(
        format!("{} {}", pack.receipt_no_label, data.receipt_no),
        LEFT_MARGIN,
        FontSize::Medium,
    );
    spec.gap(10);

    spec.text(pack.items_label.as_str(), LEFT_MARGIN, FontSize::Medium);
    for item in &data.items {
        spec.text(
            pad_columns(&item.name, &format_amount(cur, item.amount)),
            LEFT_MARGIN,
            FontSize::Small,
        );
    }
    spec.gap(10);

    spec.text(
        pad_columns(&pack.subtotal_label, &format_amount(cur, breakdown.total_subtotal())),
        LEFT_MARGIN,
        FontSize::Medium,
    );
    spec.gap(10);

    if data.breakdown_table {
        spec.gap(5);
        spec.table(TableSpec {
            x: 40,
            width: 320,
            text_xs: vec![50, 130, 200, 280],
            separators: vec![120, 190, 270],
            header: pack.table_header.to_vec(),
            header_fill,
            rows: breakdown
                .buckets()
                .iter()
                .map(|b| {
                    vec![
                        b.rate_percent(),
                        format_amount(cur, b.tax()),
                        format_amount(cur, b.subtotal()),
                        format_amount(cur, b.total()),
                    ]
                })
                .collect(),
        });
        spec.gap(10);

        if breakdown.buckets().len() > 1 {
            spec.text(
                pad_columns(&pack.total_tax_label, &format_amount(cur, breakdown.total_tax())),
                LEFT_MARGIN,
                FontSize::Medium,
            );
        }
    } else if let Some(bucket) = breakdown.buckets().first() {
        let label = format!("{} {}:", pack.tax_label, bucket.rate_percent());
        spec.text(
            pad_columns(&label, &format_amount(cur, bucket.tax())),
            LEFT_MARGIN,
            FontSize::Medium,
        );
        spec.gap(10);
    }

    spec.text(
        pad_columns(&pack.total_label, &format_amount(cur, breakdown.grand_total())),
        LEFT_MARGIN,
        FontSize::Medium,
    );
    spec.gap(10);

    spec.text(
        format!("{} {}", pack.payment_label, pack.payment_method),
        LEFT_MARGIN,
        FontSize::Medium,
    );
    spec.gap(10);

    spec.text(pack.footer.as_str(), 150, FontSize::Medium);

    Ok(spec)
}

/// One shipped fixture: a receipt plus its canvas size and file name.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub file_name: &'static str,
    pub locale: &'static str,
    pub width: u32,
    pub height: u32,
    pub data: ReceiptData,
}

fn stock_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 2)
        .and_then(|d| d.and_hms_opt(13, 30, 15))
        .expect("static fixture timestamp")
}

fn bucket(rate: Decimal, subtotal: Decimal) -> TaxBucket {
    TaxBucket::new(rate, subtotal).expect("static fixture bucket")
}

/// The five fixtures the mobile test suite consumes.
pub fn stock_fixtures() -> Vec<Fixture> {
    let ts = stock_timestamp();

    let en_items = vec![
        LineItem::new("Bread", dec!(2.50)),
        LineItem::new("Milk 1L", dec!(1.89)),
        LineItem::new("Apples 1kg", dec!(3.20)),
        LineItem::new("Coffee", dec!(4.99)),
    ];

    vec![
        Fixture {
            file_name: "test_receipt_v2.png",
            locale: "en",
            width: 400,
            height: 600,
            data: ReceiptData {
                timestamp: ts,
                receipt_no: "001234".into(),
                items: en_items.clone(),
                buckets: vec![bucket(dec!(0.14), dec!(12.58))],
                breakdown_table: true,
            },
        },
        Fixture {
            file_name: "test_receipt_v3.png",
            locale: "en",
            width: 400,
            height: 650,
            data: ReceiptData {
                timestamp: ts,
                receipt_no: "001235".into(),
                items: {
                    let mut items = en_items;
                    items.push(LineItem::new("Wine 750ml", dec!(8.50)));
                    items
                },
                // Bread + Milk + Apples at 14%, Coffee + Wine at 24%.
                buckets: vec![
                    bucket(dec!(0.14), dec!(7.59)),
                    bucket(dec!(0.24), dec!(13.49)),
                ],
                breakdown_table: true,
            },
        },
        Fixture {
            file_name: "test_receipt_fi.png",
            locale: "fi",
            width: 400,
            height: 550,
            data: ReceiptData {
                timestamp: ts,
                receipt_no: "001234".into(),
                items: vec![
                    LineItem::new("Leipä", dec!(2.50)),
                    LineItem::new("Maito 1L", dec!(1.89)),
                    LineItem::new("Omenat 1kg", dec!(3.20)),
                    LineItem::new("Kahvi", dec!(4.99)),
                ],
                buckets: vec![bucket(dec!(0.24), dec!(12.58))],
                breakdown_table: false,
            },
        },
        Fixture {
            file_name: "test_receipt_de.png",
            locale: "de",
            width: 400,
            height: 550,
            data: ReceiptData {
                timestamp: ts,
                receipt_no: "001234".into(),
                items: vec![
                    LineItem::new("Brot", dec!(2.50)),
                    LineItem::new("Milch 1L", dec!(1.89)),
                    LineItem::new("Äpfel 1kg", dec!(3.20)),
                    LineItem::new("Kaffee", dec!(4.99)),
                ],
                buckets: vec![bucket(dec!(0.24), dec!(12.58))],
                breakdown_table: false,
            },
        },
        Fixture {
            file_name: "test_receipt_sv.png",
            locale: "sv",
            width: 400,
            height: 550,
            data: ReceiptData {
                timestamp: ts,
                receipt_no: "001234".into(),
                items: vec![
                    LineItem::new("Bröd", dec!(2.50)),
                    LineItem::new("Mjölk 1L", dec!(1.89)),
                    LineItem::new("Äpplen 1kg", dec!(3.20)),
                    LineItem::new("Kaffe", dec!(4.99)),
                ],
                buckets: vec![bucket(dec!(0.24), dec!(12.58))],
                breakdown_table: false,
            },
        },
    ]
}

/// Render one fixture to PNG bytes.
pub fn generate(fixture: &Fixture, fallback: FallbackPolicy) -> Result<Vec<u8>, GenError> {
    let pack = locale::builtin(fixture.locale)
        .ok_or_else(|| GenError::UnknownLocale(fixture.locale.to_string()))?;
    let spec = build_spec(&pack, &fixture.data)?;
    let font = font::resolve(fallback)?;
    let canvas = render::render(&spec, &font, fixture.width, fixture.height)?;
    Ok(render::encode_png(&canvas)?)
}

/// File sink: write PNG bytes under `dir`, creating it if needed. IO errors
/// surface to the caller; there is no retry.
pub fn write_png(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, GenError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}
