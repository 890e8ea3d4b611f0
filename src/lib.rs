//! Deterministic grocery-receipt PNG fixtures.
//!
//! The library builds an in-memory [`spec::ReceiptSpec`] from literal
//! receipt data plus a [`locale::LocalePack`], rasterizes it with a
//! cursor-based layout, and encodes PNG bytes. The `receiptgen` binary
//! regenerates the stock fixture set.

pub mod font;
pub mod generator;
pub mod locale;
pub mod money;
pub mod render;
pub mod spec;
