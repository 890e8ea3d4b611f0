//! Tax breakdown arithmetic.
//!
//! Receipts group line items into buckets sharing one VAT rate. Each bucket
//! carries its pre-tax subtotal; tax and total are derived, rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::spec::ValidationError;

/// Round to cents, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary amount with a currency symbol prefix, e.g. `€1.06`.
pub fn format_amount(symbol: &str, value: Decimal) -> String {
    format!("{symbol}{:.2}", value)
}

/// A group of line items sharing one tax rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaxBucket {
    rate: Decimal,
    subtotal: Decimal,
}

impl TaxBucket {
    /// `rate` is a decimal fraction (`0.24` for 24% VAT), `subtotal` the
    /// pre-tax sum of the bucket's items.
    pub fn new(rate: Decimal, subtotal: Decimal) -> Result<Self, ValidationError> {
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(ValidationError::RateOutOfRange(rate));
        }
        if subtotal < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(subtotal));
        }
        Ok(Self { rate, subtotal })
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn subtotal(&self) -> Decimal {
        self.subtotal
    }

    pub fn tax(&self) -> Decimal {
        round_cents(self.subtotal * self.rate)
    }

    pub fn total(&self) -> Decimal {
        round_cents(self.subtotal + self.tax())
    }

    /// Percentage label for the rate column, e.g. `14%`.
    pub fn rate_percent(&self) -> String {
        format!("{}%", (self.rate * dec!(100)).normalize())
    }
}

/// Per-rate breakdown over all buckets of a receipt.
#[derive(Clone, Debug)]
pub struct TaxBreakdown {
    buckets: Vec<TaxBucket>,
}

impl TaxBreakdown {
    pub fn new(buckets: Vec<TaxBucket>) -> Self {
        Self { buckets }
    }

    pub fn buckets(&self) -> &[TaxBucket] {
        &self.buckets
    }

    pub fn total_subtotal(&self) -> Decimal {
        self.buckets.iter().map(|b| b.subtotal()).sum()
    }

    /// Sum of per-bucket taxes, each already rounded to cents.
    pub fn total_tax(&self) -> Decimal {
        self.buckets.iter().map(|b| b.tax()).sum()
    }

    pub fn grand_total(&self) -> Decimal {
        round_cents(self.total_subtotal() + self.total_tax())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_14_percent() {
        let b = TaxBucket::new(dec!(0.14), dec!(7.59)).unwrap();
        assert_eq!(b.tax(), dec!(1.06));
        assert_eq!(b.total(), dec!(8.65));
        assert_eq!(b.rate_percent(), "14%");
    }

    #[test]
    fn bucket_24_percent() {
        let b = TaxBucket::new(dec!(0.24), dec!(13.49)).unwrap();
        assert_eq!(b.tax(), dec!(3.24));
        assert_eq!(b.total(), dec!(16.73));
    }

    #[test]
    fn single_rate_full_receipt() {
        // The single-table receipt: 14% on the whole €12.58 subtotal.
        let b = TaxBucket::new(dec!(0.14), dec!(12.58)).unwrap();
        assert_eq!(b.tax(), dec!(1.76));
        assert_eq!(b.total(), dec!(14.34));

        // The localized receipts: 24% on the same subtotal.
        let b = TaxBucket::new(dec!(0.24), dec!(12.58)).unwrap();
        assert_eq!(b.tax(), dec!(3.02));
        assert_eq!(b.total(), dec!(15.60));
    }

    #[test]
    fn breakdown_grand_total() {
        let breakdown = TaxBreakdown::new(vec![
            TaxBucket::new(dec!(0.14), dec!(7.59)).unwrap(),
            TaxBucket::new(dec!(0.24), dec!(13.49)).unwrap(),
        ]);
        assert_eq!(breakdown.total_subtotal(), dec!(21.08));
        assert_eq!(breakdown.total_tax(), dec!(4.30));
        assert_eq!(breakdown.grand_total(), dec!(25.38));

        // Both formulations agree.
        let per_bucket: Decimal = breakdown.buckets().iter().map(|b| b.total()).sum();
        assert_eq!(breakdown.grand_total(), per_bucket);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(TaxBucket::new(dec!(1.0), dec!(1.00)).is_err());
        assert!(TaxBucket::new(dec!(-0.1), dec!(1.00)).is_err());
        assert!(TaxBucket::new(dec!(0.24), dec!(-1.00)).is_err());
    }

    #[test]
    fn amount_formatting() {
        assert_eq!(format_amount("€", dec!(1.06)), "€1.06");
        assert_eq!(format_amount("€", dec!(15.6)), "€15.60");
        assert_eq!(format_amount("$", dec!(0)), "$0.00");
    }
}
