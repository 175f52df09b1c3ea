//! # Canonical String Construction
//!
//! Builds the fixed-format hash input from a receipt:
//!
//! ```text
//! storeId|receiptNumber|YYYY-MM-DD|HH:MM|total
//! ```
//!
//! Exactly five fields enter the fingerprint — store id, receipt number,
//! date, time, and the derived total. Item names and other non-priced
//! metadata stay out, so editing a description does not change the hash
//! while editing anything price-affecting does.
//!
//! The total is rendered with exactly two decimal places (midpoint away
//! from zero). Identifier newtypes already guarantee that no field
//! contains the `|` separator.

use receiptit_core::receipt::round_money;
use receiptit_core::{Receipt, ValidationError};

/// The separator between canonical fields.
pub const FIELD_SEPARATOR: char = '|';

/// A validated, fixed-format fingerprint input.
///
/// Can only be built from a [`Receipt`] that passed boundary validation;
/// this is the compile-time guarantee that every digest flows through the
/// same canonicalization path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalString(String);

impl CanonicalString {
    /// Canonicalize a receipt. Validation runs first, so malformed
    /// receipts never reach the hash input.
    pub fn new(receipt: &Receipt) -> Result<Self, ValidationError> {
        receipt.validate()?;
        let total = round_money(receipt.total());
        Ok(Self(format!(
            "{store}{sep}{number}{sep}{date}{sep}{time}{sep}{total:.2}",
            store = receipt.store_id,
            number = receipt.receipt_number,
            date = receipt.date.format("%Y-%m-%d"),
            time = receipt.time.format("%H:%M"),
            sep = FIELD_SEPARATOR,
        )))
    }

    /// Access the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Access the canonical bytes for MAC input.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Wrap raw text, bypassing receipt canonicalization. Test-only:
    /// used for known-answer vectors over fixed input strings.
    #[cfg(test)]
    pub(crate) fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }
}

impl std::fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use receiptit_core::{LineItem, ReceiptNumber, StoreId};
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn sample_receipt() -> Receipt {
        Receipt {
            store_id: StoreId::new("S1").unwrap(),
            receipt_number: ReceiptNumber::new("RCT-1001").unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            items: vec![LineItem {
                name: "Widget".to_string(),
                unit_price: dec("1000"),
                quantity: 2,
            }],
            discount: Decimal::ZERO,
            vat_rate: None,
            delivery_fee: Decimal::ZERO,
            service_charge: Decimal::ZERO,
        }
    }

    #[test]
    fn canonical_string_format() {
        let canonical = CanonicalString::new(&sample_receipt()).unwrap();
        assert_eq!(canonical.as_str(), "S1|RCT-1001|2024-01-01|10:00|2000.00");
    }

    #[test]
    fn total_is_padded_to_two_decimals() {
        let mut receipt = sample_receipt();
        receipt.items[0].unit_price = dec("1000.5");
        let canonical = CanonicalString::new(&receipt).unwrap();
        assert!(canonical.as_str().ends_with("|2001.00"));
    }

    #[test]
    fn item_name_does_not_enter_canonical_string() {
        let mut renamed = sample_receipt();
        renamed.items[0].name = "Completely different".to_string();
        assert_eq!(
            CanonicalString::new(&sample_receipt()).unwrap(),
            CanonicalString::new(&renamed).unwrap()
        );
    }

    #[test]
    fn total_change_alters_canonical_string() {
        let mut changed = sample_receipt();
        changed.items[0].quantity = 3;
        assert_ne!(
            CanonicalString::new(&sample_receipt()).unwrap(),
            CanonicalString::new(&changed).unwrap()
        );
    }

    #[test]
    fn time_uses_minute_precision() {
        let mut receipt = sample_receipt();
        receipt.time = NaiveTime::from_hms_opt(10, 0, 42).unwrap();
        let canonical = CanonicalString::new(&receipt).unwrap();
        // Seconds never print on the receipt, so they never enter the hash.
        assert_eq!(canonical.as_str(), "S1|RCT-1001|2024-01-01|10:00|2000.00");
    }

    #[test]
    fn invalid_receipt_is_rejected_before_canonicalization() {
        let mut receipt = sample_receipt();
        receipt.items.clear();
        assert!(CanonicalString::new(&receipt).is_err());
    }
}
