//! # Receipt Record
//!
//! The [`Receipt`] as captured at issuance, with decimal money arithmetic
//! for the derived total. The total feeds the canonical hash, so every
//! intermediate value is a [`Decimal`] — float drift in any amount would
//! silently change fingerprints between runs.
//!
//! ## Derivation
//!
//! - `subtotal  = Σ unit_price × quantity`
//! - `vat       = (subtotal − discount) × vat_rate / 100`, rounded to two
//!   decimal places (midpoint away from zero); zero when VAT is disabled
//! - `total     = subtotal − discount + vat + delivery_fee + service_charge`

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::identity::{ReceiptNumber, StoreId};

/// Rounding used for all derived money values: two decimal places,
/// midpoints away from zero.
pub const MONEY_ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Round a money amount to two decimal places.
///
/// The result always carries exactly two fractional digits, so money
/// values render as `2000.00` rather than `2000` wherever they surface.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, MONEY_ROUNDING);
    rounded.rescale(2);
    rounded
}

/// Largest accepted money amount, in currency units, for any single
/// field and for the derived subtotal (one trillion). Keeps every value
/// a validated receipt can derive far inside [`Decimal`] range, so the
/// total arithmetic cannot overflow.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000;

fn max_amount() -> Decimal {
    Decimal::from(MAX_AMOUNT_UNITS)
}

/// A single line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item description as printed on the receipt. Not part of the
    /// canonical hash input.
    pub name: String,
    /// Unit price in the store's currency.
    pub unit_price: Decimal,
    /// Number of units.
    pub quantity: u32,
}

impl LineItem {
    /// Extended price for this line (`unit_price × quantity`).
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A receipt as captured at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Identifier of the issuing store.
    pub store_id: StoreId,
    /// Human-facing receipt number, unique per store.
    pub receipt_number: ReceiptNumber,
    /// Issue date (store-local calendar date).
    pub date: NaiveDate,
    /// Issue time (store-local, minute precision is what prints on the
    /// receipt and enters the hash).
    pub time: NaiveTime,
    /// Line items.
    pub items: Vec<LineItem>,
    /// Flat discount applied to the subtotal.
    #[serde(default)]
    pub discount: Decimal,
    /// VAT rate in percent. `None` means VAT is disabled for this receipt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<Decimal>,
    /// Delivery fee, if any.
    #[serde(default)]
    pub delivery_fee: Decimal,
    /// Service charge, if any.
    #[serde(default)]
    pub service_charge: Decimal,
}

impl Receipt {
    /// Sum of all line totals, before discount and surcharges.
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// VAT computed on the discounted subtotal, rounded to two decimal
    /// places. Zero when VAT is disabled.
    pub fn vat_amount(&self) -> Decimal {
        match self.vat_rate {
            Some(rate) => {
                let base = self.subtotal() - self.discount;
                round_money(base * rate / Decimal::from(100))
            }
            None => Decimal::ZERO,
        }
    }

    /// The derived total: `subtotal − discount + vat + delivery_fee +
    /// service_charge`, rounded to two decimal places.
    ///
    /// This is the amount that enters the canonical hash input. Callers
    /// run [`validate()`](Self::validate) first; its amount bounds keep
    /// this arithmetic well inside [`Decimal`] range.
    pub fn total(&self) -> Decimal {
        round_money(
            self.subtotal() - self.discount
                + self.vat_amount()
                + self.delivery_fee
                + self.service_charge,
        )
    }

    /// Boundary validation, run before any field reaches the hash input.
    ///
    /// Rejects receipts with no line items, zero quantities, negative
    /// amounts, amounts beyond [`MAX_AMOUNT_UNITS`], or a VAT rate above
    /// 100 percent. The subtotal is recomputed here with checked
    /// arithmetic, so [`total()`](Self::total) cannot overflow on a
    /// validated receipt. Identifier format is already enforced by the
    /// newtype constructors.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::NoLineItems {
                receipt_number: self.receipt_number.as_str().to_string(),
            });
        }
        let max = max_amount();
        let mut subtotal = Decimal::ZERO;
        for item in &self.items {
            if item.quantity == 0 {
                return Err(ValidationError::ZeroQuantity {
                    item: item.name.clone(),
                });
            }
            if item.unit_price.is_sign_negative() {
                return Err(ValidationError::NegativeAmount {
                    field: "unit price",
                    value: item.unit_price.to_string(),
                });
            }
            if item.unit_price > max {
                return Err(ValidationError::AmountTooLarge {
                    field: "unit price",
                    value: item.unit_price.to_string(),
                });
            }
            let line = item
                .unit_price
                .checked_mul(Decimal::from(item.quantity))
                .ok_or(ValidationError::AmountOverflow { field: "line total" })?;
            subtotal = subtotal
                .checked_add(line)
                .ok_or(ValidationError::AmountOverflow { field: "subtotal" })?;
        }
        if subtotal > max {
            return Err(ValidationError::AmountTooLarge {
                field: "subtotal",
                value: subtotal.to_string(),
            });
        }
        let amounts: [(&'static str, Decimal); 3] = [
            ("discount", self.discount),
            ("delivery fee", self.delivery_fee),
            ("service charge", self.service_charge),
        ];
        for (field, value) in amounts {
            if value.is_sign_negative() {
                return Err(ValidationError::NegativeAmount {
                    field,
                    value: value.to_string(),
                });
            }
            if value > max {
                return Err(ValidationError::AmountTooLarge {
                    field,
                    value: value.to_string(),
                });
            }
        }
        if let Some(rate) = self.vat_rate {
            if rate.is_sign_negative() {
                return Err(ValidationError::NegativeAmount {
                    field: "vat rate",
                    value: rate.to_string(),
                });
            }
            if rate > Decimal::from(100) {
                return Err(ValidationError::AmountTooLarge {
                    field: "vat rate",
                    value: rate.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// The issuing store's profile, as recorded alongside each verification
/// record for public display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    /// Store identifier; must match the receipt being registered.
    pub store_id: StoreId,
    /// Display name shown to anyone verifying a receipt.
    pub name: String,
}

impl StoreProfile {
    /// Ensure this profile belongs to the store on `receipt`.
    pub fn matches(&self, receipt: &Receipt) -> Result<(), ValidationError> {
        if self.store_id != receipt.store_id {
            return Err(ValidationError::StoreMismatch {
                profile: self.store_id.as_str().to_string(),
                receipt: receipt.store_id.as_str().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn base_receipt() -> Receipt {
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
    fn subtotal_sums_line_totals() {
        let mut receipt = base_receipt();
        receipt.items.push(LineItem {
            name: "Gadget".to_string(),
            unit_price: dec("250.50"),
            quantity: 3,
        });
        assert_eq!(receipt.subtotal(), dec("2751.50"));
    }

    #[test]
    fn total_without_vat_is_subtotal() {
        let receipt = base_receipt();
        assert_eq!(receipt.total(), dec("2000.00"));
    }

    #[test]
    fn total_applies_discount_vat_and_surcharges() {
        let mut receipt = base_receipt();
        receipt.discount = dec("200");
        receipt.vat_rate = Some(dec("7.5"));
        receipt.delivery_fee = dec("150");
        receipt.service_charge = dec("50");
        // subtotal 2000, discounted 1800, vat 135, total 2135.
        assert_eq!(receipt.vat_amount(), dec("135.00"));
        assert_eq!(receipt.total(), dec("2135.00"));
    }

    #[test]
    fn vat_rounds_midpoint_away_from_zero() {
        let mut receipt = base_receipt();
        receipt.items = vec![LineItem {
            name: "Odd".to_string(),
            unit_price: dec("33.35"),
            quantity: 1,
        }];
        receipt.vat_rate = Some(dec("7.5"));
        // 33.35 × 0.075 = 2.50125 → 2.50
        assert_eq!(receipt.vat_amount(), dec("2.50"));
        receipt.items[0].unit_price = dec("33.40");
        // 33.40 × 0.075 = 2.505 → midpoint rounds up
        assert_eq!(receipt.vat_amount(), dec("2.51"));
    }

    #[test]
    fn rounded_totals_carry_two_fractional_digits() {
        let receipt = base_receipt();
        assert_eq!(receipt.total().to_string(), "2000.00");
        assert_eq!(round_money(dec("7")).to_string(), "7.00");
    }

    #[test]
    fn vat_disabled_contributes_nothing() {
        let receipt = base_receipt();
        assert_eq!(receipt.vat_amount(), Decimal::ZERO);
    }

    #[test]
    fn validate_accepts_well_formed_receipt() {
        assert!(base_receipt().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_items() {
        let mut receipt = base_receipt();
        receipt.items.clear();
        assert!(matches!(
            receipt.validate().unwrap_err(),
            ValidationError::NoLineItems { .. }
        ));
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        let mut receipt = base_receipt();
        receipt.items[0].quantity = 0;
        assert!(matches!(
            receipt.validate().unwrap_err(),
            ValidationError::ZeroQuantity { .. }
        ));
    }

    #[test]
    fn validate_rejects_negative_amounts() {
        let mut receipt = base_receipt();
        receipt.discount = dec("-5");
        assert!(matches!(
            receipt.validate().unwrap_err(),
            ValidationError::NegativeAmount { field: "discount", .. }
        ));

        let mut receipt = base_receipt();
        receipt.items[0].unit_price = dec("-1");
        assert!(receipt.validate().is_err());

        let mut receipt = base_receipt();
        receipt.vat_rate = Some(dec("-7.5"));
        assert!(receipt.validate().is_err());
    }

    #[test]
    fn validate_rejects_amounts_beyond_maximum() {
        // unit_price near Decimal::MAX used to pass validation and then
        // overflow inside subtotal()/total().
        let mut receipt = base_receipt();
        receipt.items[0].unit_price = Decimal::MAX;
        receipt.items[0].quantity = 2;
        assert!(matches!(
            receipt.validate().unwrap_err(),
            ValidationError::AmountTooLarge { field: "unit price", .. }
        ));

        // Each line within bounds but the subtotal beyond them.
        let mut receipt = base_receipt();
        receipt.items[0].unit_price = Decimal::from(MAX_AMOUNT_UNITS);
        receipt.items[0].quantity = 2;
        assert!(matches!(
            receipt.validate().unwrap_err(),
            ValidationError::AmountTooLarge { field: "subtotal", .. }
        ));

        let mut receipt = base_receipt();
        receipt.discount = Decimal::MAX;
        assert!(matches!(
            receipt.validate().unwrap_err(),
            ValidationError::AmountTooLarge { field: "discount", .. }
        ));

        let mut receipt = base_receipt();
        receipt.vat_rate = Some(dec("101"));
        assert!(matches!(
            receipt.validate().unwrap_err(),
            ValidationError::AmountTooLarge { field: "vat rate", .. }
        ));
    }

    #[test]
    fn validate_accepts_amounts_at_the_maximum() {
        let mut receipt = base_receipt();
        receipt.items[0].unit_price = Decimal::from(MAX_AMOUNT_UNITS);
        receipt.items[0].quantity = 1;
        receipt.vat_rate = Some(dec("100"));
        assert!(receipt.validate().is_ok());
        // Subtotal plus 100% VAT: derived without overflow.
        assert_eq!(receipt.total(), dec("2000000000000.00"));
    }

    #[test]
    fn store_profile_match() {
        let receipt = base_receipt();
        let profile = StoreProfile {
            store_id: StoreId::new("S1").unwrap(),
            name: "Corner Shop".to_string(),
        };
        assert!(profile.matches(&receipt).is_ok());

        let other = StoreProfile {
            store_id: StoreId::new("S2").unwrap(),
            name: "Other Shop".to_string(),
        };
        assert!(matches!(
            other.matches(&receipt).unwrap_err(),
            ValidationError::StoreMismatch { .. }
        ));
    }

    #[test]
    fn receipt_serde_round_trip() {
        let receipt = base_receipt();
        let json = serde_json::to_string(&receipt).unwrap();
        let back: Receipt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, receipt);
    }

    #[test]
    fn receipt_deserialize_defaults_optional_amounts() {
        let json = r#"{
            "store_id": "S1",
            "receipt_number": "RCT-1001",
            "date": "2024-01-01",
            "time": "10:00:00",
            "items": [{"name": "Widget", "unit_price": "1000", "quantity": 2}]
        }"#;
        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.discount, Decimal::ZERO);
        assert!(receipt.vat_rate.is_none());
        assert_eq!(receipt.total(), dec("2000.00"));
    }
}
