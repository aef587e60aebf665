//! Checkout totals and validation
//!
//! Amounts are whole rupees. Shipping is a flat fee waived once the
//! item subtotal strictly exceeds the free-shipping threshold.

use shared::models::OrderCreate;

/// 免运费门槛（卢比）
pub const FREE_SHIPPING_THRESHOLD: f64 = 15_000.0;
/// 固定运费（卢比）
pub const SHIPPING_FEE: f64 = 500.0;

/// One cart line with its captured unit price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub price: f64,
    pub quantity: i32,
}

/// Item subtotal: Σ(price × quantity)
pub fn compute_subtotal(lines: &[PricedLine]) -> f64 {
    lines
        .iter()
        .map(|l| l.price * f64::from(l.quantity))
        .sum()
}

/// Flat shipping fee, waived strictly above the threshold
pub fn compute_shipping(subtotal: f64) -> f64 {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        0.0
    } else {
        SHIPPING_FEE
    }
}

/// Order total: subtotal plus shipping
pub fn compute_total(lines: &[PricedLine]) -> f64 {
    let subtotal = compute_subtotal(lines);
    subtotal + compute_shipping(subtotal)
}

/// Validate a checkout payload, collecting every missing field.
///
/// Returns the list of offending fields so the client can surface all
/// of them at once.
pub fn validate_checkout(payload: &OrderCreate) -> Result<(), Vec<&'static str>> {
    let mut missing = Vec::new();

    if payload.items.is_empty() {
        missing.push("items");
    }
    if payload.items.iter().any(|i| i.quantity <= 0) {
        missing.push("items.quantity");
    }

    let addr = &payload.shipping_address;
    if addr.street.trim().is_empty() {
        missing.push("shipping_address.street");
    }
    if addr.city.trim().is_empty() {
        missing.push("shipping_address.city");
    }
    if addr.state.trim().is_empty() {
        missing.push("shipping_address.state");
    }
    if addr.postal_code.trim().is_empty() {
        missing.push("shipping_address.postal_code");
    }
    if addr.country.trim().is_empty() {
        missing.push("shipping_address.country");
    }
    if addr.phone.trim().is_empty() {
        missing.push("shipping_address.phone");
    }

    if missing.is_empty() { Ok(()) } else { Err(missing) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CartItemInput, ShippingAddress};

    fn full_address() -> ShippingAddress {
        ShippingAddress {
            street: "14 Carvers Lane".into(),
            city: "Jaipur".into(),
            state: "Rajasthan".into(),
            postal_code: "302001".into(),
            country: "India".into(),
            phone: "+91 98765 43210".into(),
        }
    }

    #[test]
    fn shipping_threshold_is_strict() {
        assert_eq!(compute_shipping(15_000.0), 500.0);
        assert_eq!(compute_shipping(15_001.0), 0.0);
        assert_eq!(compute_shipping(0.0), 500.0);
    }

    #[test]
    fn total_adds_flat_shipping_below_threshold() {
        let lines = [
            PricedLine {
                price: 100.0,
                quantity: 2,
            },
            PricedLine {
                price: 50.0,
                quantity: 1,
            },
        ];
        assert_eq!(compute_subtotal(&lines), 250.0);
        assert_eq!(compute_total(&lines), 750.0);
    }

    #[test]
    fn total_waives_shipping_above_threshold() {
        let lines = [PricedLine {
            price: 16_800.0,
            quantity: 1,
        }];
        assert_eq!(compute_total(&lines), 16_800.0);
    }

    #[test]
    fn empty_cart_totals_to_bare_shipping() {
        // Rejected by validation before it ever reaches pricing
        assert_eq!(compute_total(&[]), 500.0);
    }

    #[test]
    fn validation_accepts_complete_payload() {
        let payload = OrderCreate {
            items: vec![CartItemInput {
                product_id: 101,
                quantity: 1,
            }],
            shipping_address: full_address(),
            notes: None,
        };
        assert!(validate_checkout(&payload).is_ok());
    }

    #[test]
    fn validation_collects_every_missing_field() {
        let payload = OrderCreate {
            items: vec![],
            shipping_address: ShippingAddress {
                street: String::new(),
                city: "Jaipur".into(),
                state: String::new(),
                postal_code: "  ".into(),
                country: "India".into(),
                phone: String::new(),
            },
            notes: None,
        };
        let missing = validate_checkout(&payload).unwrap_err();
        assert_eq!(
            missing,
            vec![
                "items",
                "shipping_address.street",
                "shipping_address.state",
                "shipping_address.postal_code",
                "shipping_address.phone",
            ]
        );
    }

    #[test]
    fn validation_rejects_non_positive_quantities() {
        let payload = OrderCreate {
            items: vec![CartItemInput {
                product_id: 101,
                quantity: 0,
            }],
            shipping_address: full_address(),
            notes: None,
        };
        let missing = validate_checkout(&payload).unwrap_err();
        assert_eq!(missing, vec!["items.quantity"]);
    }
}
