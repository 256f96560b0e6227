//! Order pricing
//!
//! ```text
//! subtotal      = Σ (item.price × item.quantity)
//! tax           = subtotal × taxRate / 100        (0 when disabled)
//! serviceCharge = subtotal × serviceChargeRate / 100
//! total         = subtotal + tax + serviceCharge − discount, floored at 0
//! ```
//!
//! Rates come from [`AppSettings`]; nothing here reads global state.
//! Arithmetic runs on `Decimal` and is rounded back to 2 decimal places
//! for storage.

use rust_decimal::prelude::*;
use shared::models::{AppSettings, OrderItem};

const DECIMAL_PLACES: u32 = 2;

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Result of an order price calculation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub service_charge: f64,
    pub discount: f64,
    pub total: f64,
}

/// Calculate order totals from line items and the current settings
pub fn calculate_totals(items: &[OrderItem], settings: &AppSettings, discount: f64) -> OrderTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| to_decimal(item.price) * Decimal::from(item.quantity))
        .sum();

    let hundred = Decimal::from(100);
    let tax = if settings.enable_tax {
        subtotal * to_decimal(settings.tax_rate) / hundred
    } else {
        Decimal::ZERO
    };
    let service_charge = if settings.enable_service_charge {
        subtotal * to_decimal(settings.service_charge_rate) / hundred
    } else {
        Decimal::ZERO
    };

    // discount is subtracted last and must not drive the total below zero
    let total = (subtotal + tax + service_charge - to_decimal(discount)).max(Decimal::ZERO);

    OrderTotals {
        subtotal: to_f64(subtotal),
        tax: to_f64(tax),
        service_charge: to_f64(service_charge),
        discount: to_f64(to_decimal(discount)),
        total: to_f64(total),
    }
}
