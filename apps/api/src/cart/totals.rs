//! Order totals. Prices are stored and summed as plain dollar amounts;
//! rounding to cents is a display concern left to clients.

use serde::{Deserialize, Serialize};

use crate::models::cart::CartLine;

/// Flat sales tax applied at checkout.
pub const TAX_RATE: f64 = 0.08;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

pub fn compute_totals(lines: &[CartLine]) -> CartTotals {
    let subtotal: f64 = lines
        .iter()
        .map(|line| line.book.price * f64::from(line.quantity))
        .sum();
    let tax = subtotal * TAX_RATE;
    CartTotals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
