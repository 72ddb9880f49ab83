//! Cart totals with shipping.

use serde::{Deserialize, Serialize};

/// Flat-rate shipping with a free-shipping threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShippingPolicy {
    /// Subtotal at or above which shipping is free.
    pub free_threshold: f64,
    /// Shipping charged below the threshold.
    pub flat_rate: f64,
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self {
            free_threshold: 150.0,
            flat_rate: 15.0,
        }
    }
}

impl ShippingPolicy {
    /// Shipping charged on `subtotal`.
    pub fn shipping_for(&self, subtotal: f64) -> f64 {
        if subtotal >= self.free_threshold {
            0.0
        } else {
            self.flat_rate
        }
    }
}

/// What the cart page shows under the line items. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartSummary {
    pub subtotal: f64,
    pub shipping: f64,
    pub grand_total: f64,
    /// How much more to spend for free shipping; zero once it applies.
    pub amount_to_free_shipping: f64,
}

impl CartSummary {
    pub fn from_subtotal(subtotal: f64, policy: &ShippingPolicy) -> Self {
        let shipping = policy.shipping_for(subtotal);
        Self {
            subtotal,
            shipping,
            grand_total: subtotal + shipping,
            amount_to_free_shipping: (policy.free_threshold - subtotal).max(0.0),
        }
    }

    /// Check if shipping is free.
    pub fn free_shipping(&self) -> bool {
        self.shipping == 0.0
    }
}
