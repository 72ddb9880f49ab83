//! Cart state and line items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::pricing::PricingEngine;

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product as it was when first added. Later catalog changes don't reach it.
    pub product: Product,
    /// Meters, in steps of 0.5.
    pub quantity: f64,
    /// When the line was created.
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Id of the product on this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self, engine: &PricingEngine) -> f64 {
        engine.unit_price(&self.product) * self.quantity
    }
}

/// The ordered list of cart lines.
///
/// At most one line per product id; insertion order is display order.
/// Mutation goes through [`crate::cart::CartStore`], which persists after
/// every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    #[serde(default)]
    items: Vec<CartItem>,
}

impl CartState {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines, keeping their order.
    pub(crate) fn from_items(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Add `quantity` of `product`.
    ///
    /// If the product is already in the cart its quantity grows and its
    /// snapshot is kept. Quantity is not validated.
    pub(crate) fn add_item(&mut self, product: Product, quantity: f64, now: DateTime<Utc>) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            existing.quantity += quantity;
            return;
        }

        self.items.push(CartItem {
            product,
            quantity,
            added_at: now,
        });
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub(crate) fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.product.id != product_id);
        self.items.len() < len_before
    }

    /// Set the quantity for `product_id`; `quantity <= 0` removes the line.
    /// Returns whether a line was changed.
    pub(crate) fn update_quantity(&mut self, product_id: &ProductId, quantity: f64) -> bool {
        if quantity <= 0.0 {
            return self.remove_item(product_id);
        }

        match self.items.iter_mut().find(|i| &i.product.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove all lines.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in display order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product.id == product_id)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across lines.
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals, unrounded. Recomputed on every call.
    pub fn total_price(&self, engine: &PricingEngine) -> f64 {
        self.items.iter().map(|i| i.line_total(engine)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product::new(ProductId::new(id), format!("Fabric {}", id), price)
    }

    #[test]
    fn test_add_item() {
        let mut cart = CartState::new();
        cart.add_item(product("p1", 10.0), 2.0, Utc::now());

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2.0);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = CartState::new();
        cart.add_item(product("p1", 10.0), 2.0, Utc::now());
        cart.add_item(product("p1", 10.0), 1.5, Utc::now());

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(&ProductId::new("p1")).unwrap().quantity, 3.5);
    }

    #[test]
    fn test_first_snapshot_wins() {
        let mut cart = CartState::new();
        cart.add_item(product("p1", 10.0), 1.0, Utc::now());
        cart.add_item(product("p1", 99.0), 1.0, Utc::now());

        assert_eq!(cart.get(&ProductId::new("p1")).unwrap().product.price, 10.0);
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut cart = CartState::new();
        cart.add_item(product("b", 1.0), 1.0, Utc::now());
        cart.add_item(product("a", 1.0), 1.0, Utc::now());
        cart.add_item(product("b", 1.0), 1.0, Utc::now());

        let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id().as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_update_quantity_replaces() {
        let mut cart = CartState::new();
        cart.add_item(product("p1", 10.0), 2.0, Utc::now());

        assert!(cart.update_quantity(&ProductId::new("p1"), 5.5));
        assert_eq!(cart.total_quantity(), 5.5);
        assert!(!cart.update_quantity(&ProductId::new("missing"), 1.0));
    }

    #[test]
    fn test_update_quantity_to_zero_removes() {
        let mut cart = CartState::new();
        cart.add_item(product("p1", 10.0), 2.0, Utc::now());
        cart.add_item(product("p2", 10.0), 2.0, Utc::now());

        assert!(cart.update_quantity(&ProductId::new("p1"), 0.0));
        assert!(cart.update_quantity(&ProductId::new("p2"), -1.0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = CartState::new();
        cart.add_item(product("p1", 10.0), 2.0, Utc::now());

        assert!(!cart.remove_item(&ProductId::new("nope")));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_total_price() {
        let engine = PricingEngine::default();
        let mut cart = CartState::new();
        // 5.2 at hc 91 displays as 6.29; 10.0 without hc displays as 11.00
        cart.add_item(product("p1", 5.2).with_hc(91.0), 2.0, Utc::now());
        cart.add_item(product("p2", 10.0), 1.0, Utc::now());

        assert!((cart.total_price(&engine) - 23.58).abs() < 1e-9);
    }

    #[test]
    fn test_total_price_prefers_sale_then_white() {
        let engine = PricingEngine::default();
        let mut cart = CartState::new();
        cart.add_item(product("p1", 10.0).with_sale_price(4.0), 2.0, Utc::now());
        cart.add_item(product("p2", 10.0).with_white_price(20.0), 0.5, Utc::now());

        // 4.0 * 2 + 22.0 * 0.5
        assert!((cart.total_price(&engine) - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = CartState::new();
        cart.add_item(product("p1", 10.0), 1.0, Utc::now());

        let value = serde_json::to_value(&cart).unwrap();
        let item = &value["items"][0];
        assert_eq!(item["product"]["id"], "p1");
        assert_eq!(item["quantity"], 1.0);
        assert!(item["addedAt"].is_string());
    }
}
