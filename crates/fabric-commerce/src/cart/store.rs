//! The cart store: owned cart state plus persistence.

use chrono::Utc;
use fabric_cache::Cache;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::cart::{CartItem, CartState, CartSummary, ShippingPolicy};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::pricing::PricingEngine;

/// Storage key the cart is persisted under.
pub const CART_STORAGE_KEY: &str = "tx-fabric-cart";

/// Stored cart with lines left undecoded, so one bad line doesn't lose the rest.
#[derive(Deserialize)]
struct StoredCart {
    #[serde(default)]
    items: Vec<serde_json::Value>,
}

impl StoredCart {
    fn into_state(self) -> CartState {
        let items = self
            .items
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<CartItem>(raw) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(index, error = %e, "dropping unreadable cart line");
                    None
                }
            })
            .collect();
        CartState::from_items(items)
    }
}

/// The only entry point for changing the cart.
///
/// Every mutation writes the whole cart back to storage before returning.
/// A failed write is logged and otherwise ignored: the in-memory cart stays
/// changed and the next successful write catches storage up. Separate
/// processes sharing the same storage are not coordinated; the last write
/// wins.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    cache: Cache,
    engine: PricingEngine,
}

impl CartStore {
    /// Load the persisted cart from `cache`.
    ///
    /// A missing or unreadable value starts an empty cart. Lines that no
    /// longer decode are dropped and the rest are kept.
    pub fn load(cache: Cache, engine: PricingEngine) -> Self {
        let state = match cache.get::<StoredCart>(CART_STORAGE_KEY) {
            Ok(Some(stored)) => {
                let state = stored.into_state();
                debug!(items = state.item_count(), "restored cart");
                state
            }
            Ok(None) => CartState::new(),
            Err(e) => {
                warn!(error = %e, "stored cart unreadable, starting empty");
                CartState::new()
            }
        };

        Self {
            state,
            cache,
            engine,
        }
    }

    /// Write the cart to storage.
    pub fn save(&self) -> Result<(), CommerceError> {
        self.cache.set(CART_STORAGE_KEY, &self.state)?;
        Ok(())
    }

    /// Add `quantity` meters of `product`.
    ///
    /// A product already in the cart keeps its first snapshot and only
    /// gains quantity. Callers are expected to pass a positive quantity.
    pub fn add_item(&mut self, product: &Product, quantity: f64) {
        debug!(product = %product.id, quantity, "add to cart");
        self.state.add_item(product.clone(), quantity, Utc::now());
        self.persist();
    }

    /// Remove the line for `product_id`, if any.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        debug!(product = %product_id, "remove from cart");
        self.state.remove_item(product_id);
        self.persist();
    }

    /// Set the quantity for `product_id`. Zero or less removes the line.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: f64) {
        debug!(product = %product_id, quantity, "update cart quantity");
        self.state.update_quantity(product_id, quantity);
        self.persist();
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        debug!("clear cart");
        self.state.clear();
        self.persist();
    }

    /// Sum over lines of unit price times quantity.
    pub fn total_price(&self) -> f64 {
        self.state.total_price(&self.engine)
    }

    /// Subtotal, shipping and grand total under `policy`.
    pub fn summary(&self, policy: &ShippingPolicy) -> CartSummary {
        CartSummary::from_subtotal(self.total_price(), policy)
    }

    /// Unit price times quantity for one line.
    pub fn line_total(&self, item: &CartItem) -> f64 {
        item.line_total(&self.engine)
    }

    /// The current cart state.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Lines in display order.
    pub fn items(&self) -> &[CartItem] {
        self.state.items()
    }

    /// Get the line for a product.
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.state.get(product_id)
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Number of lines.
    pub fn item_count(&self) -> usize {
        self.state.item_count()
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> f64 {
        self.state.total_quantity()
    }

    /// The pricing engine totals are computed with.
    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CartStore {
        CartStore::load(Cache::in_memory(), PricingEngine::default())
    }

    fn fabric(id: &str, price: f64) -> Product {
        Product::new(ProductId::new(id), format!("Fabric {}", id), price)
    }

    #[test]
    fn test_add_then_zero_quantity_empties_cart() {
        let mut cart = store();
        let p = fabric("p", 10.0);

        cart.add_item(&p, 2.0);
        cart.add_item(&p, 1.5);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(&p.id).unwrap().quantity, 3.5);

        cart.update_quantity(&p.id, 0.0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price_two_lines() {
        let mut cart = store();
        cart.add_item(&fabric("a", 5.2).with_hc(91.0), 2.0);
        cart.add_item(&fabric("b", 10.0), 1.0);

        assert!((cart.total_price() - 23.58).abs() < 1e-9);
    }

    #[test]
    fn test_total_tracks_engine_config() {
        let engine = PricingEngine::new(crate::pricing::PricingConfig::default().with_profit_margin(0.0));
        let mut cart = CartStore::load(Cache::in_memory(), engine);
        cart.add_item(&fabric("a", 10.0), 1.5);

        assert!((cart.total_price() - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_mutations_persist() {
        let mut cart = store();
        cart.add_item(&fabric("a", 10.0), 1.0);

        let stored = cart.cache.get::<CartState>(CART_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(&stored, cart.state());

        cart.clear_cart();
        let stored = cart.cache.get::<CartState>(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(stored.is_empty());
    }

    #[test]
    fn test_corrupt_storage_loads_empty() {
        let cache = Cache::in_memory();
        cache.set_raw(CART_STORAGE_KEY, b"not json at all".to_vec()).unwrap();

        let cart = CartStore::load(cache, PricingEngine::default());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unreadable_line_is_dropped_on_load() {
        let cache = Cache::in_memory();
        let raw = r#"{"items": [
            {"product": {"id": "a", "name": "Fabric a", "price": 10.0}, "quantity": 2.0, "addedAt": "2024-01-01T00:00:00Z"},
            {"product": {"id": "b", "name": "Fabric b", "price": 4.0}, "quantity": null, "addedAt": "2024-01-01T00:00:00Z"}
        ]}"#;
        cache.set_raw(CART_STORAGE_KEY, raw.as_bytes().to_vec()).unwrap();

        let cart = CartStore::load(cache, PricingEngine::default());
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items()[0].product_id().as_str(), "a");
        assert_eq!(cart.items()[0].quantity, 2.0);
    }

    #[test]
    fn test_remove_item_missing_is_noop() {
        let mut cart = store();
        cart.add_item(&fabric("a", 10.0), 1.0);
        cart.remove_item(&ProductId::new("zzz"));
        assert_eq!(cart.item_count(), 1);
    }
}
