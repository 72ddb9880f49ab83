//! Shopping cart module.
//!
//! Contains the cart state, the persisting cart store and the shipping
//! summary shown under the cart lines.

mod cart;
mod store;
mod summary;

pub use cart::{CartItem, CartState};
pub use store::{CartStore, CART_STORAGE_KEY};
pub use summary::{CartSummary, ShippingPolicy};
