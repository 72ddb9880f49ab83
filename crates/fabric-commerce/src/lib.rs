//! Catalog, display pricing and cart logic for the fabric storefront.
//!
//! - **Pricing**: converts stored cost prices into customer-facing prices
//! - **Catalog**: products, categories and banners loaded from static JSON
//! - **Search**: category/type/content/tag filtering and sorting
//! - **Cart**: client-local shopping cart persisted through `fabric-cache`
//!
//! # Example
//!
//! ```rust,ignore
//! use fabric_commerce::prelude::*;
//!
//! let catalog = Catalog::load("data")?;
//! let engine = PricingEngine::default();
//!
//! let mut cart = CartStore::load(Cache::open(".fabric")?, engine);
//! let product = catalog.product_by_slug("tencel-twill").unwrap();
//! cart.add_item(product, 2.5);
//!
//! println!("Total: {}", format_price(cart.total_price()));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod pricing;
pub mod catalog;
pub mod cart;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{format_price, round2};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{format_price, round2};

    // Pricing
    pub use crate::pricing::{
        DefaultPricingConfig, DisplayPrices, PriceInputs, PricingConfig, PricingConfigSource,
        PricingEngine,
    };

    // Catalog
    pub use crate::catalog::{Banner, Catalog, Category, FabricContent, Product};

    // Cart
    pub use crate::cart::{
        CartItem, CartState, CartStore, CartSummary, ShippingPolicy, CART_STORAGE_KEY,
    };

    // Search
    pub use crate::search::{search, FilterOptions, PriceRange, SortOption};

    pub use fabric_cache::Cache;
}
