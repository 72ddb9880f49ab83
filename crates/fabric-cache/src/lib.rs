//! Typed JSON key-value storage for the fabric storefront.
//!
//! This is the "client-local durable storage" the cart persists into. Values
//! are serialized with `serde_json` and stored either as one file per key in
//! a directory, or in memory for tests and throwaway sessions.
//!
//! # Example
//!
//! ```rust,ignore
//! use fabric_cache::Cache;
//!
//! let cache = Cache::open(".fabric")?;
//! cache.set("tx-fabric-cart", &cart)?;
//!
//! let cart: Option<CartState> = cache.get("tx-fabric-cart")?;
//! cache.delete("tx-fabric-cart")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{validate_key, Cache};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError};
}
