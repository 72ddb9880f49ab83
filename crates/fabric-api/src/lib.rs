//! HTTP endpoints for the fabric storefront.
//!
//! Two read-only routes back the storefront pages with data that lives on
//! disk rather than in the catalog:
//!
//! - `GET /api/new-products`: the new-arrivals list from `new-product.json`
//! - `GET /api/about-images`: image paths under `images/about-us`
//!
//! # Example
//!
//! ```rust,ignore
//! use fabric_api::{serve, ApiState};
//!
//! serve("127.0.0.1:3000", ApiState::new("data", "public")).await?;
//! ```

mod error;
mod handlers;
mod router;

pub use error::ApiError;
pub use handlers::{
    about_images, list_about_images, new_products, read_new_products, ABOUT_IMAGES_DIR,
    NEW_PRODUCTS_FILE,
};
pub use router::{router, serve, ApiState};
