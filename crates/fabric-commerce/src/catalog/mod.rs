//! Product catalog module.
//!
//! Contains products, categories and banners, loaded read-only from the
//! storefront's static JSON files.

mod catalog;
mod category;
mod product;

pub use catalog::{Catalog, BANNERS_FILE, CATEGORIES_FILE, PRODUCTS_FILE};
pub use category::{Banner, Category};
pub use product::{slugify, FabricContent, Product};
