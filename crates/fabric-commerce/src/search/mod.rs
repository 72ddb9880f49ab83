//! Search module.
//!
//! Filtering and sorting over the in-memory product list.

mod filter;
mod query;

pub use filter::{FilterOptions, PriceRange};
pub use query::{search, SortOption};
