//! Sorting and the filter-then-sort pipeline.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::pricing::PricingEngine;
use crate::search::FilterOptions;

/// Sort options for the product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Newest `created_at` first.
    #[default]
    Newest,
    /// List price, low to high.
    PriceAsc,
    /// List price, high to low.
    PriceDesc,
    /// Name A-Z.
    Name,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::Name => "name",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::Name => "Name",
        }
    }

    /// Order two products under this option.
    ///
    /// Products with an unparseable `created_at` sort after dated ones under
    /// `Newest`. `Name` ignores case.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::Newest => match (a.created_at_time(), b.created_at_time()) {
                (Some(ta), Some(tb)) => tb.cmp(&ta),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortOption::PriceAsc => a.list_price().total_cmp(&b.list_price()),
            SortOption::PriceDesc => b.list_price().total_cmp(&a.list_price()),
            SortOption::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(SortOption::Newest),
            "price-asc" => Ok(SortOption::PriceAsc),
            "price-desc" => Ok(SortOption::PriceDesc),
            "name" => Ok(SortOption::Name),
            other => Err(CommerceError::InvalidSortOption(other.to_string())),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter `products` and sort the survivors. The sort is stable.
pub fn search<'a>(
    products: &'a [Product],
    filters: &FilterOptions,
    sort: SortOption,
    engine: &PricingEngine,
) -> Vec<&'a Product> {
    let mut results: Vec<&Product> = products
        .iter()
        .filter(|p| filters.matches(p, engine))
        .collect();
    results.sort_by(|a, b| sort.compare(a, b));
    results
}
