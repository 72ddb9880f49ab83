//! Product list filters.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::pricing::PricingEngine;

/// Inclusive range over the displayed unit price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Filter selection for the product list.
///
/// Within a group the selected values are alternatives (OR); groups
/// combine with AND. Empty groups don't filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    /// Category ids.
    pub categories: Vec<String>,
    /// Fabric types (Woven, Knit...).
    pub fabric_types: Vec<String>,
    /// Fiber names (Cotton, Tencel...).
    pub contents: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    /// Only products marked in stock.
    pub in_stock: bool,
    /// Case-insensitive match on name, product number or description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse URL query pairs the way the product list page reads them.
    ///
    /// `category`, `fabricType`, `content` and `tags` are comma-separated
    /// lists; `inStock=true` and `q` are also understood. Unknown keys are
    /// ignored.
    pub fn from_query_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut options = Self::default();
        for (key, value) in pairs {
            match key {
                "category" => options.categories = split_list(value),
                "fabricType" => options.fabric_types = split_list(value),
                "content" => options.contents = split_list(value),
                "tags" => options.tags = split_list(value),
                "inStock" => options.in_stock = value == "true",
                "q" if !value.trim().is_empty() => {
                    options.search_query = Some(value.trim().to_string())
                }
                _ => {}
            }
        }
        options
    }

    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_fabric_types(mut self, types: Vec<String>) -> Self {
        self.fabric_types = types;
        self
    }

    pub fn with_contents(mut self, contents: Vec<String>) -> Self {
        self.contents = contents;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn in_stock_only(mut self) -> Self {
        self.in_stock = true;
        self
    }

    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.search_query = if query.trim().is_empty() {
            None
        } else {
            Some(query)
        };
        self
    }

    /// Number of selected values across the list groups.
    pub fn selected_count(&self) -> usize {
        self.categories.len() + self.fabric_types.len() + self.contents.len() + self.tags.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
            && self.price_range.is_none()
            && !self.in_stock
            && self.search_query.is_none()
    }

    /// Check whether `product` passes every active filter.
    pub fn matches(&self, product: &Product, engine: &PricingEngine) -> bool {
        if !self.categories.is_empty()
            && !self.categories.iter().any(|c| c == product.category.as_str())
        {
            return false;
        }
        if !self.fabric_types.is_empty() && !self.fabric_types.contains(&product.fabric_type) {
            return false;
        }
        if !self.contents.is_empty() && !self.contents.iter().any(|c| product.has_content(c)) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| product.has_tag(t)) {
            return false;
        }
        if self.in_stock && !product.in_stock {
            return false;
        }
        if let Some(range) = &self.price_range {
            if !range.contains(engine.unit_price(product)) {
                return false;
            }
        }
        if let Some(query) = &self.search_query {
            let query = query.to_lowercase();
            let hit = product.name.to_lowercase().contains(&query)
                || product.product_no.to_lowercase().contains(&query)
                || product.description.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }
        true
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn twill() -> Product {
        Product::new(ProductId::new("1"), "Tencel Twill", 10.0)
            .with_product_no("801#")
            .with_category("tencel")
            .with_fabric_type("Woven")
            .with_content("Tencel", 70.0)
            .with_content("Cotton", 30.0)
            .with_tag("New")
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let options = FilterOptions::new();
        assert!(options.is_empty());
        assert!(options.matches(&twill(), &PricingEngine::default()));
    }

    #[test]
    fn test_or_within_group() {
        let engine = PricingEngine::default();
        let options = FilterOptions::new().with_categories(vec!["cotton".into(), "tencel".into()]);
        assert!(options.matches(&twill(), &engine));

        let options = FilterOptions::new().with_contents(vec!["Silk".into(), "Cotton".into()]);
        assert!(options.matches(&twill(), &engine));
    }

    #[test]
    fn test_and_across_groups() {
        let engine = PricingEngine::default();
        let options = FilterOptions::new()
            .with_categories(vec!["tencel".into()])
            .with_tags(vec!["Sale".into()]);
        assert!(!options.matches(&twill(), &engine));
    }

    #[test]
    fn test_in_stock() {
        let engine = PricingEngine::default();
        let options = FilterOptions::new().in_stock_only();
        assert!(options.matches(&twill(), &engine));
        assert!(!options.matches(&twill().with_in_stock(false), &engine));
    }

    #[test]
    fn test_price_range_uses_display_price() {
        let engine = PricingEngine::default();
        // 10.0 cost displays as 11.00
        let options = FilterOptions::new().with_price_range(PriceRange::new(10.5, 11.5));
        assert!(options.matches(&twill(), &engine));
        let options = FilterOptions::new().with_price_range(PriceRange::new(0.0, 10.0));
        assert!(!options.matches(&twill(), &engine));
    }

    #[test]
    fn test_search_query() {
        let engine = PricingEngine::default();
        assert!(FilterOptions::new().with_search_query("twill").matches(&twill(), &engine));
        assert!(FilterOptions::new().with_search_query("801").matches(&twill(), &engine));
        assert!(!FilterOptions::new().with_search_query("denim").matches(&twill(), &engine));
        assert!(FilterOptions::new().with_search_query("  ").search_query.is_none());
    }

    #[test]
    fn test_from_query_pairs() {
        let options = FilterOptions::from_query_pairs([
            ("category", "tencel,,cotton"),
            ("tags", "New"),
            ("inStock", "true"),
            ("q", " twill "),
            ("page", "2"),
        ]);
        assert_eq!(options.categories, vec!["tencel", "cotton"]);
        assert_eq!(options.tags, vec!["New"]);
        assert!(options.in_stock);
        assert_eq!(options.search_query.as_deref(), Some("twill"));
        assert_eq!(options.selected_count(), 3);
    }
}
