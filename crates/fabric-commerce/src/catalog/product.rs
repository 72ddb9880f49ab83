//! Product types.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ProductId};
use crate::pricing::PriceInputs;

/// One fiber in a fabric's composition (e.g. Cotton 60%).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FabricContent {
    /// Fiber name: Cotton, Tencel, Polyester...
    pub name: String,
    /// Share of the composition, 0-100.
    pub percentage: f64,
}

impl FabricContent {
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }
}

/// A fabric in the catalog.
///
/// Prices are cost prices per meter; see [`crate::pricing`] for how they
/// become display prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Supplier article number (e.g. "801#").
    #[serde(default)]
    pub product_no: String,
    /// Product name.
    pub name: String,
    /// URL-friendly slug.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    /// Cost price for white/undyed goods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_price: Option<f64>,
    /// Cost price for dyed goods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_price: Option<f64>,
    /// Cost price of a sample cut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_price: Option<f64>,
    /// Default cost price.
    pub price: f64,
    /// Promotional price; used as-is, without margin or yield adjustment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    /// Category id (e.g. "tencel").
    #[serde(default)]
    pub category: CategoryId,
    /// Woven, Knit, Print...
    #[serde(default)]
    pub fabric_type: String,
    #[serde(default)]
    pub content: Vec<FabricContent>,
    /// New, Sale, Deadstock...
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Width in centimeters.
    #[serde(default)]
    pub width: f64,
    /// Weight in g/m².
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Yield factor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hc: Option<f64>,
    /// Creation time as an ISO-8601 string.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub featured: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create an in-stock product with a base cost price.
    pub fn new(id: ProductId, name: impl Into<String>, price: f64) -> Self {
        let name = name.into();
        Self {
            id,
            product_no: String::new(),
            slug: slugify(&name),
            name,
            description: String::new(),
            white_price: None,
            color_price: None,
            sample_price: None,
            price,
            sale_price: None,
            images: Vec::new(),
            category: CategoryId::default(),
            fabric_type: String::new(),
            content: Vec::new(),
            tags: Vec::new(),
            in_stock: true,
            width: 0.0,
            weight: None,
            hc: None,
            created_at: String::new(),
            featured: false,
        }
    }

    /// The fields the pricing engine needs.
    pub fn price_inputs(&self) -> PriceInputs {
        PriceInputs {
            price: self.price,
            white_price: self.white_price,
            color_price: self.color_price,
            sample_price: self.sample_price,
            hc: self.hc,
        }
    }

    /// The price the list page sorts on: sale price if set, else cost price.
    pub fn list_price(&self) -> f64 {
        crate::pricing::truthy(self.sale_price).unwrap_or(self.price)
    }

    /// Parse `created_at`. Accepts RFC 3339 timestamps and bare dates.
    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt.and_utc());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    }

    /// Check whether the product carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check whether any composition entry has the given fiber name.
    pub fn has_content(&self, name: &str) -> bool {
        self.content.iter().any(|c| c.name == name)
    }

    pub fn with_product_no(mut self, product_no: impl Into<String>) -> Self {
        self.product_no = product_no.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_fabric_type(mut self, fabric_type: impl Into<String>) -> Self {
        self.fabric_type = fabric_type.into();
        self
    }

    pub fn with_hc(mut self, hc: f64) -> Self {
        self.hc = Some(hc);
        self
    }

    pub fn with_white_price(mut self, price: f64) -> Self {
        self.white_price = Some(price);
        self
    }

    pub fn with_color_price(mut self, price: f64) -> Self {
        self.color_price = Some(price);
        self
    }

    pub fn with_sample_price(mut self, price: f64) -> Self {
        self.sample_price = Some(price);
        self
    }

    pub fn with_sale_price(mut self, price: f64) -> Self {
        self.sale_price = Some(price);
        self
    }

    pub fn with_content(mut self, name: impl Into<String>, percentage: f64) -> Self {
        self.content.push(FabricContent::new(name, percentage));
        self
    }

    /// Add a tag, ignoring duplicates.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }
}

/// Build a URL slug: lowercase, punctuation dropped, whitespace runs
/// replaced by a single `-`.
pub fn slugify(name: &str) -> String {
    let kept: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut last_dash = false;
    for c in kept.trim().chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' {
            if !last_dash {
                slug.push('-');
            }
            last_dash = true;
        } else {
            slug.push(c);
            last_dash = false;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_record() {
        let json = r#"{
            "id": "801",
            "productNo": "801#",
            "name": "Tencel Twill",
            "slug": "tencel-twill",
            "description": "Soft drape",
            "whitePrice": 5.2,
            "price": 5.2,
            "images": ["/images/801.jpg"],
            "category": "tencel",
            "fabricType": "Woven",
            "content": [{"name": "Tencel", "percentage": 100}],
            "tags": ["New"],
            "inStock": true,
            "width": 145,
            "hc": 91,
            "createdAt": "2024-03-01T00:00:00.000Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "801");
        assert_eq!(product.white_price, Some(5.2));
        assert_eq!(product.color_price, None);
        assert_eq!(product.hc, Some(91.0));
        assert_eq!(product.category.as_str(), "tencel");
        assert!(product.has_content("Tencel"));
        assert!(!product.featured);
        assert!(product.created_at_time().is_some());
    }

    #[test]
    fn test_serialize_omits_absent_prices() {
        let product = Product::new(ProductId::new("1"), "Linen", 10.0);
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("salePrice").is_none());
        assert!(value.get("whitePrice").is_none());
        assert_eq!(value["price"], 10.0);
        assert_eq!(value["inStock"], true);
    }

    #[test]
    fn test_price_inputs() {
        let product = Product::new(ProductId::new("1"), "Linen", 10.0)
            .with_hc(91.0)
            .with_sample_price(8.0);
        let inputs = product.price_inputs();
        assert_eq!(inputs.price, 10.0);
        assert_eq!(inputs.hc, Some(91.0));
        assert_eq!(inputs.sample_price, Some(8.0));
        assert_eq!(inputs.white_price, None);
    }

    #[test]
    fn test_list_price() {
        let product = Product::new(ProductId::new("1"), "Linen", 10.0);
        assert_eq!(product.list_price(), 10.0);
        assert_eq!(product.clone().with_sale_price(7.0).list_price(), 7.0);
        assert_eq!(product.with_sale_price(0.0).list_price(), 10.0);
    }

    #[test]
    fn test_created_at_formats() {
        let p = Product::new(ProductId::new("1"), "Linen", 1.0);
        assert!(p.clone().with_created_at("2024-01-15").created_at_time().is_some());
        assert!(p
            .clone()
            .with_created_at("2024-01-15T10:30:00")
            .created_at_time()
            .is_some());
        assert!(p.with_created_at("yesterday").created_at_time().is_none());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Tencel Twill"), "tencel-twill");
        assert_eq!(slugify("  Cotton & Linen  Blend! "), "cotton-linen-blend");
        assert_eq!(slugify("Pre-washed -- Denim"), "pre-washed-denim");
    }
}
