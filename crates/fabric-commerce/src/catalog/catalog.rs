//! Catalog loading and lookup.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::{Banner, Category, Product};
use crate::error::CommerceError;
use crate::ids::CategoryId;

/// Product list file name inside the data directory.
pub const PRODUCTS_FILE: &str = "products.json";
/// Category list file name inside the data directory.
pub const CATEGORIES_FILE: &str = "categories.json";
/// Banner list file name inside the data directory.
pub const BANNERS_FILE: &str = "banners.json";

/// Read-only snapshot of the storefront data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    banners: Vec<Banner>,
}

impl Catalog {
    /// Build a catalog from already-loaded data.
    pub fn new(products: Vec<Product>, categories: Vec<Category>, banners: Vec<Banner>) -> Self {
        Self {
            products,
            categories,
            banners,
        }
    }

    /// Load the catalog from `data_dir`.
    ///
    /// The products file is required. Missing category or banner files load
    /// as empty lists; files that exist but don't parse are errors.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let data_dir = data_dir.as_ref();

        let products = read_json::<Vec<Product>>(&data_dir.join(PRODUCTS_FILE))?.ok_or_else(
            || CommerceError::CatalogLoad {
                path: data_dir.join(PRODUCTS_FILE).display().to_string(),
                message: "file not found".to_string(),
            },
        )?;
        let categories = read_json(&data_dir.join(CATEGORIES_FILE))?.unwrap_or_default();
        let banners = read_json(&data_dir.join(BANNERS_FILE))?.unwrap_or_default();

        let catalog = Self::new(products, categories, banners);
        debug!(
            products = catalog.products.len(),
            categories = catalog.categories.len(),
            banners = catalog.banners.len(),
            dir = %data_dir.display(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// All products, in file order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All categories, in file order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Look up a product by slug.
    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.slug == slug)
    }

    /// Look up a product by slug, falling back to id.
    pub fn find_product(&self, key: &str) -> Result<&Product, CommerceError> {
        self.product_by_slug(key)
            .or_else(|| self.product(key))
            .ok_or_else(|| CommerceError::ProductNotFound(key.to_string()))
    }

    /// Featured products, in file order, at most `limit`.
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products.iter().filter(|p| p.featured).take(limit).collect()
    }

    /// Other products in the same category, at most `limit`.
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Look up a category by id.
    pub fn category(&self, id: &CategoryId) -> Result<&Category, CommerceError> {
        self.categories
            .iter()
            .find(|c| &c.id == id)
            .ok_or_else(|| CommerceError::CategoryNotFound(id.to_string()))
    }

    /// Root categories sorted by `order`.
    pub fn root_categories(&self) -> Vec<&Category> {
        let mut roots: Vec<&Category> = self.categories.iter().filter(|c| c.is_root()).collect();
        roots.sort_by_key(|c| c.order);
        roots
    }

    /// Children of `parent_id` sorted by `order`.
    pub fn subcategories(&self, parent_id: &CategoryId) -> Vec<&Category> {
        let mut children: Vec<&Category> = self
            .categories
            .iter()
            .filter(|c| c.parent_id.as_ref() == Some(parent_id))
            .collect();
        children.sort_by_key(|c| c.order);
        children
    }

    /// Banners sorted by `order`.
    pub fn banners(&self) -> Vec<&Banner> {
        let mut banners: Vec<&Banner> = self.banners.iter().collect();
        banners.sort_by_key(|b| b.order);
        banners
    }
}

/// Read and parse a JSON file. A missing file is `Ok(None)`.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CommerceError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "catalog file absent");
            return Ok(None);
        }
        Err(e) => {
            return Err(CommerceError::CatalogLoad {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| CommerceError::CatalogLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}
