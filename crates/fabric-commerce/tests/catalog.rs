use std::fs;

use fabric_commerce::prelude::*;

const PRODUCTS: &str = r#"[
  {
    "id": "1",
    "productNo": "801#",
    "name": "Tencel Twill",
    "slug": "tencel-twill",
    "description": "Soft drape twill",
    "whitePrice": 5.2,
    "colorPrice": 5.8,
    "samplePrice": 1.5,
    "price": 5.2,
    "images": ["/images/products/801.jpg"],
    "category": "tencel",
    "fabricType": "Woven",
    "content": [{"name": "Tencel", "percentage": 100}],
    "tags": ["New"],
    "inStock": true,
    "width": 145,
    "weight": 120,
    "hc": 91,
    "createdAt": "2024-03-01T00:00:00.000Z",
    "featured": true
  },
  {
    "id": "2",
    "name": "Cotton Poplin",
    "slug": "cotton-poplin",
    "price": 4.0,
    "category": "cotton",
    "inStock": false
  }
]"#;

#[test]
fn load_reads_all_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("products.json"), PRODUCTS).unwrap();
    fs::write(
        dir.path().join("categories.json"),
        r#"[{"id": "cotton", "name": "Cotton", "slug": "cotton", "order": 1}]"#,
    )
    .unwrap();

    let catalog = Catalog::load(dir.path()).unwrap();
    assert_eq!(catalog.products().len(), 2);
    assert_eq!(catalog.root_categories().len(), 1);
    assert!(catalog.banners().is_empty());

    let twill = catalog.find_product("tencel-twill").unwrap();
    let prices = PricingEngine::default().product_display_prices(&twill.price_inputs());
    assert_eq!(prices.base_price, 6.29);
    assert_eq!(prices.white_price, Some(6.29));
    assert_eq!(prices.sample_price, Some(3.5));

    assert!(!catalog.product("2").unwrap().in_stock);
}

#[test]
fn missing_products_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(dir.path()).unwrap_err();
    assert!(matches!(err, CommerceError::CatalogLoad { .. }));
}

#[test]
fn malformed_optional_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("products.json"), PRODUCTS).unwrap();
    fs::write(dir.path().join("banners.json"), "not json").unwrap();

    assert!(Catalog::load(dir.path()).is_err());
}

#[test]
fn search_over_loaded_catalog() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("products.json"), PRODUCTS).unwrap();
    let catalog = Catalog::load(dir.path()).unwrap();

    let filters = FilterOptions::new().in_stock_only();
    let results = search(catalog.products(), &filters, SortOption::Newest, &PricingEngine::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].slug, "tencel-twill");
}
