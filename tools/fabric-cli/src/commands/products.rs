//! Product browsing commands.

use anyhow::Result;
use fabric_commerce::catalog::Product;
use fabric_commerce::pricing::{DisplayPrices, PricingEngine};
use fabric_commerce::search::{search, FilterOptions, PriceRange, SortOption};
use fabric_commerce::format_price;
use serde::Serialize;

use super::{ListArgs, ProductsArgs, ProductsCommand};
use crate::context::Context;
use crate::output::{stock_badge, truncate};

/// Related products shown under a product.
const RELATED_LIMIT: usize = 4;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductsCommand::List(list) => list_products(list, ctx).await,
        ProductsCommand::Show { product } => show_product(&product, ctx).await,
    }
}

/// A product with its customer-facing prices.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PricedProduct<'a> {
    #[serde(flatten)]
    product: &'a Product,
    display_prices: DisplayPrices,
    unit_price: f64,
}

impl<'a> PricedProduct<'a> {
    fn new(product: &'a Product, engine: &PricingEngine) -> Self {
        Self {
            product,
            display_prices: engine.product_display_prices(&product.price_inputs()),
            unit_price: engine.unit_price(product),
        }
    }
}

fn build_filters(args: &ListArgs) -> FilterOptions {
    let mut filters = FilterOptions::new()
        .with_categories(args.category.clone())
        .with_fabric_types(args.fabric_type.clone())
        .with_contents(args.content.clone())
        .with_tags(args.tag.clone());

    if args.min_price.is_some() || args.max_price.is_some() {
        filters = filters.with_price_range(PriceRange::new(
            args.min_price.unwrap_or(0.0),
            args.max_price.unwrap_or(f64::INFINITY),
        ));
    }
    if args.in_stock {
        filters = filters.in_stock_only();
    }
    if let Some(ref query) = args.search {
        filters = filters.with_search_query(query.as_str());
    }
    filters
}

async fn list_products(args: ListArgs, ctx: &Context) -> Result<()> {
    let sort: SortOption = args.sort.parse()?;
    let filters = build_filters(&args);
    let catalog = ctx.catalog()?;
    let engine = ctx.engine()?;

    let mut results = search(catalog.products(), &filters, sort, &engine);
    let total = results.len();
    if let Some(limit) = args.limit {
        results.truncate(limit);
    }

    if ctx.output.is_json() {
        let priced: Vec<PricedProduct> =
            results.iter().map(|p| PricedProduct::new(p, &engine)).collect();
        ctx.output.json(&priced);
        return Ok(());
    }

    ctx.output.header(&format!("Products ({})", sort.display_name()));
    if filters.selected_count() > 0 {
        ctx.output
            .debug(&format!("{} filter value(s) selected", filters.selected_count()));
    }

    if results.is_empty() {
        ctx.output.info("No products match the selected filters.");
        return Ok(());
    }

    let widths = [8, 28, 10, 10, 12];
    ctx.output
        .table_row(&["NO.", "NAME", "CATEGORY", "PRICE", "STOCK"], &widths);
    for product in &results {
        let price = format_price(engine.unit_price(product));
        let name = truncate(&product.name, 28);
        let badge = stock_badge(product.in_stock);
        ctx.output.table_row(
            &[
                product.product_no.as_str(),
                name.as_str(),
                product.category.as_str(),
                price.as_str(),
                badge.as_str(),
            ],
            &widths,
        );
    }

    ctx.output.info("");
    ctx.output
        .info(&format!("Showing {} of {} product(s)", results.len(), total));

    Ok(())
}

async fn show_product(key: &str, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let engine = ctx.engine()?;
    let product = catalog.find_product(key)?;
    let priced = PricedProduct::new(product, &engine);
    let related = catalog.related(product, RELATED_LIMIT);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "product": priced,
            "related": related.iter().map(|p| p.slug.as_str()).collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    ctx.output.header(&product.name);
    if !product.product_no.is_empty() {
        ctx.output.kv("Product No.", &product.product_no);
    }
    ctx.output.kv("Category", product.category.as_str());
    if !product.fabric_type.is_empty() {
        ctx.output.kv("Type", &product.fabric_type);
    }
    if !product.content.is_empty() {
        let content: Vec<String> = product
            .content
            .iter()
            .map(|c| format!("{}% {}", c.percentage, c.name))
            .collect();
        ctx.output.kv("Content", &content.join(", "));
    }
    if product.width > 0.0 {
        ctx.output.kv("Width", &format!("{} cm", product.width));
    }
    if let Some(weight) = product.weight {
        ctx.output.kv("Weight", &format!("{} g/m²", weight));
    }
    ctx.output.kv("Stock", &stock_badge(product.in_stock));

    ctx.output.info("");
    ctx.output.info("Prices (per meter):");
    let prices = &priced.display_prices;
    if let Some(sale) = product.sale_price.filter(|p| *p != 0.0 && !p.is_nan()) {
        ctx.output.kv("Sale", &format_price(sale));
    }
    ctx.output.kv("Base", &format_price(prices.base_price));
    if let Some(white) = prices.white_price {
        ctx.output.kv("White", &format_price(white));
    }
    if let Some(color) = prices.color_price {
        ctx.output.kv("Color", &format_price(color));
    }
    if let Some(sample) = prices.sample_price {
        ctx.output.kv("Sample", &format_price(sample));
    }

    if !related.is_empty() {
        ctx.output.info("");
        ctx.output.info("Related:");
        for p in related {
            ctx.output.list_item(&format!(
                "{} ({}) {}",
                p.name,
                p.slug,
                format_price(engine.unit_price(p))
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_args() -> ListArgs {
        ListArgs {
            category: vec!["tencel".into()],
            fabric_type: vec![],
            content: vec![],
            tag: vec![],
            min_price: Some(5.0),
            max_price: None,
            in_stock: true,
            search: Some("twill".into()),
            sort: "newest".into(),
            limit: None,
        }
    }

    #[test]
    fn test_build_filters() {
        let filters = build_filters(&list_args());
        assert_eq!(filters.categories, vec!["tencel"]);
        assert!(filters.in_stock);
        assert_eq!(filters.search_query.as_deref(), Some("twill"));

        let range = filters.price_range.unwrap();
        assert_eq!(range.min, 5.0);
        assert!(range.contains(1_000.0));
    }
}
