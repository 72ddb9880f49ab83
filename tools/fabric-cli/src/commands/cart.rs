//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use fabric_commerce::cart::CartStore;
use fabric_commerce::{format_price, ProductId};

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::{format_meters, truncate};

/// Smallest quantity the cart accepts from the product page.
const MIN_QUANTITY: f64 = 0.5;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.cart_store()?;

    match args.command {
        Some(CartCommand::Show) | None => {}
        Some(CartCommand::Add { product, qty }) => add(&mut cart, &product, qty, ctx)?,
        Some(CartCommand::Remove { product }) => {
            let id = cart_product_id(&cart, &product)?;
            cart.remove_item(&id);
            ctx.output.success(&format!("Removed {}", product));
        }
        Some(CartCommand::Update { product, qty }) => {
            if !qty.is_finite() {
                bail!("Quantity must be a finite number");
            }
            let id = cart_product_id(&cart, &product)?;
            cart.update_quantity(&id, qty);
            if qty > 0.0 {
                ctx.output
                    .success(&format!("Set {} to {}", product, format_meters(qty)));
            } else {
                ctx.output.success(&format!("Removed {}", product));
            }
        }
        Some(CartCommand::Clear { yes }) => {
            if cart.is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes {
                if !ctx.output.is_interactive() || ctx.output.is_json() {
                    bail!("Refusing to clear the cart without --yes");
                }
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} item(s) from the cart?", cart.item_count()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }
            cart.clear_cart();
            ctx.output.success("Cart cleared");
            return Ok(());
        }
    }

    show(&cart, ctx)
}

fn add(cart: &mut CartStore, key: &str, qty: f64, ctx: &Context) -> Result<()> {
    if !qty.is_finite() {
        bail!("Quantity must be a finite number");
    }
    let catalog = ctx.catalog()?;
    let product = catalog.find_product(key)?;

    if !product.in_stock {
        ctx.output.warn(&format!("{} is out of stock", product.name));
    }

    let qty = clamp_quantity(qty);
    cart.add_item(product, qty);
    ctx.output
        .success(&format!("Added {} of {}", format_meters(qty), product.name));
    Ok(())
}

/// Quantities below the product page minimum are raised to it.
fn clamp_quantity(qty: f64) -> f64 {
    qty.max(MIN_QUANTITY)
}

/// Resolve a slug or id to a product id in the cart.
fn cart_product_id(cart: &CartStore, key: &str) -> Result<ProductId> {
    cart.items()
        .iter()
        .find(|i| i.product.slug == key || i.product.id.as_str() == key)
        .map(|i| i.product.id.clone())
        .ok_or_else(|| anyhow::anyhow!("Not in cart: {}", key))
}

fn show(cart: &CartStore, ctx: &Context) -> Result<()> {
    let summary = cart.summary(&ctx.config.shipping);

    if ctx.output.is_json() {
        let items: Vec<serde_json::Value> = cart
            .items()
            .iter()
            .map(|item| {
                serde_json::json!({
                    "item": item,
                    "unitPrice": cart.engine().unit_price(&item.product),
                    "lineTotal": cart.line_total(item),
                })
            })
            .collect();
        ctx.output.json(&serde_json::json!({
            "items": items,
            "totalQuantity": cart.total_quantity(),
            "summary": summary,
        }));
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [28, 10, 8, 10];
    ctx.output.table_row(&["PRODUCT", "PRICE", "QTY", "TOTAL"], &widths);
    for item in cart.items() {
        let name = truncate(&item.product.name, 28);
        let unit = format_price(cart.engine().unit_price(&item.product));
        let qty = format_meters(item.quantity);
        let total = format_price(cart.line_total(item));
        ctx.output.table_row(
            &[name.as_str(), unit.as_str(), qty.as_str(), total.as_str()],
            &widths,
        );
        ctx.output.debug(&format!(
            "{} added {}",
            item.product.id,
            item.added_at.format("%Y-%m-%d %H:%M")
        ));
    }

    ctx.output.info("");
    ctx.output.kv("Subtotal", &format_price(summary.subtotal));
    if summary.free_shipping() {
        ctx.output.kv("Shipping", "Free");
    } else {
        ctx.output.kv("Shipping", &format_price(summary.shipping));
    }
    ctx.output.kv("Total", &format_price(summary.grand_total));
    if summary.amount_to_free_shipping > 0.0 {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            format_price(summary.amount_to_free_shipping)
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabric_cache::Cache;
    use fabric_commerce::catalog::Product;
    use fabric_commerce::pricing::PricingEngine;

    #[test]
    fn test_clamp_quantity() {
        assert_eq!(clamp_quantity(0.0), 0.5);
        assert_eq!(clamp_quantity(-3.0), 0.5);
        assert_eq!(clamp_quantity(2.5), 2.5);
    }

    #[test]
    fn test_cart_product_id_by_slug_or_id() {
        let mut cart = CartStore::load(Cache::in_memory(), PricingEngine::default());
        cart.add_item(&Product::new(ProductId::new("7"), "Linen Slub", 9.0), 1.0);

        assert_eq!(cart_product_id(&cart, "linen-slub").unwrap().as_str(), "7");
        assert_eq!(cart_product_id(&cart, "7").unwrap().as_str(), "7");
        assert!(cart_product_id(&cart, "denim").is_err());
    }
}
