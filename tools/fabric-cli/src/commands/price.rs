//! Ad-hoc display price calculation.

use anyhow::{bail, Result};
use fabric_commerce::format_price;
use fabric_commerce::pricing::PricingEngine;

use super::PriceArgs;
use crate::context::Context;

/// Run the price command.
pub async fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    if !args.cost.is_finite() {
        bail!("Cost must be a finite number");
    }

    let engine = ctx.engine()?;
    let price = compute(&args, &engine);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "cost": args.cost,
            "sample": args.sample,
            "displayPrice": price,
        }));
        return Ok(());
    }

    let config = engine.config();
    if args.sample {
        ctx.output.kv("Sample cost", &format_price(args.cost));
        ctx.output.kv(
            "Labor fee",
            &format_price(args.fee.unwrap_or(config.sample_labor_fee)),
        );
    } else {
        ctx.output.kv("Cost", &format_price(args.cost));
        match args.hc {
            Some(hc) if hc > 0.0 => ctx
                .output
                .kv("Yield", &format!("{} (standard {})", hc, config.standard_hc)),
            _ => ctx.output.kv("Yield", "not adjusted"),
        }
        ctx.output.kv(
            "Margin",
            &format!("{}%", args.margin.unwrap_or(config.profit_margin) * 100.0),
        );
    }
    ctx.output.success(&format!("Display price: {}", format_price(price)));

    Ok(())
}

fn compute(args: &PriceArgs, engine: &PricingEngine) -> f64 {
    if args.sample {
        engine.sample_display_price(args.cost, args.fee)
    } else {
        engine.display_price(args.cost, args.hc, args.margin)
    }
}
