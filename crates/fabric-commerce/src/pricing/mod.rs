//! Display pricing.
//!
//! Turns stored cost prices into the prices customers see.

mod config;
mod engine;

pub use config::{
    DefaultPricingConfig, PricingConfig, PricingConfigSource, DEFAULT_PROFIT_MARGIN,
    DEFAULT_SAMPLE_LABOR_FEE, STANDARD_HC,
};
pub use engine::{
    calculate_display_price, calculate_product_display_prices, calculate_sample_display_price,
    DisplayPrices, PriceInputs, PricingEngine,
};

pub(crate) use engine::truthy;
