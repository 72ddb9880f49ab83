//! Display price derivation.
//!
//! Stored prices are cost prices per meter at the fabric's actual yield
//! (`hc`). The customer sees the price normalized to the standard yield,
//! plus the profit margin:
//!
//! ```text
//! display = cost * (standard_hc / hc) * (1 + margin)
//! ```
//!
//! Samples are priced as cost plus a flat labor fee, with no yield
//! adjustment. Malformed inputs (negative or NaN) are not rejected; they
//! propagate through the arithmetic.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::money::round2;
use crate::pricing::{DefaultPricingConfig, PricingConfig, PricingConfigSource};

/// The product fields the engine reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceInputs {
    /// Default cost price.
    pub price: f64,
    /// Cost price for white/undyed goods.
    pub white_price: Option<f64>,
    /// Cost price for dyed goods.
    pub color_price: Option<f64>,
    /// Cost price of a sample cut.
    pub sample_price: Option<f64>,
    /// Yield factor.
    pub hc: Option<f64>,
}

impl PriceInputs {
    /// Inputs with only a base cost price.
    pub fn new(price: f64) -> Self {
        Self {
            price,
            ..Self::default()
        }
    }

    /// Set the yield factor.
    pub fn with_hc(mut self, hc: f64) -> Self {
        self.hc = Some(hc);
        self
    }

    /// Set the white cost price.
    pub fn with_white_price(mut self, price: f64) -> Self {
        self.white_price = Some(price);
        self
    }

    /// Set the color cost price.
    pub fn with_color_price(mut self, price: f64) -> Self {
        self.color_price = Some(price);
        self
    }

    /// Set the sample cost price.
    pub fn with_sample_price(mut self, price: f64) -> Self {
        self.sample_price = Some(price);
        self
    }
}

/// Customer-facing prices for one product.
///
/// A missing tier means the product has no such price, not a price of zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPrices {
    pub base_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_price: Option<f64>,
}

/// Derives display prices from cost prices under a fixed config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::from_source(&DefaultPricingConfig)
    }
}

impl PricingEngine {
    /// Create an engine with the given config.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Create an engine from a config source.
    pub fn from_source(source: &impl PricingConfigSource) -> Self {
        Self::new(source.pricing_config())
    }

    /// The active config.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Display price for one cost price.
    ///
    /// `hc` that is absent, zero, negative or NaN means "no yield
    /// adjustment". `profit_margin` overrides the configured margin.
    pub fn display_price(&self, cost_price: f64, hc: Option<f64>, profit_margin: Option<f64>) -> f64 {
        let margin = profit_margin.unwrap_or(self.config.profit_margin);

        match hc {
            Some(hc) if hc > 0.0 => {
                let full_yield_price = cost_price * (self.config.standard_hc / hc);
                round2(full_yield_price * (1.0 + margin))
            }
            _ => round2(cost_price * (1.0 + margin)),
        }
    }

    /// Display price for a sample: cost plus labor fee.
    pub fn sample_display_price(&self, sample_cost_price: f64, labor_fee: Option<f64>) -> f64 {
        let fee = labor_fee.unwrap_or(self.config.sample_labor_fee);
        round2(sample_cost_price + fee)
    }

    /// All display price tiers for a product.
    ///
    /// White, color and sample tiers are only derived when the matching cost
    /// field is present and non-zero.
    pub fn product_display_prices(&self, inputs: &PriceInputs) -> DisplayPrices {
        let hc = inputs.hc;

        DisplayPrices {
            base_price: self.display_price(inputs.price, hc, None),
            white_price: truthy(inputs.white_price).map(|p| self.display_price(p, hc, None)),
            color_price: truthy(inputs.color_price).map(|p| self.display_price(p, hc, None)),
            sample_price: truthy(inputs.sample_price).map(|p| self.sample_display_price(p, None)),
        }
    }

    /// The per-meter price a product sells at.
    ///
    /// A sale price wins; otherwise the white display price, otherwise the
    /// base display price.
    pub fn unit_price(&self, product: &Product) -> f64 {
        if let Some(sale) = truthy(product.sale_price) {
            return sale;
        }
        let prices = self.product_display_prices(&product.price_inputs());
        truthy(prices.white_price).unwrap_or(prices.base_price)
    }
}

/// Display price under the compiled-in config.
pub fn calculate_display_price(cost_price: f64, hc: Option<f64>, profit_margin: Option<f64>) -> f64 {
    PricingEngine::default().display_price(cost_price, hc, profit_margin)
}

/// Sample display price under the compiled-in config.
pub fn calculate_sample_display_price(sample_cost_price: f64, labor_fee: Option<f64>) -> f64 {
    PricingEngine::default().sample_display_price(sample_cost_price, labor_fee)
}

/// All display price tiers under the compiled-in config.
pub fn calculate_product_display_prices(inputs: &PriceInputs) -> DisplayPrices {
    PricingEngine::default().product_display_prices(inputs)
}

// Zero and NaN count as "not set", the way the catalog data uses them.
pub(crate) fn truthy(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn engine() -> PricingEngine {
        PricingEngine::default()
    }

    #[test]
    fn test_display_price_with_yield() {
        // 5.2 * (100 / 91) * 1.1 = 6.2857...
        assert_eq!(engine().display_price(5.2, Some(91.0), None), 6.29);
    }

    #[test]
    fn test_display_price_without_yield() {
        assert_eq!(engine().display_price(10.0, Some(0.0), None), 11.0);
        assert_eq!(engine().display_price(10.0, None, None), 11.0);
        assert_eq!(engine().display_price(10.0, Some(-5.0), None), 11.0);
        assert_eq!(engine().display_price(10.0, Some(f64::NAN), None), 11.0);
    }

    #[test]
    fn test_display_price_margin_override() {
        assert_eq!(engine().display_price(10.0, None, Some(0.0)), 10.0);
        assert_eq!(engine().display_price(10.0, Some(50.0), Some(0.5)), 30.0);
    }

    #[test]
    fn test_display_price_matches_formula() {
        let e = engine();
        for cost in [0.0, 1.0, 3.75, 12.4, 99.99] {
            for hc in [-1.0, 0.0] {
                assert_eq!(e.display_price(cost, Some(hc), None), round2(cost * 1.1));
            }
            for hc in [45.0, 91.0, 100.0, 130.0] {
                assert_eq!(
                    e.display_price(cost, Some(hc), None),
                    round2(cost * (100.0 / hc) * 1.1)
                );
            }
        }
    }

    #[test]
    fn test_display_price_uses_engine_config() {
        let e = PricingEngine::new(PricingConfig::new(0.2, 90.0, 5.0));
        assert_eq!(e.display_price(9.0, Some(90.0), None), 10.8);
        assert_eq!(e.sample_display_price(8.0, None), 13.0);
    }

    #[test]
    fn test_negative_cost_propagates() {
        assert_eq!(engine().display_price(-10.0, None, None), -11.0);
        assert!(engine().display_price(f64::NAN, Some(91.0), None).is_nan());
    }

    #[test]
    fn test_sample_display_price() {
        assert_eq!(engine().sample_display_price(8.0, None), 10.0);
        assert_eq!(engine().sample_display_price(8.0, Some(0.5)), 8.5);
    }

    #[test]
    fn test_prices_just_below_a_half_cent_round_down() {
        // each product lands a hair under x.xx5 in binary
        assert_eq!(engine().display_price(2.05, None, None), 2.25);
        assert_eq!(engine().display_price(6.67, Some(92.0), None), 7.97);
        assert_eq!(engine().sample_display_price(0.025, None), 2.02);
        assert_eq!(calculate_display_price(2.05, None, None), 2.25);
    }

    #[test]
    fn test_sample_price_is_additive() {
        let e = engine();
        let zero = e.sample_display_price(0.0, None);
        for x in [0.5, 3.0, 7.25, 20.0] {
            assert!((e.sample_display_price(x, None) - zero - x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_product_display_prices_all_tiers() {
        let inputs = PriceInputs::new(5.2)
            .with_hc(91.0)
            .with_white_price(5.2)
            .with_color_price(6.0)
            .with_sample_price(8.0);

        let prices = engine().product_display_prices(&inputs);
        assert_eq!(prices.base_price, 6.29);
        assert_eq!(prices.white_price, Some(6.29));
        assert_eq!(prices.color_price, Some(7.25));
        assert_eq!(prices.sample_price, Some(10.0));
    }

    #[test]
    fn test_product_display_prices_omits_missing_tiers() {
        let inputs = PriceInputs {
            price: 10.0,
            white_price: Some(0.0),
            color_price: None,
            sample_price: None,
            hc: None,
        };

        let prices = engine().product_display_prices(&inputs);
        assert_eq!(prices.base_price, 11.0);
        assert_eq!(prices.white_price, None);
        assert_eq!(prices.color_price, None);
        assert_eq!(prices.sample_price, None);

        let json = serde_json::to_string(&prices).unwrap();
        assert_eq!(json, r#"{"basePrice":11.0}"#);
    }

    #[test]
    fn test_product_display_prices_is_deterministic() {
        let inputs = PriceInputs::new(7.3).with_hc(88.0).with_white_price(6.1);
        let e = engine();
        assert_eq!(e.product_display_prices(&inputs), e.product_display_prices(&inputs));
    }

    #[test]
    fn test_free_functions_use_defaults() {
        assert_eq!(calculate_display_price(5.2, Some(91.0), None), 6.29);
        assert_eq!(calculate_sample_display_price(8.0, None), 10.0);
        assert_eq!(
            calculate_product_display_prices(&PriceInputs::new(10.0)).base_price,
            11.0
        );
    }

    #[test]
    fn test_unit_price_resolution() {
        let e = engine();

        let base_only = Product::new(ProductId::new("1"), "Linen", 10.0);
        assert_eq!(e.unit_price(&base_only), 11.0);

        let with_white = base_only.clone().with_white_price(20.0);
        assert_eq!(e.unit_price(&with_white), 22.0);

        let on_sale = with_white.clone().with_sale_price(9.5);
        assert_eq!(e.unit_price(&on_sale), 9.5);

        let zero_sale = with_white.with_sale_price(0.0);
        assert_eq!(e.unit_price(&zero_sale), 22.0);
    }
}
