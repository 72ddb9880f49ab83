//! Pricing configuration.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// Default profit margin (0.1 = 10%).
pub const DEFAULT_PROFIT_MARGIN: f64 = 0.1;

/// Reference yield a cost price is quoted against ("full-meter" hc).
pub const STANDARD_HC: f64 = 100.0;

/// Flat labor fee added to sample/swatch cost prices.
pub const DEFAULT_SAMPLE_LABOR_FEE: f64 = 2.0;

/// Parameters the pricing engine derives display prices from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Profit margin as a fraction (0.1 = 10%).
    pub profit_margin: f64,
    /// Reference yield constant.
    pub standard_hc: f64,
    /// Flat fee added to sample prices.
    pub sample_labor_fee: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            profit_margin: DEFAULT_PROFIT_MARGIN,
            standard_hc: STANDARD_HC,
            sample_labor_fee: DEFAULT_SAMPLE_LABOR_FEE,
        }
    }
}

impl PricingConfig {
    /// Create a config from explicit values.
    pub fn new(profit_margin: f64, standard_hc: f64, sample_labor_fee: f64) -> Self {
        Self {
            profit_margin,
            standard_hc,
            sample_labor_fee,
        }
    }

    /// Set the profit margin.
    pub fn with_profit_margin(mut self, margin: f64) -> Self {
        self.profit_margin = margin;
        self
    }

    /// Set the sample labor fee.
    pub fn with_sample_labor_fee(mut self, fee: f64) -> Self {
        self.sample_labor_fee = fee;
        self
    }

    /// Check `profit_margin >= 0`, `standard_hc > 0` and a finite labor fee.
    ///
    /// The compiled-in defaults always pass; this guards configs read from
    /// files.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if !(self.profit_margin.is_finite() && self.profit_margin >= 0.0) {
            return Err(CommerceError::InvalidPricingConfig(format!(
                "profit_margin must be a non-negative number, got {}",
                self.profit_margin
            )));
        }
        if !(self.standard_hc.is_finite() && self.standard_hc > 0.0) {
            return Err(CommerceError::InvalidPricingConfig(format!(
                "standard_hc must be positive, got {}",
                self.standard_hc
            )));
        }
        if !self.sample_labor_fee.is_finite() {
            return Err(CommerceError::InvalidPricingConfig(format!(
                "sample_labor_fee must be a finite number, got {}",
                self.sample_labor_fee
            )));
        }
        Ok(())
    }
}

/// Where the active pricing config comes from.
///
/// Today that is compiled-in constants or a local config file; a remote
/// config service would implement this trait without touching the engine.
pub trait PricingConfigSource {
    /// Return the pricing config to use.
    fn pricing_config(&self) -> PricingConfig;
}

/// The compiled-in constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPricingConfig;

impl PricingConfigSource for DefaultPricingConfig {
    fn pricing_config(&self) -> PricingConfig {
        PricingConfig::default()
    }
}

impl PricingConfigSource for PricingConfig {
    fn pricing_config(&self) -> PricingConfig {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DefaultPricingConfig.pricing_config();
        assert_eq!(config.profit_margin, 0.1);
        assert_eq!(config.standard_hc, 100.0);
        assert_eq!(config.sample_labor_fee, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_margin() {
        let config = PricingConfig::default().with_profit_margin(-0.1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_standard_hc() {
        assert!(PricingConfig::new(0.1, 0.0, 2.0).validate().is_err());
        assert!(PricingConfig::new(0.1, f64::NAN, 2.0).validate().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PricingConfig = serde_json::from_str(r#"{"profit_margin": 0.25}"#).unwrap();
        assert_eq!(config.profit_margin, 0.25);
        assert_eq!(config.standard_hc, STANDARD_HC);
        assert_eq!(config.sample_labor_fee, DEFAULT_SAMPLE_LABOR_FEE);
    }
}
