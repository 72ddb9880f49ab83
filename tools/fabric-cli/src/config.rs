//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use fabric_commerce::cart::ShippingPolicy;
use fabric_commerce::pricing::{PricingConfig, PricingConfigSource};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where storefront data lives.
    #[serde(default)]
    pub store: StoreConfig,

    /// Display price parameters.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Cart shipping policy.
    #[serde(default)]
    pub shipping: ShippingPolicy,

    /// API server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

impl PricingConfigSource for CliConfig {
    fn pricing_config(&self) -> PricingConfig {
        self.pricing
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Storefront data locations, relative to the config file's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Catalog JSON files and `new-product.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Static site root.
    #[serde(default = "default_public_dir")]
    pub public_dir: String,

    /// Where the cart is persisted.
    #[serde(default = "default_cart_dir")]
    pub cart_dir: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_public_dir() -> String {
    "public".to_string()
}

fn default_cart_dir() -> String {
    ".fabric".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            public_dir: default_public_dir(),
            cart_dir: default_cart_dir(),
        }
    }
}

/// API server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Generate a default fabric.toml config file.
pub fn generate_default_config() -> String {
    r#"# Fabric storefront configuration

[store]
data_dir = "data"
public_dir = "public"
cart_dir = ".fabric"

[pricing]
# Markup applied on top of the yield-adjusted cost price.
profit_margin = 0.1
# Yield factor prices are normalized to.
standard_hc = 100.0
# Flat fee added to sample cost prices.
sample_labor_fee = 2.0

[shipping]
free_threshold = 150.0
flat_rate = 15.0

[server]
bind = "127.0.0.1:3000"
"#
    .to_string()
}
