//! CLI command implementations.

pub mod cart;
pub mod config;
pub mod price;
pub mod products;
pub mod serve;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List products, filtered and sorted.
    List(ListArgs),
    /// Show a product with its display prices.
    Show {
        /// Product slug or id.
        product: String,
    },
}

/// Filters for `products list`. List values are comma-separated.
#[derive(Args)]
pub struct ListArgs {
    /// Category ids.
    #[arg(long, value_delimiter = ',')]
    pub category: Vec<String>,

    /// Fabric types (Woven, Knit...).
    #[arg(long = "type", value_delimiter = ',')]
    pub fabric_type: Vec<String>,

    /// Fiber names (Cotton, Tencel...).
    #[arg(long, value_delimiter = ',')]
    pub content: Vec<String>,

    /// Tags (New, Sale...).
    #[arg(long, value_delimiter = ',')]
    pub tag: Vec<String>,

    /// Minimum unit price.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum unit price.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Search name, product number and description.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: newest, price-asc, price-desc or name.
    #[arg(long, default_value = "newest")]
    pub sort: String,

    /// Show only the first N results.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Cost price per meter (or per sample with --sample).
    pub cost: f64,

    /// Yield factor of the fabric.
    #[arg(long)]
    pub hc: Option<f64>,

    /// Profit margin override (0.1 = 10%).
    #[arg(long)]
    pub margin: Option<f64>,

    /// Price a sample: cost plus labor fee.
    #[arg(long)]
    pub sample: bool,

    /// Labor fee override for --sample.
    #[arg(long, requires = "sample")]
    pub fee: Option<f64>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals.
    Show,
    /// Add a product.
    Add {
        /// Product slug or id.
        product: String,
        /// Meters to add, in steps of 0.5.
        #[arg(short, long, default_value = "1")]
        qty: f64,
    },
    /// Remove a product.
    Remove {
        /// Product slug or id.
        product: String,
    },
    /// Set the quantity of a product; 0 removes it.
    Update {
        /// Product slug or id.
        product: String,
        /// New quantity in meters.
        qty: f64,
    },
    /// Remove everything from the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Listen address (default from config).
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
