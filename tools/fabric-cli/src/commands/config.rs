//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("");
    ctx.output.info("[store]");
    ctx.output.kv("data_dir", &config.store.data_dir);
    ctx.output.kv("public_dir", &config.store.public_dir);
    ctx.output.kv("cart_dir", &config.store.cart_dir);

    ctx.output.info("");
    ctx.output.info("[pricing]");
    ctx.output.kv("profit_margin", &config.pricing.profit_margin.to_string());
    ctx.output.kv("standard_hc", &config.pricing.standard_hc.to_string());
    ctx.output
        .kv("sample_labor_fee", &config.pricing.sample_labor_fee.to_string());

    ctx.output.info("");
    ctx.output.info("[shipping]");
    ctx.output
        .kv("free_threshold", &config.shipping.free_threshold.to_string());
    ctx.output.kv("flat_rate", &config.shipping.flat_rate.to_string());

    ctx.output.info("");
    ctx.output.info("[server]");
    ctx.output.kv("bind", &config.server.bind);

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match ctx.config_path {
        Some(ref path) => path.clone(),
        None => bail!("No config file found. Run `fabric config init` to create one."),
    };

    let mut config = CliConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path: PathBuf = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

fn check_config(ctx: &Context) -> (Vec<String>, Vec<String>) {
    let config = &ctx.config;
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = config.pricing.validate() {
        errors.push(e.to_string());
    }

    if config.pricing.profit_margin > 1.0 {
        warnings.push(format!(
            "pricing.profit_margin {} is over 100%",
            config.pricing.profit_margin
        ));
    }

    if config.shipping.free_threshold < 0.0 || config.shipping.flat_rate < 0.0 {
        errors.push("shipping values must not be negative".to_string());
    }

    if config.server.bind.parse::<std::net::SocketAddr>().is_err() {
        errors.push(format!(
            "server.bind '{}' is not a socket address",
            config.server.bind
        ));
    }

    let products = ctx.data_dir().join(fabric_commerce::catalog::PRODUCTS_FILE);
    if !products.exists() {
        warnings.push(format!("{} does not exist", products.display()));
    }

    (errors, warnings)
}

fn get_config_value(config: &CliConfig, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "data_dir"] => Ok(config.store.data_dir.clone()),
        ["store", "public_dir"] => Ok(config.store.public_dir.clone()),
        ["store", "cart_dir"] => Ok(config.store.cart_dir.clone()),
        ["pricing", "profit_margin"] => Ok(config.pricing.profit_margin.to_string()),
        ["pricing", "standard_hc"] => Ok(config.pricing.standard_hc.to_string()),
        ["pricing", "sample_labor_fee"] => Ok(config.pricing.sample_labor_fee.to_string()),
        ["shipping", "free_threshold"] => Ok(config.shipping.free_threshold.to_string()),
        ["shipping", "flat_rate"] => Ok(config.shipping.flat_rate.to_string()),
        ["server", "bind"] => Ok(config.server.bind.clone()),
        _ => bail!("Unknown config key: {}", key),
    }
}

fn set_config_value(config: &mut CliConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["store", "data_dir"] => config.store.data_dir = value.to_string(),
        ["store", "public_dir"] => config.store.public_dir = value.to_string(),
        ["store", "cart_dir"] => config.store.cart_dir = value.to_string(),
        ["pricing", "profit_margin"] => config.pricing.profit_margin = value.parse()?,
        ["pricing", "standard_hc"] => config.pricing.standard_hc = value.parse()?,
        ["pricing", "sample_labor_fee"] => config.pricing.sample_labor_fee = value.parse()?,
        ["shipping", "free_threshold"] => config.shipping.free_threshold = value.parse()?,
        ["shipping", "flat_rate"] => config.shipping.flat_rate = value.parse()?,
        ["server", "bind"] => config.server.bind = value.to_string(),
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    config.pricing.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_value() {
        let mut config = CliConfig::default();
        set_config_value(&mut config, "pricing.profit_margin", "0.2").unwrap();
        set_config_value(&mut config, "server.bind", "0.0.0.0:8080").unwrap();

        assert_eq!(get_config_value(&config, "pricing.profit_margin").unwrap(), "0.2");
        assert_eq!(get_config_value(&config, "server.bind").unwrap(), "0.0.0.0:8080");
    }

    #[test]
    fn test_unknown_key() {
        let mut config = CliConfig::default();
        assert!(get_config_value(&config, "pricing.tax").is_err());
        assert!(set_config_value(&mut config, "store", "x").is_err());
    }

    #[test]
    fn test_set_rejects_invalid_pricing() {
        let mut config = CliConfig::default();
        assert!(set_config_value(&mut config, "pricing.standard_hc", "0").is_err());
        assert!(set_config_value(&mut config, "pricing.profit_margin", "abc").is_err());
    }
}
