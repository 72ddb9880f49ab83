//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use fabric_cache::Cache;
use fabric_commerce::catalog::Catalog;
use fabric_commerce::cart::CartStore;
use fabric_commerce::pricing::PricingEngine;

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["fabric.toml", ".fabric.toml", "fabric.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(ref path) = config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory store paths are relative to: the config file's directory,
    /// else the working directory.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Catalog data directory.
    pub fn data_dir(&self) -> PathBuf {
        resolve(&self.base_dir(), &self.config.store.data_dir)
    }

    /// Static site root.
    pub fn public_dir(&self) -> PathBuf {
        resolve(&self.base_dir(), &self.config.store.public_dir)
    }

    /// Cart storage directory.
    pub fn cart_dir(&self) -> PathBuf {
        resolve(&self.base_dir(), &self.config.store.cart_dir)
    }

    /// Pricing engine built from the configured parameters.
    pub fn engine(&self) -> Result<PricingEngine> {
        self.config.pricing.validate()?;
        Ok(PricingEngine::from_source(&self.config))
    }

    /// Load the catalog.
    pub fn catalog(&self) -> Result<Catalog> {
        let dir = self.data_dir();
        Catalog::load(&dir).with_context(|| format!("Failed to load catalog from {}", dir.display()))
    }

    /// Open the persisted cart.
    pub fn cart_store(&self) -> Result<CartStore> {
        let dir = self.cart_dir();
        let cache = Cache::open(&dir)
            .with_context(|| format!("Failed to open cart storage at {}", dir.display()))?;
        Ok(CartStore::load(cache, self.engine()?))
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CliConfig::load(&config_path) {
                    Ok(config) => return Some((config, config_path)),
                    Err(e) => tracing::warn!(path = %config_path.display(), error = %e, "skipping config"),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Resolve a path relative to `base`.
fn resolve(base: &Path, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        PathBuf::from(path)
    } else {
        base.join(path)
    }
}
