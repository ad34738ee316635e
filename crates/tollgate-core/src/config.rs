//! Configuration types for tollgate-explorer.
//!
//! [`Config::load`] reads `~/.config/tollgate-explorer/config.toml`, creating
//! it with hardcoded defaults if it does not yet exist. [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in tests).

use crate::search::FilterSpec;
use crate::types::{ProductType, DEFAULT_PUBLISHER_KEY, RELEASE_KIND};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[publisher]
default_pubkey = "5075e61f0b048148b60105c1dd72bbeae1957336ae5824087e52efa374f8416a"

[relays]
urls = [
    "wss://relay.damus.io",
    "wss://relay.nostr.band",
    "wss://nos.lol",
    "wss://relay.snort.social",
]
eose_timeout_secs = 10

[subscription]
kind  = 1063
limit = 500

[filters]
channels = ["stable"]
products = ["tollgate-os", "tollgate-core", "tollgate-module-basic-go"]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub publisher: PublisherConfig,
    #[serde(default)]
    pub relays: RelaysConfig,
    #[serde(default)]
    pub subscription: SubscriptionConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
}

/// `[publisher]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PublisherConfig {
    /// Publisher browsed on startup. An empty result for this key is
    /// replaced by the sample dataset.
    #[serde(default = "default_pubkey")]
    pub default_pubkey: String,
}

fn default_pubkey() -> String { DEFAULT_PUBLISHER_KEY.to_string() }

impl Default for PublisherConfig {
    fn default() -> Self {
        Self { default_pubkey: default_pubkey() }
    }
}

/// `[relays]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RelaysConfig {
    #[serde(default = "default_relay_urls")]
    pub urls: Vec<String>,
    /// How long the relay client waits for every relay's end-of-stored-events
    /// before signalling it anyway.
    #[serde(default = "default_eose_timeout_secs")]
    pub eose_timeout_secs: u64,
}

fn default_relay_urls() -> Vec<String> {
    ["wss://relay.damus.io", "wss://relay.nostr.band", "wss://nos.lol", "wss://relay.snort.social"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_eose_timeout_secs() -> u64 { 10 }

impl Default for RelaysConfig {
    fn default() -> Self {
        Self {
            urls: default_relay_urls(),
            eose_timeout_secs: default_eose_timeout_secs(),
        }
    }
}

/// `[subscription]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscriptionConfig {
    #[serde(default = "default_kind")]
    pub kind: u16,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_kind() -> u16 { RELEASE_KIND }
fn default_limit() -> usize { 500 }

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self { kind: default_kind(), limit: default_limit() }
    }
}

/// `[filters]` section: the filter selection the explorer starts with.
#[derive(Debug, Clone, Deserialize)]
pub struct FiltersConfig {
    #[serde(default = "default_channels")]
    pub channels: Vec<String>,
    #[serde(default = "default_products")]
    pub products: Vec<ProductType>,
}

fn default_channels() -> Vec<String> { vec!["stable".to_string()] }
fn default_products() -> Vec<ProductType> { ProductType::ALL.to_vec() }

impl Default for FiltersConfig {
    fn default() -> Self {
        Self { channels: default_channels(), products: default_products() }
    }
}

impl FiltersConfig {
    /// Initial [`FilterSpec`] built from this section.
    pub fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec {
            channels: self.channels.iter().cloned().collect(),
            products: self.products.iter().copied().collect(),
            ..FilterSpec::unconstrained()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/tollgate-explorer/config.toml`, layered on top of
    /// the built-in defaults. Creates the file with defaults if it does not
    /// exist.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load from an explicit path, layered on top of the built-in defaults.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG.trim_start())?;
            tracing::info!("wrote default config to {}", path.display());
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("tollgate-explorer")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
