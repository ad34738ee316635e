//! Core types for tollgate-core.
//!
//! This module defines the data structures shared across all pipeline
//! layers: the received [`Release`] event, its [`Tag`] records, and the
//! [`ProductType`] discriminant.

use serde::{Deserialize, Serialize};

/// NIP-94 file-metadata event kind used for release announcements.
pub const RELEASE_KIND: u16 = 1063;

/// Publisher key whose empty result set is replaced by the sample dataset.
pub const DEFAULT_PUBLISHER_KEY: &str =
    "5075e61f0b048148b60105c1dd72bbeae1957336ae5824087e52efa374f8416a";

/// Release maturity channels known to the explorer.
pub mod channel {
    pub const STABLE: &str = "stable";
    pub const BETA: &str = "beta";
    pub const ALPHA: &str = "alpha";
    pub const DEV: &str = "dev";

    /// All channels, in the order the filter bar lists them.
    pub const ALL: [&str; 4] = [STABLE, BETA, ALPHA, DEV];
}

/// A single release announcement as delivered by the relay client.
///
/// Releases are never mutated after they are received. Every descriptive
/// attribute (version, channel, architecture, …) is derived from `tags` and
/// `content` by the [`normalizer`](crate::normalizer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Event id. Primary key for deduplication.
    pub id: String,
    /// Hex public key of the signer.
    pub pubkey: String,
    #[serde(default = "default_kind")]
    pub kind: u16,
    /// Unix timestamp (seconds). `None` sorts as the oldest possible release.
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub content: Option<String>,
    /// Carried through untouched for the raw event export; never verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sig: Option<String>,
}

fn default_kind() -> u16 {
    RELEASE_KIND
}

impl Release {
    /// Sort key: `created_at`, with an absent timestamp treated as 0.
    pub fn timestamp(&self) -> i64 {
        self.created_at.unwrap_or(0)
    }

    /// First tag named `name`, if any.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Value of the first tag named `name`.
    ///
    /// Only the first matching tag is consulted. An empty value counts as
    /// absent so that fallback chains move on to their next rule.
    pub fn tag_value(&self, name: &str) -> Option<&str> {
        self.tag(name)
            .and_then(|t| t.value.as_deref())
            .filter(|v| !v.is_empty())
    }

    /// Pretty-printed NIP-01 JSON of the event, as shown on the detail page.
    pub fn to_raw_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One tag of a release event: `[name, value, extra…]` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Tag {
    pub name: String,
    pub value: Option<String>,
    /// Any elements after the value (markers, relay hints, …).
    pub extra: Vec<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            extra: Vec::new(),
        }
    }
}

impl From<Vec<String>> for Tag {
    fn from(parts: Vec<String>) -> Self {
        let mut parts = parts.into_iter();
        Self {
            name: parts.next().unwrap_or_default(),
            value: parts.next(),
            extra: parts.collect(),
        }
    }
}

impl From<Tag> for Vec<String> {
    fn from(tag: Tag) -> Self {
        let mut parts = Vec::with_capacity(2 + tag.extra.len());
        parts.push(tag.name);
        if let Some(value) = tag.value {
            parts.push(value);
        }
        parts.extend(tag.extra);
        parts
    }
}

/// Which software family a release belongs to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    #[default]
    TollgateOs,
    TollgateCore,
    TollgateModuleBasicGo,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::TollgateOs,
        ProductType::TollgateCore,
        ProductType::TollgateModuleBasicGo,
    ];

    /// Slug used in tags, filters and facet values.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::TollgateOs => "tollgate-os",
            ProductType::TollgateCore => "tollgate-core",
            ProductType::TollgateModuleBasicGo => "tollgate-module-basic-go",
        }
    }

    /// Human-readable product name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProductType::TollgateOs => "TollGate OS",
            ProductType::TollgateCore => "TollGate Core",
            ProductType::TollgateModuleBasicGo => "TollGate Basic Module",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductType::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| crate::Error::UnknownProduct(s.to_string()))
    }
}
