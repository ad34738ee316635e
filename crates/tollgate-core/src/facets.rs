//! Facet extraction — the distinct values available to each filter.
//!
//! Always computed over the full, unfiltered collection so the choices on
//! offer do not shrink as filters are applied.

use crate::normalizer::{self, UNKNOWN};
use crate::types::Release;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A filterable dimension of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Channels,
    Architectures,
    Devices,
    Products,
}

impl Facet {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facet::Channels => "channels",
            Facet::Architectures => "architectures",
            Facet::Devices => "devices",
            Facet::Products => "products",
        }
    }

    /// The derived value this facet reads from a release.
    pub fn value_of(&self, release: &Release) -> String {
        match self {
            Facet::Channels => normalizer::channel(release).to_string(),
            Facet::Architectures => normalizer::architecture(release).to_string(),
            Facet::Devices => normalizer::device_id(release).to_string(),
            Facet::Products => normalizer::product_type(release).to_string(),
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Facet {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "channels" => Ok(Facet::Channels),
            "architectures" => Ok(Facet::Architectures),
            "devices" => Ok(Facet::Devices),
            "products" => Ok(Facet::Products),
            other => Err(crate::Error::UnknownFacet(other.to_string())),
        }
    }
}

/// Sorted, deduplicated values of `facet` across `releases`, without the
/// `Unknown` placeholder.
pub fn unique_values(releases: &[Release], facet: Facet) -> Vec<String> {
    releases
        .iter()
        .map(|r| facet.value_of(r))
        .filter(|v| !v.is_empty() && v != UNKNOWN)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
