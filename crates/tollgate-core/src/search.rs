//! Search layer — compound facet filters and recency ordering.
//!
//! [`apply`] is a pure function of `(releases, FilterSpec)`. Channels,
//! products and architectures are exact set-membership checks; devices are
//! matched by substring against both the device id and the supported-devices
//! list. The result is always ordered newest first.

use crate::facets::Facet;
use crate::normalizer;
use crate::types::{channel, ProductType, Release};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which releases to show. An empty set leaves its field unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub channels: BTreeSet<String>,
    #[serde(default)]
    pub products: BTreeSet<ProductType>,
    #[serde(default)]
    pub architectures: BTreeSet<String>,
    #[serde(default)]
    pub devices: BTreeSet<String>,
}

impl Default for FilterSpec {
    /// Stable channel only, every product family, no hardware constraint.
    fn default() -> Self {
        Self {
            channels: BTreeSet::from([channel::STABLE.to_string()]),
            products: ProductType::ALL.into_iter().collect(),
            architectures: BTreeSet::new(),
            devices: BTreeSet::new(),
        }
    }
}

impl FilterSpec {
    /// A spec with every field empty; lets every release through.
    pub fn unconstrained() -> Self {
        Self {
            channels: BTreeSet::new(),
            products: BTreeSet::new(),
            architectures: BTreeSet::new(),
            devices: BTreeSet::new(),
        }
    }

    /// Add `value` to the given facet's selection, or remove it if already
    /// selected. Unknown product slugs are ignored.
    pub fn toggle(&mut self, facet: Facet, value: &str) {
        fn flip<T: Ord>(set: &mut BTreeSet<T>, value: T) {
            if !set.remove(&value) {
                set.insert(value);
            }
        }

        match facet {
            Facet::Channels => flip(&mut self.channels, value.to_string()),
            Facet::Architectures => flip(&mut self.architectures, value.to_string()),
            Facet::Devices => flip(&mut self.devices, value.to_string()),
            Facet::Products => match value.parse::<ProductType>() {
                Ok(product) => flip(&mut self.products, product),
                Err(e) => tracing::debug!("ignoring product toggle: {e}"),
            },
        }
    }

    /// True when the spec narrows the hardware selection or selects any
    /// channel set other than stable-only.
    pub fn has_active_filters(&self) -> bool {
        !self.architectures.is_empty()
            || !self.devices.is_empty()
            || self.channels.len() != 1
            || !self.channels.contains(channel::STABLE)
    }

    /// Restore the default selection.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether a single release satisfies every constrained field.
    pub fn matches(&self, release: &Release) -> bool {
        if !self.channels.is_empty() && !self.channels.contains(normalizer::channel(release)) {
            return false;
        }
        if !self.products.is_empty() && !self.products.contains(&normalizer::product_type(release))
        {
            return false;
        }
        if !self.architectures.is_empty()
            && !self.architectures.contains(normalizer::architecture(release))
        {
            return false;
        }
        if !self.devices.is_empty() {
            let device_id = normalizer::device_id(release);
            let supported = normalizer::supported_devices(release);
            let any = self
                .devices
                .iter()
                .any(|d| device_id.contains(d.as_str()) || supported.contains(d.as_str()));
            if !any {
                return false;
            }
        }
        true
    }
}

/// Filter `releases` by `spec`, then order newest first.
pub fn apply(releases: &[Release], spec: &FilterSpec) -> Vec<Release> {
    let mut visible: Vec<Release> = releases
        .iter()
        .filter(|r| spec.matches(r))
        .cloned()
        .collect();
    sort_newest_first(&mut visible);
    visible
}

/// Stable sort by `created_at` descending; absent timestamps sort last.
pub fn sort_newest_first(releases: &mut [Release]) {
    releases.sort_by_key(|r| std::cmp::Reverse(r.timestamp()));
}

/// Result-count line shown above the listing.
pub fn summary(visible: usize, total: usize) -> String {
    format!("Showing {visible} of {total} releases")
}
