//! Test builders — ergonomic constructors for `Release` and `ReleaseStore`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use super::fake_relay::FakeRelay;
use std::sync::Arc;
use tollgate_core::{Release, ReleaseStore, StoreConfig, Tag, DEFAULT_PUBLISHER_KEY, RELEASE_KIND};

// ---------------------------------------------------------------------------
// ReleaseBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Release`] test fixtures.
///
/// # Example
///
/// ```rust
/// let release = ReleaseBuilder::new("evt-1")
///     .created_at(1_700_000_000)
///     .channel("beta")
///     .arch("aarch64_cortex-a53")
///     .device("gl-mt3000")
///     .build();
/// ```
pub struct ReleaseBuilder {
    id: String,
    pubkey: String,
    created_at: Option<i64>,
    tags: Vec<Tag>,
    content: Option<String>,
}

impl ReleaseBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            pubkey: DEFAULT_PUBLISHER_KEY.to_string(),
            created_at: Some(1_700_000_000),
            tags: Vec::new(),
            content: None,
        }
    }

    pub fn pubkey(mut self, pubkey: impl Into<String>) -> Self {
        self.pubkey = pubkey.into();
        self
    }

    pub fn created_at(mut self, secs: i64) -> Self {
        self.created_at = Some(secs);
        self
    }

    pub fn no_timestamp(mut self) -> Self {
        self.created_at = None;
        self
    }

    pub fn tag(mut self, name: &str, value: impl Into<String>) -> Self {
        self.tags.push(Tag::new(name, value));
        self
    }

    pub fn version(self, version: &str) -> Self {
        self.tag("version", version)
    }

    pub fn channel(self, channel: &str) -> Self {
        self.tag("release_channel", channel)
    }

    pub fn arch(self, arch: &str) -> Self {
        self.tag("architecture", arch)
    }

    pub fn device(self, device: &str) -> Self {
        self.tag("device_id", device)
    }

    pub fn supported_devices(self, devices: &str) -> Self {
        self.tag("supported_devices", devices)
    }

    /// Standardized product name tag, e.g. `tollgate-core`.
    pub fn product(self, name: &str) -> Self {
        self.tag("name", name)
    }

    pub fn url(self, url: &str) -> Self {
        self.tag("url", url)
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn build(self) -> Release {
        Release {
            id: self.id,
            pubkey: self.pubkey,
            kind: RELEASE_KIND,
            created_at: self.created_at,
            tags: self.tags,
            content: self.content,
            sig: None,
        }
    }
}

/// Shorthand: a bare release with an id and a timestamp.
pub fn release_at(id: &str, created_at: i64) -> Release {
    ReleaseBuilder::new(id).created_at(created_at).build()
}

// ---------------------------------------------------------------------------
// Store helpers
// ---------------------------------------------------------------------------

/// Hex key that is well-formed but is not the default publisher.
pub const OTHER_PUBLISHER_KEY: &str =
    "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// An idle store wired to a fresh [`FakeRelay`] with default settings.
pub fn store_with_fake_relay() -> (Arc<FakeRelay>, ReleaseStore) {
    let relay = FakeRelay::new();
    let store = ReleaseStore::new(relay.clone(), StoreConfig::default());
    (relay, store)
}

/// Ids of `releases` in order, for compact assertions.
pub fn ids(releases: &[Release]) -> Vec<&str> {
    releases.iter().map(|r| r.id.as_str()).collect()
}
