//! Store — the live release collection for the selected publisher.
//!
//! The store is the single source of truth; the presentation layer reads
//! from it, never from the relay client directly. It owns at most one
//! [`Subscription`] at a time and is mutated only through `&mut self`, so
//! event delivery is strictly sequential.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──► Connecting ──► Streaming ──► Settled
//!              │              │
//!              └──────────────┴──────► Failed
//! ```
//!
//! `refetch` and `set_publisher_key` start a new session from any state:
//! the previous subscription is dropped (which unsubscribes it), the
//! collection is cleared and the session generation is bumped. Events
//! tagged with an older generation are discarded.

use crate::config::Config;
use crate::fallback;
use crate::search::sort_newest_first;
use crate::subscription::{RelayClient, Subscription, SubscriptionEvent, SubscriptionFilter};
use crate::types::{Release, DEFAULT_PUBLISHER_KEY, RELEASE_KIND};
use crate::{Error, Result};
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

static PUBKEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{64}$").expect("static regex"));

/// Check a user-supplied publisher key: 64 hex characters, surrounding
/// whitespace ignored. Returns the trimmed key.
pub fn validate_publisher_key(key: &str) -> Result<&str> {
    let key = key.trim();
    if PUBKEY_RE.is_match(key) {
        Ok(key)
    } else {
        Err(Error::InvalidPublisherKey(key.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Phase + config
// ---------------------------------------------------------------------------

/// Where the current session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed; no subscription requested yet.
    Idle,
    /// Subscription requested, nothing delivered yet.
    Connecting,
    /// At least one event delivered, stored events still arriving.
    Streaming,
    /// End of stored events reached.
    Settled,
    /// The subscription reported an error.
    Failed,
}

/// Tunables for a [`ReleaseStore`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Key whose empty result is replaced by the sample dataset.
    pub default_publisher_key: String,
    pub kind: u16,
    pub limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_publisher_key: DEFAULT_PUBLISHER_KEY.to_string(),
            kind: RELEASE_KIND,
            limit: 500,
        }
    }
}

impl From<&Config> for StoreConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            default_publisher_key: cfg.publisher.default_pubkey.clone(),
            kind: cfg.subscription.kind,
            limit: cfg.subscription.limit,
        }
    }
}

/// What a single [`ReleaseStore::apply`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// A new release was merged into the collection.
    Inserted,
    /// The event's id was already present.
    Duplicate,
    /// The stream settled with live data.
    Settled,
    /// The stream settled empty and the sample dataset was installed.
    FallbackInstalled,
    /// The subscription failed.
    Failed,
    /// The event belonged to an old session or arrived after the session ended.
    Stale,
}

// ---------------------------------------------------------------------------
// ReleaseStore
// ---------------------------------------------------------------------------

/// Release collection for one publisher at a time.
pub struct ReleaseStore {
    client: Arc<dyn RelayClient>,
    config: StoreConfig,
    publisher_key: String,
    releases: Vec<Release>,
    seen: HashSet<String>,
    phase: Phase,
    error: Option<String>,
    generation: u64,
    received: usize,
    active: Option<Subscription>,
}

impl ReleaseStore {
    /// Create an idle store browsing the configured default publisher.
    /// Nothing is fetched until [`refetch`](Self::refetch) or
    /// [`set_publisher_key`](Self::set_publisher_key) is called.
    pub fn new(client: Arc<dyn RelayClient>, config: StoreConfig) -> Self {
        let publisher_key = config.default_publisher_key.clone();
        Self {
            client,
            config,
            publisher_key,
            releases: Vec::new(),
            seen: HashSet::new(),
            phase: Phase::Idle,
            error: None,
            generation: 0,
            received: 0,
            active: None,
        }
    }

    // -- read model --------------------------------------------------------

    /// Releases newest first.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    pub fn loading(&self) -> bool {
        matches!(self.phase, Phase::Connecting | Phase::Streaming)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_publisher_key(&self) -> &str {
        &self.publisher_key
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Session counter; bumped by every refetch or publisher switch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Look up a release by id in the current collection.
    pub fn find(&self, id: &str) -> Result<&Release> {
        self.releases
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    // -- commands ----------------------------------------------------------

    /// Switch to another publisher, discarding the current collection.
    pub fn set_publisher_key(&mut self, key: impl Into<String>) {
        self.publisher_key = key.into();
        self.start_session();
    }

    /// Fetch the current publisher's releases again from scratch.
    pub fn refetch(&mut self) {
        self.start_session();
    }

    fn start_session(&mut self) {
        if let Some(previous) = self.active.take() {
            tracing::debug!(generation = self.generation, "unsubscribing previous session");
            previous.unsubscribe();
        }

        self.generation += 1;
        self.releases.clear();
        self.seen.clear();
        self.received = 0;
        self.error = None;

        match validate_publisher_key(&self.publisher_key) {
            Ok(key) => self.publisher_key = key.to_string(),
            Err(_) => {
                tracing::warn!(key = %self.publisher_key, "malformed publisher key; showing no releases");
                self.phase = Phase::Settled;
                return;
            }
        }

        let filter = SubscriptionFilter {
            kind: self.config.kind,
            authors: vec![self.publisher_key.clone()],
            limit: self.config.limit,
        };
        tracing::info!(
            generation = self.generation,
            publisher = %self.publisher_key,
            limit = filter.limit,
            "fetching releases"
        );
        self.active = Some(self.client.subscribe(filter));
        self.phase = Phase::Connecting;
    }

    // -- event delivery ----------------------------------------------------

    /// Merge one notification tagged with the session `generation` it came
    /// from. Notifications from any other session are ignored.
    pub fn apply(&mut self, generation: u64, event: SubscriptionEvent) -> Update {
        if generation != self.generation || !self.loading() {
            tracing::debug!(generation, current = self.generation, "dropping stale notification");
            return Update::Stale;
        }

        match event {
            SubscriptionEvent::Event(release) => self.merge(release),
            SubscriptionEvent::EndOfStoredEvents => self.settle(),
            SubscriptionEvent::Error(message) => self.fail(message),
        }
    }

    fn merge(&mut self, release: Release) -> Update {
        self.received += 1;
        if self.phase == Phase::Connecting {
            self.phase = Phase::Streaming;
        }
        if !self.seen.insert(release.id.clone()) {
            tracing::trace!(id = %release.id, "duplicate release ignored");
            return Update::Duplicate;
        }
        tracing::debug!(id = %release.id, created_at = release.timestamp(), "received release");
        self.releases.push(release);
        sort_newest_first(&mut self.releases);
        Update::Inserted
    }

    fn settle(&mut self) -> Update {
        self.active = None;
        self.phase = Phase::Settled;

        if self.received == 0 && self.publisher_key == self.config.default_publisher_key {
            tracing::warn!("no releases from relays for the default publisher; using sample data");
            self.releases = fallback::sample_releases(chrono::Utc::now().timestamp());
            self.seen = self.releases.iter().map(|r| r.id.clone()).collect();
            return Update::FallbackInstalled;
        }

        tracing::info!(count = self.releases.len(), "end of stored events");
        Update::Settled
    }

    fn fail(&mut self, message: String) -> Update {
        tracing::error!(error = %message, "release subscription failed");
        self.active = None;
        self.phase = Phase::Failed;
        self.error = Some(format!("Failed to fetch releases: {message}"));
        Update::Failed
    }

    /// Wait for the next notification of the active subscription and merge
    /// it. Returns `None` when no subscription is active.
    ///
    /// A subscription that closes without signalling end of stored events
    /// is treated as a transport failure.
    pub async fn next_update(&mut self) -> Option<Update> {
        let generation = self.generation;
        let subscription = self.active.as_mut()?;
        let event = match subscription.recv().await {
            Some(event) => event,
            None => SubscriptionEvent::Error(
                "subscription closed before end of stored events".to_string(),
            ),
        };
        Some(self.apply(generation, event))
    }

    /// Drive the active subscription until the session settles or fails.
    pub async fn settle_current(&mut self) {
        while self.next_update().await.is_some() {}
    }
}
