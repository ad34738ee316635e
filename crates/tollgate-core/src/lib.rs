//! tollgate-core — release data pipeline for the TollGate release explorer.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! types used across all layers.
//!
//! # Architecture
//!
//! ```text
//! RelayClient ──► Store ──► Search ──► presentation
//!                   │
//!                   └─────► Facets
//! ```
//!
//! The relay client delivers events over a `tokio` channel owned by a single
//! [`Subscription`]; the store is its only consumer. Normalizer and
//! classifier are pure functions evaluated lazily by search and facets.

pub mod classifier;
pub mod config;
pub mod error;
pub mod facets;
pub mod fallback;
pub mod normalizer;
pub mod search;
pub mod store;
pub mod subscription;
pub mod types;

pub use error::{Error, Result};
pub use facets::{unique_values, Facet};
pub use search::{apply, FilterSpec};
pub use store::{validate_publisher_key, Phase, ReleaseStore, StoreConfig, Update};
pub use subscription::{
    RelayClient, Subscription, SubscriptionEvent, SubscriptionFilter, SubscriptionSender,
};
pub use types::{ProductType, Release, Tag, DEFAULT_PUBLISHER_KEY, RELEASE_KIND};
