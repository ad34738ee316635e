//! tollgate-relay — Nostr relay adapter for the TollGate release explorer.
//!
//! Connects to a set of relays with nostr-sdk and implements
//! [`tollgate_core::RelayClient`], pushing converted [`tollgate_core::Release`]
//! structs onto the subscription channel read by the store.

pub mod client;
pub mod error;

pub use client::{to_nostr_filter, to_release, NostrRelayClient, RelayConfig};
pub use error::{Error, Result};
