//! tollgate-explorer — browse TollGate release announcements published on
//! Nostr.
//!
//! The release pipeline lives in [`tollgate_core`] and the relay transport in
//! [`tollgate_relay`]; this crate adds the text presentation used by the
//! binary and re-exports both so integration tests can import everything
//! from one place.
//!
//! # Architecture
//!
//! ```text
//! NostrRelayClient ──► ReleaseStore ──► search::apply ──► render
//!                           │
//!                           └─────────► facets
//! ```

pub mod render;

pub use tollgate_core::*;
pub use tollgate_relay::{NostrRelayClient, RelayConfig};
