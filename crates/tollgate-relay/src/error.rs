//! Error types for the relay adapter.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to relays.
#[derive(Error, Debug)]
pub enum Error {
    /// Nostr SDK error.
    #[error("Nostr SDK error: {0}")]
    NostrSdk(#[from] nostr_sdk::client::Error),

    /// A subscription author was not a valid public key.
    #[error("invalid public key '{key}': {reason}")]
    InvalidPublicKey { key: String, reason: String },

    /// No relay URLs were configured.
    #[error("no relays configured")]
    NoRelays,

    /// Every relay refused the subscription.
    #[error("no relay accepted the subscription: {0}")]
    Rejected(String),

    /// The relay pool stopped delivering notifications.
    #[error("relay pool closed")]
    PoolClosed,
}
