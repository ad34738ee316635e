//! Error types for tollgate-core.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the release pipeline.
///
/// Normalization never produces an error: every derived-field accessor falls
/// back to a documented default instead.
#[derive(Error, Debug)]
pub enum Error {
    /// A detail lookup asked for a release the collection does not hold.
    #[error("release not found: {0}")]
    NotFound(String),

    /// Publisher keys must be 64 hexadecimal characters.
    #[error("invalid publisher key '{0}': must be a 64 character hex string")]
    InvalidPublisherKey(String),

    /// A product slug did not match any known product family.
    #[error("unknown product type: {0}")]
    UnknownProduct(String),

    /// A facet name did not match any filterable dimension.
    #[error("unknown facet: {0}")]
    UnknownFacet(String),

    /// Configuration file could not be read or deserialized.
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error (config bootstrap).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
