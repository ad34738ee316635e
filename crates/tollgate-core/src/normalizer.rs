//! Normalizer — derives typed release attributes from raw event tags.
//!
//! Every accessor is total: a missing, empty or otherwise unusable tag falls
//! through to the next rule of its chain and finally to a fixed default. The
//! newer standardized tags are consulted before the deprecated
//! `tollgate_*` ones so both generations of publishers render correctly.

use crate::types::{ProductType, Release};

/// Placeholder shown for attributes a release does not carry.
pub const UNKNOWN: &str = "Unknown";

/// Fallback MIME type for release artifacts.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// Tag names
// ---------------------------------------------------------------------------

pub mod tags {
    pub const VERSION: &str = "version";
    pub const TOLLGATE_OS_VERSION: &str = "tollgate_os_version";
    pub const RELEASE_CHANNEL: &str = "release_channel";
    pub const ARCHITECTURE: &str = "architecture";
    pub const OPENWRT_VERSION: &str = "openwrt_version";
    pub const DEVICE_ID: &str = "device_id";
    pub const SUPPORTED_DEVICES: &str = "supported_devices";
    pub const URL: &str = "url";
    pub const HASH: &str = "x";
    pub const ORIGINAL_HASH: &str = "ox";
    pub const MIME_TYPE: &str = "m";
    pub const NAME: &str = "name";
    pub const PACKAGE_NAME: &str = "package_name";
    pub const FILENAME: &str = "filename";
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

/// Display version: `version`, then `tollgate_os_version`, then the first
/// eight characters of the event id.
pub fn version(release: &Release) -> String {
    if let Some(v) = release
        .tag_value(tags::VERSION)
        .or_else(|| release.tag_value(tags::TOLLGATE_OS_VERSION))
    {
        return v.to_string();
    }
    if release.id.is_empty() {
        return UNKNOWN.to_string();
    }
    release.id.chars().take(8).collect()
}

pub fn channel(release: &Release) -> &str {
    release
        .tag_value(tags::RELEASE_CHANNEL)
        .unwrap_or(crate::types::channel::STABLE)
}

pub fn architecture(release: &Release) -> &str {
    release.tag_value(tags::ARCHITECTURE).unwrap_or(UNKNOWN)
}

pub fn openwrt_version(release: &Release) -> &str {
    release.tag_value(tags::OPENWRT_VERSION).unwrap_or(UNKNOWN)
}

pub fn device_id(release: &Release) -> &str {
    release.tag_value(tags::DEVICE_ID).unwrap_or(UNKNOWN)
}

/// Comma-separated device list as published; not split.
pub fn supported_devices(release: &Release) -> &str {
    release.tag_value(tags::SUPPORTED_DEVICES).unwrap_or(UNKNOWN)
}

pub fn download_url(release: &Release) -> Option<&str> {
    release.tag_value(tags::URL)
}

/// File hash: `x`, then the original-file hash `ox`.
pub fn file_hash(release: &Release) -> Option<&str> {
    release
        .tag_value(tags::HASH)
        .or_else(|| release.tag_value(tags::ORIGINAL_HASH))
}

pub fn mime_type(release: &Release) -> &str {
    release.tag_value(tags::MIME_TYPE).unwrap_or(DEFAULT_MIME_TYPE)
}

pub fn product_type(release: &Release) -> ProductType {
    crate::classifier::classify(release)
}

pub fn product_display_name(release: &Release) -> &'static str {
    product_type(release).display_name()
}

/// Short en-US release date (`Jan 5, 2024`), or `Unknown` when the event has
/// no usable timestamp.
pub fn release_date(release: &Release) -> String {
    match release.created_at {
        Some(secs) if secs != 0 => chrono::DateTime::from_timestamp(secs, 0)
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| UNKNOWN.to_string()),
        _ => UNKNOWN.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Text helpers
// ---------------------------------------------------------------------------

/// Shorten `text` to at most `max_len` characters, ending in `...` when cut.
///
/// A `max_len` below 3 leaves no room for content, so the result is just
/// the first `max_len` dots of the ellipsis.
pub fn truncate(text: Option<&str>, max_len: usize) -> String {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return String::new(),
    };
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    if max_len < 3 {
        return ".".repeat(max_len);
    }
    let mut out: String = text.chars().take(max_len - 3).collect();
    out.push_str("...");
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
