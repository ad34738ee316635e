//! Text presentation of releases for the command-line explorer.
//!
//! Everything here is a pure function of the store's read model, so output
//! can be snapshot-tested without a relay.

use serde::Serialize;
use tollgate_core::normalizer;
use tollgate_core::search::summary;
use tollgate_core::{FilterSpec, Release};

/// Maximum description length in the plain listing.
pub const DESCRIPTION_LEN: usize = 100;

/// A release with every derived attribute resolved, as emitted by
/// `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseRow<'a> {
    pub id: &'a str,
    pub version: String,
    pub product: &'static str,
    pub channel: &'a str,
    pub release_date: String,
    pub architecture: &'a str,
    pub device_id: &'a str,
    pub supported_devices: &'a str,
    pub openwrt_version: &'a str,
    pub download_url: Option<&'a str>,
    pub file_hash: Option<&'a str>,
    pub mime_type: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> From<&'a Release> for ReleaseRow<'a> {
    fn from(release: &'a Release) -> Self {
        Self {
            id: &release.id,
            version: normalizer::version(release),
            product: normalizer::product_display_name(release),
            channel: normalizer::channel(release),
            release_date: normalizer::release_date(release),
            architecture: normalizer::architecture(release),
            device_id: normalizer::device_id(release),
            supported_devices: normalizer::supported_devices(release),
            openwrt_version: normalizer::openwrt_version(release),
            download_url: normalizer::download_url(release),
            file_hash: normalizer::file_hash(release),
            mime_type: normalizer::mime_type(release),
            description: release.content.as_deref(),
        }
    }
}

/// One-line description of the active filter selection.
pub fn filter_line(spec: &FilterSpec) -> String {
    fn join<'a>(values: impl Iterator<Item = &'a str>) -> String {
        let joined: Vec<&str> = values.collect();
        if joined.is_empty() {
            "any".to_string()
        } else {
            joined.join(",")
        }
    }

    format!(
        "channels: {} | products: {} | arch: {} | devices: {}",
        join(spec.channels.iter().map(String::as_str)),
        join(spec.products.iter().map(|p| p.as_str())),
        join(spec.architectures.iter().map(String::as_str)),
        join(spec.devices.iter().map(String::as_str)),
    )
}

/// Plain-text listing: result count, active filters, then one block per
/// release in the order given.
pub fn listing(visible: &[Release], total: usize, spec: &FilterSpec) -> String {
    let mut out = summary(visible.len(), total);
    out.push('\n');
    if spec.has_active_filters() {
        out.push_str(&filter_line(spec));
        out.push('\n');
    }

    if visible.is_empty() {
        out.push_str("\nNo releases match the current filters.\n");
        return out;
    }

    for release in visible {
        let row = ReleaseRow::from(release);
        out.push('\n');
        out.push_str(&format!(
            "{} {} [{}] {}\n",
            row.product, row.version, row.channel, row.release_date
        ));
        out.push_str(&format!(
            "  arch: {}  device: {}\n",
            row.architecture, row.device_id
        ));
        let description = normalizer::truncate(row.description, DESCRIPTION_LEN);
        if !description.is_empty() {
            out.push_str(&format!("  {description}\n"));
        }
        out.push_str(&format!("  id: {}\n", row.id));
    }
    out
}

/// JSON array of [`ReleaseRow`]s.
pub fn listing_json(visible: &[Release]) -> serde_json::Result<String> {
    let rows: Vec<ReleaseRow<'_>> = visible.iter().map(ReleaseRow::from).collect();
    serde_json::to_string_pretty(&rows)
}

/// Detail page for a single release, ending with the raw event JSON.
pub fn detail(release: &Release) -> serde_json::Result<String> {
    let row = ReleaseRow::from(release);
    let mut out = format!("{} {}\n\n", row.product, row.version);

    let fields = [
        ("Channel", row.channel.to_string()),
        ("Released", row.release_date.clone()),
        ("Architecture", row.architecture.to_string()),
        ("OpenWRT", row.openwrt_version.to_string()),
        ("Device", row.device_id.to_string()),
        ("Supported devices", row.supported_devices.to_string()),
        ("MIME type", row.mime_type.to_string()),
        ("Download", row.download_url.unwrap_or(normalizer::UNKNOWN).to_string()),
        ("SHA-256", row.file_hash.unwrap_or(normalizer::UNKNOWN).to_string()),
    ];
    for (label, value) in fields {
        out.push_str(&format!("{label:<18} {value}\n"));
    }

    if let Some(description) = row.description.filter(|d| !d.is_empty()) {
        out.push_str(&format!("\n{description}\n"));
    }

    out.push_str("\nRaw event:\n");
    out.push_str(&release.to_raw_json()?);
    out.push('\n');
    Ok(out)
}
