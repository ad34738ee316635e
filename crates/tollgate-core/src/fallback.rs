//! Sample releases shown for the default publisher when the relays return
//! nothing, so the explorer stays usable without a live relay.
//!
//! The dataset is fixed: three OS images (stable, beta, dev) published one
//! day apart, followed by two core packages (stable, beta). Only the
//! timestamps depend on `now`. Sample ids carry a `mock-` prefix.

use crate::search::sort_newest_first;
use crate::types::{Release, Tag, DEFAULT_PUBLISHER_KEY, RELEASE_KIND};

const DAY: i64 = 86_400;

/// Build the sample dataset relative to `now` (Unix seconds), newest first.
pub fn sample_releases(now: i64) -> Vec<Release> {
    let os_channels = ["stable", "beta", "dev"];
    let core_channels = ["stable", "beta"];

    let os = os_channels.iter().enumerate().map(|(i, channel)| {
        let minor = 3 - i;
        let version = format!("v1.{minor}.0");
        let device = format!("gl-mt300{i}");
        sample(
            format!("mock-os-{i}"),
            now - i as i64 * DAY,
            vec![
                Tag::new(
                    "url",
                    format!("https://releases.tollgate.example/tollgate-os-{version}-gl-mt3000.bin"),
                ),
                Tag::new("m", "application/octet-stream"),
                Tag::new("x", format!("hash{i}abcdef1234567890")),
                Tag::new("ox", format!("hash{i}abcdef1234567890")),
                Tag::new("architecture", "aarch64_cortex-a53"),
                Tag::new("device_id", device.clone()),
                Tag::new("supported_devices", format!("{device},{device}-v2")),
                Tag::new("openwrt_version", format!("24.10.{}", i + 1)),
                Tag::new("tollgate_os_version", version.clone()),
                Tag::new("release_channel", *channel),
            ],
            format!(
                "TollGate OS {version} for GL-MT300{i} - OpenWRT-based firmware with integrated payment gateway"
            ),
        )
    });

    let core = core_channels.iter().enumerate().map(|(i, channel)| {
        let version = format!("v0.{}.0", 5 - i);
        sample(
            format!("mock-core-{i}"),
            now - (i as i64 + 3) * DAY,
            vec![
                Tag::new(
                    "url",
                    format!("https://releases.tollgate.example/tollgate-core-{version}-aarch64.ipk"),
                ),
                Tag::new("m", "application/x-ipk"),
                Tag::new("x", format!("corehash{i}abcdef1234567890")),
                Tag::new("ox", format!("corehash{i}abcdef1234567890")),
                Tag::new("architecture", "aarch64_cortex-a53"),
                Tag::new("tollgate_core_version", version.clone()),
                Tag::new("release_channel", *channel),
            ],
            format!("TollGate Core {version} - Payment gateway package for OpenWRT"),
        )
    });

    let mut releases: Vec<Release> = os.chain(core).collect();
    sort_newest_first(&mut releases);
    releases
}

fn sample(id: String, created_at: i64, tags: Vec<Tag>, content: String) -> Release {
    Release {
        id,
        pubkey: DEFAULT_PUBLISHER_KEY.to_string(),
        kind: RELEASE_KIND,
        created_at: Some(created_at),
        tags,
        content: Some(content),
        sig: None,
    }
}
