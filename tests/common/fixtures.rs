//! Release corpora used across harnesses.
//!
//! Timestamps are fixed so listings and snapshots are deterministic.

use super::builders::ReleaseBuilder;
use tollgate_core::Release;

/// 2024-01-15 12:00:00 UTC.
pub const T0: i64 = 1_705_320_000;
pub const DAY: i64 = 86_400;

/// A small catalogue covering every product family, several channels,
/// two architectures and overlapping device lists. Oldest first.
pub fn catalogue() -> Vec<Release> {
    vec![
        ReleaseBuilder::new("os-stable-mt3000")
            .created_at(T0)
            .product("tollgate-os-gl-mt3000")
            .version("v0.0.4")
            .channel("stable")
            .arch("aarch64_cortex-a53")
            .device("gl-mt3000")
            .supported_devices("gl-mt3000,gl-mt3000-v2")
            .tag("openwrt_version", "24.10.1")
            .url("https://releases.tollgate.example/os/gl-mt3000-v0.0.4.bin")
            .tag("x", "a1b2c3")
            .content("TollGate OS v0.0.4 for the GL-MT3000 travel router")
            .build(),
        ReleaseBuilder::new("os-beta-ar300m")
            .created_at(T0 + DAY)
            .product("tollgate-os-gl-ar300m")
            .version("v0.0.5-beta1")
            .channel("beta")
            .arch("mips_24kc")
            .device("gl-ar300m")
            .supported_devices("gl-ar300m16,gl-ar300m-nor")
            .content("TollGate OS beta build for the GL-AR300M")
            .build(),
        ReleaseBuilder::new("core-stable-arm")
            .created_at(T0 + 2 * DAY)
            .product("tollgate-core")
            .version("v0.1.0")
            .channel("stable")
            .arch("aarch64_cortex-a53")
            .url("https://releases.tollgate.example/core/tollgate-core_v0.1.0_aarch64.ipk")
            .tag("m", "application/x-ipk")
            .content("TollGate Core payment gateway package")
            .build(),
        ReleaseBuilder::new("module-dev-mips")
            .created_at(T0 + 3 * DAY)
            .tag("package_name", "tollgate-module-basic-go")
            .version("v0.0.9-dev")
            .channel("dev")
            .arch("mips_24kc")
            .build(),
        ReleaseBuilder::new("os-alpha-untagged")
            .created_at(T0 + 4 * DAY)
            .channel("alpha")
            .content("Experimental firmware image")
            .build(),
    ]
}

/// Releases arriving out of order: timestamps 100, 300, 200.
pub fn out_of_order() -> Vec<Release> {
    vec![
        ReleaseBuilder::new("a").created_at(100).build(),
        ReleaseBuilder::new("b").created_at(300).build(),
        ReleaseBuilder::new("c").created_at(200).build(),
    ]
}

/// Two releases differing only in device metadata, for substring matching.
pub fn device_pair() -> Vec<Release> {
    vec![
        ReleaseBuilder::new("mt3000")
            .created_at(T0 + 1)
            .device("gl-mt3000")
            .supported_devices("gl-mt3000")
            .build(),
        ReleaseBuilder::new("ar300m")
            .created_at(T0)
            .device("gl-ar300m")
            .supported_devices("gl-ar300m16")
            .build(),
    ]
}
