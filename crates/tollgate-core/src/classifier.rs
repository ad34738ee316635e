//! Classifier — infers the [`ProductType`] of a release from weak signals.
//!
//! Rules are tried in order and the first one that matches wins:
//!
//! 1. the standardized `name` tag names a product family;
//! 2. the deprecated `package_name` tag names the basic module;
//! 3. a deprecated `tollgate_os_version` tag marks an OS image;
//! 4. keywords in the content, download URL or `filename` tag;
//! 5. otherwise the release is an OS image.

use crate::normalizer::{self, tags};
use crate::types::{ProductType, Release};

pub fn classify(release: &Release) -> ProductType {
    from_name_tag(release)
        .or_else(|| from_package_name_tag(release))
        .or_else(|| from_os_version_tag(release))
        .or_else(|| from_keywords(release))
        .unwrap_or_default()
}

fn from_name_tag(release: &Release) -> Option<ProductType> {
    let name = release.tag_value(tags::NAME)?;
    ProductType::ALL
        .into_iter()
        .find(|p| name.contains(p.as_str()))
}

fn from_package_name_tag(release: &Release) -> Option<ProductType> {
    release
        .tag_value(tags::PACKAGE_NAME)
        .filter(|name| name.contains(ProductType::TollgateModuleBasicGo.as_str()))
        .map(|_| ProductType::TollgateModuleBasicGo)
}

fn from_os_version_tag(release: &Release) -> Option<ProductType> {
    release
        .tag_value(tags::TOLLGATE_OS_VERSION)
        .map(|_| ProductType::TollgateOs)
}

fn from_keywords(release: &Release) -> Option<ProductType> {
    let haystacks = [
        release.content.as_deref(),
        normalizer::download_url(release),
        release.tag_value(tags::FILENAME),
    ]
    .map(|h| h.unwrap_or_default().to_lowercase());

    let mentions = |needle: &str| haystacks.iter().any(|h| h.contains(needle));

    if mentions("basic") || mentions("module") {
        Some(ProductType::TollgateModuleBasicGo)
    } else if mentions("core") {
        Some(ProductType::TollgateCore)
    } else {
        None
    }
}
