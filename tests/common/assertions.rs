//! Domain-specific assertion macros for tollgate-explorer harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* ordering or membership rule was violated.

use tollgate_core::Release;

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Assert that releases are ordered by `created_at` descending, with absent
/// timestamps last.
///
/// ```rust
/// assert_sorted_newest_first!(store.releases());
/// ```
#[macro_export]
macro_rules! assert_sorted_newest_first {
    ($releases:expr) => {{
        let releases: &[tollgate_core::Release] = &$releases;
        for pair in releases.windows(2) {
            if pair[0].timestamp() < pair[1].timestamp() {
                panic!(
                    "assert_sorted_newest_first! failed:\n  {:?} (created_at {:?}) precedes {:?} (created_at {:?})",
                    pair[0].id, pair[0].created_at, pair[1].id, pair[1].created_at
                );
            }
        }
    }};
}

/// Assert the exact id sequence of a release slice.
///
/// ```rust
/// assert_ids!(store.releases(), ["b", "c", "a"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($releases:expr, [$($id:expr),* $(,)?]) => {{
        let releases: &[tollgate_core::Release] = &$releases;
        let actual: Vec<&str> = releases.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "release ids differ");
    }};
}

// ---------------------------------------------------------------------------
// Membership
// ---------------------------------------------------------------------------

/// Assert that every release in a result set satisfies a predicate.
///
/// ```rust
/// assert_all_releases!(visible, |r| normalizer::channel(r) == "beta");
/// ```
#[macro_export]
macro_rules! assert_all_releases {
    ($releases:expr, $pred:expr) => {{
        let releases: &[tollgate_core::Release] = &$releases;
        let pred = $pred;
        let failing: Vec<&str> = releases
            .iter()
            .filter(|r| !pred(r))
            .map(|r| r.id.as_str())
            .collect();
        if !failing.is_empty() {
            panic!(
                "assert_all_releases! failed: {} of {} releases did not satisfy predicate: {:?}",
                failing.len(),
                releases.len(),
                failing
            );
        }
    }};
}

/// Assert that `subset` contains no release absent from `superset` (by id).
pub fn assert_subset(subset: &[Release], superset: &[Release]) {
    for release in subset {
        assert!(
            superset.iter().any(|r| r.id == release.id),
            "release {:?} is not in the source collection",
            release.id
        );
    }
}

/// Assert that no two releases share an id.
pub fn assert_unique_ids(releases: &[Release]) {
    let mut seen = std::collections::HashSet::new();
    for release in releases {
        assert!(seen.insert(&release.id), "duplicate release id {:?}", release.id);
    }
}
