//! Integration tests for request fingerprints.

mod common;

use std::collections::HashSet;

use common::fixtures::png_data_url;
use snapcheck::constants::DEFAULT_IMAGE_PREFIX_LEN;
use snapcheck::{IssueCategory, ResultCache, fingerprint_request};

#[test]
fn test_fingerprint_determinism() {
    let photo = png_data_url(8, 8, [10, 20, 30]);

    let a = fingerprint_request(IssueCategory::Graffiti, "tags", &photo, 4096);
    let b = fingerprint_request(IssueCategory::Graffiti, "tags", &photo, 4096);

    assert_eq!(a, b);
    assert_eq!(
        a,
        ResultCache::key_for(IssueCategory::Graffiti, "tags", &photo, 4096)
    );
}

#[test]
fn test_fingerprint_uniqueness_across_inputs() {
    let red = png_data_url(8, 8, [200, 0, 0]);
    let blue = png_data_url(8, 8, [0, 0, 200]);
    let prefix = DEFAULT_IMAGE_PREFIX_LEN;

    let keys = [
        fingerprint_request(IssueCategory::RoadDamage, "pothole", &red, prefix),
        fingerprint_request(IssueCategory::RoadDamage, "pothole", &blue, prefix),
        fingerprint_request(IssueCategory::RoadDamage, "Pothole", &red, prefix),
        fingerprint_request(IssueCategory::RoadDamage, "pothole ", &red, prefix),
        fingerprint_request(IssueCategory::Sidewalk, "pothole", &red, prefix),
        fingerprint_request(IssueCategory::RoadDamage, "", &red, prefix),
    ];

    let unique: HashSet<_> = keys.iter().collect();
    assert_eq!(unique.len(), keys.len());
}

#[test]
fn test_description_boundary_is_unambiguous() {
    // Category and description bytes must not slide into each other.
    let photo = png_data_url(8, 8, [1, 2, 3]);

    let a = fingerprint_request(IssueCategory::Other, "ab", &photo, 4096);
    let b = fingerprint_request(IssueCategory::Other, "a", &format!("b{photo}"), 4096);

    assert_ne!(a, b);
}

#[test]
fn test_shared_prefix_and_length_collide() {
    let prefix = "data:image/png;base64,".to_string() + &"A".repeat(64);
    let one = format!("{prefix}BBBB");
    let two = format!("{prefix}CCCC");

    let short = 32;
    assert_eq!(
        fingerprint_request(IssueCategory::Other, "x", &one, short),
        fingerprint_request(IssueCategory::Other, "x", &two, short)
    );
    assert_ne!(
        fingerprint_request(IssueCategory::Other, "x", &one, usize::MAX),
        fingerprint_request(IssueCategory::Other, "x", &two, usize::MAX)
    );
}

#[test]
fn test_different_length_never_collides() {
    let base = "data:image/png;base64,".to_string() + &"A".repeat(64);
    let longer = format!("{base}AAAA");

    assert_ne!(
        fingerprint_request(IssueCategory::Other, "x", &base, 16),
        fingerprint_request(IssueCategory::Other, "x", &longer, 16)
    );
}
