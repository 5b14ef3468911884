//! Tests for the coordinate-prefix location index

use std::io::Write;

use crate::app::services::track_enricher::LocationIndex;

#[test]
fn test_builtin_table_lookups() {
    let index = LocationIndex::default();

    assert_eq!(index.lookup(50.76, -1.29), "Cowes East");
    assert_eq!(index.lookup(50.76, -1.3012), "Cowes");
    assert_eq!(index.lookup(50.83, -0.96), "Hayling Island (Havant)");
    assert_eq!(index.lookup(50.8034, -0.9412), "Hayling Island");
}

#[test]
fn test_trailing_zero_renderings_miss_their_entries() {
    // -1.30 renders as "-1.3", so the "50.76;-1.30" entry only matches
    // coordinates whose rendering keeps a digit there (e.g. -1.3012).
    // Kept for key-compatibility with the original table.
    let index = LocationIndex::default();
    assert_eq!(index.lookup(50.76, -1.3), "");
    assert_eq!(index.lookup(50.8, -0.94), "");
}

#[test]
fn test_unknown_coordinates_yield_empty_tag() {
    let index = LocationIndex::default();
    assert_eq!(index.lookup(12.34, 56.78), "");
}

#[test]
fn test_lookup_is_pure_in_the_truncated_prefix() {
    // Coordinates sharing the same 5-character prefixes hit the same entry
    let index = LocationIndex::default();
    assert_eq!(index.lookup(50.768, -1.292), index.lookup(50.761, -1.298));
    assert_eq!(index.lookup(50.768, -1.292), "Cowes East");
}

#[test]
fn test_lookup_key_truncates_to_five_characters() {
    assert_eq!(LocationIndex::lookup_key(50.76, -1.29), "50.76;-1.29");
    assert_eq!(LocationIndex::lookup_key(50.768, -1.292), "50.76;-1.29");
    // The sign counts toward the prefix
    assert_eq!(LocationIndex::lookup_key(50.83, -0.96), "50.83;-0.96");
    // Short renderings are kept whole
    assert_eq!(LocationIndex::lookup_key(50.8, -0.9), "50.8;-0.9");
}

#[test]
fn test_from_pairs() {
    let index = LocationIndex::from_pairs(&[("10.00;20.00", "Test Harbor")]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.lookup(10.001, 20.001), "Test Harbor");
}

#[test]
fn test_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"50.76;-1.29": "Custom Cowes", "48.85;2.351": "Paris"}}"#
    )
    .unwrap();
    file.flush().unwrap();

    let index = LocationIndex::from_json_file(file.path()).unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index.lookup(50.76, -1.29), "Custom Cowes");
}

#[test]
fn test_from_json_file_invalid_content_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    file.flush().unwrap();

    assert!(LocationIndex::from_json_file(file.path()).is_err());
}

#[test]
fn test_empty_index() {
    let index = LocationIndex::from_pairs(&[]);
    assert!(index.is_empty());
    assert_eq!(index.lookup(50.76, -1.29), "");
}
