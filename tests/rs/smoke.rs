//! Integration smoke tests for `my_school`

use my_school::core::loader::{load_records, InputFiles};
use my_school::core::models::RecordDefaults;
use my_school::get_version;
use std::path::Path;

#[test]
fn version_is_not_empty() {
    let v = get_version();
    assert!(!v.trim().is_empty());
}

#[test]
fn bundled_samples_load() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples");
    let store = load_records(&InputFiles::in_dir(&dir), &RecordDefaults::default())
        .expect("samples are valid");
    assert_eq!(store.total_students(), 4);
    assert_eq!(store.total_courses(), 4);
    assert_eq!(store.results().len(), 10);
}
