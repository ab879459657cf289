//! Integration tests for logger behavior.

use my_school::logger::{parse_level, set_level, set_level_from_str, Level};
use my_school::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
    assert!(set_level_from_str("WARNING"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
    assert_eq!(parse_level("verbose"), None);
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_parent_directories() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("nested").join("myschool.log");
    assert!(my_school::logger::init_file_logging(&path));
    error!("written to file");
    let content = std::fs::read_to_string(&path).expect("log file exists");
    assert!(content.contains("[ERROR] written to file"));
}
