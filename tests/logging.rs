//! File logging at an explicit level
//!
//! The global logger can be installed once per process, so everything that
//! depends on it lives in this one test.

use log::LevelFilter;
use ovirt_helpers::{configure_logging, EngineError};
use std::fs;

#[test]
fn test_debug_level_written_to_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("x.log");

    configure_logging(LevelFilter::Debug, &path).expect("first configuration");

    log::trace!(target: "probe", "below the threshold");
    log::debug!(target: "probe", "listing vms");
    log::warn!(target: "probe", "vm is down");

    let contents = fs::read_to_string(&path).expect("log file");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2, "unexpected log contents: {contents}");

    assert!(lines[0].contains(" DEBUG   ("));
    assert!(lines[0].ends_with(") [probe] listing vms"));
    assert!(lines[1].contains(" WARN    ("));
    assert!(lines[1].ends_with(") [probe] vm is down"));

    let err = configure_logging(LevelFilter::Trace, dir.path().join("y.log")).unwrap_err();
    assert!(matches!(err, EngineError::Logging(_)));

    log::trace!(target: "probe", "still filtered");
    let contents = fs::read_to_string(&path).expect("log file");
    assert_eq!(contents.lines().count(), 2);
}
