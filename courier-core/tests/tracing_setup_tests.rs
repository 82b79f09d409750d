//! File output of the tracing setup.

use courier_core::tracing_setup::{LAST_RUN_LOG_FILE, init_tracing};
use tracing::Level;

#[test]
fn test_init_tracing_writes_last_run_log() {
    let logs_dir = tempfile::tempdir().unwrap();

    let log_path = init_tracing(Level::WARN, Some(logs_dir.path())).unwrap();
    assert_eq!(log_path, logs_dir.path().join(LAST_RUN_LOG_FILE));
    assert!(log_path.exists());

    // A second global subscriber is refused rather than panicking
    assert!(init_tracing(Level::WARN, Some(logs_dir.path())).is_err());
}
