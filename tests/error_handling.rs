//! Error message tests.

use std::path::PathBuf;

use probe_report::ReportError;

#[test]
fn allocation_failure_names_stream_count() {
    let error = ReportError::AllocationFailed { streams: 3 };
    assert_eq!(error.to_string(), "Failed to allocate report state for 3 streams");
}

#[test]
fn file_open_names_path_and_reason() {
    let error = ReportError::FileOpen {
        path: PathBuf::from("missing.mp4"),
        reason: "No such file or directory".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("Failed to open media file"), "{message}");
    assert!(message.contains("missing.mp4"), "{message}");
    assert!(message.contains("No such file or directory"), "{message}");
}

#[test]
fn io_errors_convert() {
    let error: ReportError = std::io::Error::other("disk full").into();
    assert!(matches!(error, ReportError::Io(_)));
    assert_eq!(error.to_string(), "I/O error: disk full");
}

#[test]
fn format_errors_convert() {
    let error: ReportError = std::fmt::Error.into();
    assert!(matches!(error, ReportError::Format(_)));
}
