//! Error types for the `probe_report` crate.
//!
//! This module defines [`ReportError`], the error type returned by every
//! fallible operation in the crate. Formatting itself never fails on sparse
//! or unusual input; errors only come from resource exhaustion, the output
//! sink, or the probe that builds the container model.

use std::{fmt::Error as FmtError, io::Error as IoError, path::PathBuf};

#[cfg(feature = "ffmpeg")]
use ffmpeg_next::Error as FfmpegError;
use thiserror::Error;

/// The unified error type for all `probe_report` operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// The per-report bookkeeping of printed streams could not be allocated.
    /// No part of the report was produced.
    #[error("Failed to allocate report state for {streams} streams")]
    AllocationFailed {
        /// Number of streams in the container.
        streams: usize,
    },

    /// A formatter rejected its output buffer.
    #[error("Formatting error: {0}")]
    Format(#[from] FmtError),

    /// An I/O error occurred while writing the report.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// The media file could not be opened or analysed.
    #[error("Failed to open media file at {path}: {reason}")]
    FileOpen {
        /// Path that was passed to the probe.
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),
}

#[cfg(feature = "ffmpeg")]
impl From<FfmpegError> for ReportError {
    fn from(error: FfmpegError) -> Self {
        ReportError::FfmpegError(error.to_string())
    }
}
