//! Container reports.
//!
//! [`render_report`] turns a [`Container`] into the familiar probe summary:
//!
//! ```text
//! Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'input.mp4':
//!   Metadata:
//!     major_brand     : isom
//!   Duration: 00:00:10.01, start: 0.000000, bitrate: 1205 kb/s
//!   Stream #0:0[0x1](und): Video: h264 (High) (avc1 / 0x31637661), yuv420p(progressive), 1280x720, 1071 kb/s, 25 fps, 25 tbr, 12800 tbn (default)
//!   Stream #0:1[0x2](und): Audio: aac (LC) (mp4a / 0x6134706D), 44100 Hz, stereo, fltp, 128 kb/s (default)
//! ```
//!
//! The whole report is rendered in memory first; sinks only ever receive a
//! complete report.

use std::fmt::{Result as FmtResult, Write};
use std::io::Write as IoWrite;

use crate::configuration::ReportOptions;
use crate::error::ReportError;
use crate::metadata::dump_metadata;
use crate::model::{Container, TIME_BASE};
use crate::stream::write_stream_report;

/// Index shown in `Input #0` and `Stream #0:n`; a report always describes
/// a single input.
const INPUT_INDEX: usize = 0;

/// Rounding bias added to the duration before it is cut to hundredths.
const DURATION_ROUNDING: i64 = 5000;

/// Render the report for `container`, labelled with `url`.
///
/// # Errors
///
/// Returns [`ReportError::AllocationFailed`] if the bookkeeping for printed
/// streams cannot be allocated. No partial report is produced.
///
/// # Example
///
/// ```
/// use probe_report::{Container, ReportOptions, render_report};
///
/// let container = Container {
///     format_name: "matroska,webm".to_string(),
///     ..Default::default()
/// };
/// let report = render_report(&container, "empty.mkv", &ReportOptions::new())?;
///
/// assert_eq!(
///     report,
///     "Input #0, matroska,webm, from 'empty.mkv':\n  Duration: N/A, bitrate: N/A\n",
/// );
/// # Ok::<(), probe_report::ReportError>(())
/// ```
pub fn render_report(
    container: &Container,
    url: &str,
    options: &ReportOptions,
) -> Result<String, ReportError> {
    let stream_count = container.streams.len();
    let mut printed: Vec<bool> = Vec::new();
    printed
        .try_reserve_exact(stream_count)
        .map_err(|_| ReportError::AllocationFailed {
            streams: stream_count,
        })?;
    printed.resize(stream_count, false);

    log::debug!(
        "Rendering report for {url}: {} streams, {} chapters, {} programs",
        stream_count,
        container.chapters.len(),
        container.programs.len(),
    );

    let mut report = String::new();
    write_container(&mut report, container, url, options, &mut printed)?;
    Ok(report)
}

/// Render the report and write it to `writer` in one piece.
///
/// # Errors
///
/// Returns [`ReportError::AllocationFailed`] as [`render_report`] does (in
/// which case nothing is written), or [`ReportError::Io`] if writing fails.
pub fn write_report<W: IoWrite>(
    writer: &mut W,
    container: &Container,
    url: &str,
    options: &ReportOptions,
) -> Result<(), ReportError> {
    let report = render_report(container, url, options)?;
    writer.write_all(report.as_bytes())?;
    writer.flush()?;
    Ok(())
}

impl Container {
    /// Render the report labelled with the container's own [`url`](Container::url).
    ///
    /// # Errors
    ///
    /// See [`render_report`].
    pub fn report(&self, options: &ReportOptions) -> Result<String, ReportError> {
        render_report(self, &self.url, options)
    }
}

fn write_container<W: Write>(
    out: &mut W,
    container: &Container,
    url: &str,
    options: &ReportOptions,
    printed: &mut [bool],
) -> FmtResult {
    writeln!(
        out,
        "Input #{INPUT_INDEX}, {}, from '{url}':",
        container.format_name
    )?;
    dump_metadata(out, &container.metadata, "  ")?;

    out.write_str("  Duration: ")?;
    match container.duration {
        Some(duration) => write_duration(out, duration)?,
        None => out.write_str("N/A")?,
    }
    if let Some(start_time) = container.start_time {
        write_start_time(out, start_time)?;
    }
    out.write_str(", bitrate: ")?;
    match container.bit_rate.filter(|rate| *rate != 0) {
        Some(bit_rate) => write!(out, "{} kb/s", bit_rate / 1000)?,
        None => out.write_str("N/A")?,
    }
    writeln!(out)?;

    write_chapters(out, container)?;
    write_programs(out, container, options, printed)?;

    for (stream_index, stream) in container.streams.iter().enumerate() {
        if !printed[stream_index] {
            write_stream_report(out, stream, INPUT_INDEX, stream_index, options)?;
        }
    }
    Ok(())
}

/// `HH:MM:SS.CC`, rounded to the nearest hundredth.
fn write_duration<W: Write>(out: &mut W, duration: i64) -> FmtResult {
    let duration = duration.checked_add(DURATION_ROUNDING).unwrap_or(duration);
    let microseconds = duration % TIME_BASE;
    let total_seconds = duration / TIME_BASE;
    let seconds = total_seconds % 60;
    let total_minutes = total_seconds / 60;
    let minutes = total_minutes % 60;
    let hours = total_minutes / 60;
    write!(
        out,
        "{hours:02}:{minutes:02}:{seconds:02}.{:02}",
        (100 * microseconds) / TIME_BASE
    )
}

/// `, start: [-]S.UUUUUU`.
fn write_start_time<W: Write>(out: &mut W, start_time: i64) -> FmtResult {
    let sign = if start_time >= 0 { "" } else { "-" };
    let seconds = (start_time / TIME_BASE).unsigned_abs();
    let microseconds = (start_time % TIME_BASE).unsigned_abs();
    write!(out, ", start: {sign}{seconds}.{microseconds:06}")
}

fn write_chapters<W: Write>(out: &mut W, container: &Container) -> FmtResult {
    if container.chapters.is_empty() {
        return Ok(());
    }

    writeln!(out, "  Chapters:")?;
    for (index, chapter) in container.chapters.iter().enumerate() {
        let unit = chapter.time_base.to_f64();
        write!(out, "    Chapter #{INPUT_INDEX}:{index}: start ")?;
        write_seconds(out, chapter.start as f64 * unit)?;
        out.write_str(", end ")?;
        write_seconds(out, chapter.end as f64 * unit)?;
        writeln!(out)?;
        dump_metadata(out, &chapter.metadata, "      ")?;
    }
    Ok(())
}

/// Seconds with six decimals. A zero time base yields NaN, spelled `nan`
/// like C's `%f`; infinities already print as `inf`.
fn write_seconds<W: Write>(out: &mut W, seconds: f64) -> FmtResult {
    if seconds.is_nan() {
        out.write_str("nan")
    } else {
        write!(out, "{seconds:.6}")
    }
}

/// Programs and their streams. Streams rendered here are marked in
/// `printed`; a stream listed by several programs is rendered once per
/// program.
fn write_programs<W: Write>(
    out: &mut W,
    container: &Container,
    options: &ReportOptions,
    printed: &mut [bool],
) -> FmtResult {
    if container.programs.is_empty() {
        return Ok(());
    }

    let mut claimed = 0;
    for program in &container.programs {
        let name = program.metadata.get("name").unwrap_or_default();
        writeln!(out, "  Program {} {name}", program.id)?;
        dump_metadata(out, &program.metadata, "    ")?;

        for &stream_index in &program.stream_indexes {
            let Some(stream) = container.streams.get(stream_index) else {
                log::warn!(
                    "Program {} references missing stream {stream_index} (container has {} streams)",
                    program.id,
                    container.streams.len(),
                );
                continue;
            };
            write_stream_report(out, stream, INPUT_INDEX, stream_index, options)?;
            printed[stream_index] = true;
        }
        claimed += program.stream_indexes.len();
    }

    if claimed < container.streams.len() {
        writeln!(out, "  No Program")?;
    }
    Ok(())
}
