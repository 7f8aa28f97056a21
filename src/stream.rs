//! Per-stream report blocks.
//!
//! A stream block is one line such as
//!
//! ```text
//!   Stream #0:0[0x1](und): Video: h264 (High), yuv420p(progressive), 1920x1080, 23.98 fps, 23.98 tbr, 24k tbn (default)
//! ```
//!
//! followed by the stream's `Metadata:` block.

use std::fmt::{Result as FmtResult, Write};

use crate::codec::write_codec_summary;
use crate::configuration::ReportOptions;
use crate::metadata::{LANGUAGE_KEY, dump_metadata};
use crate::model::{CodecDetails, Stream};
use crate::rate::format_rate;
use crate::rational;

/// Indent of the stream metadata block.
const METADATA_INDENT: &str = "    ";

/// Write the report block of `stream`.
///
/// `input_index` and `stream_index` are the numbers on either side of the
/// colon in `Stream #0:1`; `stream_index` is the stream's position in
/// [`Container::streams`](crate::Container::streams).
pub fn write_stream_report<W: Write>(
    out: &mut W,
    stream: &Stream,
    input_index: usize,
    stream_index: usize,
    options: &ReportOptions,
) -> FmtResult {
    // `{:x}` on the id reinterpreted as unsigned keeps negative ids in
    // two's complement form.
    write!(
        out,
        "  Stream #{input_index}:{stream_index}[0x{:x}]",
        stream.id as u32
    )?;

    if let Some(language) = stream.metadata.get(LANGUAGE_KEY) {
        write!(out, "({language})")?;
    }

    out.write_str(": ")?;
    write_codec_summary(out, &stream.codec, options)?;

    write_stream_aspect_ratio(out, stream)?;

    if stream.codec.details.is_video() {
        write_frame_rates(out, stream, options)?;
    }

    for flag in stream.disposition.iter() {
        write!(out, " ({})", flag.label())?;
    }
    writeln!(out)?;

    dump_metadata(out, &stream.metadata, METADATA_INDENT)
}

/// Container-level SAR, printed only when it disagrees with the codec.
fn write_stream_aspect_ratio<W: Write>(out: &mut W, stream: &Stream) -> FmtResult {
    let sar = stream.sample_aspect_ratio;
    let codec_sar = stream
        .codec
        .details
        .video()
        .map(|video| video.sample_aspect_ratio)
        .unwrap_or_default();

    if sar.num == 0 || !sar.differs_from(codec_sar) {
        return Ok(());
    }

    let (width, height) = match &stream.codec.details {
        CodecDetails::Video(video) => (video.width, video.height),
        CodecDetails::Subtitle(subtitle) => (subtitle.width, subtitle.height),
        _ => (0, 0),
    };
    let dar = rational::display_aspect_ratio(width, height, sar);
    write!(out, ", SAR {}:{} DAR {}:{}", sar.num, sar.den, dar.num, dar.den)
}

/// `fps`, `tbr` and `tbn`, each only when its source rate is present.
fn write_frame_rates<W: Write>(out: &mut W, stream: &Stream, options: &ReportOptions) -> FmtResult {
    let fps = !stream.avg_frame_rate.is_absent();
    let tbr = !stream.real_frame_rate.is_absent();
    let tbn = !stream.time_base.is_absent();

    if fps || tbr || tbn {
        out.write_str(options.separator())?;
    }
    if fps {
        let unit = if tbr || tbn { "fps, " } else { "fps" };
        out.write_str(&format_rate(stream.avg_frame_rate.to_f64(), unit))?;
    }
    if tbr {
        let unit = if tbn { "tbr, " } else { "tbr" };
        out.write_str(&format_rate(stream.real_frame_rate.to_f64(), unit))?;
    }
    if tbn {
        out.write_str(&format_rate(1.0 / stream.time_base.to_f64(), "tbn"))?;
    }
    Ok(())
}

/// Render the block of `stream` as a `String`.
pub fn stream_report(
    stream: &Stream,
    input_index: usize,
    stream_index: usize,
    options: &ReportOptions,
) -> String {
    let mut report = String::new();
    // Writing into a String cannot fail.
    let _ = write_stream_report(&mut report, stream, input_index, stream_index, options);
    report
}
