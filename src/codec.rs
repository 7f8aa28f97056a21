//! One-line codec summaries.
//!
//! [`write_codec_summary`] renders the part of a stream line that describes
//! its codec, e.g.
//!
//! ```text
//! Video: h264 (High) (avc1 / 0x31637661), yuv420p(tv, bt709, progressive), 1920x1080 [SAR 1:1 DAR 16:9], 4870 kb/s
//! Audio: aac (LC) (mp4a / 0x6134706D), 48000 Hz, stereo, fltp, 128 kb/s
//! ```

use std::fmt::{Result as FmtResult, Write};

use crate::configuration::ReportOptions;
use crate::model::{
    AudioParameters, CodecDetails, CodecParameters, SubtitleParameters, VideoParameters,
};
use crate::rational;

/// Name used for unspecified colour properties that must still be shown.
const UNKNOWN: &str = "unknown";

/// Render a fourcc codec tag. Printable characters are kept as-is and
/// anything else becomes `[<decimal>]`.
///
/// # Example
///
/// ```
/// use probe_report::codec::fourcc_to_string;
///
/// assert_eq!(fourcc_to_string(0x3163_7661), "avc1");
/// assert_eq!(fourcc_to_string(0x0000_0001), "[1][0][0][0]");
/// ```
pub fn fourcc_to_string(tag: u32) -> String {
    tag.to_le_bytes()
        .iter()
        .map(|&byte| {
            if byte.is_ascii_alphanumeric() || matches!(byte, b' ' | b'.' | b'_' | b'-') {
                (byte as char).to_string()
            } else {
                format!("[{byte}]")
            }
        })
        .collect()
}

/// Bit rate shown in the summary, in bits per second.
///
/// Audio codecs with a fixed sample size (PCM) use
/// `sample_rate × channels × bits_per_sample`, clamped to `0` on overflow;
/// everything else uses the declared bit rate. Unknown media types have no
/// bit rate.
pub fn effective_bit_rate(codec: &CodecParameters) -> i64 {
    let declared = codec.bit_rate.unwrap_or(0);
    match &codec.details {
        CodecDetails::Audio(audio) if audio.codec_bits_per_sample != 0 => {
            let samples_per_second = audio.sample_rate as i64 * audio.channels as i64;
            samples_per_second
                .checked_mul(audio.codec_bits_per_sample as i64)
                .unwrap_or(0)
        }
        CodecDetails::Unknown => 0,
        _ => declared,
    }
}

/// Write the codec summary for `codec`.
///
/// Attachments and unknown media types stop after the header; every other
/// type ends with the bit-rate suffix.
pub fn write_codec_summary<W: Write>(
    out: &mut W,
    codec: &CodecParameters,
    options: &ReportOptions,
) -> FmtResult {
    write_header(out, codec, options)?;

    match &codec.details {
        CodecDetails::Video(video) => write_video(out, codec, video, options)?,
        CodecDetails::Audio(audio) => write_audio(out, audio, options)?,
        CodecDetails::Data => {
            let time_base = codec.time_base;
            if options.is_debug() && rational::gcd(time_base.num as i64, time_base.den as i64) != 0 {
                write!(out, ", {}", rational::simplify(time_base))?;
            }
        }
        CodecDetails::Subtitle(subtitle) => write_subtitle(out, subtitle)?,
        CodecDetails::Attachment | CodecDetails::Unknown => return Ok(()),
    }

    write_bit_rate(out, codec)
}

fn write_header<W: Write>(
    out: &mut W,
    codec: &CodecParameters,
    options: &ReportOptions,
) -> FmtResult {
    let media_type = codec.details.media_type().unwrap_or(UNKNOWN);
    write!(out, "{}: {}", capitalize(media_type), codec.codec_name)?;

    if let Some(implementation) = &codec.implementation_name {
        if *implementation != codec.codec_name {
            write!(out, " ({implementation})")?;
        }
    }
    if let Some(profile) = &codec.profile {
        write!(out, " ({profile})")?;
    }
    if let CodecDetails::Video(video) = &codec.details {
        if options.is_verbose() && video.reference_frames != 0 {
            let plural = if video.reference_frames > 1 { "s" } else { "" };
            write!(out, ", {} reference frame{plural}", video.reference_frames)?;
        }
    }
    if codec.codec_tag != 0 {
        write!(
            out,
            " ({} / 0x{:04X})",
            fourcc_to_string(codec.codec_tag),
            codec.codec_tag
        )?;
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut characters = word.chars();
    match characters.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + characters.as_str(),
        None => String::new(),
    }
}

fn write_video<W: Write>(
    out: &mut W,
    codec: &CodecParameters,
    video: &VideoParameters,
    options: &ReportOptions,
) -> FmtResult {
    let pixel_format = video
        .pixel_format
        .as_ref()
        .map_or("none", |format| format.name.as_str());
    write!(out, "{}{pixel_format}", options.separator())?;

    // Details grouped in parentheses right after the pixel format.
    let mut details: Vec<String> = Vec::new();
    if let Some(format) = &video.pixel_format {
        if video.bits_per_raw_sample != 0 && video.bits_per_raw_sample < format.component_depth {
            details.push(format!("{} bpc", video.bits_per_raw_sample));
        }
    }
    if let Some(range) = &video.color_range {
        details.push(range.clone());
    }

    let mut new_line = false;
    if video.color_space.is_some()
        || video.color_primaries.is_some()
        || video.color_transfer.is_some()
    {
        let space = video.color_space.as_deref().unwrap_or(UNKNOWN);
        let primaries = video.color_primaries.as_deref().unwrap_or(UNKNOWN);
        let transfer = video.color_transfer.as_deref().unwrap_or(UNKNOWN);
        if space != primaries || space != transfer {
            new_line = true;
            details.push(format!("{space}/{primaries}/{transfer}"));
        } else {
            details.push(space.to_string());
        }
    }
    if let Some(field_order) = video.field_order.label() {
        details.push(field_order.to_string());
    }
    if options.is_verbose() {
        if let Some(location) = &video.chroma_location {
            details.push(location.clone());
        }
    }
    if !details.is_empty() {
        write!(out, "({})", details.join(", "))?;
    }

    if video.width != 0 {
        let separator = if new_line { options.separator() } else { ", " };
        write!(out, "{separator}{}x{}", video.width, video.height)?;

        if options.is_verbose()
            && video.coded_width != 0
            && video.coded_height != 0
            && (video.width != video.coded_width || video.height != video.coded_height)
        {
            write!(out, " ({}x{})", video.coded_width, video.coded_height)?;
        }
        if video.sample_aspect_ratio.num != 0 {
            let sar = video.sample_aspect_ratio;
            let dar = rational::display_aspect_ratio(video.width, video.height, sar);
            write!(out, " [SAR {}:{} DAR {}:{}]", sar.num, sar.den, dar.num, dar.den)?;
        }
        if options.is_debug() {
            write!(out, ", {}", rational::simplify(codec.time_base))?;
        }
    }

    if video.properties.closed_captions {
        out.write_str(", Closed Captions")?;
    }
    if video.properties.film_grain {
        out.write_str(", Film Grain")?;
    }
    if video.properties.lossless {
        out.write_str(", lossless")?;
    }
    Ok(())
}

fn write_audio<W: Write>(
    out: &mut W,
    audio: &AudioParameters,
    options: &ReportOptions,
) -> FmtResult {
    out.write_str(options.separator())?;

    if audio.sample_rate != 0 {
        write!(out, "{} Hz, ", audio.sample_rate)?;
    }
    if let Some(layout) = &audio.channel_layout {
        out.write_str(layout)?;
    }
    if let Some(format) = &audio.sample_format {
        write!(out, ", {}", format.name)?;
    }

    let native_bits = audio
        .sample_format
        .as_ref()
        .map_or(0, |format| format.bytes_per_sample * 8);
    if audio.bits_per_raw_sample > 0 && audio.bits_per_raw_sample != native_bits {
        write!(out, " ({} bit)", audio.bits_per_raw_sample)?;
    }

    if options.is_verbose() {
        if audio.initial_padding != 0 {
            write!(out, ", delay {}", audio.initial_padding)?;
        }
        if audio.trailing_padding != 0 {
            write!(out, ", padding {}", audio.trailing_padding)?;
        }
    }
    Ok(())
}

fn write_subtitle<W: Write>(out: &mut W, subtitle: &SubtitleParameters) -> FmtResult {
    if subtitle.width != 0 {
        write!(out, ", {}x{}", subtitle.width, subtitle.height)?;
    }
    Ok(())
}

fn write_bit_rate<W: Write>(out: &mut W, codec: &CodecParameters) -> FmtResult {
    let bit_rate = effective_bit_rate(codec);
    if bit_rate != 0 {
        write!(out, ", {} kb/s", bit_rate / 1000)?;
    } else if let Some(max_rate) = codec.max_bit_rate.filter(|rate| *rate > 0) {
        write!(out, ", max. {} kb/s", max_rate / 1000)?;
    }
    Ok(())
}

/// Convenience wrapper returning the summary as a `String`.
pub fn codec_summary(codec: &CodecParameters, options: &ReportOptions) -> String {
    let mut summary = String::new();
    // Writing into a String cannot fail.
    let _ = write_codec_summary(&mut summary, codec, options);
    summary
}

