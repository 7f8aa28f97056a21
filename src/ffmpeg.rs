//! FFmpeg-backed probing (feature `ffmpeg`).
//!
//! [`probe_file`] opens a media file with FFmpeg, runs stream-info
//! discovery and copies everything the report needs into a [`Container`].
//! The demuxer is closed before the function returns, so the resulting
//! model is fully owned and independent of any file handle.
//!
//! FFmpeg has its own console logging, separate from the Rust
//! [`log`](https://crates.io/crates/log) facade used by this crate;
//! [`set_ffmpeg_log_level`] tunes it.
//!
//! # Example
//!
//! ```no_run
//! use probe_report::{ReportOptions, Verbosity};
//!
//! probe_report::set_ffmpeg_log_level(Verbosity::Error);
//!
//! let container = probe_report::probe_file("input.mp4")?;
//! print!("{}", container.report(&ReportOptions::new())?);
//! # Ok::<(), probe_report::ReportError>(())
//! ```

use std::ffi::{CStr, c_char, c_int};
use std::path::Path;
use std::ptr;

use ffmpeg_next::codec::context::Context as CodecContext;
use ffmpeg_next::format::context::Input;
use ffmpeg_next::util::log::Level;
use ffmpeg_next::{Dictionary, Rational as FfmpegRational};
use ffmpeg_sys_next::{
    AV_DICT_IGNORE_SUFFIX, AV_DISPOSITION_ATTACHED_PIC, AV_DISPOSITION_CAPTIONS,
    AV_DISPOSITION_CLEAN_EFFECTS, AV_DISPOSITION_COMMENT, AV_DISPOSITION_DEFAULT,
    AV_DISPOSITION_DEPENDENT, AV_DISPOSITION_DESCRIPTIONS, AV_DISPOSITION_DUB,
    AV_DISPOSITION_FORCED, AV_DISPOSITION_HEARING_IMPAIRED, AV_DISPOSITION_KARAOKE,
    AV_DISPOSITION_LYRICS, AV_DISPOSITION_METADATA, AV_DISPOSITION_NON_DIEGETIC,
    AV_DISPOSITION_ORIGINAL, AV_DISPOSITION_STILL_IMAGE, AV_DISPOSITION_TIMED_THUMBNAILS,
    AV_DISPOSITION_VISUAL_IMPAIRED, AV_NOPTS_VALUE, AVChromaLocation, AVCodecContext,
    AVColorPrimaries, AVColorRange, AVColorSpace, AVColorTransferCharacteristic, AVDictionary,
    AVDictionaryEntry, AVFieldOrder, AVMediaType, AVPixelFormat, AVRational, AVSampleFormat,
};

use crate::configuration::Verbosity;
use crate::error::ReportError;
use crate::metadata::Metadata;
use crate::model::{
    AudioParameters, Chapter, CodecDetails, CodecParameters, CodecProperties, Container,
    Disposition, DispositionFlag, FieldOrder, PixelFormat, Program, SampleFormat, Stream,
    SubtitleParameters, VideoParameters,
};
use crate::rational::Rational;

/// Name used when FFmpeg has no name for a value.
const UNKNOWN: &str = "unknown";

/// Disposition bits in report order.
const DISPOSITION_BITS: [(u32, DispositionFlag); 18] = [
    (AV_DISPOSITION_DEFAULT as u32, DispositionFlag::Default),
    (AV_DISPOSITION_DUB as u32, DispositionFlag::Dub),
    (AV_DISPOSITION_ORIGINAL as u32, DispositionFlag::Original),
    (AV_DISPOSITION_COMMENT as u32, DispositionFlag::Comment),
    (AV_DISPOSITION_LYRICS as u32, DispositionFlag::Lyrics),
    (AV_DISPOSITION_KARAOKE as u32, DispositionFlag::Karaoke),
    (AV_DISPOSITION_FORCED as u32, DispositionFlag::Forced),
    (AV_DISPOSITION_HEARING_IMPAIRED as u32, DispositionFlag::HearingImpaired),
    (AV_DISPOSITION_VISUAL_IMPAIRED as u32, DispositionFlag::VisualImpaired),
    (AV_DISPOSITION_CLEAN_EFFECTS as u32, DispositionFlag::CleanEffects),
    (AV_DISPOSITION_ATTACHED_PIC as u32, DispositionFlag::AttachedPic),
    (AV_DISPOSITION_TIMED_THUMBNAILS as u32, DispositionFlag::TimedThumbnails),
    (AV_DISPOSITION_CAPTIONS as u32, DispositionFlag::Captions),
    (AV_DISPOSITION_DESCRIPTIONS as u32, DispositionFlag::Descriptions),
    (AV_DISPOSITION_METADATA as u32, DispositionFlag::Metadata),
    (AV_DISPOSITION_DEPENDENT as u32, DispositionFlag::Dependent),
    (AV_DISPOSITION_STILL_IMAGE as u32, DispositionFlag::StillImage),
    (AV_DISPOSITION_NON_DIEGETIC as u32, DispositionFlag::NonDiegetic),
];

impl Verbosity {
    fn to_ffmpeg_level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::Quiet,
            Verbosity::Panic => Level::Panic,
            Verbosity::Fatal => Level::Fatal,
            Verbosity::Error => Level::Error,
            Verbosity::Warning => Level::Warning,
            Verbosity::Info => Level::Info,
            Verbosity::Verbose => Level::Verbose,
            Verbosity::Debug => Level::Debug,
            Verbosity::Trace => Level::Trace,
        }
    }
}

/// Set FFmpeg's own console log level.
///
/// This does **not** affect the report or Rust-side `log` output.
pub fn set_ffmpeg_log_level(verbosity: Verbosity) {
    ffmpeg_next::util::log::set_level(verbosity.to_ffmpeg_level());
}

/// Open `path`, discover its streams, and build the [`Container`] model.
///
/// # Errors
///
/// Returns [`ReportError::FileOpen`] if FFmpeg cannot be initialised, or
/// the file cannot be opened or analysed.
pub fn probe_file<P: AsRef<Path>>(path: P) -> Result<Container, ReportError> {
    let path = path.as_ref();
    log::debug!("Probing media file: {}", path.display());

    ffmpeg_next::init().map_err(|error| ReportError::FileOpen {
        path: path.to_path_buf(),
        reason: format!("FFmpeg initialisation failed: {error}"),
    })?;

    // MPEG-TS: read every PMT so that all programs are reported.
    let mut options = Dictionary::new();
    options.set("scan_all_pmts", "1");

    let input = ffmpeg_next::format::input_with_dictionary(&path, options).map_err(|error| {
        ReportError::FileOpen {
            path: path.to_path_buf(),
            reason: error.to_string(),
        }
    })?;

    let container = container_from_input(&input, &path.to_string_lossy())?;
    log::info!(
        "Probed media file: {} (format={}, streams={}, chapters={}, programs={})",
        path.display(),
        container.format_name,
        container.streams.len(),
        container.chapters.len(),
        container.programs.len(),
    );
    Ok(container)
}

/// Build the [`Container`] model from an opened demuxer.
///
/// # Errors
///
/// Returns [`ReportError::FfmpegError`] if codec parameters of a stream
/// cannot be loaded into a codec context.
pub fn container_from_input(input: &Input, url: &str) -> Result<Container, ReportError> {
    // SAFETY: `input` owns a valid, opened format context.
    let context = unsafe { &*input.as_ptr() };

    let streams = input
        .streams()
        .map(|stream| -> Result<Stream, ReportError> {
            // SAFETY: the stream pointer stays valid while `input` is borrowed.
            let raw_stream = unsafe { &*stream.as_ptr() };
            let codec_context = CodecContext::from_parameters(stream.parameters())?;
            // SAFETY: `codec_context` owns a valid codec context.
            let codec = codec_parameters(unsafe { &*codec_context.as_ptr() });

            Ok(Stream {
                id: stream.id(),
                codec,
                sample_aspect_ratio: from_av_rational(raw_stream.sample_aspect_ratio),
                avg_frame_rate: from_ffmpeg_rational(stream.avg_frame_rate()),
                real_frame_rate: from_ffmpeg_rational(stream.rate()),
                time_base: from_ffmpeg_rational(stream.time_base()),
                disposition: disposition_from_bits(raw_stream.disposition as u32),
                metadata: metadata_from_pairs(stream.metadata().iter()),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let chapters = input
        .chapters()
        .map(|chapter| Chapter {
            id: chapter.id(),
            start: chapter.start(),
            end: chapter.end(),
            time_base: from_ffmpeg_rational(chapter.time_base()),
            metadata: metadata_from_pairs(chapter.metadata().iter()),
        })
        .collect();

    let mut programs = Vec::with_capacity(context.nb_programs as usize);
    for index in 0..context.nb_programs as usize {
        // SAFETY: `programs` holds `nb_programs` valid program pointers.
        let program = unsafe { &**context.programs.add(index) };
        let stream_indexes = (0..program.nb_stream_indexes as usize)
            // SAFETY: `stream_index` holds `nb_stream_indexes` entries.
            .map(|position| unsafe { *program.stream_index.add(position) } as usize)
            .collect();
        programs.push(Program {
            id: program.id,
            metadata: metadata_from_raw(program.metadata),
            stream_indexes,
        });
    }

    Ok(Container {
        url: url.to_string(),
        format_name: input.format().name().to_string(),
        duration: (context.duration != AV_NOPTS_VALUE).then_some(context.duration),
        start_time: (context.start_time != AV_NOPTS_VALUE).then_some(context.start_time),
        bit_rate: (context.bit_rate != 0).then_some(context.bit_rate),
        metadata: metadata_from_pairs(input.metadata().iter()),
        streams,
        chapters,
        programs,
    })
}

fn codec_parameters(context: &AVCodecContext) -> CodecParameters {
    let details = match context.codec_type {
        AVMediaType::AVMEDIA_TYPE_VIDEO => CodecDetails::Video(video_parameters(context)),
        AVMediaType::AVMEDIA_TYPE_AUDIO => CodecDetails::Audio(audio_parameters(context)),
        AVMediaType::AVMEDIA_TYPE_DATA => CodecDetails::Data,
        AVMediaType::AVMEDIA_TYPE_SUBTITLE => CodecDetails::Subtitle(SubtitleParameters {
            width: context.width,
            height: context.height,
        }),
        AVMediaType::AVMEDIA_TYPE_ATTACHMENT => CodecDetails::Attachment,
        _ => CodecDetails::Unknown,
    };

    // SAFETY: `avcodec_get_name` returns a static string for any codec id.
    let codec_name = unsafe { static_name(ffmpeg_sys_next::avcodec_get_name(context.codec_id)) };
    // SAFETY: `avcodec_profile_name` returns null or a static string.
    let profile = unsafe {
        static_name(ffmpeg_sys_next::avcodec_profile_name(
            context.codec_id,
            context.profile,
        ))
    };

    CodecParameters {
        codec_name: codec_name.unwrap_or_else(|| UNKNOWN.to_string()),
        // A context built from stream parameters has no codec implementation
        // attached, so there is no second name to show.
        implementation_name: None,
        profile,
        codec_tag: context.codec_tag,
        bit_rate: (context.bit_rate != 0).then_some(context.bit_rate),
        max_bit_rate: (context.rc_max_rate != 0).then_some(context.rc_max_rate),
        time_base: from_av_rational(context.time_base),
        details,
    }
}

fn video_parameters(context: &AVCodecContext) -> VideoParameters {
    let pixel_format = (context.pix_fmt != AVPixelFormat::AV_PIX_FMT_NONE).then(|| {
        // SAFETY: `av_get_pix_fmt_name` returns null or a static string.
        let name = unsafe { static_name(ffmpeg_sys_next::av_get_pix_fmt_name(context.pix_fmt)) };
        // SAFETY: `av_pix_fmt_desc_get` returns null or a pointer into a
        // static descriptor table.
        let descriptor = unsafe { ffmpeg_sys_next::av_pix_fmt_desc_get(context.pix_fmt).as_ref() };
        PixelFormat {
            name: name.unwrap_or_else(|| UNKNOWN.to_string()),
            component_depth: descriptor.map_or(0, |descriptor| descriptor.comp[0].depth),
        }
    });

    let color_range = if context.color_range != AVColorRange::AVCOL_RANGE_UNSPECIFIED {
        // SAFETY: `av_color_range_name` returns null or a static string.
        unsafe { static_name(ffmpeg_sys_next::av_color_range_name(context.color_range)) }
    } else {
        None
    };
    let color_space = (context.colorspace != AVColorSpace::AVCOL_SPC_UNSPECIFIED).then(|| {
        // SAFETY: `av_color_space_name` returns null or a static string.
        unsafe { name_or_unknown(ffmpeg_sys_next::av_color_space_name(context.colorspace)) }
    });
    let color_primaries = (context.color_primaries != AVColorPrimaries::AVCOL_PRI_UNSPECIFIED)
        .then(|| {
            // SAFETY: `av_color_primaries_name` returns null or a static string.
            unsafe {
                name_or_unknown(ffmpeg_sys_next::av_color_primaries_name(
                    context.color_primaries,
                ))
            }
        });
    let color_transfer = (context.color_trc
        != AVColorTransferCharacteristic::AVCOL_TRC_UNSPECIFIED)
        .then(|| {
            // SAFETY: `av_color_transfer_name` returns null or a static string.
            unsafe { name_or_unknown(ffmpeg_sys_next::av_color_transfer_name(context.color_trc)) }
        });
    let chroma_location =
        if context.chroma_sample_location != AVChromaLocation::AVCHROMA_LOC_UNSPECIFIED {
            // SAFETY: `av_chroma_location_name` returns null or a static string.
            unsafe {
                static_name(ffmpeg_sys_next::av_chroma_location_name(
                    context.chroma_sample_location,
                ))
            }
        } else {
            None
        };

    let field_order = match context.field_order {
        AVFieldOrder::AV_FIELD_PROGRESSIVE => FieldOrder::Progressive,
        AVFieldOrder::AV_FIELD_TT => FieldOrder::TopFirst,
        AVFieldOrder::AV_FIELD_BB => FieldOrder::BottomFirst,
        AVFieldOrder::AV_FIELD_TB => FieldOrder::TopCodedFirst,
        AVFieldOrder::AV_FIELD_BT => FieldOrder::BottomCodedFirst,
        _ => FieldOrder::Unknown,
    };

    VideoParameters {
        pixel_format,
        width: context.width,
        height: context.height,
        coded_width: context.coded_width,
        coded_height: context.coded_height,
        bits_per_raw_sample: context.bits_per_raw_sample,
        color_range,
        color_space,
        color_primaries,
        color_transfer,
        field_order,
        chroma_location,
        reference_frames: context.refs,
        sample_aspect_ratio: from_av_rational(context.sample_aspect_ratio),
        // Property flags are only set by a running decoder; a context filled
        // from stream parameters never carries them.
        properties: CodecProperties::default(),
    }
}

fn audio_parameters(context: &AVCodecContext) -> AudioParameters {
    let mut buffer = [0 as c_char; 512];
    // SAFETY: `ch_layout` belongs to a valid codec context and the buffer
    // length passed matches the buffer.
    let described = unsafe {
        ffmpeg_sys_next::av_channel_layout_describe(
            &context.ch_layout,
            buffer.as_mut_ptr(),
            buffer.len(),
        )
    };
    let channel_layout = (described >= 0).then(|| {
        // SAFETY: on success the description is NUL-terminated within the
        // buffer, truncating if needed.
        let description = unsafe { CStr::from_ptr(buffer.as_ptr()) };
        description.to_string_lossy().into_owned()
    });

    let sample_format = if context.sample_fmt != AVSampleFormat::AV_SAMPLE_FMT_NONE {
        // SAFETY: `av_get_sample_fmt_name` returns null or a static string.
        let name =
            unsafe { static_name(ffmpeg_sys_next::av_get_sample_fmt_name(context.sample_fmt)) };
        // SAFETY: a pure lookup on the enum value.
        let bytes_per_sample =
            unsafe { ffmpeg_sys_next::av_get_bytes_per_sample(context.sample_fmt) };
        name.map(|name| SampleFormat {
            name,
            bytes_per_sample,
        })
    } else {
        None
    };

    // SAFETY: a pure lookup on the codec id.
    let codec_bits_per_sample =
        unsafe { ffmpeg_sys_next::av_get_bits_per_sample(context.codec_id) };

    AudioParameters {
        sample_rate: context.sample_rate,
        channel_layout,
        channels: context.ch_layout.nb_channels,
        sample_format,
        bits_per_raw_sample: context.bits_per_raw_sample,
        codec_bits_per_sample,
        initial_padding: context.initial_padding,
        trailing_padding: context.trailing_padding,
    }
}

/// [`static_name`], falling back to `"unknown"`.
///
/// # Safety
///
/// Same contract as [`static_name`].
unsafe fn name_or_unknown(name: *const c_char) -> String {
    // SAFETY: forwarded from the caller.
    let name = unsafe { static_name(name) };
    name.unwrap_or_else(|| UNKNOWN.to_string())
}

/// Copy a static C string returned by an FFmpeg name lookup.
///
/// # Safety
///
/// `name` must be null or point to a NUL-terminated string that outlives
/// the call.
unsafe fn static_name(name: *const c_char) -> Option<String> {
    if name.is_null() {
        return None;
    }
    // SAFETY: non-null and NUL-terminated per the function contract.
    Some(unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned())
}

fn metadata_from_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Metadata {
    pairs.collect()
}

fn metadata_from_raw(dictionary: *const AVDictionary) -> Metadata {
    let mut metadata = Metadata::new();
    let mut entry: *const AVDictionaryEntry = ptr::null();
    loop {
        // SAFETY: `dictionary` is null or owned by the open format context;
        // `entry` is null or the previous entry of the same dictionary.
        entry = unsafe {
            ffmpeg_sys_next::av_dict_get(
                dictionary,
                c"".as_ptr(),
                entry,
                AV_DICT_IGNORE_SUFFIX as c_int,
            )
            .cast_const()
        };
        // SAFETY: a non-null entry has valid key and value strings.
        let Some(current) = (unsafe { entry.as_ref() }) else {
            break;
        };
        // SAFETY: dictionary keys and values are NUL-terminated strings
        // owned by the dictionary.
        let (key, value) = unsafe {
            (
                CStr::from_ptr(current.key).to_string_lossy(),
                CStr::from_ptr(current.value).to_string_lossy(),
            )
        };
        metadata.insert(key, value);
    }
    metadata
}

fn disposition_from_bits(bits: u32) -> Disposition {
    DISPOSITION_BITS
        .iter()
        .filter(|(bit, _)| bits & bit != 0)
        .map(|(_, flag)| *flag)
        .collect()
}

fn from_av_rational(value: AVRational) -> Rational {
    Rational::new(value.num, value.den)
}

fn from_ffmpeg_rational(value: FfmpegRational) -> Rational {
    Rational::new(value.numerator(), value.denominator())
}
