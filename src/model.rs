//! Read-only description of a probed media container.
//!
//! These types are what the report formatter consumes. They are filled in
//! once per probed file, either by the FFmpeg-backed probe (feature
//! `ffmpeg`) or by hand, and are never mutated while a report is rendered.
//! Every field has a well-defined "unset" value (`None`, `0`, or an absent
//! [`Rational`]) so that sparse input always renders.

use crate::metadata::Metadata;
use crate::rational::Rational;

/// Microseconds per second; container durations and start times use this
/// time base.
pub const TIME_BASE: i64 = 1_000_000;

/// A probed media file: global information plus its streams, chapters and
/// programs.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Container {
    /// Path or URL the container was opened from.
    pub url: String,
    /// Short demuxer name (e.g. `"mov,mp4,m4a,3gp,3g2,mj2"`, `"matroska,webm"`).
    pub format_name: String,
    /// Duration in microseconds.
    pub duration: Option<i64>,
    /// Start time in microseconds. May be negative.
    pub start_time: Option<i64>,
    /// Overall bit rate in bits per second.
    pub bit_rate: Option<i64>,
    /// Container-level tags.
    pub metadata: Metadata,
    /// Streams, in container order. A stream is numbered by its position
    /// here.
    pub streams: Vec<Stream>,
    /// Chapters, in container order.
    pub chapters: Vec<Chapter>,
    /// Programs (MPEG-TS style groupings of streams).
    pub programs: Vec<Program>,
}

/// One elementary stream.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Stream {
    /// Format-specific stream identifier (PID, track ID, ...).
    pub id: i32,
    /// Codec parameters.
    pub codec: CodecParameters,
    /// Sample aspect ratio declared by the container.
    pub sample_aspect_ratio: Rational,
    /// Average frame rate.
    pub avg_frame_rate: Rational,
    /// Lowest frame rate that can represent all timestamps ("tbr").
    pub real_frame_rate: Rational,
    /// Time base of the stream timestamps.
    pub time_base: Rational,
    /// Role flags.
    pub disposition: Disposition,
    /// Stream tags.
    pub metadata: Metadata,
}

/// A chapter marker.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Chapter {
    /// Format-specific chapter identifier.
    pub id: i64,
    /// Start, in `time_base` units.
    pub start: i64,
    /// End, in `time_base` units.
    pub end: i64,
    /// Unit of `start` and `end`.
    pub time_base: Rational,
    /// Chapter tags (usually `title`).
    pub metadata: Metadata,
}

/// A program: a named group of streams.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct Program {
    /// Program number.
    pub id: i32,
    /// Program tags; `name` becomes part of the program heading.
    pub metadata: Metadata,
    /// Indexes into [`Container::streams`].
    pub stream_indexes: Vec<usize>,
}

/// Codec parameters shared by every media type, plus the type-specific
/// [`CodecDetails`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct CodecParameters {
    /// Codec name (e.g. `"h264"`, `"aac"`).
    pub codec_name: String,
    /// Name of the codec implementation, shown when it differs from
    /// `codec_name` (e.g. `"libdav1d"` for `"av1"`).
    pub implementation_name: Option<String>,
    /// Profile name (e.g. `"High"`, `"LC"`).
    pub profile: Option<String>,
    /// Fourcc codec tag; `0` when unset.
    pub codec_tag: u32,
    /// Declared bit rate in bits per second.
    pub bit_rate: Option<i64>,
    /// Rate-control maximum bit rate in bits per second.
    pub max_bit_rate: Option<i64>,
    /// Codec time base.
    pub time_base: Rational,
    /// Media type and its specific fields.
    pub details: CodecDetails,
}

/// Media-type-specific codec parameters.
#[derive(Debug, Clone, Default)]
pub enum CodecDetails {
    /// Video stream.
    Video(VideoParameters),
    /// Audio stream.
    Audio(AudioParameters),
    /// Opaque data stream (timed metadata, ...).
    Data,
    /// Subtitle stream.
    Subtitle(SubtitleParameters),
    /// Attached file (fonts, cover art in some formats).
    Attachment,
    /// Unrecognised media type.
    #[default]
    Unknown,
}

impl CodecDetails {
    /// Lowercase media type name, `None` for [`CodecDetails::Unknown`].
    pub fn media_type(&self) -> Option<&'static str> {
        match self {
            CodecDetails::Video(_) => Some("video"),
            CodecDetails::Audio(_) => Some("audio"),
            CodecDetails::Data => Some("data"),
            CodecDetails::Subtitle(_) => Some("subtitle"),
            CodecDetails::Attachment => Some("attachment"),
            CodecDetails::Unknown => None,
        }
    }

    /// `true` for video streams.
    pub fn is_video(&self) -> bool {
        matches!(self, CodecDetails::Video(_))
    }

    /// Video parameters, if this is a video stream.
    pub fn video(&self) -> Option<&VideoParameters> {
        match self {
            CodecDetails::Video(video) => Some(video),
            _ => None,
        }
    }
}

/// A pixel format and the bit depth of its first component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    /// Name (e.g. `"yuv420p10le"`).
    pub name: String,
    /// Bits in the first component (e.g. `10`).
    pub component_depth: i32,
}

/// Interlacing of coded frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldOrder {
    /// Not known; nothing is rendered.
    #[default]
    Unknown,
    /// Progressive frames.
    Progressive,
    /// Top field coded and displayed first.
    TopFirst,
    /// Bottom field coded and displayed first.
    BottomFirst,
    /// Top field coded first, bottom displayed first.
    TopCodedFirst,
    /// Bottom field coded first, top displayed first.
    BottomCodedFirst,
}

impl FieldOrder {
    /// Report label, `None` for [`FieldOrder::Unknown`].
    pub fn label(self) -> Option<&'static str> {
        match self {
            FieldOrder::Unknown => None,
            FieldOrder::Progressive => Some("progressive"),
            FieldOrder::TopFirst => Some("top first"),
            FieldOrder::BottomFirst => Some("bottom first"),
            FieldOrder::TopCodedFirst => Some("top coded first (swapped)"),
            FieldOrder::BottomCodedFirst => Some("bottom coded first (swapped)"),
        }
    }
}

/// Flags a codec attaches to a stream after inspecting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecProperties {
    /// Closed captions are embedded in the video.
    pub closed_captions: bool,
    /// Film grain parameters are present.
    pub film_grain: bool,
    /// The stream is losslessly coded.
    pub lossless: bool,
}

/// Video codec parameters.
///
/// Colour fields hold the FFmpeg name of the value (`"bt709"`, `"tv"`, ...)
/// and are `None` when unspecified.
#[derive(Debug, Clone, Default)]
pub struct VideoParameters {
    /// Pixel format; `None` renders as `none`.
    pub pixel_format: Option<PixelFormat>,
    /// Displayed width; `0` when unknown.
    pub width: i32,
    /// Displayed height.
    pub height: i32,
    /// Coded width; `0` when unknown.
    pub coded_width: i32,
    /// Coded height.
    pub coded_height: i32,
    /// Bits per sample actually used; `0` when unknown.
    pub bits_per_raw_sample: i32,
    /// Colour range (`"tv"`, `"pc"`).
    pub color_range: Option<String>,
    /// Matrix coefficients.
    pub color_space: Option<String>,
    /// Colour primaries.
    pub color_primaries: Option<String>,
    /// Transfer characteristic.
    pub color_transfer: Option<String>,
    /// Field order.
    pub field_order: FieldOrder,
    /// Chroma sample location (`"left"`, `"topleft"`, ...).
    pub chroma_location: Option<String>,
    /// Number of reference frames.
    pub reference_frames: i32,
    /// Sample aspect ratio from the bitstream.
    pub sample_aspect_ratio: Rational,
    /// Codec property flags.
    pub properties: CodecProperties,
}

/// A sample format and its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFormat {
    /// Name (e.g. `"fltp"`, `"s16"`).
    pub name: String,
    /// Bytes per sample (e.g. `4` for `"fltp"`).
    pub bytes_per_sample: i32,
}

/// Audio codec parameters.
#[derive(Debug, Clone, Default)]
pub struct AudioParameters {
    /// Sample rate in Hz; `0` when unknown.
    pub sample_rate: i32,
    /// Channel layout description (e.g. `"stereo"`, `"5.1(side)"`).
    pub channel_layout: Option<String>,
    /// Number of channels.
    pub channels: i32,
    /// Sample format; `None` when unknown.
    pub sample_format: Option<SampleFormat>,
    /// Bits per sample actually used; `0` when unknown.
    pub bits_per_raw_sample: i32,
    /// Fixed bits per sample of the codec (PCM and friends); `0` for codecs
    /// with a variable rate.
    pub codec_bits_per_sample: i32,
    /// Priming samples at the start.
    pub initial_padding: i32,
    /// Padding samples at the end.
    pub trailing_padding: i32,
}

/// Subtitle codec parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubtitleParameters {
    /// Canvas width; `0` when unknown.
    pub width: i32,
    /// Canvas height.
    pub height: i32,
}

/// A role tag describing the intended use of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispositionFlag {
    Default,
    Dub,
    Original,
    Comment,
    Lyrics,
    Karaoke,
    Forced,
    HearingImpaired,
    VisualImpaired,
    CleanEffects,
    AttachedPic,
    TimedThumbnails,
    Captions,
    Descriptions,
    Metadata,
    Dependent,
    StillImage,
    NonDiegetic,
}

impl DispositionFlag {
    /// Every flag, in report order.
    pub const ALL: [DispositionFlag; 18] = [
        DispositionFlag::Default,
        DispositionFlag::Dub,
        DispositionFlag::Original,
        DispositionFlag::Comment,
        DispositionFlag::Lyrics,
        DispositionFlag::Karaoke,
        DispositionFlag::Forced,
        DispositionFlag::HearingImpaired,
        DispositionFlag::VisualImpaired,
        DispositionFlag::CleanEffects,
        DispositionFlag::AttachedPic,
        DispositionFlag::TimedThumbnails,
        DispositionFlag::Captions,
        DispositionFlag::Descriptions,
        DispositionFlag::Metadata,
        DispositionFlag::Dependent,
        DispositionFlag::StillImage,
        DispositionFlag::NonDiegetic,
    ];

    /// Label shown in parentheses after the stream line.
    pub fn label(self) -> &'static str {
        match self {
            DispositionFlag::Default => "default",
            DispositionFlag::Dub => "dub",
            DispositionFlag::Original => "original",
            DispositionFlag::Comment => "comment",
            DispositionFlag::Lyrics => "lyrics",
            DispositionFlag::Karaoke => "karaoke",
            DispositionFlag::Forced => "forced",
            DispositionFlag::HearingImpaired => "hearing impaired",
            DispositionFlag::VisualImpaired => "visual impaired",
            DispositionFlag::CleanEffects => "clean effects",
            DispositionFlag::AttachedPic => "attached pic",
            DispositionFlag::TimedThumbnails => "timed thumbnails",
            DispositionFlag::Captions => "captions",
            DispositionFlag::Descriptions => "descriptions",
            DispositionFlag::Metadata => "metadata",
            DispositionFlag::Dependent => "dependent",
            DispositionFlag::StillImage => "still image",
            DispositionFlag::NonDiegetic => "non-diegetic",
        }
    }

    fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// The set of [`DispositionFlag`]s carried by a stream.
///
/// # Example
///
/// ```
/// use probe_report::{Disposition, DispositionFlag};
///
/// let disposition: Disposition = [DispositionFlag::Forced, DispositionFlag::Default]
///     .into_iter()
///     .collect();
///
/// let labels: Vec<_> = disposition.iter().map(DispositionFlag::label).collect();
/// assert_eq!(labels, ["default", "forced"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Disposition {
    bits: u32,
}

impl Disposition {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `flag`.
    pub fn insert(&mut self, flag: DispositionFlag) {
        self.bits |= flag.bit();
    }

    /// Builder form of [`insert`](Disposition::insert).
    #[must_use]
    pub fn with(mut self, flag: DispositionFlag) -> Self {
        self.insert(flag);
        self
    }

    /// `true` if `flag` is set.
    pub fn contains(self, flag: DispositionFlag) -> bool {
        self.bits & flag.bit() != 0
    }

    /// `true` if no flag is set.
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Set flags, always in [`DispositionFlag::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = DispositionFlag> {
        DispositionFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }
}

impl FromIterator<DispositionFlag> for Disposition {
    fn from_iter<I: IntoIterator<Item = DispositionFlag>>(iter: I) -> Self {
        let mut disposition = Disposition::new();
        for flag in iter {
            disposition.insert(flag);
        }
        disposition
    }
}
