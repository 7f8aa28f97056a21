//! # probe-report
//!
//! Render the human-readable summary of a media container, the block a
//! probe tool prints before doing anything else: the input line, container
//! metadata, duration and bit rate, chapters, programs, and one line per
//! stream with its codec summary, frame rates and disposition tags.
//!
//! The formatter works on a plain data model ([`Container`]) and never
//! touches a file itself. With the `ffmpeg` feature enabled,
//! [`probe_file`] builds that model from a real file through
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next).
//!
//! ## Quick Start
//!
//! ### Report a Hand-Built Container
//!
//! ```
//! use probe_report::{
//!     CodecDetails, CodecParameters, Container, Rational, ReportOptions, Stream,
//!     VideoParameters, render_report,
//! };
//!
//! let stream = Stream {
//!     codec: CodecParameters {
//!         codec_name: "h264".to_string(),
//!         details: CodecDetails::Video(VideoParameters {
//!             width: 1920,
//!             height: 1080,
//!             ..Default::default()
//!         }),
//!         ..Default::default()
//!     },
//!     avg_frame_rate: Rational::new(24000, 1001),
//!     ..Default::default()
//! };
//! let container = Container {
//!     format_name: "matroska,webm".to_string(),
//!     streams: vec![stream],
//!     ..Default::default()
//! };
//!
//! let report = render_report(&container, "movie.mkv", &ReportOptions::new())?;
//! assert!(report.contains("1920x1080"));
//! assert!(report.contains("23.98 fps"));
//! # Ok::<(), probe_report::ReportError>(())
//! ```
//!
//! ### Probe a File (feature `ffmpeg`)
//!
//! ```ignore
//! use probe_report::{ReportOptions, write_report};
//!
//! let container = probe_report::probe_file("input.mp4")?;
//! write_report(&mut std::io::stdout(), &container, "input.mp4", &ReportOptions::new())?;
//! # Ok::<(), probe_report::ReportError>(())
//! ```
//!
//! ## Features
//!
//! - **Complete container summary**: header, metadata, duration, start
//!   time, bit rate, chapters, programs and streams
//! - **Codec summaries**: pixel and sample formats, colour description,
//!   aspect ratios, channel layouts and bit rates
//! - **Verbosity levels**: extra detail at `verbose` and `debug`
//! - **Configurable separator** between the major fields of a stream line
//! - **All-or-nothing output**: a report is rendered completely before
//!   anything reaches the output sink
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `ffmpeg` | `probe_file` and the `probe-report` binary, via `ffmpeg-next` |
//!
//! ## Requirements
//!
//! The `ffmpeg` feature needs the FFmpeg development libraries installed on
//! your system. The formatter itself has no native dependencies.

pub mod codec;
pub mod configuration;
pub mod error;
#[cfg(feature = "ffmpeg")]
pub mod ffmpeg;
pub mod metadata;
pub mod model;
pub mod rate;
pub mod rational;
pub mod report;
pub mod stream;

pub use codec::{codec_summary, write_codec_summary};
pub use configuration::{ReportOptions, Verbosity};
pub use error::ReportError;
#[cfg(feature = "ffmpeg")]
pub use ffmpeg::{container_from_input, probe_file, set_ffmpeg_log_level};
pub use metadata::{Metadata, dump_metadata};
pub use model::{
    AudioParameters, Chapter, CodecDetails, CodecParameters, CodecProperties, Container,
    Disposition, DispositionFlag, FieldOrder, PixelFormat, Program, SampleFormat, Stream,
    SubtitleParameters, TIME_BASE, VideoParameters,
};
pub use rate::format_rate;
pub use rational::Rational;
pub use report::{render_report, write_report};
pub use stream::{stream_report, write_stream_report};
