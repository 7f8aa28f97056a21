//! Stream line tests.

use probe_report::{
    AudioParameters, CodecDetails, CodecParameters, Disposition, DispositionFlag, Metadata,
    PixelFormat, Rational, ReportOptions, Stream, VideoParameters, stream_report,
};

fn video_stream() -> Stream {
    Stream {
        id: 1,
        codec: CodecParameters {
            codec_name: "h264".to_string(),
            details: CodecDetails::Video(VideoParameters {
                pixel_format: Some(PixelFormat {
                    name: "yuv420p".to_string(),
                    component_depth: 8,
                }),
                width: 1440,
                height: 1080,
                sample_aspect_ratio: Rational::new(1, 1),
                ..Default::default()
            }),
            ..Default::default()
        },
        avg_frame_rate: Rational::new(25, 1),
        real_frame_rate: Rational::new(25, 1),
        time_base: Rational::new(1, 12800),
        metadata: [("language", "und")].into_iter().collect(),
        ..Default::default()
    }
}

fn audio_stream() -> Stream {
    Stream {
        id: 2,
        codec: CodecParameters {
            codec_name: "aac".to_string(),
            details: CodecDetails::Audio(AudioParameters {
                sample_rate: 44_100,
                channel_layout: Some("mono".to_string()),
                channels: 1,
                ..Default::default()
            }),
            ..Default::default()
        },
        avg_frame_rate: Rational::new(44_100, 1024),
        time_base: Rational::new(1, 44_100),
        ..Default::default()
    }
}

fn render(stream: &Stream) -> String {
    render_at(stream, 0)
}

fn render_at(stream: &Stream, stream_index: usize) -> String {
    stream_report(stream, 0, stream_index, &ReportOptions::new())
}

#[test]
fn video_stream_line() {
    let mut stream = video_stream();
    stream.disposition = Disposition::new().with(DispositionFlag::Default);
    assert_eq!(
        render(&stream),
        "  Stream #0:0[0x1](und): Video: h264, yuv420p, 1440x1080 [SAR 1:1 DAR 4:3], 25 fps, 25 tbr, 12800 tbn (default)\n"
    );
}

#[test]
fn input_and_stream_index_around_the_colon() {
    let line = stream_report(&video_stream(), 3, 5, &ReportOptions::new());
    assert!(line.starts_with("  Stream #3:5[0x1]"), "{line}");
}

#[test]
fn stream_id_is_hexadecimal() {
    let mut stream = video_stream();
    stream.id = 0x1e1;
    assert!(render(&stream).starts_with("  Stream #0:0[0x1e1](und): "));

    stream.id = -1;
    assert!(render(&stream).starts_with("  Stream #0:0[0xffffffff](und): "));
}

#[test]
fn missing_language_has_no_parentheses() {
    let line = render_at(&audio_stream(), 1);
    assert!(line.starts_with("  Stream #0:1[0x2]: Audio: aac"), "{line}");
}

#[test]
fn audio_stream_has_no_frame_rates() {
    assert_eq!(render_at(&audio_stream(), 1), "  Stream #0:1[0x2]: Audio: aac, 44100 Hz, mono\n");
}

#[test]
fn differing_stream_sar_is_reported() {
    let mut stream = video_stream();
    stream.sample_aspect_ratio = Rational::new(4, 3);
    let line = render(&stream);
    assert!(
        line.contains("1440x1080 [SAR 1:1 DAR 4:3], SAR 4:3 DAR 16:9, 25 fps"),
        "{line}"
    );
}

#[test]
fn matching_or_zero_stream_sar_is_not_repeated() {
    let mut stream = video_stream();
    stream.sample_aspect_ratio = Rational::new(2, 2);
    assert_eq!(render(&stream).matches("SAR").count(), 1);

    stream.sample_aspect_ratio = Rational::new(0, 1);
    assert_eq!(render(&stream).matches("SAR").count(), 1);
}

#[test]
fn absent_rates_are_omitted() {
    let mut stream = video_stream();
    stream.real_frame_rate = Rational::ZERO;
    stream.time_base = Rational::ZERO;
    stream.avg_frame_rate = Rational::new(24000, 1001);
    assert!(render(&stream).ends_with("DAR 4:3], 23.98 fps\n"));

    stream.avg_frame_rate = Rational::ZERO;
    stream.time_base = Rational::new(1, 90000);
    assert!(render(&stream).ends_with("DAR 4:3], 90k tbn\n"));

    stream.time_base = Rational::ZERO;
    assert!(render(&stream).ends_with("DAR 4:3]\n"));
}

#[test]
fn separator_precedes_frame_rates() {
    let options = ReportOptions::new().with_separator(" | ");
    let line = stream_report(&video_stream(), 0, 0, &options);
    assert!(line.contains("[SAR 1:1 DAR 4:3] | 25 fps, 25 tbr, 12800 tbn"), "{line}");
}

#[test]
fn disposition_in_fixed_order() {
    let mut stream = audio_stream();
    stream.disposition = [
        DispositionFlag::NonDiegetic,
        DispositionFlag::Forced,
        DispositionFlag::Comment,
        DispositionFlag::Default,
    ]
    .into_iter()
    .collect();
    assert!(render(&stream).ends_with("mono (default) (comment) (forced) (non-diegetic)\n"));
}

#[test]
fn stream_metadata_block_follows_line() {
    let mut stream = video_stream();
    stream.metadata = Metadata::from_iter([("language", "eng"), ("handler_name", "VideoHandler")]);
    let report = render(&stream);
    let lines: Vec<&str> = report.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("  Stream #0:0[0x1](eng): "));
    assert_eq!(lines[1], "    Metadata:");
    assert_eq!(lines[2], "      handler_name    : VideoHandler");
}
