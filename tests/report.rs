//! Full container report tests.

use std::io;

use probe_report::{
    AudioParameters, Chapter, CodecDetails, CodecParameters, Container, Disposition,
    DispositionFlag, Metadata, Program, Rational, ReportError, ReportOptions, Stream,
    SubtitleParameters, VideoParameters, render_report, write_report,
};

fn video_stream(index: usize) -> Stream {
    Stream {
        id: index as i32 + 1,
        codec: CodecParameters {
            codec_name: "h264".to_string(),
            details: CodecDetails::Video(VideoParameters {
                width: 1920,
                height: 1080,
                ..Default::default()
            }),
            ..Default::default()
        },
        avg_frame_rate: Rational::new(24000, 1001),
        ..Default::default()
    }
}

fn subtitle_stream(index: usize) -> Stream {
    Stream {
        id: index as i32 + 1,
        codec: CodecParameters {
            codec_name: "subrip".to_string(),
            details: CodecDetails::Subtitle(SubtitleParameters::default()),
            ..Default::default()
        },
        disposition: Disposition::new().with(DispositionFlag::Forced),
        metadata: [("language", "eng")].into_iter().collect(),
        ..Default::default()
    }
}

fn container(streams: Vec<Stream>) -> Container {
    Container {
        url: "input.mkv".to_string(),
        format_name: "matroska,webm".to_string(),
        streams,
        ..Default::default()
    }
}

fn render(container: &Container) -> String {
    render_report(container, "input.mkv", &ReportOptions::new()).expect("Failed to render report")
}

// ── Header ───────────────────────────────────────────────────────

#[test]
fn unset_duration_and_bit_rate_render_as_not_available() {
    let report = render(&container(Vec::new()));
    assert_eq!(
        report,
        "Input #0, matroska,webm, from 'input.mkv':\n  Duration: N/A, bitrate: N/A\n"
    );
    assert!(!report.contains("start:"));
}

#[test]
fn duration_start_and_bit_rate() {
    let mut container = container(Vec::new());
    container.duration = Some(10_010_000);
    container.start_time = Some(0);
    container.bit_rate = Some(1_205_000);

    assert!(
        render(&container).ends_with("  Duration: 00:00:10.01, start: 0.000000, bitrate: 1205 kb/s\n")
    );
}

#[test]
fn duration_is_rounded_to_hundredths() {
    let mut container = container(Vec::new());
    container.duration = Some(3_723_456_789);
    assert!(render(&container).contains("  Duration: 01:02:03.46, bitrate: N/A\n"));

    container.duration = Some(9_994_999);
    assert!(render(&container).contains("  Duration: 00:00:09.99,"));
}

#[test]
fn negative_start_time() {
    let mut container = container(Vec::new());
    container.start_time = Some(-1_400_000);
    assert!(render(&container).contains("  Duration: N/A, start: -1.400000, bitrate: N/A\n"));

    container.start_time = Some(-500_000);
    assert!(render(&container).contains(", start: -0.500000,"));
}

#[test]
fn zero_bit_rate_is_not_available() {
    let mut container = container(Vec::new());
    container.bit_rate = Some(0);
    assert!(render(&container).ends_with("bitrate: N/A\n"));
}

#[test]
fn container_metadata_precedes_duration() {
    let mut container = container(Vec::new());
    container.metadata = [("encoder", "libebml v1.4.2")].into_iter().collect();
    assert_eq!(
        render(&container),
        "Input #0, matroska,webm, from 'input.mkv':\n  Metadata:\n    encoder         : libebml v1.4.2\n  Duration: N/A, bitrate: N/A\n"
    );
}

#[test]
fn label_comes_from_the_argument() {
    let container = container(Vec::new());
    let report = render_report(&container, "https://example.com/live.m3u8", &ReportOptions::new())
        .expect("Failed to render report");
    assert!(report.starts_with("Input #0, matroska,webm, from 'https://example.com/live.m3u8':\n"));

    let own = container.report(&ReportOptions::new()).expect("Failed to render report");
    assert!(own.starts_with("Input #0, matroska,webm, from 'input.mkv':\n"));
}

// ── End to end ───────────────────────────────────────────────────

#[test]
fn single_video_stream_report() {
    let report = render(&container(vec![video_stream(0)]));
    assert_eq!(
        report,
        "Input #0, matroska,webm, from 'input.mkv':\n\
         \x20 Duration: N/A, bitrate: N/A\n\
         \x20 Stream #0:0[0x1]: Video: h264, none, 1920x1080, 23.98 fps\n"
    );
    assert!(!report.contains("Chapters"));
    assert!(!report.contains("Program"));
}

#[test]
fn streams_in_container_order() {
    let report = render(&container(vec![video_stream(0), subtitle_stream(1)]));
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("  Stream #0:0[0x1]: Video"));
    assert_eq!(lines[3], "  Stream #0:1[0x2](eng): Subtitle: subrip (forced)");
}

#[test]
fn streams_are_numbered_by_position() {
    let aac = Stream {
        codec: CodecParameters {
            codec_name: "aac".to_string(),
            details: CodecDetails::Audio(AudioParameters::default()),
            ..Default::default()
        },
        ..Default::default()
    };
    let report = render(&container(vec![aac.clone(), aac.clone()]));
    assert!(
        report.ends_with(
            "  Stream #0:0[0x0]: Audio: aac, \n  Stream #0:1[0x0]: Audio: aac, \n"
        ),
        "{report:?}"
    );
}

#[test]
fn program_streams_are_numbered_by_position() {
    let aac = Stream {
        codec: CodecParameters {
            codec_name: "aac".to_string(),
            details: CodecDetails::Audio(AudioParameters::default()),
            ..Default::default()
        },
        ..Default::default()
    };
    let mut container = container(vec![aac.clone(), aac]);
    container.programs = vec![Program {
        id: 1,
        stream_indexes: vec![1],
        ..Default::default()
    }];

    let lines: Vec<String> = render(&container).lines().map(str::to_string).collect();
    assert_eq!(
        &lines[2..],
        [
            "  Program 1 ",
            "  Stream #0:1[0x0]: Audio: aac, ",
            "  No Program",
            "  Stream #0:0[0x0]: Audio: aac, ",
        ]
    );
}

// ── Chapters ─────────────────────────────────────────────────────

#[test]
fn chapters_with_metadata() {
    let mut container = container(Vec::new());
    container.chapters = vec![
        Chapter {
            id: 1,
            start: 0,
            end: 60_000,
            time_base: Rational::new(1, 1000),
            metadata: [("title", "Intro")].into_iter().collect(),
        },
        Chapter {
            id: 2,
            start: 60_000,
            end: 90_500,
            time_base: Rational::new(1, 1000),
            metadata: Metadata::new(),
        },
    ];
    assert!(render(&container).ends_with(
        "  Duration: N/A, bitrate: N/A\n\
         \x20 Chapters:\n\
         \x20   Chapter #0:0: start 0.000000, end 60.000000\n\
         \x20     Metadata:\n\
         \x20       title           : Intro\n\
         \x20   Chapter #0:1: start 60.000000, end 90.500000\n"
    ));
}

#[test]
fn chapter_without_time_base_prints_nan() {
    let mut container = container(Vec::new());
    container.chapters = vec![Chapter {
        start: 0,
        end: 1000,
        time_base: Rational::ZERO,
        ..Default::default()
    }];
    assert!(
        render(&container).ends_with("    Chapter #0:0: start nan, end nan\n"),
        "{:?}",
        render(&container)
    );
}

#[test]
fn chapter_with_zero_denominator_prints_infinity() {
    let mut container = container(Vec::new());
    container.chapters = vec![Chapter {
        start: 0,
        end: 1000,
        time_base: Rational::new(1, 0),
        ..Default::default()
    }];
    assert!(render(&container).ends_with("    Chapter #0:0: start nan, end inf\n"));
}

// ── Programs ─────────────────────────────────────────────────────

#[test]
fn program_streams_then_unassigned_streams() {
    let mut container = container(vec![video_stream(0), subtitle_stream(1)]);
    container.programs = vec![Program {
        id: 1,
        metadata: [("name", "Main"), ("service_provider", "Demo")]
            .into_iter()
            .collect(),
        stream_indexes: vec![1],
    }];

    let report = render(&container);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        &lines[2..],
        [
            "  Program 1 Main",
            "    Metadata:",
            "      name            : Main",
            "      service_provider: Demo",
            "  Stream #0:1[0x2](eng): Subtitle: subrip (forced)",
            "  No Program",
            "  Stream #0:0[0x1]: Video: h264, none, 1920x1080, 23.98 fps",
        ]
    );
}

#[test]
fn unnamed_program_keeps_trailing_space() {
    let mut container = container(vec![video_stream(0)]);
    container.programs = vec![Program {
        id: 7,
        stream_indexes: vec![0],
        ..Default::default()
    }];
    let report = render(&container);
    assert!(report.contains("\n  Program 7 \n"), "{report:?}");
    assert!(!report.contains("No Program"));
}

#[test]
fn program_name_lookup_ignores_case() {
    let mut container = container(Vec::new());
    container.programs = vec![Program {
        id: 3,
        metadata: [("NAME", "Sports")].into_iter().collect(),
        stream_indexes: Vec::new(),
    }];
    assert!(render(&container).contains("  Program 3 Sports\n"));
}

#[test]
fn stream_in_two_programs_is_rendered_twice() {
    let mut container = container(vec![video_stream(0), subtitle_stream(1)]);
    container.programs = vec![
        Program {
            id: 1,
            stream_indexes: vec![0],
            ..Default::default()
        },
        Program {
            id: 2,
            stream_indexes: vec![0, 1],
            ..Default::default()
        },
    ];

    let report = render(&container);
    assert_eq!(report.matches("Stream #0:0[").count(), 2);
    assert_eq!(report.matches("Stream #0:1[").count(), 1);
    assert!(!report.contains("No Program"));
}

#[test]
fn program_with_missing_stream_is_skipped() {
    let mut container = container(vec![video_stream(0)]);
    container.programs = vec![Program {
        id: 1,
        stream_indexes: vec![5],
        ..Default::default()
    }];

    let report = render(&container);
    assert!(report.contains("  Program 1 \n"));
    assert_eq!(report.matches("Stream #0:0[").count(), 1);
}

#[test]
fn programs_precede_streams_and_follow_chapters() {
    let mut container = container(vec![video_stream(0)]);
    container.chapters = vec![Chapter {
        end: 1,
        time_base: Rational::new(1, 1),
        ..Default::default()
    }];
    container.programs = vec![Program {
        id: 1,
        stream_indexes: vec![0],
        ..Default::default()
    }];

    let report = render(&container);
    let chapters = report.find("  Chapters:").expect("Expected chapters");
    let program = report.find("  Program 1").expect("Expected program");
    let stream = report.find("  Stream #0:0").expect("Expected stream");
    assert!(chapters < program && program < stream);
}

// ── Sinks ────────────────────────────────────────────────────────

#[test]
fn write_report_to_file() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let report_path = temporary_directory.path().join("report.txt");
    let container = container(vec![video_stream(0), subtitle_stream(1)]);

    let mut file = std::fs::File::create(&report_path).expect("Failed to create report file");
    write_report(&mut file, &container, "input.mkv", &ReportOptions::new())
        .expect("Failed to write report");
    drop(file);

    let written = std::fs::read_to_string(&report_path).expect("Failed to read report file");
    assert_eq!(written, render(&container));
}

struct BrokenSink;

impl io::Write for BrokenSink {
    fn write(&mut self, _buffer: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn write_report_propagates_io_errors() {
    let container = container(vec![video_stream(0)]);
    let result = write_report(&mut BrokenSink, &container, "input.mkv", &ReportOptions::new());
    assert!(matches!(result, Err(ReportError::Io(_))), "{result:?}");
}

#[test]
fn write_report_to_vec_matches_render() {
    let container = container(vec![video_stream(0)]);
    let mut buffer = Vec::new();
    write_report(&mut buffer, &container, "input.mkv", &ReportOptions::new())
        .expect("Failed to write report");
    assert_eq!(String::from_utf8(buffer).expect("Report is UTF-8"), render(&container));
}
