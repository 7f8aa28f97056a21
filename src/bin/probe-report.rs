use std::io;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;
use probe_report::{ReportOptions, Verbosity, write_report};

const CLI_AFTER_HELP: &str = "Examples:\n  probe-report input.mp4\n  probe-report input.ts --log-level verbose\n  probe-report input.mkv --separator ',\\n      '";

#[derive(Debug, Parser)]
#[command(
    name = "probe-report",
    version,
    about = "Print the container and stream summary of a media file",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Input media path or URL.
    file_path: Option<String>,

    /// Report and FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, default_value = "info", value_parser = parse_log_level)]
    log_level: Verbosity,

    /// Separator placed between the major fields of a stream line.
    #[arg(long, default_value = probe_report::configuration::DEFAULT_SEPARATOR)]
    separator: String,
}

fn parse_log_level(value: &str) -> Result<Verbosity, String> {
    value.parse()
}

/// Turn escape sequences typed on the command line (`\n`, `\t`) into the
/// characters they name.
fn unescape_separator(value: &str) -> String {
    value.replace("\\n", "\n").replace("\\t", "\t")
}

fn looks_like_flag(value: &str) -> bool {
    value.starts_with('-')
}

/// `--help` and `--version` are the only flag-only invocations that
/// succeed; every other parse outcome without a path exits with status 1.
fn is_informational(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

fn usage() -> String {
    "Usage: probe-report <file_path>".to_string()
}

fn run(cli: Cli) -> Result<(), ExitCode> {
    let Some(file_path) = cli.file_path.filter(|path| !looks_like_flag(path)) else {
        println!("{}", usage());
        return Err(ExitCode::FAILURE);
    };

    probe_report::set_ffmpeg_log_level(cli.log_level);
    let options = ReportOptions::new()
        .with_verbosity(cli.log_level)
        .with_separator(unescape_separator(&cli.separator));

    let container = probe_report::probe_file(&file_path).map_err(|error| {
        println!("[ERROR] Failed to open input file: {file_path}");
        eprintln!("{}", error.to_string().red());
        ExitCode::FAILURE
    })?;

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, &container, &file_path, &options).map_err(|error| {
        eprintln!("{} {error}", "error:".red().bold());
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let exit = if is_informational(error.kind()) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
            // Printing to a closed stream is not worth reporting.
            let _ = error.print();
            return exit;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}
