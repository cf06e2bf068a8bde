// LogSift - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Discovery, scan and optional export
// 4. Exit code selection
//
// Matches and per-file progress go to stdout; warnings and fatal errors go to
// stderr.

use clap::Parser;
use logsift::app::export::export_to_file;
use logsift::app::request::{RequestArgs, ScanRequest};
use logsift::app::scan::{classify_files, run_scan};
use logsift::core::discovery::discover_files;
use logsift::core::model::{MatchRecord, ScanProgress};
use logsift::platform::config::{default_config_path, load_config};
use logsift::ui::output::Presenter;
use logsift::ui::theme::ColorMode;
use logsift::util::constants;
use logsift::util::error::LogSiftError;
use logsift::util::logging;
use std::io::{self, IsTerminal, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

/// LogSift - search a directory of mixed-format logs by keyword and time range.
#[derive(Parser, Debug)]
#[command(name = "logsift", version, about)]
struct Cli {
    /// Directory to scan recursively.
    directory: PathBuf,

    /// Case-sensitive literal text to search for.
    keyword: String,

    /// Comma-separated file names to restrict the scan to (e.g. app.log,syslog).
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    files: Vec<String>,

    /// Skip timestamped lines before this time ("YYYY-MM-DD HH:MM:SS").
    #[arg(long = "start-time", value_name = "TIME")]
    start_time: Option<String>,

    /// Skip timestamped lines after this time ("YYYY-MM-DD HH:MM:SS").
    #[arg(long = "end-time", value_name = "TIME")]
    end_time: Option<String>,

    /// Also skip lines without a recognisable timestamp when a time range is set.
    #[arg(long = "strict-time")]
    strict_time: bool,

    /// Year assumed for syslog timestamps, which carry none (default: current year).
    #[arg(
        long = "syslog-year",
        value_name = "YEAR",
        value_parser = clap::value_parser!(i32).range(
            i64::from(constants::MIN_SYSLOG_YEAR)..=i64::from(constants::MAX_SYSLOG_YEAR)
        )
    )]
    syslog_year: Option<i32>,

    /// Maximum directory depth to descend (root = 0).
    #[arg(
        long = "max-depth",
        value_name = "N",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new()
            .range(1..=constants::ABSOLUTE_MAX_DEPTH as u64)
    )]
    max_depth: Option<usize>,

    /// Write matches to this file (JSON if it ends in .json, CSV otherwise).
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// Colour output: auto, always or never.
    #[arg(long, value_name = "WHEN")]
    color: Option<ColorMode>,

    /// Read settings from this config.toml instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();
    let code = run(cli);
    std::process::exit(code);
}

fn run(cli: Cli) -> i32 {
    // Config first: it may carry the log level.
    let (config_path, explicit) = match cli.config {
        Some(ref path) => (path.clone(), true),
        None => (default_config_path(), false),
    };
    let (config, config_problems) = load_config(&config_path, explicit);

    let color_mode = cli.color.unwrap_or_else(|| {
        config
            .color
            .as_deref()
            .and_then(|c| c.parse::<ColorMode>().ok())
            .unwrap_or_default()
    });
    let stdout_color = color_mode.enabled(io::stdout().is_terminal());
    let stderr_color = color_mode.enabled(io::stderr().is_terminal());

    logging::init(cli.debug, config.log_level.as_deref(), stderr_color);

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "LogSift starting"
    );

    let mut out = Presenter::new(io::stdout().lock(), stdout_color);
    let mut err = Presenter::new(io::stderr().lock(), stderr_color);

    for problem in &config_problems {
        tracing::debug!(error = %problem, "Config warning");
        let _ = err.warning(&problem.to_string());
    }

    // -------------------------------------------------------------------------
    // Validate arguments (no filesystem access yet)
    // -------------------------------------------------------------------------
    let args = RequestArgs {
        root: cli.directory,
        keyword: cli.keyword,
        files: cli.files,
        start_time: cli.start_time,
        end_time: cli.end_time,
        strict_time: cli.strict_time,
        syslog_year: cli.syslog_year,
        max_depth: cli.max_depth,
    };
    let request = match ScanRequest::build(args, &config) {
        Ok(r) => r,
        Err(e) => return fail(&mut err, e.into()),
    };

    // -------------------------------------------------------------------------
    // Discovery
    // -------------------------------------------------------------------------
    let (paths, warnings) = match discover_files(&request.root, &request.discovery) {
        Ok(found) => found,
        Err(e) => return fail(&mut err, e.into()),
    };
    for warning in &warnings {
        let _ = err.warning(warning);
    }

    if paths.is_empty() {
        let _ = out.no_files();
        return constants::EXIT_NO_FILES;
    }

    let files = classify_files(paths);
    if out.files_found(files.len(), &request.filter.keyword).is_err() {
        return constants::EXIT_OK;
    }

    // -------------------------------------------------------------------------
    // Scan
    // -------------------------------------------------------------------------
    let collect = cli.export.is_some();
    let mut collected: Vec<MatchRecord> = Vec::new();
    let mut write_error: Option<io::Error> = None;

    let summary = run_scan(&files, &request.filter, &request.extractor, |event| {
        if collect {
            if let ScanProgress::Matched { record } = event {
                collected.push(MatchRecord::clone(record));
            }
        }
        match out.progress(event) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                write_error = Some(e);
                ControlFlow::Break(())
            }
        }
    });

    if let Some(e) = write_error {
        // A closed pipe (e.g. `| head`) is a normal way to stop reading.
        if e.kind() == io::ErrorKind::BrokenPipe {
            tracing::debug!("stdout closed; stopping");
            return constants::EXIT_OK;
        }
        tracing::error!(error = %e, "Cannot write output");
        return constants::EXIT_FAILURE;
    }

    let _ = out.summary(&summary);

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------
    if let Some(ref path) = cli.export {
        match export_to_file(&collected, path) {
            Ok(count) => {
                let _ = out.exported(count, path);
            }
            Err(e) => return fail(&mut err, e.into()),
        }
    }

    let _ = out.into_inner().flush();
    constants::EXIT_OK
}

/// Report a fatal error and return the failure exit code.
fn fail<W: Write>(err: &mut Presenter<W>, error: LogSiftError) -> i32 {
    tracing::debug!(error = %error, "Fatal error");
    let _ = err.error(&error.to_string());
    constants::EXIT_FAILURE
}
