// LogSift - tests/e2e_scan.rs
//
// End-to-end tests for the discovery, classification and scan pipeline.
//
// These tests use the real filesystem, real walkdir traversal and real chrono
// timestamp parsing. The library-level tests drive `run_scan` directly; the
// CLI-level tests run the built binary and check its output and exit code.

use logsift::app::request::{parse_time_range, RequestArgs, ScanRequest};
use logsift::app::scan::{classify_files, run_scan};
use logsift::core::discovery::{discover_files, DiscoveryConfig};
use logsift::core::filter::LineFilter;
use logsift::core::model::{LogType, MatchRecord, ScanProgress, ScanSummary};
use logsift::core::parser::{extract_timestamp, TimestampExtractor};
use logsift::platform::config::AppConfig;
use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// =============================================================================
// Helpers
// =============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

/// Discover, classify and scan `root`, returning matches and failure notices.
fn scan_dir(root: &Path, filter: &LineFilter) -> (Vec<MatchRecord>, Vec<String>, ScanSummary) {
    let (paths, warnings) = discover_files(root, &DiscoveryConfig::default()).unwrap();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    let files = classify_files(paths);
    let mut matches = Vec::new();
    let mut failures = Vec::new();
    let summary = run_scan(
        &files,
        filter,
        &TimestampExtractor::with_syslog_year(2023),
        |event| {
            match event {
                ScanProgress::Matched { record } => matches.push(MatchRecord::clone(record)),
                ScanProgress::FileFailed { error } => failures.push(file_name(error.path())),
                _ => {}
            }
            ControlFlow::Continue(())
        },
    );
    (matches, failures, summary)
}

/// Run the binary with an empty config so the user's own settings never leak in.
fn run_cli(args: &[&str]) -> Output {
    run_cli_with_config(args, "")
}

fn run_cli_with_config(args: &[&str], config_toml: &str) -> Output {
    let config_dir = tempfile::tempdir().unwrap();
    let config = config_dir.path().join("config.toml");
    fs::write(&config, config_toml).unwrap();

    Command::new(env!("CARGO_BIN_EXE_logsift"))
        .args(args)
        .arg("--color")
        .arg("never")
        .arg("--config")
        .arg(&config)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run logsift binary")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// A `.log` entry whose target does not exist: discovered, but fails to open.
#[cfg(unix)]
fn dangling_log(dir: &Path, name: &str) -> PathBuf {
    let link = dir.join(name);
    std::os::unix::fs::symlink(dir.join("gone"), &link).unwrap();
    link
}

// =============================================================================
// Discovery + classification on the fixture tree
// =============================================================================

#[test]
fn e2e_discovers_fixture_log_files_in_order() {
    let (paths, warnings) = discover_files(&fixtures_dir(), &DiscoveryConfig::default()).unwrap();
    assert!(warnings.is_empty());

    let names: Vec<String> = paths.iter().map(|p| file_name(p)).collect();
    assert_eq!(
        names,
        ["app.log", "grafana.log", "nginx-access.log", "syslog"],
        "readme.txt must be skipped"
    );
}

#[test]
fn e2e_fixture_files_are_classified_by_name() {
    let (paths, _) = discover_files(&fixtures_dir(), &DiscoveryConfig::default()).unwrap();
    let types: Vec<(String, LogType)> = classify_files(paths)
        .iter()
        .map(|f| (file_name(f.path()), f.log_type()))
        .collect();

    assert_eq!(
        types,
        [
            ("app.log".to_string(), LogType::Default),
            ("grafana.log".to_string(), LogType::Grafana),
            ("nginx-access.log".to_string(), LogType::Nginx),
            ("syslog".to_string(), LogType::Linux),
        ]
    );
}

#[test]
fn e2e_allow_list_restricts_discovery() {
    let config = DiscoveryConfig::default().with_allow_list(["syslog", "missing.log"]);
    let (paths, _) = discover_files(&fixtures_dir(), &config).unwrap();
    let names: Vec<String> = paths.iter().map(|p| file_name(p)).collect();
    assert_eq!(names, ["syslog"]);
}

#[test]
fn e2e_every_fixture_timestamp_is_extracted() {
    let (_, _, summary) = scan_dir(&fixtures_dir(), &LineFilter::new(""));
    // app.log line 4 and grafana.log line 2 are the only untimed lines.
    assert_eq!(summary.lines_read, 12);
    assert_eq!(summary.untimed_lines, 2);
    assert_eq!(summary.matches, 12);
}

#[test]
fn e2e_extract_timestamp_on_fixture_lines() {
    let nginx = fs::read_to_string(fixtures_dir().join("nginx-access.log")).unwrap();
    let first = nginx.lines().next().unwrap();
    let ts = extract_timestamp(first, LogType::Nginx).unwrap();
    assert_eq!(ts.to_string(), "2023-10-10 13:55:36");

    // The same line read under another type's pattern has no timestamp.
    assert!(extract_timestamp(first, LogType::Default).is_none());
}

// =============================================================================
// Scan scenarios
// =============================================================================

#[test]
fn e2e_keyword_only_match() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.log"), "2024-01-01 10:00:00 Error occurred\n").unwrap();

    let (matches, failures, summary) = scan_dir(dir.path(), &LineFilter::new("Error"));
    assert!(failures.is_empty());
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, "2024-01-01 10:00:00 Error occurred");
    assert_eq!(summary.files_attempted, 1);
}

#[test]
fn e2e_nginx_line_inside_and_outside_range() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("nginx-access.log"),
        "127.0.0.1 - - [10/Oct/2023:13:55:36 -0700] \"GET /\"\n",
    )
    .unwrap();

    let inside = LineFilter::new("GET").with_time_range(
        parse_time_range(Some("2023-10-10 00:00:00"), Some("2023-10-10 23:59:59")).unwrap(),
    );
    let (matches, _, _) = scan_dir(dir.path(), &inside);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].log_type, LogType::Nginx);

    let before = LineFilter::new("GET")
        .with_time_range(parse_time_range(None, Some("2023-10-09 23:59:59")).unwrap());
    let (matches, _, summary) = scan_dir(dir.path(), &before);
    assert!(matches.is_empty());
    assert_eq!(summary.lines_out_of_range, 1);
}

#[test]
fn e2e_grafana_malformed_line_is_still_keyword_checked() {
    let (matches, _, _) = scan_dir(&fixtures_dir(), &LineFilter::new("fail"));
    let lines: Vec<&str> = matches.iter().map(|m| m.line.as_str()).collect();
    assert_eq!(
        lines,
        [
            r#"{"t":"2024-01-01T00:00:00Z","level":"error","msg":"fail x"}"#,
            "{not json fail y",
        ]
    );
    assert!(matches[0].timestamp.is_some());
    assert!(matches[1].timestamp.is_none());
}

#[test]
fn e2e_syslog_uses_assumed_year() {
    let request = ScanRequest::build(
        RequestArgs {
            root: fixtures_dir(),
            keyword: "sshd".to_string(),
            start_time: Some("2023-10-10 13:55:36".to_string()),
            end_time: Some("2023-10-10 13:55:36".to_string()),
            syslog_year: Some(2023),
            strict_time: true,
            ..Default::default()
        },
        &AppConfig::default(),
    )
    .unwrap();

    let (paths, _) = discover_files(&request.root, &request.discovery).unwrap();
    let files = classify_files(paths);
    let mut matches = Vec::new();
    run_scan(&files, &request.filter, &request.extractor, |event| {
        if let ScanProgress::Matched { record } = event {
            matches.push(file_name(&record.path));
        }
        ControlFlow::Continue(())
    });
    assert_eq!(matches, ["syslog"]);
}

#[test]
fn e2e_empty_directory_finds_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "Error\n").unwrap();

    let (paths, warnings) = discover_files(dir.path(), &DiscoveryConfig::default()).unwrap();
    assert!(paths.is_empty());
    assert!(warnings.is_empty());
}

#[cfg(unix)]
#[test]
fn e2e_unreadable_file_does_not_stop_the_scan() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let locked = dir.path().join("a-locked.log");
    fs::write(&locked, "Error hidden\n").unwrap();
    fs::write(dir.path().join("b-open.log"), "Error visible\n").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not apply to root.
    if fs::File::open(&locked).is_ok() {
        eprintln!("skipping: running with privileges that ignore file modes");
        return;
    }

    let (matches, failures, summary) = scan_dir(dir.path(), &LineFilter::new("Error"));
    assert_eq!(failures, ["a-locked.log"]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, "Error visible");
    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_attempted, 2);

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();
}

#[cfg(unix)]
#[test]
fn e2e_dangling_symlink_does_not_stop_the_scan() {
    let dir = tempfile::tempdir().unwrap();
    dangling_log(dir.path(), "a-dangling.log");
    fs::write(dir.path().join("b-open.log"), "Error visible\n").unwrap();

    let (matches, failures, summary) = scan_dir(dir.path(), &LineFilter::new("Error"));
    assert_eq!(failures, ["a-dangling.log"]);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].line, "Error visible");
    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_attempted, 2);
}

// =============================================================================
// CLI
// =============================================================================

#[test]
fn e2e_cli_prints_headers_and_matches() {
    let dir = tempfile::tempdir().unwrap();
    let app = dir.path().join("app.log");
    fs::write(&app, "  2024-01-01 10:00:00 Error occurred  \nquiet line\n").unwrap();

    let output = run_cli(&[dir.path().to_str().unwrap(), "Error"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Found 1 log file(s). Searching for 'Error'...");
    assert_eq!(lines[1], format!("Parsing '{}' as default logs.", app.display()));
    assert_eq!(
        lines[2],
        format!("[{}] 2024-01-01 10:00:00 Error occurred", app.display())
    );
    assert!(lines[3].starts_with("Done: 1 match(es) in 1 file(s)"));
}

#[cfg(unix)]
#[test]
fn e2e_cli_file_failure_is_reported_once_without_colour() {
    let dir = tempfile::tempdir().unwrap();
    let link = dangling_log(dir.path(), "a-dangling.log");
    let open = dir.path().join("b-open.log");
    fs::write(&open, "Error visible\n").unwrap();

    let output = run_cli(&[dir.path().to_str().unwrap(), "Error"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout_of(&output);
    let notice = format!("Error reading {}:", link.display());
    assert_eq!(stdout.matches(&notice).count(), 1, "stdout: {stdout}");
    assert!(stdout.contains(&format!("[{}] Error visible", open.display())));

    let stderr = stderr_of(&output);
    assert!(!stderr.contains("a-dangling.log"), "stderr: {stderr}");
    assert!(!stderr.contains('\x1b'), "stderr: {stderr}");
}

#[test]
fn e2e_cli_config_warning_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.log"), "Error\n").unwrap();

    let output = run_cli_with_config(
        &[dir.path().to_str().unwrap(), "Error"],
        "[output]\ncolor = \"purple\"\n",
    );
    assert_eq!(output.status.code(), Some(0));

    let stderr = stderr_of(&output);
    assert_eq!(stderr.matches("output.color").count(), 1, "stderr: {stderr}");
    assert!(!stderr.contains('\x1b'), "stderr: {stderr}");
}

#[test]
fn e2e_cli_no_files_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(&[dir.path().to_str().unwrap(), "Error"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout_of(&output),
        "No log files found in the provided directory.\n"
    );
}

#[test]
fn e2e_cli_bad_time_is_rejected_before_scanning() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.log"), "Error\n").unwrap();

    let output = run_cli(&[
        dir.path().to_str().unwrap(),
        "Error",
        "--start-time",
        "2024/01/01",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout_of(&output).is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid start time format '2024/01/01'"),
        "stderr: {stderr}"
    );
}

#[test]
fn e2e_cli_missing_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let output = run_cli(&[missing.to_str().unwrap(), "Error"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn e2e_cli_files_flag_and_json_export() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("app.log"), "Error one\n").unwrap();
    fs::write(dir.path().join("other.log"), "Error two\n").unwrap();
    let export = dir.path().join("matches.json");

    let output = run_cli(&[
        dir.path().to_str().unwrap(),
        "Error",
        "--files",
        "other.log",
        "--export",
        export.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["line"], "Error two");
    assert_eq!(rows[0]["log_type"], "default");
}
