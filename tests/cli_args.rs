//! CLI arg parsing tests for the oakmon binary.

use std::process::Command;

fn run_oakmon(args: &[&str]) -> (bool, String) {
    let exe = env!("CARGO_BIN_EXE_oakmon");
    let output = Command::new(exe).args(args).output().expect("run oakmon");
    let ok = output.status.success();
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (ok, text)
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let (ok, text) = run_oakmon(&["--help"]);
    assert!(ok);
    assert!(
        text.contains("--interval")
            && text.contains("-i")
            && text.contains("--profile")
            && text.contains("-P")
            && text.contains("--dry-run"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_interval_long_and_short_parsed() {
    // --dry-run exits after resolution, no TUI and no network
    let (ok, text) = run_oakmon(&["--interval", "1500", "http://127.0.0.1:1", "--dry-run"]);
    assert!(ok, "long form failed: {text}");
    assert!(text.contains("1500"), "resolved interval missing: {text}");

    let (ok2, text2) = run_oakmon(&["-i", "250", "http://127.0.0.1:1", "--dry-run"]);
    assert!(ok2, "short form failed: {text2}");
    assert!(text2.contains("250"), "resolved interval missing: {text2}");

    let (_, text3) = run_oakmon(&["--interval=2000", "http://127.0.0.1:1", "--dry-run"]);
    assert!(text3.contains("2000"), "eq form failed: {text3}");
}

#[test]
fn test_garbage_interval_is_rejected() {
    let (_, text) = run_oakmon(&["--interval", "soon", "http://127.0.0.1:1", "--dry-run"]);
    assert!(
        text.contains("milliseconds"),
        "expected an interval parse error, got: {text}"
    );
}

#[test]
fn test_extra_positional_is_rejected() {
    let (_, text) = run_oakmon(&["http://a", "http://b", "--dry-run"]);
    assert!(
        text.contains("Unexpected argument"),
        "expected usage error, got: {text}"
    );
}

#[test]
fn test_non_http_url_is_rejected() {
    let (ok, text) = run_oakmon(&["ws://127.0.0.1:1/ws", "--dry-run"]);
    assert!(!ok, "a non-http device url must fail: {text}");
    assert!(text.contains("http"), "error should mention the scheme: {text}");
}
