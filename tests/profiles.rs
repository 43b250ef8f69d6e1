//! Tests for profile creation/overwrite through the binary (non-interactive paths only).

use std::fs;
use std::process::Command;
use std::sync::Mutex;

// Global lock to serialize tests that mutate process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

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

fn profiles_path() -> std::path::PathBuf {
    oakmon::profiles::profiles_path()
}

#[test]
fn test_profile_created_on_first_use() {
    let _guard = ENV_LOCK.lock().unwrap();
    // Isolate config in a temp dir
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());
    let _ = fs::remove_file(profiles_path());

    // Profile + url => should create profiles.json without connecting
    let (_ok, _out) = run_oakmon(&["--profile", "unittest", "http://127.0.0.1:1", "--dry-run"]);
    let data = fs::read_to_string(profiles_path()).expect("profiles.json created");
    assert!(
        data.contains("unittest"),
        "profiles.json missing profile entry: {data}"
    );
}

#[test]
fn test_profile_overwrite_only_when_changed() {
    let _guard = ENV_LOCK.lock().unwrap();
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());
    let _ = fs::remove_file(profiles_path());

    // Initial create
    let (_ok, _out) = run_oakmon(&["--profile", "bench", "http://10.0.0.5", "--dry-run"]);
    let first = fs::read_to_string(profiles_path()).unwrap();

    // Re-run identical (should not duplicate or corrupt)
    let (_ok2, _out2) = run_oakmon(&["--profile", "bench", "http://10.0.0.5", "--dry-run"]);
    let second = fs::read_to_string(profiles_path()).unwrap();
    assert_eq!(first, second, "profile file changed despite identical input");

    // Overwrite with a different URL using --save (no prompt path)
    let (_ok3, _out3) = run_oakmon(&["--profile", "bench", "--save", "http://10.0.0.6", "--dry-run"]);
    let third = fs::read_to_string(profiles_path()).unwrap();
    assert!(third.contains("10.0.0.6"), "updated URL not written: {third}");
}

#[test]
fn test_profile_interval_persisted_and_loaded() {
    let _guard = ENV_LOCK.lock().unwrap();
    let td = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", td.path());
    let _ = fs::remove_file(profiles_path());

    let (_ok, _out) = run_oakmon(&[
        "--profile",
        "slowlink",
        "--interval",
        "9000",
        "http://127.0.0.1:1",
        "--dry-run",
    ]);
    let data = fs::read_to_string(profiles_path()).unwrap();
    assert!(data.contains("slowlink"));
    assert!(data.contains("9000"));

    // Loading by name alone picks the stored interval back up
    let (_ok2, out2) = run_oakmon(&["--profile", "slowlink", "--dry-run"]);
    assert!(
        out2.contains("9000"),
        "stored interval not applied on load: {out2}"
    );
}
