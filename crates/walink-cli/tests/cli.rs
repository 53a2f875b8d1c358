use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

const CONTACTS: &str = "Name,Phone 1 - Value,Website 1 - Value\n\
Ada,+91-98765-43210,https://example.com\n\
Grace,,https://example.com\n\
Linus,09876543211 ::: 022 1234,\n";

const UPDATED: &str = "Name,Phone 1 - Value,Website 1 - Value\n\
Ada,+91-98765-43210,https://wa.me/919876543210\n\
Grace,,\n\
Linus,09876543211 ::: 022 1234,https://wa.me/919876543211\n";

const NO_PHONE: &str = "Name,Website 1 - Value\nAda,https://example.com\n";

fn walink(config_home: &Path, args: &[&str]) -> Output {
    cargo_bin_cmd!("walink")
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run command")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn run_rewrites_links_and_skips_bad_files() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path().join("exports");
    fs::create_dir(&dir).expect("mkdir");
    fs::write(dir.join("good.csv"), CONTACTS).expect("write good");
    fs::write(dir.join("bad.csv"), NO_PHONE).expect("write bad");
    fs::write(dir.join("notes.txt"), "Phone 1 - Value\n1\n").expect("write notes");

    let output = walink(
        temp.path(),
        &["--json", "run", "--dir", dir.to_str().expect("dir")],
    );
    assert_eq!(output.status.code(), Some(4), "output: {:?}", output);

    assert_eq!(fs::read_to_string(dir.join("good.csv")).expect("good"), UPDATED);
    assert_eq!(fs::read_to_string(dir.join("bad.csv")).expect("bad"), NO_PHONE);

    let report = stdout_json(&output);
    let files = report["files"].as_array().expect("files");
    assert_eq!(files.len(), 2);
    assert!(files[0]["path"].as_str().expect("path").ends_with("bad.csv"));
    assert_eq!(files[0]["status"], "skipped");
    assert_eq!(files[0]["error"], "column 'Phone 1 - Value' not found");
    assert_eq!(files[1]["status"], "updated");
    assert_eq!(files[1]["summary"]["rows"], 3);
    assert_eq!(files[1]["summary"]["linked"], 2);
    assert_eq!(files[1]["summary"]["empty"], 1);

    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("1 of 2 files were not updated"));
}

#[test]
fn run_is_stable_on_second_pass() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.csv");
    fs::write(&path, CONTACTS).expect("write");

    let path_arg = path.to_str().expect("path");
    let first = walink(temp.path(), &["run", path_arg]);
    assert!(first.status.success(), "first run: {:?}", first);
    let second = walink(temp.path(), &["run", path_arg]);
    assert!(second.status.success(), "second run: {:?}", second);

    assert_eq!(fs::read_to_string(&path).expect("read"), UPDATED);
}

#[test]
fn run_dry_run_leaves_files_untouched() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.csv");
    fs::write(&path, CONTACTS).expect("write");

    let output = walink(
        temp.path(),
        &["--json", "run", "--dry-run", path.to_str().expect("path")],
    );
    assert!(output.status.success(), "output: {:?}", output);
    assert_eq!(fs::read_to_string(&path).expect("read"), CONTACTS);

    let report = stdout_json(&output);
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["files"][0]["status"], "dry-run");
}

#[test]
fn run_with_backup_keeps_original() {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("contacts.csv");
    fs::write(&path, CONTACTS).expect("write");

    let output = walink(
        temp.path(),
        &["--json", "run", "--backup", path.to_str().expect("path")],
    );
    assert!(output.status.success(), "output: {:?}", output);

    let report = stdout_json(&output);
    let backup = report["files"][0]["backup"].as_str().expect("backup path");
    assert!(backup.ends_with(".bak"));
    assert_eq!(fs::read_to_string(backup).expect("read backup"), CONTACTS);
    assert_eq!(fs::read_to_string(&path).expect("read"), UPDATED);
}

#[test]
fn run_reports_empty_directory() {
    let temp = TempDir::new().expect("temp dir");
    let output = walink(
        temp.path(),
        &["run", "--dir", temp.path().to_str().expect("dir")],
    );
    assert!(output.status.success(), "output: {:?}", output);
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("No input files found"));
}

#[test]
fn run_rejects_missing_directory() {
    let temp = TempDir::new().expect("temp dir");
    let missing = temp.path().join("missing");
    let output = walink(
        temp.path(),
        &["run", "--dir", missing.to_str().expect("dir")],
    );
    assert_eq!(output.status.code(), Some(3), "output: {:?}", output);
}

#[test]
fn run_uses_config_input_dir() {
    let temp = TempDir::new().expect("temp dir");
    let dir = temp.path().join("exports");
    fs::create_dir(&dir).expect("mkdir");
    fs::write(dir.join("contacts.CSV"), CONTACTS).expect("write");

    let config_dir = temp.path().join("walink");
    fs::create_dir(&config_dir).expect("mkdir config");
    fs::write(
        config_dir.join("config.toml"),
        format!("input_dir = {:?}\n", dir.to_str().expect("dir")),
    )
    .expect("write config");

    let output = walink(temp.path(), &["run"]);
    assert!(output.status.success(), "output: {:?}", output);
    assert_eq!(
        fs::read_to_string(dir.join("contacts.CSV")).expect("read"),
        UPDATED
    );
}

#[test]
fn run_rejects_unreadable_config() {
    let temp = TempDir::new().expect("temp dir");
    let config = temp.path().join("custom.toml");
    fs::write(&config, "extension = 5\n").expect("write config");

    let output = walink(
        temp.path(),
        &["--config", config.to_str().expect("config"), "run"],
    );
    assert_eq!(output.status.code(), Some(3), "output: {:?}", output);
}

#[test]
fn normalize_prints_json() {
    let temp = TempDir::new().expect("temp dir");
    let output = walink(
        temp.path(),
        &["--json", "normalize", "919876543210", "12345 ::: 9876543210", " "],
    );
    assert!(output.status.success(), "output: {:?}", output);

    let items = stdout_json(&output);
    let items = items.as_array().expect("array");
    assert_eq!(items.len(), 3);

    assert_eq!(items[0]["digits"], "9876543210");
    assert_eq!(items[0]["rule"], "country_code");
    assert_eq!(items[0]["note"], Value::Null);
    assert_eq!(items[0]["link"], "https://wa.me/919876543210");

    assert_eq!(items[1]["digits"], "12345");
    assert_eq!(items[1]["note"], "Unexpected normalized length: 5 digits.");

    assert_eq!(items[2]["digits"], "");
    assert_eq!(items[2]["note"], "Empty phone value");
    assert_eq!(items[2]["link"], "");
}
