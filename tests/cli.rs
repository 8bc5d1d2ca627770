//! Tests of the `doc-templates` binary: exit codes and what it prints.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn doc_templates(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_doc-templates"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run doc-templates")
}

fn fixtures() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/data"))
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn build_prints_summary_and_writes_output() {
    let out = TempDir::new().unwrap();
    let result = doc_templates(&["build", "--source", arg(fixtures()), "--output", arg(out.path())]);

    assert!(result.status.success(), "{result:?}");
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("==> Building"), "{stdout}");
    assert!(stdout.contains("doc-templates.generated.ts"), "{stdout}");
    assert!(stdout.contains("json/report.json"), "{stdout}");
    assert!(stdout.contains("==> Build complete"), "{stdout}");
    assert!(out.path().join("ppt-themes.generated.ts").is_file());
}

#[test]
fn check_leaves_output_alone() {
    let out = TempDir::new().unwrap();
    let dist = out.path().join("dist");
    let result = doc_templates(&["check", "--source", arg(fixtures()), "--output", arg(&dist)]);

    assert!(result.status.success(), "{result:?}");
    assert!(String::from_utf8_lossy(&result.stdout).contains("==> Data is valid"));
    assert!(!dist.exists());
}

#[test]
fn malformed_descriptor_fails_with_path() {
    let data = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let bad = data.path().join("report/broken");
    fs::create_dir_all(&bad).unwrap();
    fs::write(bad.join("manifest.json"), "{ not json").unwrap();

    let result = doc_templates(&["build", "--source", arg(data.path()), "--output", arg(out.path())]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.starts_with("error: "), "{stderr}");
    assert!(stderr.contains("broken"), "{stderr}");
    assert!(stderr.contains("manifest.json"), "{stderr}");
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn invalid_config_fails() {
    let data = TempDir::new().unwrap();
    fs::write(data.path().join("config.toml"), "[layout]\nbogus = 1\n").unwrap();

    let result = doc_templates(&["check", "--source", arg(data.path())]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Config error"));
}

#[test]
fn gen_config_prints_parseable_toml() {
    let result = doc_templates(&["gen-config"]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("[layout]"));
    assert!(stdout.contains("[output]"));
    assert!(stdout.parse::<toml::Table>().is_ok(), "{stdout}");
}
