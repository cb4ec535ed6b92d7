//! Drives the `mockos` binary end to end.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Temporary working directory for package files.
struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    fn mockos(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mockos"));
        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("MOCKOS_SIZE");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    fn generate(&self, file: &Path, extra: &[&str]) -> Output {
        self.mockos()
            .arg("generate")
            .arg("--file")
            .arg(file)
            .args(["--os-version", "1.2.3", "--size", "1KB"])
            .args(extra)
            .output()
            .expect("failed to run mockos")
    }

    fn validate_json(&self, file: &Path) -> (bool, String) {
        let output = self
            .mockos()
            .arg("validate")
            .arg("--json")
            .arg(file)
            .output()
            .expect("failed to run mockos");
        (
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
        )
    }
}

#[test]
fn test_help_command() {
    let ctx = TestContext::new();
    let output = ctx.mockos().arg("--help").output().expect("failed to run mockos");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"));
}

#[test]
fn test_version_command() {
    let ctx = TestContext::new();
    let output = ctx.mockos().arg("--version").output().expect("failed to run mockos");
    assert!(output.status.success());
}

#[test]
fn generate_then_validate_succeeds() {
    let ctx = TestContext::new();
    let file = ctx.path("os.img");

    let output = ctx.generate(&file, &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(file.exists());

    let (ok, stdout) = ctx.validate_json(&file);
    assert!(ok);
    assert_eq!(stdout, r#"{"result":"ok","version":"1.2.3"}"#);
}

#[test]
fn generate_refuses_existing_file() {
    let ctx = TestContext::new();
    let file = ctx.path("os.img");
    std::fs::write(&file, b"keep me").unwrap();

    let output = ctx.generate(&file, &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(std::fs::read(&file).unwrap(), b"keep me");
}

#[test]
fn generate_rejects_bad_size() {
    let ctx = TestContext::new();
    let file = ctx.path("os.img");

    let output = ctx
        .mockos()
        .arg("generate")
        .arg("--file")
        .arg(&file)
        .args(["--os-version", "1.0", "--size", "lots"])
        .output()
        .expect("failed to run mockos");
    assert!(!output.status.success());
    assert!(!file.exists());
}

#[test]
fn incompatible_package_reports_protocol_error() {
    let ctx = TestContext::new();
    let file = ctx.path("incompatible.img");
    assert!(ctx.generate(&file, &["--incompatible"]).status.success());

    let (ok, stdout) = ctx.validate_json(&file);
    assert!(!ok);
    assert!(stdout.contains(r#""type":"INCOMPATIBLE""#), "{stdout}");
    assert!(stdout.contains(r#""detail":"Unsupported OS Version""#), "{stdout}");
}

#[test]
fn corrupted_package_reports_integrity_failure() {
    let ctx = TestContext::new();
    let file = ctx.path("os.img");
    assert!(ctx.generate(&file, &[]).status.success());

    let mut bytes = std::fs::read(&file).unwrap();
    // Inside the padding, well clear of the length prefixes.
    bytes[100] ^= 0xFF;
    std::fs::write(&file, &bytes).unwrap();

    let (ok, stdout) = ctx.validate_json(&file);
    assert!(!ok);
    assert!(stdout.contains(r#""type":"INTEGRITY_FAIL""#), "{stdout}");
}

#[test]
fn garbage_file_reports_parse_failure() {
    let ctx = TestContext::new();
    let file = ctx.path("garbage.img");
    std::fs::write(&file, [0xFFu8; 32]).unwrap();

    let (ok, stdout) = ctx.validate_json(&file);
    assert!(!ok);
    assert!(stdout.contains(r#""type":"PARSE_FAIL""#), "{stdout}");
}

#[test]
fn validate_shows_activation_fail_message() {
    let ctx = TestContext::new();
    let file = ctx.path("os.img");
    assert!(
        ctx.generate(&file, &["--activation-fail-message", "activation exploded"])
            .status
            .success()
    );

    let (ok, stdout) = ctx.validate_json(&file);
    assert!(ok);
    assert!(stdout.contains(r#""activation_fail_message":"activation exploded""#), "{stdout}");
}

#[test]
fn inspect_prints_fields_of_tampered_package() {
    let ctx = TestContext::new();
    let file = ctx.path("os.img");
    assert!(ctx.generate(&file, &[]).status.success());

    let mut bytes = std::fs::read(&file).unwrap();
    bytes[100] ^= 0xFF;
    std::fs::write(&file, &bytes).unwrap();

    let output = ctx
        .mockos()
        .arg("inspect")
        .arg(&file)
        .output()
        .expect("failed to run mockos");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1.2.3"));
    assert!(stdout.contains("cookiestring"));
    assert!(stdout.contains("digest mismatch"));
}

#[test]
fn non_utf8_version_flip_is_an_integrity_failure() {
    let ctx = TestContext::new();
    let file = ctx.path("os.img");
    assert!(ctx.generate(&file, &[]).status.success());

    let mut bytes = std::fs::read(&file).unwrap();
    // Byte 0 is the version length; "1.2.3" follows.
    bytes[1] ^= 0x80;
    std::fs::write(&file, &bytes).unwrap();

    let (ok, stdout) = ctx.validate_json(&file);
    assert!(!ok);
    assert!(stdout.contains(r#""type":"INTEGRITY_FAIL""#), "{stdout}");

    let output = ctx
        .mockos()
        .arg("inspect")
        .arg(&file)
        .output()
        .expect("failed to run mockos");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(".2.3"));
    assert!(stdout.contains("digest mismatch"));
}
