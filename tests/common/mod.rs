// tests/common/mod.rs
// Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::{NamedTempFile, TempDir};

pub const INFO_LINE: &str = "[2023-10-27 14:30:05] INFO: User logged in.";
pub const WARN_LINE: &str = "[2024-01-15 08:00:10] WARN: Disk space low.";
pub const ERROR_LINE: &str =
    "[2025-05-22 09:14:52] ERROR: Database connection failed. Retrying...";

/// Command for the built binary, isolated from any user or project config:
/// HOME, XDG_CONFIG_HOME and the working directory point at an empty temp dir.
fn loglab_command(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_loglab"));
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("RUST_LOG")
        .current_dir(home.path());
    cmd
}

/// Helper function to run loglab with given arguments and input via stdin
pub fn run_loglab_with_input(args: &[&str], input: &str) -> (String, String, i32) {
    let home = TempDir::new().expect("Failed to create temp home");
    let mut child = loglab_command(&home)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start loglab");

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(input.as_bytes())
            .expect("Failed to write to stdin");
    }

    let output = child.wait_with_output().expect("Failed to read output");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Helper function to run loglab with no stdin
pub fn run_loglab(args: &[&str]) -> (String, String, i32) {
    let home = TempDir::new().expect("Failed to create temp home");
    let output = loglab_command(&home)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute loglab");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Helper function to run loglab in a prepared home directory (for config tests)
pub fn run_loglab_in(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = loglab_command(home)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute loglab");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code().unwrap_or(-1),
    )
}

/// Write `content` to a temp file that lives as long as the returned handle
pub fn temp_file_with(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Path of a temp file as &str for command arguments
pub fn path_arg(file: &NamedTempFile) -> &str {
    file.path().to_str().expect("temp path should be UTF-8")
}

/// Parse the single floating point value printed by `loglab pi`
pub fn parse_estimate(stdout: &str) -> f64 {
    stdout
        .trim()
        .parse()
        .unwrap_or_else(|_| panic!("expected a float on stdout, got {:?}", stdout))
}
