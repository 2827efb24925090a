//! # CyberGuardian Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test runs the
//! compiled `cyberguardian` binary with piped stdin and a throwaway config
//! file, so no user or project configuration on the test machine leaks in.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get CyberGuardian Command (`cyberguardian_cmd`)
///
/// An `assert_cmd::Command` pointing at the compiled binary for this test run.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn cyberguardian_cmd() -> Command {
    Command::cargo_bin("cyberguardian").expect("Failed to find cyberguardian binary for testing")
}

/// Writes `contents` as a config file inside a fresh temporary directory.
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("cyberguardian.toml");
    fs::write(&path, contents).expect("Failed to write temp config");
    (dir, path)
}

/// A command that types instantly, without colors, audio, or the final pause.
pub fn quiet_cmd(config_path: &Path) -> Command {
    let mut cmd = cyberguardian_cmd();
    cmd.arg("--config")
        .arg(config_path)
        .args(["--no-color", "--no-pause", "--no-audio", "--typing-delay", "0"]);
    cmd
}
