//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Path to the lazycount binary
pub fn lazycount_bin() -> String {
    std::env::var("CARGO_BIN_EXE_lazycount")
        .unwrap_or_else(|_| "target/release/lazycount".to_string())
}

/// A temporary config directory handed to the binary through
/// `LAZYCOUNT_CONFIG_DIR`, so tests never read or write the real config.
pub struct IsolatedConfig {
    dir: TempDir,
}

impl IsolatedConfig {
    /// Creates an empty config directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp config dir"),
        }
    }

    /// Creates a config directory holding `toml` as config.toml.
    pub fn with_config(toml: &str) -> Self {
        let isolated = Self::new();
        fs::write(isolated.config_file(), toml).expect("Failed to write config.toml");
        isolated
    }

    /// The config directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// The config file inside the directory.
    pub fn config_file(&self) -> std::path::PathBuf {
        self.dir.path().join("config.toml")
    }

    /// Builds a command for the binary with this config directory.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(lazycount_bin());
        cmd.env("LAZYCOUNT_CONFIG_DIR", self.dir.path());
        cmd.env_remove("RUST_LOG");
        cmd.args(args);
        cmd
    }

    /// Runs the binary with this config directory.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }
}

/// Runs the binary with a fresh isolated config directory.
pub fn run(args: &[&str]) -> Output {
    IsolatedConfig::new().run(args)
}

/// Parses stdout as JSON, failing the test with stderr on error.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Output should be JSON ({e}). stdout: {stdout} stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Asserts the process exited with `code`, showing stderr otherwise.
pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code. stdout: {} stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}
