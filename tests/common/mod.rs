//! Shared fixtures for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use tempfile::TempDir;

pub const ADMIN_PASSWORD: &str = "secret";

/// A complete answer sheet with the given roles for
/// assaf-granit, yossi-shitrit and moshik-roth
pub fn answers(assaf: &str, yossi: &str, moshik: &str) -> Value {
    json!({
        "assaf-granit": assaf,
        "yossi-shitrit": yossi,
        "moshik-roth": moshik,
    })
}

/// Temporary working directory with its own data dir
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn data_dir(&self) -> std::path::PathBuf {
        self.dir.path().join("data")
    }

    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("chef-survey").unwrap();
        cmd.current_dir(self.dir.path())
            .env_remove("SURVEY_STORAGE_TYPE")
            .env_remove("SURVEY_CONFIG")
            .env_remove("SURVEY_ADMIN_PASSWORD")
            .env("SURVEY_STORAGE_DIR", self.data_dir());
        cmd
    }
}
