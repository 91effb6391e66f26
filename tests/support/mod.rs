use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use ht::task::Task;
use tempfile::TempDir;

/// A temp home for one test: isolated store file and config dir.
pub struct TestStore {
    dir: TempDir,
}

#[allow(dead_code)]
impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn store_path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Write a config file where the CLI will find it (XDG layout).
    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.config_dir().join("ht").join("config.toml");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Tasks currently in the store file, newest first.
    pub fn read_tasks(&self) -> Vec<Task> {
        let path = self.store_path();
        if !path.exists() {
            return Vec::new();
        }
        let contents = fs::read_to_string(&path).expect("failed to read store");
        serde_json::from_str(&contents).expect("store is not valid JSON")
    }

    /// A command wired to this test's store and config.
    pub fn cmd(&self) -> Command {
        let mut cmd = ht_cmd();
        cmd.env("HT_STORE", self.store_path());
        cmd.env("XDG_CONFIG_HOME", self.config_dir());
        cmd
    }
}

#[allow(dead_code)]
pub fn ht_cmd() -> Command {
    Command::cargo_bin("ht").expect("ht binary should build")
}
