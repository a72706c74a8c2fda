//! TOML file persistence with optional git synchronization
//!
//! The whole tracker lives in one TOML file. Every save rewrites the file
//! and, when the file sits inside a git repository, commits it with an
//! operation-specific message. With `--sync-git` the remote is pulled
//! before loading and pushed on shutdown.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::daylog::DaylogData;
use crate::git_ops::GitOps;

pub struct Storage {
    file_path: PathBuf,
    git: GitOps,
    sync_git: bool,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>, sync_git: bool) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let git = GitOps::new(&file_path);
        Self {
            file_path,
            git,
            sync_git,
        }
    }

    /// Path of the data file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load tracker data, starting empty if the file does not exist yet
    pub fn load(&self) -> Result<DaylogData> {
        if self.sync_git {
            self.git
                .pull()
                .context("Failed to pull latest data from remote")?;
        }

        if !self.file_path.exists() {
            return Ok(DaylogData::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let data: DaylogData = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        Ok(data)
    }

    /// Save tracker data and commit it with the given message
    pub fn save_with_message(&self, data: &DaylogData, message: &str) -> Result<()> {
        let content = toml::to_string_pretty(data)?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;

        if self.git.is_git_managed() {
            self.git
                .commit(&self.file_path, message)
                .context("Failed to commit data file")?;
        }

        Ok(())
    }

    /// Push pending commits on shutdown when sync is enabled
    pub fn shutdown(&self) -> Result<()> {
        if self.sync_git && self.git.is_git_managed() {
            self.git.push().context("Failed to push data file")?;
        }
        Ok(())
    }
}
