//! Working tree
//!
//! The working tree is a flat directory of plain files. Subdirectories and
//! the repository directory are never listed.

use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::objects::blob::Blob;
use crate::errors::UserError;
use anyhow::Context;
use bytes::Bytes;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

pub const REPOSITORY_DIR: &str = ".sprig";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of working file `name`, if `name` is a plain file name
    fn file_path(&self, name: &str) -> Option<PathBuf> {
        let mut components = Path::new(name).components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(file_name)), None) if file_name != REPOSITORY_DIR => {
                Some(self.path.join(file_name))
            }
            _ => None,
        }
    }

    pub fn file_exists(&self, name: &str) -> bool {
        self.file_path(name).is_some_and(|path| path.is_file())
    }

    /// Names of every plain file in the working tree, sorted
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = WalkDir::new(&self.path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != REPOSITORY_DIR)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Bytes> {
        let path = self
            .file_path(name)
            .filter(|path| path.is_file())
            .ok_or(UserError::MissingFile)?;

        let content =
            std::fs::read(&path).with_context(|| format!("Failed to read file: {name}"))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, name: &str) -> anyhow::Result<Blob> {
        Ok(Blob::new(name.to_string(), self.read_file(name)?))
    }

    pub fn write_file(&self, name: &str, content: &[u8]) -> anyhow::Result<()> {
        let path = self
            .file_path(name)
            .with_context(|| format!("Invalid working file name: {name}"))?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open file: {name}"))?;
        file.write_all(content)
            .with_context(|| format!("Failed to write to file: {name}"))?;

        Ok(())
    }

    /// Delete working file `name` if it exists
    pub fn remove_file(&self, name: &str) -> anyhow::Result<()> {
        if let Some(path) = self.file_path(name)
            && path.is_file()
        {
            std::fs::remove_file(&path).with_context(|| format!("Failed to remove file: {name}"))?;
        }

        Ok(())
    }

    /// Apply a planned working-tree rewrite
    ///
    /// Deletions run before writes so a plan never observes its own output.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for name in migration.deletions() {
            self.remove_file(name)?;
        }

        for (name, content) in migration.writes() {
            self.write_file(name, content)?;
        }

        Ok(())
    }
}
