//! File-system access used by the commands.
//!
//! Commands never touch `std::fs` directly; they go through a [`Resolver`] so
//! that the whole init flow can run against an in-memory tree in tests.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{PROJECT_FILE_NAME, PROJECT_FILE_SUFFIX};

pub trait Resolver {
    /// File names (not paths) of the entries in `dir`.
    fn read_directory(&self, dir: &str) -> Result<Vec<String>>;

    fn read(&self, path: &str) -> Result<String>;

    fn write(&self, path: &str, contents: &str) -> Result<()>;

    fn is_dir(&self, path: &str) -> bool;

    /// Paths of the project files in `dir`.
    fn project_files(&self, dir: &str) -> Result<Vec<String>> {
        Ok(self
            .read_directory(dir)?
            .into_iter()
            .filter(|f| f.ends_with(PROJECT_FILE_SUFFIX))
            .map(|f| join(dir, &f))
            .collect())
    }
}

pub fn join(dir: &str, file: &str) -> String {
    Path::new(dir).join(file).display().to_string()
}

/// Where a project file ends up for an optional `--output-path`.
pub fn project_file_path(resolver: &dyn Resolver, output_path: Option<&str>) -> String {
    match output_path {
        None => join(".", PROJECT_FILE_NAME),
        Some(p) if p.ends_with('/') || resolver.is_dir(p) => join(p, PROJECT_FILE_NAME),
        Some(p) => p.to_string(),
    }
}

/// Resolver backed by the local disk, relative to `root`.
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn current_dir() -> Self {
        Self::new(".")
    }

    fn full(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl Resolver for FsResolver {
    fn read_directory(&self, dir: &str) -> Result<Vec<String>> {
        let path = self.full(dir);
        let mut names = Vec::new();
        for entry in fs::read_dir(&path)
            .with_context(|| format!("Cannot list directory {}", path.display()))?
        {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, path: &str) -> Result<String> {
        let full = self.full(path);
        fs::read_to_string(&full).with_context(|| format!("Cannot read {}", full.display()))
    }

    fn write(&self, path: &str, contents: &str) -> Result<()> {
        let full = self.full(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory {}", parent.display()))?;
        }
        fs::write(&full, contents).with_context(|| format!("Cannot write {}", full.display()))
    }

    fn is_dir(&self, path: &str) -> bool {
        self.full(path).is_dir()
    }
}
