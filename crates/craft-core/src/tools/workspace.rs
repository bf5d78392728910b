//! Sandboxed filesystem operations backing the agent file tools
//!
//! Stateless between calls and reentrant; concurrent calls against the same
//! path are last-writer-wins. Updates are full-content overwrites - callers
//! always supply complete file contents, never a patch.

use std::path::PathBuf;

use tokio::fs;

use super::sandbox::PathSandbox;
use crate::error::{Error, Result};

/// Sorted directory listing: subdirectories (suffixed with `/`) and files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

/// Filesystem primitives scoped to a [`PathSandbox`].
#[derive(Debug, Clone)]
pub struct FileWorkspace {
    sandbox: PathSandbox,
}

impl FileWorkspace {
    pub fn new(sandbox: PathSandbox) -> Self {
        Self { sandbox }
    }

    pub fn sandbox(&self) -> &PathSandbox {
        &self.sandbox
    }

    /// Create a new file, creating parent directories as needed. Fails if
    /// the target already exists.
    pub async fn create_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let absolute = self.sandbox.validate(path)?;

        if absolute.exists() {
            return Err(Error::AlreadyExists(path.to_string()));
        }

        if let Some(parent) = absolute.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&absolute, content).await?;

        Ok(absolute)
    }

    /// Read a file's full content.
    pub async fn read_file(&self, path: &str) -> Result<String> {
        let absolute = self.sandbox.validate(path)?;

        if !absolute.is_file() {
            return Err(Error::NotFound(path.to_string()));
        }

        Ok(fs::read_to_string(&absolute).await?)
    }

    /// Overwrite an existing file with complete new content. Fails if the
    /// target does not exist.
    pub async fn update_file(&self, path: &str, content: &str) -> Result<PathBuf> {
        let absolute = self.sandbox.validate(path)?;

        if !absolute.is_file() {
            return Err(Error::NotFound(path.to_string()));
        }

        fs::write(&absolute, content).await?;

        Ok(absolute)
    }

    /// Delete a file.
    pub async fn delete_file(&self, path: &str) -> Result<()> {
        let absolute = self.sandbox.validate(path)?;

        if !absolute.is_file() {
            return Err(Error::NotFound(path.to_string()));
        }

        fs::remove_file(&absolute).await?;

        Ok(())
    }

    /// List a directory: subdirectory names (suffixed with `/`) and file
    /// names, each sorted separately.
    pub async fn list_directory(&self, path: &str) -> Result<DirListing> {
        let absolute = self.sandbox.validate(path)?;

        if !absolute.is_dir() {
            return Err(Error::NotFound(path.to_string()));
        }

        let mut directories = Vec::new();
        let mut files = Vec::new();

        let mut entries = fs::read_dir(&absolute).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if entry.file_type().await?.is_dir() {
                directories.push(format!("{name}/"));
            } else {
                files.push(name);
            }
        }

        directories.sort();
        files.sort();

        Ok(DirListing { directories, files })
    }
}
