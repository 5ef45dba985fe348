//! Workspace file storage.
//!
//! Each user's tasks, categories and team members live in one JSON file,
//! by default `<data dir>/taskwave/<user>.json` (for example
//! `~/.local/share/taskwave/<user>.json` on Linux).
//!
//! Synchronous methods use `std::fs`; the `_async` variants use `tokio::fs`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::debug;

use crate::Workspace;

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "taskwave";

/// Errors that can occur during workspace storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to determine the data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read workspace file '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write workspace file '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent storage for one user's [`Workspace`].
///
/// # Example
///
/// ```no_run
/// use taskwave_query::{Workspace, WorkspaceStore};
///
/// let store = WorkspaceStore::for_user("alice")?;
/// let workspace = store.load_or_default()?;
/// store.save(&workspace)?;
/// # Ok::<(), taskwave_query::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    path: PathBuf,
}

impl WorkspaceStore {
    /// Creates a store at the default data path for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the home directory cannot be determined.
    pub fn for_user(user_id: &str) -> Result<Self> {
        let path = Self::default_path(user_id)?;
        Ok(Self { path })
    }

    /// Creates a store backed by an explicit file.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default data path for `user_id`.
    ///
    /// Characters other than ASCII alphanumerics, `-` and `_` in the id are
    /// replaced with `_` so the id always maps to a single file name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path(user_id: &str) -> Result<PathBuf> {
        let project_dirs =
            ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or(StoreError::NoDataDir)?;
        Ok(project_dirs
            .data_dir()
            .join(format!("{}.json", file_stem(user_id))))
    }

    /// Returns the path to the workspace file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the workspace file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the workspace from disk.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` if the file cannot be read.
    /// - Returns `StoreError::Json` if the file contains invalid JSON.
    pub fn load(&self) -> Result<Workspace> {
        debug!(path = %self.path.display(), "loading workspace");
        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the workspace, returning a fresh one if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::ReadError` for I/O errors other than "file not found".
    /// - Returns `StoreError::Json` if the file contains invalid JSON.
    pub fn load_or_default(&self) -> Result<Workspace> {
        match self.load() {
            Ok(workspace) => Ok(workspace),
            Err(StoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "no workspace file, starting fresh");
                Ok(Workspace::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Saves the workspace atomically (temp file + rename).
    ///
    /// Creates the parent directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// - Returns `StoreError::CreateDirError` if the directory cannot be created.
    /// - Returns `StoreError::WriteError` if the file cannot be written.
    /// - Returns `StoreError::Json` if serialization fails.
    pub fn save(&self, workspace: &Workspace) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(workspace)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| StoreError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        debug!(path = %self.path.display(), tasks = workspace.tasks.len(), "saved workspace");
        Ok(())
    }

    /// Async equivalent of [`load()`](Self::load).
    ///
    /// # Errors
    ///
    /// Same as [`load()`](Self::load).
    pub async fn load_async(&self) -> Result<Workspace> {
        debug!(path = %self.path.display(), "loading workspace");
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Async equivalent of [`load_or_default()`](Self::load_or_default).
    ///
    /// # Errors
    ///
    /// Same as [`load_or_default()`](Self::load_or_default).
    pub async fn load_or_default_async(&self) -> Result<Workspace> {
        match self.load_async().await {
            Ok(workspace) => Ok(workspace),
            Err(StoreError::ReadError { ref source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!(path = %self.path.display(), "no workspace file, starting fresh");
                Ok(Workspace::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Async equivalent of [`save()`](Self::save).
    ///
    /// # Errors
    ///
    /// Same as [`save()`](Self::save).
    pub async fn save_async(&self, workspace: &Workspace) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::CreateDirError {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let json = serde_json::to_string_pretty(workspace)?;

        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|e| StoreError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StoreError::WriteError {
                path: self.path.clone(),
                source: e,
            })?;

        debug!(path = %self.path.display(), tasks = workspace.tasks.len(), "saved workspace");
        Ok(())
    }
}

fn file_stem(user_id: &str) -> String {
    user_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
