//! Staging-to-durable recording store.
//!
//! Payloads are written to a staging directory under a UUID name, then
//! moved into the recordings root under their validated caller-supplied
//! name. The staging file never outlives the request: it is either
//! renamed into place or removed on failure.

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::error::CoreError;
use crate::recordings::filename;

/// Suffix for in-progress staging files.
const STAGING_SUFFIX: &str = "part";

/// Filesystem store for finalized recordings.
///
/// Cheap to share behind an `Arc`; all state is the two directory paths.
#[derive(Debug)]
pub struct RecordingStore {
    root: PathBuf,
    staging_dir: PathBuf,
}

impl RecordingStore {
    /// Create a store over the given recordings root and staging directory.
    ///
    /// No I/O happens here; call [`ensure_dirs`](Self::ensure_dirs) before
    /// first use.
    pub fn new(root: impl Into<PathBuf>, staging_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            staging_dir: staging_dir.into(),
        }
    }

    /// The recordings root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the recordings root and staging directory (all intermediate
    /// segments) if absent.
    pub async fn ensure_dirs(&self) -> Result<(), CoreError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            CoreError::Internal(format!(
                "Failed to create recordings root {}: {e}",
                self.root.display()
            ))
        })?;
        fs::create_dir_all(&self.staging_dir).await.map_err(|e| {
            CoreError::Internal(format!(
                "Failed to create staging directory {}: {e}",
                self.staging_dir.display()
            ))
        })?;
        Ok(())
    }

    /// Returns `true` if the recordings root exists and is a directory.
    pub async fn is_healthy(&self) -> bool {
        fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Write `data` to a fresh staging file and return its path.
    ///
    /// The staging directory is re-created if it disappeared since startup.
    pub async fn stage(&self, data: &[u8]) -> Result<PathBuf, CoreError> {
        fs::create_dir_all(&self.staging_dir).await.map_err(|e| {
            CoreError::Internal(format!(
                "Failed to create staging directory {}: {e}",
                self.staging_dir.display()
            ))
        })?;

        let staging_path = self
            .staging_dir
            .join(format!("{}.{STAGING_SUFFIX}", Uuid::new_v4()));
        fs::write(&staging_path, data).await.map_err(|e| {
            CoreError::Internal(format!(
                "Failed to write staging file {}: {e}",
                staging_path.display()
            ))
        })?;
        Ok(staging_path)
    }

    /// Move a staged file into the recordings root under `name`.
    ///
    /// The name is validated first; nothing is written for a rejected name.
    /// The root is re-created if it disappeared since startup. An existing
    /// recording with the same name is overwritten. On any failure the
    /// staging file is removed before the error is returned.
    pub async fn commit(&self, staging_path: &Path, name: &str) -> Result<PathBuf, CoreError> {
        if let Err(e) = filename::validate(name) {
            self.discard(staging_path).await;
            return Err(e);
        }

        if let Err(e) = fs::create_dir_all(&self.root).await {
            self.discard(staging_path).await;
            return Err(CoreError::Internal(format!(
                "Failed to create recordings root {}: {e}",
                self.root.display()
            )));
        }

        let dest = self.root.join(name);
        if let Err(e) = rename_or_copy(staging_path, &dest).await {
            self.discard(staging_path).await;
            return Err(CoreError::Internal(format!(
                "Failed to move staged upload into {}: {e}",
                dest.display()
            )));
        }
        Ok(dest)
    }

    /// Best-effort removal of a staging file.
    pub async fn discard(&self, staging_path: &Path) {
        let _ = fs::remove_file(staging_path).await;
    }
}

/// Rename `src` to `dest`, falling back to copy + remove-source when the
/// two paths live on different filesystems (rename fails with `EXDEV`).
async fn rename_or_copy(src: &Path, dest: &Path) -> std::io::Result<()> {
    match fs::rename(src, dest).await {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            if fs::copy(src, dest).await.is_ok() {
                let _ = fs::remove_file(src).await;
                Ok(())
            } else {
                Err(rename_err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
