//! Filesystem save and load
//!
//! [`DocumentSink`] and [`DocumentSource`] are the seams between the editor and
//! wherever documents are stored. The filesystem implementations here back the
//! CLI; tests substitute in-memory doubles.

use crate::domain::{InformeError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// What happened to a save request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to this location
    Saved(PathBuf),

    /// The user (or the sink's policy) declined; nothing was written
    Cancelled,
}

impl SaveOutcome {
    /// Whether something was written
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved(_))
    }
}

/// Destination for exported documents
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Persist `payload` under (or near) `suggested_name`
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails. Declining to write is not an error
    /// and is reported as [`SaveOutcome::Cancelled`].
    async fn save(&self, payload: &[u8], suggested_name: &str) -> Result<SaveOutcome>;
}

/// Origin of imported documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Text of the picked document, or `None` when nothing was picked
    ///
    /// # Errors
    ///
    /// Returns an error when the pick succeeded but reading failed.
    async fn import_text(&self) -> Result<Option<String>>;
}

#[derive(Debug, Clone)]
enum SinkTarget {
    Directory(PathBuf),
    Path(PathBuf),
}

/// Writes documents to the local filesystem
///
/// An existing file is only replaced when `overwrite` is set. Otherwise the save
/// reports [`SaveOutcome::Cancelled`].
#[derive(Debug, Clone)]
pub struct FileSink {
    target: SinkTarget,
    overwrite: bool,
}

impl FileSink {
    /// Save into `dir` using the suggested name
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            target: SinkTarget::Directory(dir.into()),
            overwrite: false,
        }
    }

    /// Save to exactly `path`, ignoring the suggested name
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            target: SinkTarget::Path(path.into()),
            overwrite: false,
        }
    }

    /// Allow replacing an existing file
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Final location for a suggested name
    pub fn resolve(&self, suggested_name: &str) -> PathBuf {
        match &self.target {
            SinkTarget::Directory(dir) => dir.join(suggested_name),
            SinkTarget::Path(path) => path.clone(),
        }
    }
}

#[async_trait]
impl DocumentSink for FileSink {
    async fn save(&self, payload: &[u8], suggested_name: &str) -> Result<SaveOutcome> {
        let path = self.resolve(suggested_name);

        if !self.overwrite && tokio::fs::try_exists(&path).await? {
            tracing::warn!(path = %path.display(), "Refusing to overwrite existing file");
            return Ok(SaveOutcome::Cancelled);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&path, payload)
            .await
            .map_err(|e| InformeError::Io(format!("failed to write {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), bytes = payload.len(), "Document saved");
        Ok(SaveOutcome::Saved(path))
    }
}

/// Reads a document from a path on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: Option<PathBuf>,
}

impl FileSource {
    /// Read from `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A source with nothing picked
    pub fn none() -> Self {
        Self { path: None }
    }

    /// The picked path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn import_text(&self) -> Result<Option<String>> {
        let Some(path) = &self.path else {
            return Ok(None);
        };
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| InformeError::Io(format!("failed to read {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "Document read");
        Ok(Some(text))
    }
}
