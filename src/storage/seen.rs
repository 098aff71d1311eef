use crate::storage::traits::{SeenStore, StorageError, StorageResult};
use crate::storage::SeenUrls;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Seen set stored as a pretty-printed, sorted JSON array of strings
#[derive(Debug, Clone)]
pub struct JsonSeenStore {
    path: PathBuf,
}

impl JsonSeenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl SeenStore for JsonSeenStore {
    fn load(&self) -> StorageResult<SeenUrls> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No seen set at {}, starting empty", self.path.display());
                return Ok(SeenUrls::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let urls: Vec<String> = serde_json::from_str(&content)?;
        Ok(urls.into_iter().collect())
    }

    fn save(&self, seen: &SeenUrls) -> StorageResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        // Write next to the target and rename over it so readers never see
        // a half-written file
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        serde_json::to_writer_pretty(&mut tmp, seen)?;
        tmp.write_all(b"\n").map_err(|e| self.io_error(e))?;
        tmp.flush().map_err(|e| self.io_error(e))?;

        tmp.persist(&self.path).map_err(|e| StorageError::Persist {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("Saved {} seen URLs to {}", seen.len(), self.path.display());
        Ok(())
    }
}
